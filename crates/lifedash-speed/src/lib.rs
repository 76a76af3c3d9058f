//! Simulated internet speed test: phased progress, country-scaled results
//! and a one-day result cache. Nothing here touches the network.

pub mod result;
pub mod runner;
pub mod view;

pub use result::{country_factor, format_speed, isp_name, SpeedGrade, SpeedResult};
pub use runner::{Phase, Progress, SpeedHistory, SpeedTest};
pub use view::{SpeedFigure, SpeedView};
