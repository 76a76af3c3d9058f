//! Presentation layer: panel states, dashboard orchestration and the text
//! and HTML renderers.

pub mod dashboard;
pub mod render;
pub mod services;
pub mod state;
pub mod view;

pub use dashboard::Dashboard;
pub use services::{request_load, Panel, PanelMessage, PanelServices};
pub use state::PanelState;
pub use view::{DashboardView, PanelView};
