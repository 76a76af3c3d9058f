//! Crypto market panel: CoinGecko top-20 list, sparklines and favorites.

pub mod provider;
pub mod sparkline;
pub mod types;
pub mod view;

pub use provider::{CoinGeckoClient, CryptoSource};
pub use types::{fallback_coins, CoinMarket, Sparkline};
pub use view::{CoinRow, CryptoView, NO_FAVORITES};
