//! Local caching for LifeDash panels.
//!
//! Provides the key-value store abstraction, an injectable clock, the
//! per-domain freshness rules, the generic fallback loader every panel runs
//! through, and the favorites list.

pub mod clock;
pub mod favorites;
pub mod loader;
pub mod reading;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use favorites::Favorites;
pub use loader::{FallbackLoader, LoadError, Loaded, PanelSource, Provenance};
pub use reading::{CachedReading, Domain, ReadingCache};
pub use store::{KvStore, MemoryStore, SqliteStore};
