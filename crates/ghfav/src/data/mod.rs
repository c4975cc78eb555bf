//! Data persistence
//!
//! Handles favorites, settings, and the key-value stores behind them.

pub mod favorites;
pub mod settings;
pub mod storage;
pub mod types;

// Re-export common types
pub use favorites::FavoritesStore;
pub use settings::Settings;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use types::UserRecord;
