//! Core module - Preferences and application infrastructure
//!
//! Holds the pieces every other module leans on but that have nothing to do
//! with chess rules: the error type for storage and serialization, the
//! persisted display preferences, and the key-value storage they live in.
//!
//! # Resources
//!
//! - [`Preferences`] - Piece style, board theme and the remembered square size
//! - [`PieceStyle`] / [`BoardTheme`] - The user-selectable display options
//!
//! # Persistence
//!
//! Preferences are read once when the session starts and written back
//! wholesale after each change. Storage failures never interrupt play; see
//! [`settings_persistence`].

pub mod error;
pub mod resources;
pub mod settings_persistence;

// Re-export commonly used items
pub use error::{CoreError, CoreResult};
pub use resources::*;
pub use settings_persistence::{
    load_preferences, save_preferences, FileStorage, KeyValueStorage, MemoryStorage,
    PREFERENCES_KEY,
};
