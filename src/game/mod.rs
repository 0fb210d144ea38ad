//! Chess game logic module - Rules, variants and the interaction session
//!
//! Chess legality is delegated to a [`RulesOracle`]; this module adds what the
//! oracle does not know about: atomic explosions, Chess960 start positions,
//! promotion interception and the interactive session that ties pointer
//! input, animation and rendering together.
//!
//! # Module Organization
//!
//! - `types` - Squares and pieces
//! - `oracle` / `engine` - The oracle contract and its `shakmaty` implementation
//! - `mode` - Standard, Atomic and Chess960 with their rule flags
//! - `committer` - The single path every move attempt goes through
//! - `atomic` - Capture explosions with rollback
//! - `chess960` - Start position generation
//! - `selection` / `promotion` - Tap-to-move and promotion state
//! - `status` - Terminal outcomes and status text
//! - `pgn` - Export
//! - `session` - [`InteractionSession`], one method per host event

pub mod atomic;
pub mod chess960;
pub mod committer;
pub mod engine;
pub mod error;
pub mod mode;
pub mod oracle;
pub mod pgn;
pub mod promotion;
pub mod selection;
pub mod session;
pub mod status;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use engine::ShakmatyOracle;
pub use error::{GameError, GameResult};
pub use mode::Mode;
pub use oracle::RulesOracle;
pub use session::InteractionSession;
pub use types::{Piece, PieceColor, PieceKind, Square};
