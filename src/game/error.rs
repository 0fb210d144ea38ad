//! Error types for game module
//!
//! Provides custom error types for move validation, promotion handling and
//! game setup. None of them is fatal: the session recovers locally from each.

use crate::game::types::{PieceKind, Square};

/// Errors that can occur in game logic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The rules oracle rejected the move
    #[error("Illegal move: {from}{to}")]
    IllegalMove { from: Square, to: Square },

    /// Atomic capture whose blast would destroy the mover's own king
    #[error("Self-destructive explosion at {center}")]
    SelfDestructiveExplosion { center: Square },

    /// The user dismissed the promotion prompt
    #[error("Promotion cancelled for {from}{to}")]
    PromotionCancelled { from: Square, to: Square },

    /// A piece a pawn cannot promote to
    #[error("Cannot promote to {kind:?}")]
    InvalidPromotionPiece { kind: PieceKind },

    /// A promotion choice arrived with no promotion pending
    #[error("No promotion is pending")]
    NoPendingPromotion,

    /// Start position string could not be turned into a game
    #[error("Invalid start position '{fen}': {reason}")]
    InvalidStartPosition { fen: String, reason: String },

    /// Text that is not a square code
    #[error("Invalid square '{input}'")]
    InvalidSquare { input: String },

    /// Text that is not a coordinate move (`e2e4`, `e7e8q`)
    #[error("Invalid move text '{input}'")]
    InvalidMoveText { input: String },
}

impl GameError {
    /// Whether the error is reported to the player as an illegal move
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            GameError::IllegalMove { .. } | GameError::SelfDestructiveExplosion { .. }
        )
    }
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
