//! Pawn promotion interception
//!
//! When a pawn move reaches the back rank the committer does not play it
//! straight away. It stores a [`PendingPromotion`] and the session opens the
//! promotion prompt. The move is only applied once the player picks a piece.

use crate::game::oracle::RulesOracle;
use crate::game::types::{PieceKind, Square};

/// A promotion waiting for the player's choice
///
/// Holding one means the move has not been applied to the game yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
}

impl PendingPromotion {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

/// Check if moving the piece on `from` to `to` is a pawn reaching its back rank
pub fn is_promotion_move<O: RulesOracle + ?Sized>(oracle: &O, from: Square, to: Square) -> bool {
    match oracle.get(from) {
        Some(piece) => piece.kind == PieceKind::Pawn && to.rank == piece.color.back_rank(),
        None => false,
    }
}
