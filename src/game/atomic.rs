//! Atomic capture explosion
//!
//! In atomic chess a capture detonates the destination square: the capturing
//! piece, the captured piece and every non-pawn piece on the surrounding squares
//! leave the board. Pawns only die when they stand on the destination itself.
//!
//! The oracle plays ordinary chess; this module applies the blast afterwards and
//! rolls the move back through the oracle's undo when the blast would destroy
//! the mover's own king.

use tracing::{debug, info};

use crate::game::error::{GameError, GameResult};
use crate::game::oracle::{MoveRecord, RulesOracle};
use crate::game::types::{Piece, PieceKind, Square};

/// Outcome of a detonation that was allowed to stand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explosion {
    pub center: Square,
    /// Pieces taken off the board, destination first
    pub removed: Vec<(Square, Piece)>,
    pub opponent_king_destroyed: bool,
}

/// Destination plus its up-to-8 neighbors, clipped to the board
pub fn blast_neighborhood(center: Square) -> Vec<Square> {
    let mut area = vec![center];
    for file_delta in -1..=1 {
        for rank_delta in -1..=1 {
            if file_delta == 0 && rank_delta == 0 {
                continue;
            }
            if let Some(square) = center.offset(file_delta, rank_delta) {
                area.push(square);
            }
        }
    }
    area
}

/// Squares whose pieces the blast destroys
fn kill_set<O: RulesOracle + ?Sized>(oracle: &O, center: Square) -> Vec<(Square, Piece)> {
    blast_neighborhood(center)
        .into_iter()
        .filter_map(|square| oracle.get(square).map(|piece| (square, piece)))
        .filter(|(square, piece)| *square == center || piece.kind != PieceKind::Pawn)
        .collect()
}

/// Apply the explosion of an already-played capture
///
/// The kill set is inspected before anything is removed. If it contains the
/// mover's king, or if the removals leave a board the oracle cannot continue
/// from while both kings survive, the move is undone and reported as
/// [`GameError::SelfDestructiveExplosion`].
pub fn detonate<O: RulesOracle + ?Sized>(
    oracle: &mut O,
    played: &MoveRecord,
) -> GameResult<Explosion> {
    let center = played.to;
    let victims = kill_set(oracle, center);

    let own_king = victims
        .iter()
        .any(|(_, p)| p.kind == PieceKind::King && p.color == played.color);
    let opponent_king = victims
        .iter()
        .any(|(_, p)| p.kind == PieceKind::King && p.color != played.color);

    if own_king {
        oracle.undo();
        info!("[ATOMIC] {} would destroy the mover's king, rolled back", played.san);
        return Err(GameError::SelfDestructiveExplosion { center });
    }

    for (square, _) in &victims {
        oracle.remove(*square);
    }

    if !opponent_king && !oracle.is_valid_position() {
        oracle.undo();
        info!("[ATOMIC] {} would expose the mover's king, rolled back", played.san);
        return Err(GameError::SelfDestructiveExplosion { center });
    }

    debug!(
        "[ATOMIC] {} exploded {} piece(s) around {}",
        played.san,
        victims.len(),
        center
    );
    Ok(Explosion {
        center,
        removed: victims,
        opponent_king_destroyed: opponent_king,
    })
}
