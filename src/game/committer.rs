//! Move validation and commit
//!
//! Single entry point for every move attempt, whether it came from a drop, a
//! tap or a promotion choice. The committer asks the oracle, intercepts pawn
//! promotions, applies atomic explosions and reports the terminal state.

use tracing::{debug, info};

use crate::game::atomic::{self, Explosion};
use crate::game::error::{GameError, GameResult};
use crate::game::mode::RuleFlags;
use crate::game::oracle::{MoveRecord, MoveRequest, RulesOracle};
use crate::game::promotion::{is_promotion_move, PendingPromotion};
use crate::game::status::{evaluate_outcome, GameOutcome};
use crate::game::types::{PieceKind, Square};

/// A move that now stands in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedMove {
    pub record: MoveRecord,
    /// Set for atomic captures
    pub explosion: Option<Explosion>,
    /// Terminal state reached by this move
    pub outcome: Option<GameOutcome>,
}

/// Result of a successful move attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    Applied(CommittedMove),
    /// Pawn reached the back rank; waiting for the promotion choice
    Deferred(PendingPromotion),
}

/// Attempt the move `from` → `to`
///
/// Without an explicit `promotion` a pawn reaching its back rank is deferred
/// and the oracle is not touched. On any error the oracle state is exactly
/// what it was before the call.
pub fn commit_move<O: RulesOracle + ?Sized>(
    oracle: &mut O,
    rules: RuleFlags,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> GameResult<Commit> {
    if promotion.is_none() && is_promotion_move(oracle, from, to) {
        let can_promote = oracle
            .moves_from(from)
            .iter()
            .any(|m| m.to == to && m.promotion.is_some());
        if !can_promote {
            debug!("[COMMIT] {}{} is not a legal promotion", from, to);
            return Err(GameError::IllegalMove { from, to });
        }
        info!("[COMMIT] Promotion pending for {}{}", from, to);
        return Ok(Commit::Deferred(PendingPromotion::new(from, to)));
    }

    let request = MoveRequest::new(from, to).with_promotion(promotion.unwrap_or(PieceKind::Queen));
    let Some(record) = oracle.make_move(request) else {
        debug!("[COMMIT] Oracle rejected {}{}", from, to);
        return Err(GameError::IllegalMove { from, to });
    };

    let explosion = if rules.atomic && record.is_capture() {
        Some(atomic::detonate(oracle, &record)?)
    } else {
        None
    };

    let outcome = evaluate_outcome(oracle, record.color, explosion.as_ref());
    info!("[COMMIT] {} played {}", record.color.name(), record.san);
    Ok(Commit::Applied(CommittedMove {
        record,
        explosion,
        outcome,
    }))
}
