//! Game outcome tracking and status text
//!
//! Turns oracle queries into the status line shown under the board:
//!
//! - **Running game**: `"Atomic • White to move"`, with `" (check)"` when in check
//! - **Explosion**: `"Atomic • Black wins by explosion!"`
//! - **Checkmate**: `"Standard • Game over: White wins by checkmate"`
//! - **Draws**: `"… Game over: Draw (stalemate)"` or `"… Game over: Draw"`

use crate::game::atomic::Explosion;
use crate::game::mode::Mode;
use crate::game::oracle::RulesOracle;
use crate::game::types::{PieceColor, PieceKind, Square};

/// Message shown when a tap-move is rejected
pub const ILLEGAL_MOVE_MESSAGE: &str = "Illegal move.";

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The winner blew up the opposing king
    Explosion { winner: PieceColor },
    Checkmate { winner: PieceColor },
    Stalemate,
    /// Insufficient material, fifty-move rule or repetition
    Draw,
}

impl GameOutcome {
    pub fn winner(self) -> Option<PieceColor> {
        match self {
            GameOutcome::Explosion { winner } | GameOutcome::Checkmate { winner } => Some(winner),
            GameOutcome::Stalemate | GameOutcome::Draw => None,
        }
    }
}

/// Terminal state after a committed move, if any
///
/// An explosion that destroyed the opposing king wins for the mover before any
/// other condition is looked at.
pub fn evaluate_outcome<O: RulesOracle + ?Sized>(
    oracle: &O,
    mover: PieceColor,
    explosion: Option<&Explosion>,
) -> Option<GameOutcome> {
    if explosion.is_some_and(|e| e.opponent_king_destroyed) {
        return Some(GameOutcome::Explosion { winner: mover });
    }
    current_outcome(oracle)
}

/// Terminal state of the game as the oracle reports it
///
/// A board with a missing king is attributed to the side whose king survives.
pub fn current_outcome<O: RulesOracle + ?Sized>(oracle: &O) -> Option<GameOutcome> {
    if !oracle.is_game_over() {
        return None;
    }
    if oracle.is_checkmate() {
        return Some(GameOutcome::Checkmate {
            winner: oracle.turn().opposite(),
        });
    }
    if oracle.is_stalemate() {
        return Some(GameOutcome::Stalemate);
    }
    if oracle.is_draw() {
        return Some(GameOutcome::Draw);
    }
    surviving_king(oracle).map(|winner| GameOutcome::Explosion { winner })
}

fn surviving_king<O: RulesOracle + ?Sized>(oracle: &O) -> Option<PieceColor> {
    let mut kings = Square::all()
        .filter_map(|square| oracle.get(square))
        .filter(|piece| piece.kind == PieceKind::King)
        .map(|piece| piece.color);
    match (kings.next(), kings.next()) {
        (Some(color), None) => Some(color),
        _ => None,
    }
}

/// Status line for a running game
pub fn turn_status<O: RulesOracle + ?Sized>(mode: Mode, oracle: &O) -> String {
    let mut msg = format!("{} • {} to move", mode.label(), oracle.turn().name());
    if oracle.is_check() {
        msg.push_str(" (check)");
    }
    msg
}

/// Status line announcing a finished game
pub fn outcome_status(mode: Mode, outcome: GameOutcome) -> String {
    let label = mode.label();
    match outcome {
        GameOutcome::Explosion { winner } => {
            format!("{label} • {} wins by explosion!", winner.name())
        }
        GameOutcome::Checkmate { winner } => {
            format!("{label} • Game over: {} wins by checkmate", winner.name())
        }
        GameOutcome::Stalemate => format!("{label} • Game over: Draw (stalemate)"),
        GameOutcome::Draw => format!("{label} • Game over: Draw"),
    }
}

/// Status line for whatever state the game is in
pub fn status_line<O: RulesOracle + ?Sized>(mode: Mode, oracle: &O) -> String {
    match current_outcome(oracle) {
        Some(outcome) => outcome_status(mode, outcome),
        None => turn_status(mode, oracle),
    }
}
