//! Selection state for tap-to-move
//!
//! Tracks the single selected square and the legal destinations highlighted
//! for it. Selection is only ever set for a piece of the side to move, and is
//! cleared whenever a drag begins.

use crate::game::oracle::LegalMove;
use crate::game::types::Square;

/// A highlighted destination of the selected piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub square: Square,
    pub capture: bool,
}

/// Currently selected square and its legal destinations
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    pub selected: Option<Square>,
    pub destinations: Vec<Destination>,
}

impl Selection {
    /// Select a square with the oracle's legal moves from it
    ///
    /// Promotion moves appear once per promotion piece in the oracle's list;
    /// each target square is highlighted only once.
    pub fn select(&mut self, square: Square, moves: &[LegalMove]) {
        self.selected = Some(square);
        self.destinations.clear();
        for m in moves {
            if !self.destinations.iter().any(|d| d.square == m.to) {
                self.destinations.push(Destination {
                    square: m.to,
                    capture: m.capture,
                });
            }
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.destinations.clear();
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_destination(&self, square: Square) -> bool {
        self.destinations.iter().any(|d| d.square == square)
    }
}
