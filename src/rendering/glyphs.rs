//! Piece glyph tables
//!
//! Every piece style draws pieces as text. The figurine styles share the
//! Unicode chess symbols; `letters` uses FEN letters and `minimal` draws only
//! the color.

use crate::core::resources::PieceStyle;
use crate::game::types::{Piece, PieceColor, PieceKind};

const WHITE_FIGURINES: [&str; 6] = ["♙", "♘", "♗", "♖", "♕", "♔"];
const BLACK_FIGURINES: [&str; 6] = ["♟", "♞", "♝", "♜", "♛", "♚"];
const WHITE_LETTERS: [&str; 6] = ["P", "N", "B", "R", "Q", "K"];
const BLACK_LETTERS: [&str; 6] = ["p", "n", "b", "r", "q", "k"];

fn slot(kind: PieceKind) -> usize {
    match kind {
        PieceKind::Pawn => 0,
        PieceKind::Knight => 1,
        PieceKind::Bishop => 2,
        PieceKind::Rook => 3,
        PieceKind::Queen => 4,
        PieceKind::King => 5,
    }
}

/// Text drawn for a piece in the given style
pub fn glyph(style: PieceStyle, piece: Piece) -> &'static str {
    let white = piece.color == PieceColor::White;
    match style {
        PieceStyle::Classic | PieceStyle::Fantasy | PieceStyle::Emoji => {
            let table = if white { &WHITE_FIGURINES } else { &BLACK_FIGURINES };
            table[slot(piece.kind)]
        }
        PieceStyle::Letters => {
            let table = if white { &WHITE_LETTERS } else { &BLACK_LETTERS };
            table[slot(piece.kind)]
        }
        PieceStyle::Minimal => {
            if white {
                "○"
            } else {
                "●"
            }
        }
    }
}
