//! Render reconciler
//!
//! Brings the surface back in line with the oracle after every commit. The
//! piece layer is always repainted in full: each square is cleared, then a
//! node is placed wherever the oracle reports a piece.

use tracing::debug;

use crate::core::resources::PieceStyle;
use crate::game::mode::Mode;
use crate::game::oracle::{MoveRecord, RulesOracle};
use crate::game::status::status_line;
use crate::game::types::{PieceColor, Square};
use crate::rendering::glyphs::glyph;
use crate::rendering::surface::{BoardSurface, MoveRow};

/// Clear every square and re-place pieces from the oracle
pub fn repaint_board<O, S>(surface: &mut S, oracle: &O, style: PieceStyle)
where
    O: RulesOracle + ?Sized,
    S: BoardSurface + ?Sized,
{
    let mut placed = 0;
    for square in Square::all() {
        surface.clear_square(square);
        if let Some(piece) = oracle.get(square) {
            surface.place_piece(square, piece, glyph(style, piece));
            placed += 1;
        }
    }
    debug!("[RENDER] Repainted board with {} pieces", placed);
}

/// Move table rows for a history, last move flagged as current
pub fn move_rows(history: &[MoveRecord]) -> Vec<MoveRow> {
    let mut rows: Vec<MoveRow> = Vec::new();
    for record in history {
        let needs_row = match (rows.last(), record.color) {
            (None, _) => true,
            (Some(_), PieceColor::White) => true,
            (Some(row), PieceColor::Black) => row.black.is_some(),
        };
        if needs_row {
            rows.push(MoveRow {
                number: rows.len() + 1,
                ..MoveRow::default()
            });
        }
        if let Some(row) = rows.last_mut() {
            match record.color {
                PieceColor::White => row.white = Some(record.san.clone()),
                PieceColor::Black => row.black = Some(record.san.clone()),
            }
        }
    }
    if let (Some(row), Some(last)) = (rows.last_mut(), history.last()) {
        row.current = Some(last.color);
    }
    rows
}

/// Full reconcile: piece layer, move table and status line
pub fn reconcile<O, S>(surface: &mut S, oracle: &O, mode: Mode, style: PieceStyle)
where
    O: RulesOracle + ?Sized,
    S: BoardSurface + ?Sized,
{
    repaint_board(surface, oracle, style);
    surface.set_move_rows(&move_rows(oracle.history()));
    surface.set_status(&status_line(mode, oracle));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::PieceKind;

    fn record(color: PieceColor, san: &str) -> MoveRecord {
        MoveRecord {
            color,
            piece: PieceKind::Pawn,
            from: "a2".parse().unwrap(),
            to: "a3".parse().unwrap(),
            captured: None,
            promotion: None,
            en_passant: false,
            castle: false,
            san: san.to_string(),
        }
    }

    #[test]
    fn test_empty_history_has_no_rows() {
        assert!(move_rows(&[]).is_empty());
    }

    #[test]
    fn test_rows_pair_moves() {
        let history = [
            record(PieceColor::White, "e4"),
            record(PieceColor::Black, "e5"),
            record(PieceColor::White, "Nf3"),
        ];
        let rows = move_rows(&history);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].white.as_deref(), Some("e4"));
        assert_eq!(rows[0].black.as_deref(), Some("e5"));
        assert_eq!(rows[0].current, None);
        assert_eq!(rows[1].number, 2);
        assert_eq!(rows[1].white.as_deref(), Some("Nf3"));
        assert_eq!(rows[1].black, None);
        assert_eq!(rows[1].current, Some(PieceColor::White));
    }

    #[test]
    fn test_black_first_leaves_white_cell_empty() {
        let rows = move_rows(&[record(PieceColor::Black, "e5"), record(PieceColor::White, "d4")]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].white, None);
        assert_eq!(rows[0].black.as_deref(), Some("e5"));
        assert_eq!(rows[1].white.as_deref(), Some("d4"));
    }
}
