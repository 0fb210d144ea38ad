//! Display surface contract
//!
//! The session renders through a [`BoardSurface`]: a retained layer of 64
//! square nodes (piece plus marks), floating ghost pieces used while dragging
//! or animating, the status line, the move table and the promotion prompt.
//! The surface stores what it is told and never decides anything itself.
//!
//! [`crate::rendering::scene::Scene`] is the in-memory implementation.

use crate::game::types::{Piece, PieceColor, PieceKind, Square};
use crate::input::geometry::Point;
use crate::rendering::board_theme::Palette;

/// Handle of a floating ghost piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GhostId(pub u64);

/// Highlight drawn on a square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// The selected piece's square
    Origin,
    /// Legal quiet destination
    Destination,
    /// Legal capturing destination
    Capture,
}

/// One row of the move table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveRow {
    /// Full-move number, starting at 1
    pub number: usize,
    pub white: Option<String>,
    pub black: Option<String>,
    /// Side whose move in this row is the last one played
    pub current: Option<PieceColor>,
}

/// A promotion choice offered to the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionChoice {
    pub kind: PieceKind,
    pub glyph: &'static str,
}

/// Errors reported by a surface
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The host refused to enter or leave fullscreen
    #[error("Fullscreen request denied")]
    FullscreenDenied,
}

/// Rendering target driven by the interaction session
pub trait BoardSurface {
    /// Remove the piece node and every mark from a square
    fn clear_square(&mut self, square: Square);

    /// Insert a piece node on a square
    fn place_piece(&mut self, square: Square, piece: Piece, glyph: &'static str);

    /// Hide or show the piece node on a square, keeping it in place
    fn set_piece_hidden(&mut self, square: Square, hidden: bool);

    /// Opacity of the piece node on a square, 0.0 to 1.0
    fn set_piece_opacity(&mut self, square: Square, opacity: f32);

    fn add_mark(&mut self, square: Square, mark: Mark);

    /// Remove all marks from every square
    fn clear_marks(&mut self);

    /// Float a piece glyph centered on a point
    fn spawn_ghost(&mut self, piece: Piece, glyph: &'static str, center: Point) -> GhostId;

    fn move_ghost(&mut self, ghost: GhostId, center: Point);

    fn remove_ghost(&mut self, ghost: GhostId);

    fn set_status(&mut self, text: &str);

    fn set_move_rows(&mut self, rows: &[MoveRow]);

    fn show_promotion_prompt(&mut self, color: PieceColor, choices: &[PromotionChoice]);

    fn hide_promotion_prompt(&mut self);

    fn apply_palette(&mut self, palette: Palette);

    /// Edge length of one square in pixels
    fn set_square_size(&mut self, size: u32);

    /// Ask the host to enter or leave fullscreen
    ///
    /// A granted request is confirmed later through
    /// [`crate::game::session::InteractionSession::on_fullscreen_change`].
    fn request_fullscreen(&mut self, enter: bool) -> Result<(), SurfaceError>;
}
