//! In-memory board surface
//!
//! [`Scene`] keeps everything the session draws in plain data so tests and the
//! command-line host can inspect it. It also counts ghost spawns, which is how
//! tests tell a tap from a drag.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;

use crate::game::types::{Piece, PieceColor, Square};
use crate::input::geometry::Point;
use crate::rendering::board_theme::Palette;
use crate::rendering::surface::{
    BoardSurface, GhostId, Mark, MoveRow, PromotionChoice, SurfaceError,
};

/// A piece node on a square
#[derive(Debug, Clone, PartialEq)]
pub struct PieceNode {
    pub piece: Piece,
    pub glyph: &'static str,
    pub hidden: bool,
    pub opacity: f32,
}

/// A floating piece
#[derive(Debug, Clone, PartialEq)]
pub struct Ghost {
    pub piece: Piece,
    pub glyph: &'static str,
    pub center: Point,
}

/// Open promotion prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionPrompt {
    pub color: PieceColor,
    pub choices: Vec<PromotionChoice>,
}

/// Retained in-memory rendering of the board
#[derive(Debug, Default)]
pub struct Scene {
    pieces: HashMap<Square, PieceNode>,
    marks: HashMap<Square, HashSet<Mark>>,
    ghosts: BTreeMap<GhostId, Ghost>,
    next_ghost: u64,
    ghosts_spawned: u64,
    status: String,
    rows: Vec<MoveRow>,
    prompt: Option<PromotionPrompt>,
    palette: Option<Palette>,
    square_size: u32,
    fullscreen_denied: bool,
    fullscreen_requests: Vec<bool>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scene whose host refuses fullscreen
    pub fn denying_fullscreen() -> Self {
        Self {
            fullscreen_denied: true,
            ..Self::default()
        }
    }

    pub fn piece(&self, square: Square) -> Option<&PieceNode> {
        self.pieces.get(&square)
    }

    /// Piece node on a square that is currently shown
    pub fn visible_piece(&self, square: Square) -> Option<Piece> {
        self.pieces
            .get(&square)
            .filter(|node| !node.hidden)
            .map(|node| node.piece)
    }

    pub fn marks(&self, square: Square) -> Vec<Mark> {
        let mut marks: Vec<Mark> = self
            .marks
            .get(&square)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        marks.sort_by_key(|mark| *mark as u8);
        marks
    }

    pub fn has_mark(&self, square: Square, mark: Mark) -> bool {
        self.marks.get(&square).is_some_and(|set| set.contains(&mark))
    }

    /// Number of squares carrying at least one mark
    pub fn marked_squares(&self) -> usize {
        self.marks.values().filter(|set| !set.is_empty()).count()
    }

    pub fn ghosts(&self) -> impl Iterator<Item = (&GhostId, &Ghost)> {
        self.ghosts.iter()
    }

    pub fn ghost(&self, id: GhostId) -> Option<&Ghost> {
        self.ghosts.get(&id)
    }

    pub fn ghost_count(&self) -> usize {
        self.ghosts.len()
    }

    /// Ghosts created since the scene was built
    pub fn ghosts_spawned(&self) -> u64 {
        self.ghosts_spawned
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn move_rows(&self) -> &[MoveRow] {
        &self.rows
    }

    pub fn promotion_prompt(&self) -> Option<&PromotionPrompt> {
        self.prompt.as_ref()
    }

    pub fn palette(&self) -> Option<Palette> {
        self.palette
    }

    pub fn square_size(&self) -> u32 {
        self.square_size
    }

    /// Fullscreen requests the session made, `true` for enter
    pub fn fullscreen_requests(&self) -> &[bool] {
        &self.fullscreen_requests
    }

    /// Text diagram of the visible pieces, rank 8 first
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (i, square) in Square::all().enumerate() {
            if i % 8 == 0 {
                let _ = write!(out, "{} ", square.rank.to_number());
            }
            let cell = match self.pieces.get(&square) {
                Some(node) if !node.hidden => node.glyph,
                _ => ".",
            };
            out.push_str(cell);
            out.push(if i % 8 == 7 { '\n' } else { ' ' });
        }
        out.push_str("  a b c d e f g h\n");
        out
    }

    /// Move table as text, current move marked with `*`
    pub fn render_moves(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let cell = |san: &Option<String>, color| {
                let mark = if row.current == Some(color) { "*" } else { "" };
                format!("{}{}", san.as_deref().unwrap_or("..."), mark)
            };
            let _ = writeln!(
                out,
                "{:>3}. {:<10} {}",
                row.number,
                cell(&row.white, PieceColor::White),
                cell(&row.black, PieceColor::Black)
            );
        }
        out
    }
}

impl BoardSurface for Scene {
    fn clear_square(&mut self, square: Square) {
        self.pieces.remove(&square);
        self.marks.remove(&square);
    }

    fn place_piece(&mut self, square: Square, piece: Piece, glyph: &'static str) {
        self.pieces.insert(
            square,
            PieceNode {
                piece,
                glyph,
                hidden: false,
                opacity: 1.0,
            },
        );
    }

    fn set_piece_hidden(&mut self, square: Square, hidden: bool) {
        if let Some(node) = self.pieces.get_mut(&square) {
            node.hidden = hidden;
        }
    }

    fn set_piece_opacity(&mut self, square: Square, opacity: f32) {
        if let Some(node) = self.pieces.get_mut(&square) {
            node.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    fn add_mark(&mut self, square: Square, mark: Mark) {
        self.marks.entry(square).or_default().insert(mark);
    }

    fn clear_marks(&mut self) {
        self.marks.clear();
    }

    fn spawn_ghost(&mut self, piece: Piece, glyph: &'static str, center: Point) -> GhostId {
        self.next_ghost += 1;
        self.ghosts_spawned += 1;
        let id = GhostId(self.next_ghost);
        self.ghosts.insert(id, Ghost { piece, glyph, center });
        id
    }

    fn move_ghost(&mut self, ghost: GhostId, center: Point) {
        if let Some(g) = self.ghosts.get_mut(&ghost) {
            g.center = center;
        }
    }

    fn remove_ghost(&mut self, ghost: GhostId) {
        self.ghosts.remove(&ghost);
    }

    fn set_status(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn set_move_rows(&mut self, rows: &[MoveRow]) {
        self.rows = rows.to_vec();
    }

    fn show_promotion_prompt(&mut self, color: PieceColor, choices: &[PromotionChoice]) {
        self.prompt = Some(PromotionPrompt {
            color,
            choices: choices.to_vec(),
        });
    }

    fn hide_promotion_prompt(&mut self) {
        self.prompt = None;
    }

    fn apply_palette(&mut self, palette: Palette) {
        self.palette = Some(palette);
    }

    fn set_square_size(&mut self, size: u32) {
        self.square_size = size;
    }

    fn request_fullscreen(&mut self, enter: bool) -> Result<(), SurfaceError> {
        self.fullscreen_requests.push(enter);
        if self.fullscreen_denied {
            return Err(SurfaceError::FullscreenDenied);
        }
        Ok(())
    }
}
