//! Rules oracle contract
//!
//! The oracle is the single source of truth for the game: piece occupancy,
//! side to move, legality and terminal-state queries, move history and PGN.
//! The interaction session never keeps a copy of the board; it asks the
//! oracle every time.
//!
//! # Implementations
//!
//! - [`crate::game::engine::ShakmatyOracle`] - backed by the `shakmaty` crate
//!
//! The trait mirrors the small surface the session needs, so tests can drive
//! the state machine through any implementation.

use crate::game::error::GameResult;
use crate::game::types::{Piece, PieceColor, PieceKind, Square};

/// A move the session asks the oracle to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    /// Piece chosen for a promotion; ignored for non-promoting moves
    pub promotion: PieceKind,
}

impl MoveRequest {
    /// Request with the promotion piece defaulted to a queen
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: PieceKind::Queen,
        }
    }

    pub fn with_promotion(mut self, promotion: PieceKind) -> Self {
        self.promotion = promotion;
        self
    }
}

/// A legal move available from a square
///
/// Castling is reported with the king's destination square (`g1`, `c8`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalMove {
    pub from: Square,
    pub to: Square,
    pub capture: bool,
    pub promotion: Option<PieceKind>,
}

/// A played move, as kept in the history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// Side that played the move
    pub color: PieceColor,
    /// Kind of the moving piece before any promotion
    pub piece: PieceKind,
    pub from: Square,
    pub to: Square,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub en_passant: bool,
    pub castle: bool,
    /// Standard algebraic notation including check suffix
    pub san: String,
}

impl MoveRecord {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// The moving piece before promotion
    pub fn moving_piece(&self) -> Piece {
        Piece::new(self.color, self.piece)
    }
}

/// Options for PGN rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgnOptions {
    /// Maximum movetext line width; 0 disables wrapping
    pub max_width: usize,
    pub newline: String,
    /// Tag pairs written before the movetext, in order
    pub headers: Vec<(String, String)>,
}

impl Default for PgnOptions {
    fn default() -> Self {
        Self {
            max_width: 80,
            newline: "\n".to_string(),
            headers: Vec::new(),
        }
    }
}

/// Authoritative chess-rule state consumed by the interaction session
pub trait RulesOracle {
    /// Start a new game, from the standard position or the given FEN
    fn new_game(&mut self, start_fen: Option<&str>) -> GameResult<()>;

    /// Piece on a square
    fn get(&self, square: Square) -> Option<Piece>;

    /// Remove and return the piece on a square
    fn remove(&mut self, square: Square) -> Option<Piece>;

    /// Play a move if legal; `None` leaves the state untouched
    fn make_move(&mut self, request: MoveRequest) -> Option<MoveRecord>;

    /// Take back the last move, restoring the exact prior state
    fn undo(&mut self) -> Option<MoveRecord>;

    /// Side to move
    fn turn(&self) -> PieceColor;

    /// Legal moves starting on a square
    fn moves_from(&self, square: Square) -> Vec<LegalMove>;

    /// Moves played so far, oldest first
    fn history(&self) -> &[MoveRecord];

    fn is_check(&self) -> bool;
    fn is_checkmate(&self) -> bool;
    fn is_stalemate(&self) -> bool;
    fn is_draw(&self) -> bool;
    fn is_game_over(&self) -> bool;

    /// Whether the current board is a position play can continue from
    fn is_valid_position(&self) -> bool;

    /// FEN the game started from, when it was not the standard position
    fn start_fen(&self) -> Option<&str>;

    /// Current position as FEN, including castling rights, en passant and clocks
    fn fen(&self) -> String;

    /// PGN text for the game so far
    fn pgn(&self, options: &PgnOptions) -> String;
}
