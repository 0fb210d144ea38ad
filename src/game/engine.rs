//! Chess rules oracle backed by `shakmaty`
//!
//! This module provides [`ShakmatyOracle`], the authoritative game state for the
//! session. `shakmaty` does legality, SAN and check detection; this wrapper adds
//! what the session needs on top of it:
//!
//! - **Piece removal**: atomic explosions take pieces off the board after a move.
//!   The board is rebuilt into a playable position when possible.
//! - **Frozen positions**: a board that is no longer a legal chess position (a king
//!   was blown up) is kept as a bare setup. It still answers occupancy and turn
//!   queries, has no legal moves and counts as game over.
//! - **Snapshot undo**: every move stores the complete prior state, so `undo`
//!   also restores squares emptied after the move.
//! - **Draw rules**: stalemate, insufficient material, fifty-move rule and
//!   threefold repetition.
//!
//! # Coordinate System
//!
//! - **Session squares**: [`crate::game::types::Square`] (file/rank newtypes)
//! - **Engine squares**: `shakmaty::Square`
//! - Conversion helpers: `to_engine_square()` and `from_engine_square()`

use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{
    Bitboard, Board, CastlingMode, Chess, Color, EnPassantMode, FromSetup, Move, Position,
    PositionError, Role, Setup,
};
use tracing::{debug, trace};

use crate::game::error::{GameError, GameResult};
use crate::game::oracle::{LegalMove, MoveRecord, MoveRequest, PgnOptions, RulesOracle};
use crate::game::pgn;
use crate::game::types::{Piece, PieceColor, PieceKind, Square};

/// Convert a session square to a `shakmaty` square
fn to_engine_square(square: Square) -> shakmaty::Square {
    shakmaty::Square::from_coords(
        shakmaty::File::new(u32::from(square.file.index())),
        shakmaty::Rank::new(u32::from(square.rank.index())),
    )
}

/// Convert a `shakmaty` square to a session square
fn from_engine_square(square: shakmaty::Square) -> Option<Square> {
    let file = (square.file().char() as u8).checked_sub(b'a')?;
    let rank = (square.rank().char() as u8).checked_sub(b'1')?;
    Square::from_indices(file, rank)
}

fn to_color(color: Color) -> PieceColor {
    match color {
        Color::White => PieceColor::White,
        Color::Black => PieceColor::Black,
    }
}

fn to_kind(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn to_role(kind: PieceKind) -> Role {
    match kind {
        PieceKind::Pawn => Role::Pawn,
        PieceKind::Knight => Role::Knight,
        PieceKind::Bishop => Role::Bishop,
        PieceKind::Rook => Role::Rook,
        PieceKind::Queen => Role::Queen,
        PieceKind::King => Role::King,
    }
}

fn to_piece(piece: shakmaty::Piece) -> Piece {
    Piece::new(to_color(piece.color), to_kind(piece.role))
}

/// Origin and destination of a move as the player sees it
///
/// Castling is entered by moving the king two files, so castle moves map to the
/// king's destination rather than the rook square.
fn endpoints(m: &Move) -> Option<(shakmaty::Square, shakmaty::Square)> {
    match m {
        Move::Normal { from, to, .. } => Some((*from, *to)),
        Move::EnPassant { from, to } => Some((*from, *to)),
        Move::Castle { king, rook } => {
            let file = if rook.file() > king.file() {
                shakmaty::File::G
            } else {
                shakmaty::File::C
            };
            Some((*king, shakmaty::Square::from_coords(file, king.rank())))
        }
        _ => None,
    }
}

/// Current board, playable or not
#[derive(Debug, Clone)]
enum Standing {
    /// A legal chess position
    Playable(Chess),
    /// A board play cannot continue from (e.g. a king was exploded)
    Frozen(Setup),
}

impl Standing {
    /// Rebuild a standing from a raw setup
    ///
    /// Castling rights and en passant squares invalidated by removed pieces are
    /// dropped; anything else that makes the setup illegal freezes it.
    fn from_setup(setup: Setup) -> Standing {
        match Chess::from_setup(setup.clone(), CastlingMode::Standard)
            .or_else(PositionError::ignore_invalid_castling_rights)
            .or_else(PositionError::ignore_invalid_ep_square)
            .or_else(PositionError::ignore_impossible_check)
        {
            Ok(pos) => Standing::Playable(pos),
            Err(err) => {
                debug!("[ORACLE] Position no longer playable: {}", err);
                Standing::Frozen(setup)
            }
        }
    }

    fn board(&self) -> &Board {
        match self {
            Standing::Playable(pos) => pos.board(),
            Standing::Frozen(setup) => &setup.board,
        }
    }

    fn to_setup(&self) -> Setup {
        match self {
            Standing::Playable(pos) => pos.to_setup(EnPassantMode::Legal),
            Standing::Frozen(setup) => setup.clone(),
        }
    }

    fn turn(&self) -> Color {
        match self {
            Standing::Playable(pos) => pos.turn(),
            Standing::Frozen(setup) => setup.turn,
        }
    }

    fn repetition_key(&self) -> RepetitionKey {
        let setup = self.to_setup();
        RepetitionKey {
            board: setup.board,
            turn: setup.turn,
            castling_rights: setup.castling_rights,
            ep_square: setup.ep_square,
        }
    }
}

/// Fields that make two positions "the same" for repetition
#[derive(Debug, Clone, PartialEq)]
struct RepetitionKey {
    board: Board,
    turn: Color,
    castling_rights: Bitboard,
    ep_square: Option<shakmaty::Square>,
}

/// One played move and the state before it
#[derive(Debug, Clone)]
struct Ply {
    record: MoveRecord,
    before: Standing,
}

/// Rules oracle backed by `shakmaty`
#[derive(Debug, Clone)]
pub struct ShakmatyOracle {
    standing: Standing,
    start_fen: Option<String>,
    /// Fullmove number of the start position
    start_fullmoves: u32,
    plies: Vec<Ply>,
    records: Vec<MoveRecord>,
}

impl Default for ShakmatyOracle {
    fn default() -> Self {
        Self {
            standing: Standing::Playable(Chess::default()),
            start_fen: None,
            start_fullmoves: 1,
            plies: Vec::new(),
            records: Vec::new(),
        }
    }
}

impl ShakmatyOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oracle set up from a FEN string
    pub fn from_fen(fen: &str) -> GameResult<Self> {
        let mut oracle = Self::default();
        oracle.new_game(Some(fen))?;
        Ok(oracle)
    }

    fn invalid_start(fen: &str, reason: impl std::fmt::Display) -> GameError {
        GameError::InvalidStartPosition {
            fen: fen.to_string(),
            reason: reason.to_string(),
        }
    }

    fn is_threefold_repetition(&self) -> bool {
        let current = self.standing.repetition_key();
        let earlier = self
            .plies
            .iter()
            .filter(|ply| ply.before.repetition_key() == current)
            .count();
        earlier + 1 >= 3
    }

    fn is_fifty_move_draw(&self) -> bool {
        match &self.standing {
            Standing::Playable(pos) => pos.halfmoves() >= 100,
            Standing::Frozen(_) => false,
        }
    }
}

impl RulesOracle for ShakmatyOracle {
    fn new_game(&mut self, start_fen: Option<&str>) -> GameResult<()> {
        let standing = match start_fen {
            None => Standing::Playable(Chess::default()),
            Some(fen) => {
                let parsed =
                    Fen::from_ascii(fen.as_bytes()).map_err(|e| Self::invalid_start(fen, e))?;
                let pos: Chess = parsed
                    .into_position(CastlingMode::Standard)
                    .map_err(|e| Self::invalid_start(fen, e))?;
                Standing::Playable(pos)
            }
        };
        self.start_fullmoves = standing.to_setup().fullmoves.get();
        self.standing = standing;
        self.start_fen = start_fen.map(str::to_string);
        self.plies.clear();
        self.records.clear();
        debug!("[ORACLE] New game from {}", start_fen.unwrap_or("standard position"));
        Ok(())
    }

    fn get(&self, square: Square) -> Option<Piece> {
        self.standing
            .board()
            .piece_at(to_engine_square(square))
            .map(to_piece)
    }

    fn remove(&mut self, square: Square) -> Option<Piece> {
        let mut setup = self.standing.to_setup();
        let removed = setup.board.remove_piece_at(to_engine_square(square))?;
        self.standing = Standing::from_setup(setup);
        trace!("[ORACLE] Removed {:?} from {}", removed, square);
        Some(to_piece(removed))
    }

    fn make_move(&mut self, request: MoveRequest) -> Option<MoveRecord> {
        let Standing::Playable(pos) = &self.standing else {
            return None;
        };

        let wanted = (to_engine_square(request.from), to_engine_square(request.to));
        let promotion = to_role(request.promotion);
        let chosen = pos
            .legal_moves()
            .iter()
            .find(|m| {
                endpoints(m) == Some(wanted) && m.promotion().map_or(true, |role| role == promotion)
            })
            .cloned()?;

        let color = to_color(pos.turn());
        let san = San::from_move(pos, chosen.clone());
        let next = pos.clone().play(chosen.clone()).ok()?;
        let suffix = if next.is_checkmate() {
            "#"
        } else if next.is_check() {
            "+"
        } else {
            ""
        };

        let record = MoveRecord {
            color,
            piece: to_kind(chosen.role()),
            from: request.from,
            to: request.to,
            captured: chosen.capture().map(to_kind),
            promotion: chosen.promotion().map(to_kind),
            en_passant: chosen.is_en_passant(),
            castle: chosen.is_castle(),
            san: format!("{san}{suffix}"),
        };

        let before = std::mem::replace(&mut self.standing, Standing::Playable(next));
        self.plies.push(Ply {
            record: record.clone(),
            before,
        });
        self.records.push(record.clone());
        Some(record)
    }

    fn undo(&mut self) -> Option<MoveRecord> {
        let ply = self.plies.pop()?;
        self.records.pop();
        self.standing = ply.before;
        debug!("[ORACLE] Took back {}", ply.record.san);
        Some(ply.record)
    }

    fn turn(&self) -> PieceColor {
        to_color(self.standing.turn())
    }

    fn moves_from(&self, square: Square) -> Vec<LegalMove> {
        let Standing::Playable(pos) = &self.standing else {
            return Vec::new();
        };
        let from = to_engine_square(square);
        pos.legal_moves()
            .iter()
            .filter_map(|m| {
                let (origin, target) = endpoints(m)?;
                if origin != from {
                    return None;
                }
                Some(LegalMove {
                    from: square,
                    to: from_engine_square(target)?,
                    capture: m.is_capture(),
                    promotion: m.promotion().map(to_kind),
                })
            })
            .collect()
    }

    fn history(&self) -> &[MoveRecord] {
        &self.records
    }

    fn is_check(&self) -> bool {
        matches!(&self.standing, Standing::Playable(pos) if pos.is_check())
    }

    fn is_checkmate(&self) -> bool {
        matches!(&self.standing, Standing::Playable(pos) if pos.is_checkmate())
    }

    fn is_stalemate(&self) -> bool {
        matches!(&self.standing, Standing::Playable(pos) if pos.is_stalemate())
    }

    fn is_draw(&self) -> bool {
        match &self.standing {
            Standing::Playable(pos) => {
                pos.is_stalemate()
                    || pos.is_insufficient_material()
                    || self.is_fifty_move_draw()
                    || self.is_threefold_repetition()
            }
            Standing::Frozen(_) => false,
        }
    }

    fn is_game_over(&self) -> bool {
        match &self.standing {
            Standing::Playable(_) => self.is_checkmate() || self.is_draw(),
            Standing::Frozen(_) => true,
        }
    }

    fn is_valid_position(&self) -> bool {
        matches!(self.standing, Standing::Playable(_))
    }

    fn start_fen(&self) -> Option<&str> {
        self.start_fen.as_deref()
    }

    fn fen(&self) -> String {
        match &self.standing {
            Standing::Playable(pos) => Fen::from_position(pos, EnPassantMode::Legal).to_string(),
            Standing::Frozen(setup) => Fen::try_from(setup.clone())
                .map(|fen| fen.to_string())
                .unwrap_or_default(),
        }
    }

    fn pgn(&self, options: &PgnOptions) -> String {
        pgn::render(options, self.start_fullmoves, &self.records)
    }
}
