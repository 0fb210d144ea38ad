//! Type definitions and utilities for chess game logic
//!
//! Provides newtype patterns for board coordinates plus the piece vocabulary
//! shared by the session, the oracle and the display layer.

use std::fmt;
use std::str::FromStr;

use crate::game::error::GameError;

/// Board coordinate representing a file (column) on the chessboard
///
/// Values range from 0 (file 'a') to 7 (file 'h').
/// This newtype prevents mixing up x and y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct File(u8);

impl File {
    /// Create a file from a character ('a'..='h')
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(File(c as u8 - b'a')),
            _ => None,
        }
    }

    /// Create a file from a 0-based index
    pub fn from_index(index: u8) -> Option<Self> {
        (index < 8).then_some(File(index))
    }

    /// Convert file to character ('a'..='h')
    pub fn to_char(self) -> char {
        (b'a' + self.0) as char
    }

    /// Get the file index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Board coordinate representing a rank (row) on the chessboard
///
/// Values range from 0 (rank 1) to 7 (rank 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(u8);

impl Rank {
    /// Create a rank from a number (1-8)
    pub fn from_number(n: u8) -> Option<Self> {
        (1..=8).contains(&n).then(|| Rank(n - 1))
    }

    /// Create a rank from a 0-based index
    pub fn from_index(index: u8) -> Option<Self> {
        (index < 8).then_some(Rank(index))
    }

    /// Convert rank to number (1-8)
    pub fn to_number(self) -> u8 {
        self.0 + 1
    }

    /// Get the rank index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Board square position (file, rank)
///
/// Serialized as the usual two-character code (`e4`). Immutable value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub file: File,
    pub rank: Rank,
}

impl Square {
    /// Create a square from 0-based file and rank indices
    pub fn from_indices(file: u8, rank: u8) -> Option<Self> {
        Some(Square {
            file: File::from_index(file)?,
            rank: Rank::from_index(rank)?,
        })
    }

    /// Create a square from algebraic notation (e.g., "e4")
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file_char = chars.next()?;
        let rank_char = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let rank_num = rank_char.to_digit(10)? as u8;

        Some(Square {
            file: File::from_char(file_char)?,
            rank: Rank::from_number(rank_num)?,
        })
    }

    /// Convert square to algebraic notation (e.g., "e4")
    pub fn to_algebraic(self) -> String {
        self.to_string()
    }

    /// Square shifted by a file/rank delta, or `None` when it leaves the board
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file.index() as i8 + file_delta;
        let rank = self.rank.index() as i8 + rank_delta;
        if !(0..8).contains(&file) || !(0..8).contains(&rank) {
            return None;
        }
        Square::from_indices(file as u8, rank as u8)
    }

    /// Whether the square is a light square (h1 is light)
    pub fn is_light(self) -> bool {
        (self.file.index() + self.rank.index()) % 2 == 1
    }

    /// All 64 squares, rank 8 first, files a..h within a rank
    ///
    /// This is the order squares appear on screen, top-left to bottom-right.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8)
            .rev()
            .flat_map(|rank| (0..8u8).map(move |file| Square { file: File(file), rank: Rank(rank) }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file.to_char(), self.rank.to_number())
    }
}

impl FromStr for Square {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s).ok_or_else(|| GameError::InvalidSquare {
            input: s.to_string(),
        })
    }
}

/// Side of a piece, also used for the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn opposite(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Display name ("White" / "Black")
    pub fn name(self) -> &'static str {
        match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }

    /// Rank a pawn of this color promotes on
    pub fn back_rank(self) -> Rank {
        match self {
            PieceColor::White => Rank(7),
            PieceColor::Black => Rank(0),
        }
    }
}

/// Kind of a chess piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Lowercase letter used in FEN and move input (`p`, `n`, `b`, `r`, `q`, `k`)
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Pieces a pawn may promote to, in prompt order
    pub const PROMOTION_CHOICES: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];
}

/// A colored piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: PieceColor,
    pub kind: PieceKind,
}

impl Piece {
    pub fn new(color: PieceColor, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN character: uppercase for white, lowercase for black
    pub fn fen_char(self) -> char {
        match self.color {
            PieceColor::White => self.kind.letter().to_ascii_uppercase(),
            PieceColor::Black => self.kind.letter(),
        }
    }
}
