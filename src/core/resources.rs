//! Display preferences
//!
//! These are the only settings the board persists between sessions. The JSON
//! form uses the field names `pieceStyle`, `theme` and
//! `preFullscreenSquareSize`; missing fields take their defaults.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// Glyph set used for pieces
    pub piece_style: PieceStyle,

    /// Light/dark square palette
    pub theme: BoardTheme,

    /// Square size in pixels before fullscreen was entered
    pub pre_fullscreen_square_size: Option<u32>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            piece_style: PieceStyle::Classic,
            theme: BoardTheme::Tournament,
            pre_fullscreen_square_size: None,
        }
    }
}

/// Piece glyph sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceStyle {
    #[default]
    Classic,
    Letters,
    Fantasy,
    Minimal,
    Emoji,
}

impl PieceStyle {
    pub const ALL: [PieceStyle; 5] = [
        PieceStyle::Classic,
        PieceStyle::Letters,
        PieceStyle::Fantasy,
        PieceStyle::Minimal,
        PieceStyle::Emoji,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            PieceStyle::Classic => "classic",
            PieceStyle::Letters => "letters",
            PieceStyle::Fantasy => "fantasy",
            PieceStyle::Minimal => "minimal",
            PieceStyle::Emoji => "emoji",
        }
    }
}

/// Board visual themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardTheme {
    #[default]
    Tournament,
    Wood,
    Blue,
    Green,
    Slate,
    Purple,
}

impl BoardTheme {
    pub const ALL: [BoardTheme; 6] = [
        BoardTheme::Tournament,
        BoardTheme::Wood,
        BoardTheme::Blue,
        BoardTheme::Green,
        BoardTheme::Slate,
        BoardTheme::Purple,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            BoardTheme::Tournament => "tournament",
            BoardTheme::Wood => "wood",
            BoardTheme::Blue => "blue",
            BoardTheme::Green => "green",
            BoardTheme::Slate => "slate",
            BoardTheme::Purple => "purple",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BoardTheme::Tournament => "Tournament",
            BoardTheme::Wood => "Wood",
            BoardTheme::Blue => "Blue",
            BoardTheme::Green => "Green",
            BoardTheme::Slate => "Slate",
            BoardTheme::Purple => "Purple",
        }
    }
}

/// Identifier that names no piece style or theme
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown option '{0}'")]
pub struct UnknownOption(pub String);

impl FromStr for PieceStyle {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceStyle::ALL
            .into_iter()
            .find(|style| style.id() == s)
            .ok_or_else(|| UnknownOption(s.to_string()))
    }
}

impl FromStr for BoardTheme {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoardTheme::ALL
            .into_iter()
            .find(|theme| theme.id() == s)
            .ok_or_else(|| UnknownOption(s.to_string()))
    }
}

impl fmt::Display for PieceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl fmt::Display for BoardTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
