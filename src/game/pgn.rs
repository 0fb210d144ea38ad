//! PGN export
//!
//! Builds the tag pairs for a finished or running game, renders movetext
//! wrapped to a maximum width, and writes the `game.pgn` artifact.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::error::CoreResult;
use crate::game::mode::Mode;
use crate::game::oracle::{MoveRecord, PgnOptions};
use crate::game::status::GameOutcome;
use crate::game::types::PieceColor;

/// File name of the exported artifact
pub const PGN_FILENAME: &str = "game.pgn";

/// Result token for an outcome (`1-0`, `0-1`, `1/2-1/2`, `*`)
pub fn result_token(outcome: Option<GameOutcome>) -> &'static str {
    let Some(outcome) = outcome else {
        return "*";
    };
    match outcome.winner() {
        Some(PieceColor::White) => "1-0",
        Some(PieceColor::Black) => "0-1",
        None => "1/2-1/2",
    }
}

/// Seven tag roster plus variant tags for non-standard games
pub fn game_headers(
    mode: Mode,
    outcome: Option<GameOutcome>,
    start_fen: Option<&str>,
) -> Vec<(String, String)> {
    let date = chrono::Local::now().format("%Y.%m.%d").to_string();
    let mut headers = vec![
        ("Event".to_string(), format!("{} game", mode.label())),
        ("Site".to_string(), "?".to_string()),
        ("Date".to_string(), date),
        ("Round".to_string(), "-".to_string()),
        ("White".to_string(), "?".to_string()),
        ("Black".to_string(), "?".to_string()),
        ("Result".to_string(), result_token(outcome).to_string()),
    ];
    match mode {
        Mode::Standard => {}
        Mode::Atomic => headers.push(("Variant".to_string(), "Atomic".to_string())),
        Mode::Chess960 => headers.push(("Variant".to_string(), "Chess960".to_string())),
    }
    if let Some(fen) = start_fen {
        headers.push(("SetUp".to_string(), "1".to_string()));
        headers.push(("FEN".to_string(), fen.to_string()));
    }
    headers
}

/// Render tag pairs and movetext
///
/// Move numbers start at `first_move`, the fullmove number of the start
/// position, and advance after each Black move. The termination token is taken
/// from the `Result` tag, `*` when absent.
pub fn render(options: &PgnOptions, first_move: u32, history: &[MoveRecord]) -> String {
    let newline = options.newline.as_str();
    let mut out = String::new();

    for (name, value) in &options.headers {
        out.push_str(&format!("[{} \"{}\"]", name, value.replace('"', "\\\"")));
        out.push_str(newline);
    }
    if !options.headers.is_empty() {
        out.push_str(newline);
    }

    let result = options
        .headers
        .iter()
        .find(|(name, _)| name == "Result")
        .map(|(_, value)| value.as_str())
        .unwrap_or("*");

    let mut tokens = Vec::with_capacity(history.len() * 3 / 2 + 1);
    let mut number = first_move.max(1);
    for (ply, record) in history.iter().enumerate() {
        match (ply, record.color) {
            (0, PieceColor::Black) => tokens.push(format!("{number}...")),
            (_, PieceColor::White) => tokens.push(format!("{number}.")),
            _ => {}
        }
        tokens.push(record.san.clone());
        if record.color == PieceColor::Black {
            number += 1;
        }
    }
    tokens.push(result.to_string());

    out.push_str(&wrap(&tokens, options.max_width, newline));
    out
}

fn wrap(tokens: &[String], max_width: usize, newline: &str) -> String {
    let mut out = String::new();
    let mut line_len = 0;
    for token in tokens {
        if line_len > 0 {
            if max_width > 0 && line_len + 1 + token.len() > max_width {
                out.push_str(newline);
                line_len = 0;
            } else {
                out.push(' ');
                line_len += 1;
            }
        }
        out.push_str(token);
        line_len += token.len();
    }
    out
}

/// Write PGN text to `game.pgn` inside `dir`
pub fn write_pgn_file(dir: &Path, pgn: &str) -> CoreResult<PathBuf> {
    let path = dir.join(PGN_FILENAME);
    fs::write(&path, pgn)?;
    info!("[PGN] Exported game to {:?}", path);
    Ok(path)
}
