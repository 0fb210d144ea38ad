use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chessboard::core::{BoardTheme, FileStorage, PieceStyle};
use chessboard::game::chess960;
use chessboard::game::Mode;
use chessboard::ui::HeadlessHost;

#[derive(Parser)]
#[command(name = "chessboard", version, about = "Interactive chessboard for standard, atomic and Chess960 games")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay coordinate moves (e2e4, e7e8n) through the board session
    Play {
        /// standard, atomic or chess960 (a leading '#' is accepted)
        #[arg(long, default_value = "standard")]
        mode: String,

        /// Enter moves as drags instead of taps
        #[arg(long)]
        drag: bool,

        /// Write game.pgn into this directory
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,

        /// Piece style to switch to before playing
        #[arg(long)]
        style: Option<PieceStyle>,

        /// Board theme to switch to before playing
        #[arg(long)]
        theme: Option<BoardTheme>,

        /// Seed for the Chess960 start position
        #[arg(long)]
        seed: Option<u64>,

        moves: Vec<String>,
    },

    /// Print Chess960 start positions
    Chess960 {
        #[arg(long, default_value_t = 1)]
        count: usize,

        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Play {
            mode,
            drag,
            export,
            style,
            theme,
            seed,
            moves,
        } => play(&mode, drag, export, style, theme, seed, &moves),
        Command::Chess960 { count, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_rng(&mut rand::rng()),
            };
            for _ in 0..count {
                println!("{}", chess960::generate_with(&mut rng).to_fen());
            }
            Ok(())
        }
    }
}

fn play(
    route: &str,
    drag: bool,
    export: Option<PathBuf>,
    style: Option<PieceStyle>,
    theme: Option<BoardTheme>,
    seed: Option<u64>,
    moves: &[String],
) -> Result<()> {
    let mode = Mode::from_route(route);
    let mut host = match seed {
        Some(seed) => HeadlessHost::with_seed(mode, seed),
        None => HeadlessHost::with_storage(mode, Box::new(FileStorage::user_config())),
    };
    info!("Playing {} moves in {} mode", moves.len(), mode);

    if let Some(style) = style {
        host.session_mut().set_piece_style(style);
    }
    if let Some(theme) = theme {
        host.session_mut().set_theme(theme);
    }

    for text in moves {
        if let Err(e) = host.play(text, drag) {
            print_board(&host);
            bail!("move '{}' failed: {}", text, e);
        }
    }
    print_board(&host);

    if let Some(dir) = export {
        let path = host
            .session()
            .write_pgn(&dir)
            .with_context(|| format!("writing PGN to {}", dir.display()))?;
        println!("PGN written to {}", path.display());
    }
    Ok(())
}

fn print_board(host: &HeadlessHost) {
    let scene = host.scene();
    print!("{}", scene.render_text());
    println!();
    println!("{}", scene.status());
    let moves = scene.render_moves();
    if !moves.is_empty() {
        println!();
        print!("{moves}");
    }
}
