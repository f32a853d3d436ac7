//! Play chess in the terminal against the minimax engine.

use anyhow::Context;
use chess_engine::Game;
use chess_play::{EngineSide, PlayConfig, Session};
use clap::Parser;
use std::io;
use std::path::PathBuf;

/// Play chess in the terminal against the minimax engine.
#[derive(Parser)]
#[command(name = "chess-play")]
#[command(about = "Play chess in the terminal against the minimax engine")]
struct Args {
    /// Path to the configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search depth in plies
    #[arg(long)]
    depth: Option<u32>,

    /// Side the engine plays
    #[arg(long, value_enum)]
    engine: Option<EngineSide>,

    /// Starting position in FEN
    #[arg(long)]
    fen: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config_path = args.config.unwrap_or_else(PlayConfig::config_path);
    let mut config = PlayConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    if let Some(engine) = args.engine {
        config.engine = engine;
    }
    if args.fen.is_some() {
        config.fen = args.fen;
    }

    tracing::info!(depth = config.depth, engine = ?config.engine, "starting session");

    let game = match &config.fen {
        Some(fen) => Game::from_fen(fen).with_context(|| format!("invalid starting position {fen:?}"))?,
        None => Game::new(),
    };

    let stdin = io::stdin();
    let mut session = Session::new(game, config.engine, config.depth, stdin.lock(), io::stdout());
    session.run()?;
    Ok(())
}
