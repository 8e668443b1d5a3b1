use anyhow::{Context, Result};
use chess_core::engine::config::EngineConfig;
use chess_core::engine::search::find_random_move;
use chess_core::logic::game::{GameState, GameStatus};
use chess_core::worker::SearchHandle;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

/// Plays the engine against itself and prints where the game ended.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Search depth in plies (overrides the config file)
    #[arg(long)]
    depth: Option<u8>,

    /// Engine configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of plies to play
    #[arg(long, default_value_t = 40)]
    plies: u64,

    /// Seed for root move shuffling and the random fallback
    #[arg(long)]
    seed: Option<u64>,

    /// Starting position, standard start when omitted
    #[arg(long)]
    fen: Option<String>,
}

fn read_config(path: &Path) -> Result<EngineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    EngineConfig::load_from_json(&text)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = args
        .config
        .as_deref()
        .map_or_else(|| Ok(EngineConfig::default()), read_config)?;
    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn describe(status: GameStatus) -> String {
    match status {
        GameStatus::Playing => "game in progress".to_string(),
        GameStatus::Checkmate(winner) => format!("{winner:?} wins by checkmate"),
        GameStatus::Stalemate => "draw by stalemate".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let mut game = args
        .fen
        .as_deref()
        .map_or_else(|| Ok(GameState::new()), GameState::from_fen)
        .context("invalid starting position")?;
    let mut rng = config
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    log::info!("depth {}, start {}", config.depth, game.to_fen());

    for ply in 0..args.plies {
        let legal = game.get_valid_moves();
        if legal.is_empty() {
            break;
        }

        let ply_config = EngineConfig {
            seed: config.seed.map(|seed| seed.wrapping_add(ply)),
            ..config.clone()
        };
        let (best, stats) = SearchHandle::spawn(game.clone(), ply_config)?.wait()?;

        let mover = game.turn();
        let Some(mv) = best.or_else(|| {
            log::info!("no move beat the mated bound, playing at random");
            find_random_move(&legal, &mut rng)
        }) else {
            break;
        };
        game.make_move(&mv);

        log::info!(
            "{:>3}. {mover:?} {mv} (score {}, nodes {}, {}ms)",
            ply + 1,
            stats.score,
            stats.nodes,
            stats.time_ms
        );
    }

    game.get_valid_moves();
    println!("{}", game.to_fen());
    println!("{}", describe(game.status()));
    Ok(())
}
