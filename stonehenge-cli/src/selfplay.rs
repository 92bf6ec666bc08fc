//! Selfplay command - play strategies against each other
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_series(), report_results()
//! - Level 3: play_single_game()

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use stonehenge_core::{BoardGeometry, GameState, Player};

use crate::strategy::{choose_move, StrategyKind};

#[derive(Args)]
pub struct SelfplayArgs {
    /// Board side length (1 to 5)
    #[arg(long, default_value = "2")]
    pub size: u8,

    /// Strategy playing p1
    #[arg(long, value_enum, default_value = "rough")]
    pub p1: StrategyKind,

    /// Strategy playing p2
    #[arg(long, value_enum, default_value = "random")]
    pub p2: StrategyKind,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Seed for the random strategy
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    winner: Option<Player>,
    moves: Vec<char>,
}

/// Aggregated series results
#[derive(Debug, Serialize)]
struct SeriesResults {
    p1_wins: usize,
    p2_wins: usize,
    unfinished: usize,
    avg_moves: f32,
    games: Vec<GameRecord>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: SelfplayArgs) -> Result<()> {
    let geometry =
        Arc::new(BoardGeometry::new(args.size).context("cannot set up the board")?);

    tracing::info!(
        "Starting selfplay: {:?} vs {:?} ({} games, size {})",
        args.p1,
        args.p2,
        args.games,
        args.size
    );

    let results = play_series(&geometry, &args)?;
    report_results(&results, &args)?;
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play_series(geometry: &Arc<BoardGeometry>, args: &SelfplayArgs) -> Result<SeriesResults> {
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut games = Vec::with_capacity(args.games);

    for game_number in 0..args.games {
        let record = play_single_game(geometry, args, game_number, &mut rng)?;
        tracing::debug!(
            "game {}: winner={:?} in {} moves",
            game_number,
            record.winner,
            record.moves.len()
        );
        games.push(record);
    }

    let p1_wins = games.iter().filter(|g| g.winner == Some(Player::One)).count();
    let p2_wins = games.iter().filter(|g| g.winner == Some(Player::Two)).count();
    let unfinished = games.len() - p1_wins - p2_wins;
    let avg_moves =
        games.iter().map(|g| g.moves.len()).sum::<usize>() as f32 / games.len().max(1) as f32;

    Ok(SeriesResults {
        p1_wins,
        p2_wins,
        unfinished,
        avg_moves,
        games,
    })
}

fn report_results(results: &SeriesResults, args: &SelfplayArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(results)?);
    } else {
        println!(
            "{:?} (p1) {} - {} {:?} (p2), unfinished {}, avg {:.1} moves",
            args.p1, results.p1_wins, results.p2_wins, args.p2, results.unfinished,
            results.avg_moves
        );
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - SINGLE GAME
// ============================================================================

fn play_single_game(
    geometry: &Arc<BoardGeometry>,
    args: &SelfplayArgs,
    game_number: usize,
    rng: &mut ChaCha8Rng,
) -> Result<GameRecord> {
    let mut state = GameState::new(Arc::clone(geometry), Player::One);
    let mut moves = Vec::new();

    while !state.is_over() {
        let kind = match state.turn() {
            Player::One => args.p1,
            Player::Two => args.p2,
        };
        let mv = match choose_move(kind, &state, rng)? {
            Some(mv) => mv,
            None => break,
        };
        moves.push(geometry.label(mv));
        state = state.apply_move(mv)?;
    }

    Ok(GameRecord {
        game_number,
        winner: state.winner(),
        moves,
    })
}
