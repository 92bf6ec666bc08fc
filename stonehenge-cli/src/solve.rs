//! Solve command - run both exact engines and check they agree

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use stonehenge_core::{solve_iterative, solve_recursive, BoardGeometry, GameState, Player};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FirstPlayer {
    P1,
    P2,
}

impl From<FirstPlayer> for Player {
    fn from(first: FirstPlayer) -> Self {
        match first {
            FirstPlayer::P1 => Player::One,
            FirstPlayer::P2 => Player::Two,
        }
    }
}

#[derive(Args)]
pub struct SolveArgs {
    /// Board side length (1 to 5)
    #[arg(long, default_value = "2")]
    pub size: u8,

    /// Who moves first
    #[arg(long, value_enum, default_value = "p1")]
    pub first_player: FirstPlayer,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct SolveReport {
    size: u8,
    first_player: String,
    value: i8,
    verdict: String,
    best_move: Option<char>,
    engines_agree: bool,
    recursive_ms: u128,
    iterative_ms: u128,
}

pub fn run(args: SolveArgs) -> Result<()> {
    let geometry =
        Arc::new(BoardGeometry::new(args.size).context("cannot set up the board")?);
    let state = GameState::new(geometry, args.first_player.into());

    if args.size > 2 {
        tracing::warn!(
            "exhaustive search visits every line of play; size {} may take very long",
            args.size
        );
    }

    let start = Instant::now();
    let recursive = solve_recursive(&state);
    let recursive_ms = start.elapsed().as_millis();

    let start = Instant::now();
    let iterative = solve_iterative(&state)?;
    let iterative_ms = start.elapsed().as_millis();

    let engines_agree = recursive == iterative;
    if !engines_agree {
        tracing::warn!(
            "engines disagree: recursive={:?}, iterative={:?}",
            recursive,
            iterative
        );
    }

    let report = SolveReport {
        size: args.size,
        first_player: Player::from(args.first_player).to_string(),
        value: recursive.value,
        verdict: verdict(recursive.value).to_string(),
        best_move: recursive
            .best_move
            .map(|mv| state.geometry().label(mv)),
        engines_agree,
        recursive_ms,
        iterative_ms,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "size {}, {} to move: {}",
            report.size, report.first_player, report.verdict
        );
        match report.best_move {
            Some(label) => println!("best move: {}", label),
            None => println!("position is already decided"),
        }
        println!(
            "engines agree: {} (recursive {} ms, iterative {} ms)",
            report.engines_agree, report.recursive_ms, report.iterative_ms
        );
    }

    Ok(())
}

fn verdict(value: i8) -> &'static str {
    match value {
        1 => "p1 wins with optimal play",
        -1 => "p2 wins with optimal play",
        _ => "draw with optimal play",
    }
}
