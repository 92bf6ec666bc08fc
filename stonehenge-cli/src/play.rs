//! Play command - interactive game against a strategy

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use stonehenge_core::{BoardGeometry, CellId, GameState, Player};

use crate::render::render;
use crate::strategy::{choose_move, StrategyKind};

#[derive(Args)]
pub struct PlayArgs {
    /// Board side length (1 to 5)
    #[arg(long, default_value = "2")]
    pub size: u8,

    /// Play as p2 (the strategy opens the game)
    #[arg(long)]
    pub second: bool,

    /// Opponent strategy
    #[arg(long, value_enum, default_value = "iterative")]
    pub opponent: StrategyKind,

    /// Seed for the random strategy
    #[arg(long, default_value = "42")]
    pub seed: u64,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let geometry =
        Arc::new(BoardGeometry::new(args.size).context("cannot set up the board")?);
    let human = if args.second { Player::Two } else { Player::One };
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut state = GameState::new(geometry, Player::One);

    tracing::info!(
        "Starting game: size={}, human={}, opponent={:?}",
        args.size,
        human,
        args.opponent
    );
    println!("Players take turns claiming cells. Capture at least half the");
    println!("cells of a ley-line to claim it; claim half the ley-lines to win.");
    println!();

    let stdin = io::stdin();
    let mut input = stdin.lock();

    while !state.is_over() {
        println!("{}", render(&state));
        let mv = if state.turn() == human {
            prompt_move(&state, &mut input)?
        } else {
            let mv = choose_move(args.opponent, &state, &mut rng)?
                .context("strategy returned no move for a live position")?;
            println!("{} plays {}", state.turn(), state.geometry().label(mv));
            mv
        };
        state = state.apply_move(mv)?;
    }

    println!("{}", render(&state));
    match state.winner() {
        Some(winner) if winner == human => println!("You win!"),
        Some(winner) => println!("{} wins.", winner),
        None => println!("Nobody claimed a majority."),
    }
    Ok(())
}

/// Keep asking until the human names an open cell.
fn prompt_move(state: &GameState, input: &mut impl BufRead) -> Result<CellId> {
    loop {
        print!("{} to move - enter a cell: ", state.turn());
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before the game ended");
        }

        let trimmed = line.trim();
        let mut chars = trimmed.chars();
        let cell = match (chars.next(), chars.next()) {
            (Some(label), None) => state.geometry().cell_by_label(label),
            _ => None,
        };

        match cell {
            Some(cell) if state.owner(cell).is_none() => return Ok(cell),
            Some(cell) => println!(
                "  {} is already owned",
                state.geometry().label(cell)
            ),
            None => println!("  {:?} is not a cell on this board", trimmed),
        }
    }
}
