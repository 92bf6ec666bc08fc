//! Stonehenge CLI
//!
//! Commands:
//! - play: play against a strategy in the terminal
//! - solve: compute the exact value and best move of an opening
//! - selfplay: pit two strategies against each other

use clap::{Parser, Subcommand};

mod play;
mod render;
mod selfplay;
mod solve;
mod strategy;

#[derive(Parser)]
#[command(name = "stonehenge")]
#[command(about = "Stonehenge ley-line game and exact solver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game against a strategy
    Play(play::PlayArgs),
    /// Solve an opening position with both exact engines
    Solve(solve::SolveArgs),
    /// Play strategies against each other
    Selfplay(selfplay::SelfplayArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Solve(args) => solve::run(args),
        Commands::Selfplay(args) => selfplay::run(args),
    }
}
