//! Command-line puzzle solver.
//!
//! Reads a puzzle from a text file (one row per line, `'0'` marking empty
//! cells), runs the annealing search, and prints the best board followed by
//! its objective score. Interrupting the run with Ctrl-C still prints the
//! best board found so far.

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr as _;
use std::time::Instant;
use std::{fmt::Display, fs};

use annealace_core::Board;
use annealace_solver::{AnnealingConfig, AnnealingSolver, CancelToken};
use clap::Parser;

/// Fill a number-place puzzle using simulated annealing.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the puzzle file: one row per line, '0' marks an empty cell.
    puzzle: PathBuf,

    /// Seed for the random source (defaults to OS entropy).
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Multiplicative temperature decay applied per iteration.
    #[arg(long, value_name = "RATE", default_value_t = 0.9999)]
    cooling_rate: f64,

    /// Starting temperature.
    #[arg(long, value_name = "TEMP", default_value_t = 1.0)]
    initial_temperature: f64,

    /// Temperature at which the search stops.
    #[arg(long, value_name = "TEMP", default_value_t = 1e-4)]
    min_temperature: f64,
}

impl Args {
    fn config(&self) -> AnnealingConfig {
        let config = AnnealingConfig::default()
            .with_cooling_rate(self.cooling_rate)
            .with_initial_temperature(self.initial_temperature)
            .with_min_temperature(self.min_temperature);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn usage_error(message: impl Display) -> ExitCode {
    eprintln!("{message}");
    ExitCode::from(2)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let input = match fs::read_to_string(&args.puzzle) {
        Ok(input) => input,
        Err(err) => return usage_error(format_args!(
            "failed to read {}: {err}",
            args.puzzle.display()
        )),
    };
    let board = match Board::from_str(&input) {
        Ok(board) => board,
        Err(err) => return usage_error(format_args!("invalid puzzle: {err}")),
    };

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        if let Err(err) = ctrlc::set_handler(move || cancel.cancel()) {
            log::warn!("failed to install interrupt handler: {err}");
        }
    }

    let solver = AnnealingSolver::new(args.config());
    let start = Instant::now();
    let outcome = match solver.solve_with_cancel(&board, Some(&cancel)) {
        Ok(outcome) => outcome,
        Err(err) => return usage_error(format_args!("invalid configuration: {err}")),
    };

    log::info!(
        "finished in {:.2?}: score {} after {} iterations{}",
        start.elapsed(),
        outcome.score,
        outcome.iterations,
        if outcome.cancelled { " (interrupted)" } else { "" }
    );

    println!("{}", outcome.board);
    println!();
    println!("Score: {}", outcome.score);

    ExitCode::SUCCESS
}
