//! Stochastic local-search solver for number-place boards.
//!
//! The solver fills a partially-specified board toward a conflict-free,
//! fully-filled solution. It layers a deterministic inference pass over a
//! randomized search:
//!
//! - [`score`]: the objective function. A board's score is its conflict count
//!   plus its empty-cell count; `0` means solved.
//! - [`constraint`]: locked-position tracking and per-cell forbidden digit
//!   sets, from which naked and hidden singles are deduced.
//! - [`neighbor`]: single-cell board mutations. Deterministic forced fills
//!   come first, then randomized trial placements, with a deadlock escape as
//!   the last resort.
//! - [`annealing`]: the simulated-annealing loop tying it all together with a
//!   geometric cooling schedule and Metropolis acceptance.
//!
//! The search is single-threaded and draws all randomness from one seedable
//! PRNG. Cancellation is cooperative: a [`CancelToken`] is polled once per
//! iteration and always yields the best board found so far.
//!
//! # Examples
//!
//! ```
//! use std::str::FromStr as _;
//!
//! use annealace_core::Board;
//! use annealace_solver::{AnnealingConfig, AnnealingSolver};
//!
//! let board = Board::from_str("1204\n3412\n2143\n4321")?;
//! let solver = AnnealingSolver::new(AnnealingConfig::default().with_seed(42));
//! let outcome = solver.solve(&board)?;
//! assert!(outcome.is_solved());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod annealing;
pub mod constraint;
pub mod neighbor;
pub mod score;

pub use self::{
    annealing::{AnnealingConfig, AnnealingSolver, CancelToken, ConfigError, Outcome},
    constraint::{
        ForbiddenSets, LockedPositions, find_hidden_single, find_naked_single, missing_numbers,
    },
    neighbor::{Neighbor, NeighborGenerator, ShuffledDigits},
    score::{count_conflicts, count_empty_tiles, has_conflicts, objective_score},
};
