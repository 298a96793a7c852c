//! The simulated-annealing control loop.
//!
//! [`AnnealingSolver`] owns the search state: the current board and score,
//! the best board and score seen so far (always independent copies), and the
//! temperature. Each iteration asks the neighbor generator for a candidate,
//! scores it, and applies the Metropolis acceptance rule under a geometric
//! cooling schedule.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use annealace_core::Board;
use rand::{RngExt as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

use crate::{
    constraint::{ForbiddenSets, LockedPositions},
    neighbor::NeighborGenerator,
    score::objective_score,
};

/// Errors reported for an invalid [`AnnealingConfig`].
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    /// The initial temperature is not positive.
    #[display("initial temperature must be positive, got {value}")]
    InitialTemperature {
        /// The offending value.
        value: f64,
    },
    /// The minimum temperature is not positive or not below the initial one.
    #[display("minimum temperature must be positive and below the initial temperature, got {value}")]
    MinTemperature {
        /// The offending value.
        value: f64,
    },
    /// The cooling rate lies outside `(0, 1)`.
    #[display("cooling rate must lie in (0, 1), got {value}")]
    CoolingRate {
        /// The offending value.
        value: f64,
    },
}

/// Tuning knobs for the annealing loop.
///
/// # Examples
///
/// ```
/// use annealace_solver::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_cooling_rate(0.999)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AnnealingConfig {
    /// Starting temperature.
    pub initial_temperature: f64,
    /// The loop stops once the temperature falls to this value.
    pub min_temperature: f64,
    /// Multiplicative temperature decay applied after every iteration.
    pub cooling_rate: f64,
    /// Seed for the random source; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1.0,
            min_temperature: 1e-4,
            cooling_rate: 0.9999,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    /// Sets the starting temperature.
    #[must_use]
    pub fn with_initial_temperature(mut self, value: f64) -> Self {
        self.initial_temperature = value;
        self
    }

    /// Sets the temperature at which the loop stops.
    #[must_use]
    pub fn with_min_temperature(mut self, value: f64) -> Self {
        self.min_temperature = value;
        self
    }

    /// Sets the multiplicative decay applied after every iteration.
    #[must_use]
    pub fn with_cooling_rate(mut self, value: f64) -> Self {
        self.cooling_rate = value;
        self
    }

    /// Seeds the random source for reproducible runs.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the configuration for contradictory or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_temperature <= 0.0 || !self.initial_temperature.is_finite() {
            return Err(ConfigError::InitialTemperature {
                value: self.initial_temperature,
            });
        }
        if self.min_temperature <= 0.0 || self.min_temperature >= self.initial_temperature {
            return Err(ConfigError::MinTemperature {
                value: self.min_temperature,
            });
        }
        if self.cooling_rate <= 0.0 || self.cooling_rate >= 1.0 {
            return Err(ConfigError::CoolingRate {
                value: self.cooling_rate,
            });
        }
        Ok(())
    }
}

/// Cooperative cancellation flag polled once per loop iteration.
///
/// Clones share the underlying flag, so one handle can be moved into a signal
/// handler while the solver polls another. Cancellation is not an error: the
/// solver returns the best board recorded so far.
///
/// # Examples
///
/// ```
/// use annealace_solver::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Result of one annealing run.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Best board found; the solution when [`score`](Self::score) is `0`.
    pub board: Board,
    /// Objective score of [`board`](Self::board).
    pub score: u32,
    /// Number of loop iterations executed.
    pub iterations: u64,
    /// Temperature at termination.
    pub final_temperature: f64,
    /// Whether the run ended through the cancellation token.
    pub cancelled: bool,
}

impl Outcome {
    /// Returns `true` when the board is completely filled and conflict-free.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.score == 0
    }
}

/// Drives the stochastic search over a puzzle board.
///
/// # Examples
///
/// ```
/// use std::str::FromStr as _;
///
/// use annealace_core::Board;
/// use annealace_solver::{AnnealingConfig, AnnealingSolver};
///
/// let board = Board::from_str("1204\n3412\n2143\n4321")?;
/// let solver = AnnealingSolver::new(AnnealingConfig::default().with_seed(1));
/// let outcome = solver.solve(&board)?;
/// assert_eq!(outcome.score, 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnnealingSolver {
    config: AnnealingConfig,
}

impl AnnealingSolver {
    /// Creates a solver with the given configuration.
    #[must_use]
    pub fn new(config: AnnealingConfig) -> Self {
        Self { config }
    }

    /// Runs the search to completion.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn solve(&self, initial: &Board) -> Result<Outcome, ConfigError> {
        self.solve_with_cancel(initial, None)
    }

    /// Runs the search, polling `cancel` once per iteration.
    ///
    /// A cancelled run is not an error: the best board recorded so far is
    /// returned with [`Outcome::cancelled`] set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn solve_with_cancel(
        &self,
        initial: &Board,
        cancel: Option<&CancelToken>,
    ) -> Result<Outcome, ConfigError> {
        self.config.validate()?;

        let mut rng = match self.config.seed {
            Some(seed) => Pcg64Mcg::seed_from_u64(seed),
            None => Pcg64Mcg::from_rng(&mut rand::rng()),
        };

        // Current and best are independent copies from the start; accepting a
        // neighbor must never reach into the best snapshot.
        let mut current = initial.clone();
        let mut current_score = objective_score(&current);
        if current_score == 0 {
            log::info!("initial board is already solved");
            return Ok(Outcome {
                board: current,
                score: 0,
                iterations: 0,
                final_temperature: self.config.initial_temperature,
                cancelled: false,
            });
        }
        let mut best = current.clone();
        let mut best_score = current_score;

        let mut locked = LockedPositions::from_board(initial);
        let mut forbidden = ForbiddenSets::compute(&current, &locked);
        let mut locked_dirty = false;
        let generator = NeighborGenerator::new();

        let mut temperature = self.config.initial_temperature;
        let mut iterations = 0u64;
        let mut cancelled = false;

        while temperature > self.config.min_temperature {
            if let Some(token) = cancel
                && token.is_cancelled()
            {
                log::info!("cancelled after {iterations} iterations, best score {best_score}");
                cancelled = true;
                break;
            }

            if locked_dirty {
                forbidden = ForbiddenSets::compute(&current, &locked);
                locked_dirty = false;
            }

            let neighbor = generator.generate(&mut rng, &current, &mut locked, &forbidden);
            if neighbor.locked_changed {
                locked_dirty = true;
            }
            let neighbor_score = objective_score(&neighbor.board);

            // Positive delta means the neighbor improves on the current state.
            let delta = f64::from(current_score) - f64::from(neighbor_score);

            // Strict improvements are always taken. Worse or equal candidates
            // pass through the Metropolis test, but only while their score is
            // still positive: a candidate tied at the optimum is never
            // accepted stochastically, so score 0 is reachable through strict
            // improvement alone.
            let accept = neighbor_score < current_score
                || (neighbor_score > 0 && (delta / temperature).exp() > rng.random::<f64>());

            if accept {
                current = neighbor.board;
                current_score = neighbor_score;

                if current_score == 0 {
                    log::info!("solved after {iterations} iterations");
                    return Ok(Outcome {
                        board: current,
                        score: 0,
                        iterations,
                        final_temperature: temperature,
                        cancelled: false,
                    });
                }

                if current_score < best_score {
                    best = current.clone();
                    best_score = current_score;
                }
            }

            temperature *= self.config.cooling_rate;
            iterations += 1;

            if iterations.is_multiple_of(10_000) {
                log::trace!(
                    "iteration {iterations}: current {current_score}, best {best_score}, \
                     temperature {temperature:.6}"
                );
            }
        }

        if !cancelled {
            log::info!("cooled out after {iterations} iterations, best score {best_score}");
        }
        Ok(Outcome {
            board: best,
            score: best_score,
            iterations,
            final_temperature: temperature,
            cancelled,
        })
    }
}
