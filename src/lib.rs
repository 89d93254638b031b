//! Problem-agnostic simulated annealing engine.
//!
//! Simulated annealing is a single-solution trajectory metaheuristic
//! inspired by the physical annealing process: worsening moves are
//! accepted with a probability that decreases as a temperature
//! parameter cools, letting the search escape local optima early and
//! converge late. This crate splits the algorithm into three pieces:
//!
//! - **[`CoolingSchedule`]**: the temperature state machine, with
//!   linear and geometric decay rules.
//! - **[`ProblemSpace`]**: the problem abstraction — state generation,
//!   neighbour moves, and feasibility-adjusted cost evaluation. The
//!   solver never inspects states directly.
//! - **[`AnnealingSolver`]**: the execution loop — Metropolis
//!   acceptance, best-state tracking, and optional automatic
//!   temperature calibration.
//!
//! A reference [`Knapsack`] problem (0/1 selection under a soft
//! capacity penalty) shows how to implement the contract.
//!
//! # Reproducibility
//!
//! Every problem instance and every solver owns a private random
//! generator seeded at construction. Fixing the seeds fixes the entire
//! run.
//!
//! # Examples
//!
//! ```
//! use tempering::{AnnealingSolver, CoolingSchedule, Knapsack, SolverConfig};
//!
//! let schedule = CoolingSchedule::geometric(70.0, 0.01, 0.995);
//! let problem = Knapsack::seeded(
//!     vec![36, 1, 43, 113, 202, 10, 149, 209, 28, 65],
//!     vec![574, 253, 636, 1266, 2068, 334, 1588, 2126, 495, 831],
//!     522,
//!     42,
//! );
//! let config = SolverConfig::default().with_seed(42);
//!
//! let mut solver = AnnealingSolver::new(schedule, problem, config).unwrap();
//! let history = solver.solve();
//!
//! println!("{} temperature levels", history.len());
//! println!("best cost: {}", solver.best_cost());
//! ```
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

pub mod cooling;
pub mod knapsack;
pub mod problem;
pub mod solver;

pub use cooling::{CoolingSchedule, DecayRule};
pub use knapsack::Knapsack;
pub use problem::{Evaluation, ProblemSpace};
pub use solver::{AnnealingSolver, SolveStats, SolverConfig};
