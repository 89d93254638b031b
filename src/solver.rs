//! Annealing execution loop and automatic temperature calibration.

use crate::cooling::CoolingSchedule;
use crate::problem::ProblemSpace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Configuration for [`AnnealingSolver`].
///
/// # Examples
///
/// ```
/// use tempering::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_seed(42)
///     .with_inner_loops(100);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Seed for the solver's acceptance-draw generator. `None` sources
    /// entropy from the environment (non-reproducible).
    pub seed: Option<u64>,

    /// Derive the starting temperature, temperature floor, and starting
    /// state automatically before the first solve.
    pub auto_calibrate: bool,

    /// Neighbour evaluations per temperature level.
    ///
    /// Under `auto_calibrate` this is overridden with
    /// `2 * instance_size()`.
    pub inner_loops: usize,

    /// Candidate temperatures probed per calibration round.
    pub calibration_samples: usize,

    /// Hard cap on calibration rounds. Calibration walks candidate
    /// temperatures until one with a near-target acceptance probability
    /// is found, which for degenerate cost landscapes never happens;
    /// hitting the cap surfaces as a construction error instead of a
    /// hang.
    pub max_calibration_rounds: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: None,
            auto_calibrate: false,
            inner_loops: 50,
            calibration_samples: 33,
            max_calibration_rounds: 1000,
        }
    }
}

impl SolverConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_auto_calibrate(mut self, enabled: bool) -> Self {
        self.auto_calibrate = enabled;
        self
    }

    pub fn with_inner_loops(mut self, n: usize) -> Self {
        self.inner_loops = n;
        self
    }

    pub fn with_calibration_samples(mut self, n: usize) -> Self {
        self.calibration_samples = n;
        self
    }

    pub fn with_max_calibration_rounds(mut self, n: usize) -> Self {
        self.max_calibration_rounds = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.inner_loops == 0 {
            return Err("inner_loops must be positive".into());
        }
        if self.calibration_samples == 0 {
            return Err("calibration_samples must be positive".into());
        }
        if self.max_calibration_rounds == 0 {
            return Err("max_calibration_rounds must be positive".into());
        }
        Ok(())
    }
}

/// Counters describing the most recent [`AnnealingSolver::solve`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveStats {
    /// Total neighbour evaluations.
    pub iterations: usize,

    /// Accepted moves, improvements included.
    pub accepted_moves: usize,

    /// Moves that strictly improved on the current state.
    pub improving_moves: usize,

    /// Temperature when the schedule went inactive.
    pub final_temperature: f64,
}

/// Simulated annealing solver: searches a [`ProblemSpace`] for a
/// maximal-cost state under a [`CoolingSchedule`].
///
/// The solver owns its schedule, problem instance, and acceptance-draw
/// generator for the lifetime of the run; nothing is shared. Acceptance
/// follows the Metropolis criterion: strict improvements are always
/// taken (no randomness drawn), worsening moves are taken with
/// probability `exp(-delta / temperature)`.
///
/// # Examples
///
/// ```
/// use tempering::cooling::CoolingSchedule;
/// use tempering::knapsack::Knapsack;
/// use tempering::solver::{AnnealingSolver, SolverConfig};
///
/// let schedule = CoolingSchedule::geometric(70.0, 0.01, 0.9);
/// let problem = Knapsack::seeded(vec![2, 3, 5], vec![10, 20, 30], 8, 7);
/// let config = SolverConfig::default().with_seed(42);
///
/// let mut solver = AnnealingSolver::new(schedule, problem, config).unwrap();
/// let history = solver.solve();
/// assert!(!history.is_empty());
/// assert!(solver.best_cost() >= 0.0);
/// ```
pub struct AnnealingSolver<P: ProblemSpace> {
    cooling: CoolingSchedule,
    problem: P,
    rng: StdRng,
    inner_loops: usize,
    calibration_samples: usize,
    max_calibration_rounds: usize,
    starting_state: P::State,
    best_cost: f64,
    best_state: Option<P::State>,
    stats: SolveStats,
}

impl<P: ProblemSpace> std::fmt::Debug for AnnealingSolver<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnealingSolver")
            .field("cooling", &self.cooling)
            .field("inner_loops", &self.inner_loops)
            .field("calibration_samples", &self.calibration_samples)
            .field("max_calibration_rounds", &self.max_calibration_rounds)
            .field("best_cost", &self.best_cost)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<P: ProblemSpace> AnnealingSolver<P> {
    /// Builds a solver, taking ownership of the schedule and problem.
    ///
    /// Without `auto_calibrate` the run starts from a random initial
    /// state and the configured `inner_loops`. With it, the inner-loop
    /// length becomes `2 * instance_size()` and the starting state plus
    /// the schedule's start/min temperatures come from
    /// [calibration](SolverConfig::max_calibration_rounds), which fails
    /// with `Err` once the round cap is exceeded.
    pub fn new(cooling: CoolingSchedule, problem: P, config: SolverConfig) -> Result<Self, String> {
        config.validate()?;
        cooling.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let baseline = problem.initial_state();
        let mut solver = Self {
            cooling,
            problem,
            rng,
            inner_loops: config.inner_loops,
            calibration_samples: config.calibration_samples,
            max_calibration_rounds: config.max_calibration_rounds,
            starting_state: baseline,
            best_cost: f64::NEG_INFINITY,
            best_state: None,
            stats: SolveStats::default(),
        };

        if config.auto_calibrate {
            solver.inner_loops = 2 * solver.problem.instance_size();
            solver.starting_state = solver.calibrate()?;
        } else {
            solver.starting_state = solver.problem.random_initial_state();
        }

        Ok(solver)
    }

    /// Runs the annealing loop until the schedule goes inactive.
    ///
    /// Returns the convergence trace: the *current* (not best) state's
    /// cost sampled once per temperature level. The best state found is
    /// kept on the solver; query [`best_cost`](Self::best_cost) and
    /// [`best_state`](Self::best_state) afterwards.
    pub fn solve(&mut self) -> Vec<f64> {
        let mut state = self.starting_state.clone();
        let mut current_cost = self.problem.state_cost(&state).cost;
        self.best_state = Some(state.clone());
        self.best_cost = current_cost;
        self.stats = SolveStats::default();

        let mut history = Vec::new();

        while self.cooling.is_active() {
            for _ in 0..self.inner_loops {
                let neighbour = self.problem.random_neighbour(&state);
                let neighbour_cost = self.problem.state_cost(&neighbour).cost;
                // Current cost is cached across the inner loop; the state
                // only changes on acceptance, which refreshes the cache.
                let delta = current_cost - neighbour_cost;

                self.stats.iterations += 1;

                if neighbour_cost > self.best_cost {
                    self.best_cost = neighbour_cost;
                    self.best_state = Some(neighbour.clone());
                }

                let accept = if delta < 0.0 {
                    self.stats.improving_moves += 1;
                    true
                } else {
                    self.accept_worse(delta)
                };

                if accept {
                    state = neighbour;
                    current_cost = neighbour_cost;
                    self.stats.accepted_moves += 1;
                }
            }

            self.cooling.advance();
            history.push(current_cost);
        }

        self.stats.final_temperature = self.cooling.temperature();
        history
    }

    /// Best cost observed during the last solve.
    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }

    /// Best state observed during the last solve, if any run happened.
    pub fn best_state(&self) -> Option<&P::State> {
        self.best_state.as_ref()
    }

    /// Counters for the last solve.
    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// The owned problem instance.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    fn accept_worse(&mut self, delta: f64) -> bool {
        let temperature = self.cooling.temperature();
        if temperature <= 0.0 {
            return false;
        }
        acceptance_probability(delta, temperature) > self.rng.random_range(0.0..1.0)
    }

    /// Searches for a starting temperature whose Metropolis acceptance
    /// probability for typical neighbour moves lands near 0.5 — hot
    /// enough to escape local optima, cold enough not to random-walk.
    ///
    /// Candidate temperatures are spaced quadratically (`jj*jj + 1`):
    /// dense near zero where the probability is most sensitive, sparse
    /// at the hot end. Each candidate is scored over `inner_loops`
    /// neighbour probes by the squared error of its acceptance
    /// probability against the target, and the state walks onto any
    /// neighbour that improved the score. Rounds repeat until a
    /// temperature of at least 1 wins, bounded by
    /// `max_calibration_rounds`.
    ///
    /// On success the schedule's start temperature is set to the winner
    /// and its floor to a tenth of it; the walked state is returned to
    /// seed the solve.
    fn calibrate(&mut self) -> Result<P::State, String> {
        let goal_probability = 0.5;

        let mut state = self.problem.initial_state();
        let mut best_starting_state = state.clone();
        let mut best_probability = 0.0_f64;
        let mut best_temperature = 0.0_f64;

        let mut rounds = 0;
        while best_temperature < 1.0 {
            if rounds >= self.max_calibration_rounds {
                return Err(format!(
                    "temperature calibration did not settle within {} rounds",
                    self.max_calibration_rounds
                ));
            }
            rounds += 1;

            for sample in 0..self.calibration_samples {
                let candidate = (sample * sample + 1) as f64;

                for _ in 0..self.inner_loops {
                    let neighbour = self.problem.random_neighbour(&state);
                    let state_cost = self.problem.state_cost(&state).cost;
                    let neighbour_cost = self.problem.state_cost(&neighbour).cost;
                    let delta = state_cost - neighbour_cost;

                    let probability = acceptance_probability(delta, candidate);
                    if (goal_probability - probability).powi(2)
                        < (goal_probability - best_probability).powi(2)
                    {
                        best_probability = probability;
                        best_temperature = candidate;
                        state = neighbour;
                    }
                }

                best_starting_state = state.clone();
                state = self.problem.random_neighbour(&state);
            }
        }

        self.cooling.set_start_temperature(best_temperature);
        self.cooling.set_min_temperature(best_temperature / 10.0);

        Ok(best_starting_state)
    }
}

/// Metropolis acceptance probability for a cost worsening of `delta`.
fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    (-delta / temperature).exp()
}
