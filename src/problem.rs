//! Core trait for annealing problems.

/// Feasibility-adjusted score of a candidate state.
///
/// Infeasible states carry their constraint violation as a soft cost
/// penalty rather than being rejected outright, so the solver can walk
/// through infeasible regions of the search space while still being
/// pushed back toward feasibility. The solver itself only consults
/// `cost`; `feasible` is reported for the caller's benefit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// Objective value, penalty already applied. Higher is better.
    pub cost: f64,

    /// Whether the state satisfies all problem constraints.
    pub feasible: bool,
}

/// Defines an optimization problem for the annealing solver.
///
/// The user implements state generation, neighbour moves, and cost
/// evaluation. The solver handles temperature management, the
/// acceptance criterion, and best-state tracking.
///
/// # Maximization
///
/// The solver maximizes the cost returned by [`state_cost`](ProblemSpace::state_cost).
/// For minimization, negate the cost.
///
/// # Randomness
///
/// Each instance owns a private random generator seeded at construction,
/// used by `random_initial_state` and `random_neighbour`. Generators are
/// never shared or reseeded across instances, so a fixed seed gives a
/// fully reproducible stream of states. States produced by one instance
/// must not be fed to another.
///
/// # Examples
///
/// ```ignore
/// struct OneMax { n: usize, rng: StdRng }
///
/// impl ProblemSpace for OneMax {
///     type State = Vec<bool>;
///
///     fn initial_state(&self) -> Vec<bool> {
///         vec![false; self.n]
///     }
///
///     fn random_initial_state(&mut self) -> Vec<bool> {
///         (0..self.n).map(|_| self.rng.random_bool(0.5)).collect()
///     }
///
///     fn random_neighbour(&mut self, state: &Vec<bool>) -> Vec<bool> {
///         let mut next = state.clone();
///         let index = self.rng.random_range(0..self.n);
///         next[index] = !next[index];
///         next
///     }
///
///     fn state_cost(&self, state: &Vec<bool>) -> Evaluation {
///         let ones = state.iter().filter(|&&b| b).count() as f64;
///         Evaluation { cost: ones, feasible: true }
///     }
///
///     fn instance_size(&self) -> usize {
///         self.n
///     }
/// }
/// ```
///
/// # References
///
/// Kirkpatrick, Gelatt & Vecchi (1983), Cerny (1985)
pub trait ProblemSpace {
    /// The candidate state representation. Opaque to the solver.
    type State: Clone;

    /// Deterministic baseline state (e.g. the empty selection).
    fn initial_state(&self) -> Self::State;

    /// Uniformly randomized state drawn from the instance's private generator.
    fn random_initial_state(&mut self) -> Self::State;

    /// Produces a new state one elementary move away from `state`.
    ///
    /// Must not mutate `state`. The neighbourhood must be connected
    /// (any state reachable from any other via a sequence of moves),
    /// and any index sampling must draw from `0..instance_size()` with
    /// an exclusive upper bound.
    fn random_neighbour(&mut self, state: &Self::State) -> Self::State;

    /// Scores a state. Feasible states score their true objective;
    /// infeasible states score the objective minus a violation penalty.
    fn state_cost(&self, state: &Self::State) -> Evaluation;

    /// Number of decision variables. Drives the solver's default
    /// inner-loop length under automatic calibration.
    fn instance_size(&self) -> usize;
}
