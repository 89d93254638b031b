//! Reference problem: 0/1 knapsack with a soft capacity penalty.

use crate::problem::{Evaluation, ProblemSpace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Cost deduction per unit of weight over capacity.
const PENALTY_WEIGHT: f64 = 1000.0;

/// 0/1 knapsack instance: pick a subset of items maximizing total cost
/// under a weight capacity.
///
/// States are inclusion bitmaps (`Vec<bool>`, one flag per item).
/// Overweight states are not rejected; their score is the raw item cost
/// minus `1000 * (weight - capacity)`, which keeps the search space
/// connected while steering the solver back under capacity.
///
/// # Examples
///
/// ```
/// use tempering::knapsack::Knapsack;
/// use tempering::problem::ProblemSpace;
///
/// let knapsack = Knapsack::seeded(vec![2, 3, 5], vec![10, 20, 30], 8, 7);
/// let evaluation = knapsack.state_cost(&vec![true, true, false]);
/// assert_eq!(evaluation.cost, 30.0);
/// assert!(evaluation.feasible);
/// ```
#[derive(Debug, Clone)]
pub struct Knapsack {
    weights: Vec<u64>,
    costs: Vec<u64>,
    capacity: u64,
    rng: StdRng,
}

impl Knapsack {
    /// Creates an instance with an entropy-sourced seed.
    ///
    /// # Panics
    ///
    /// Panics if `weights` and `costs` differ in length.
    pub fn new(weights: Vec<u64>, costs: Vec<u64>, capacity: u64) -> Self {
        Self::seeded(weights, costs, capacity, rand::random())
    }

    /// Creates an instance with an explicit seed for reproducible runs.
    ///
    /// # Panics
    ///
    /// Panics if `weights` and `costs` differ in length.
    pub fn seeded(weights: Vec<u64>, costs: Vec<u64>, capacity: u64, seed: u64) -> Self {
        assert_eq!(
            weights.len(),
            costs.len(),
            "weights and costs must have one entry per item"
        );
        Self {
            weights,
            costs,
            capacity,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Total weight of the included items.
    pub fn state_weight(&self, state: &[bool]) -> u64 {
        self.weights
            .iter()
            .zip(state)
            .filter(|&(_, &included)| included)
            .map(|(&weight, _)| weight)
            .sum()
    }

    /// Weight capacity of this instance.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }
}

impl ProblemSpace for Knapsack {
    type State = Vec<bool>;

    fn initial_state(&self) -> Vec<bool> {
        vec![false; self.weights.len()]
    }

    fn random_initial_state(&mut self) -> Vec<bool> {
        (0..self.weights.len())
            .map(|_| self.rng.random_bool(0.5))
            .collect()
    }

    fn random_neighbour(&mut self, state: &Vec<bool>) -> Vec<bool> {
        // Either add or remove one item. The index range is exclusive of
        // the item count.
        let index = self.rng.random_range(0..self.weights.len());
        let mut neighbour = state.clone();
        neighbour[index] = !neighbour[index];
        neighbour
    }

    fn state_cost(&self, state: &Vec<bool>) -> Evaluation {
        let mut cost = 0.0;
        let mut weight = 0.0;
        for (index, &included) in state.iter().enumerate() {
            if included {
                cost += self.costs[index] as f64;
                weight += self.weights[index] as f64;
            }
        }

        let violation = weight - self.capacity as f64;
        cost -= PENALTY_WEIGHT * violation.max(0.0);

        Evaluation {
            cost,
            feasible: violation <= 0.0,
        }
    }

    fn instance_size(&self) -> usize {
        self.weights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_instance(seed: u64) -> Knapsack {
        Knapsack::seeded(vec![2, 3, 5, 7], vec![10, 20, 30, 40], 10, seed)
    }

    #[test]
    fn test_initial_state_excludes_everything() {
        let knapsack = small_instance(1);
        let state = knapsack.initial_state();
        assert_eq!(state, vec![false; 4]);
        assert_eq!(knapsack.state_cost(&state).cost, 0.0);
    }

    #[test]
    fn test_cost_sums_included_items() {
        let knapsack = small_instance(1);
        let evaluation = knapsack.state_cost(&vec![true, true, true, false]);
        assert_eq!(evaluation.cost, 60.0);
        assert!(evaluation.feasible);
    }

    #[test]
    fn test_weight_exactly_at_capacity_is_feasible() {
        // 3 + 7 == 10, right at the boundary: no penalty.
        let knapsack = small_instance(1);
        let evaluation = knapsack.state_cost(&vec![false, true, false, true]);
        assert_eq!(evaluation.cost, 60.0);
        assert!(evaluation.feasible);
    }

    #[test]
    fn test_one_unit_over_capacity_is_penalized() {
        // 2 + 3 + 7 == 11 == capacity + 1.
        let knapsack = small_instance(1);
        let evaluation = knapsack.state_cost(&vec![true, true, false, true]);
        assert_eq!(evaluation.cost, 70.0 - 1000.0);
        assert!(!evaluation.feasible);
    }

    #[test]
    fn test_penalty_scales_with_violation() {
        // All items: weight 17, violation 7.
        let knapsack = small_instance(1);
        let evaluation = knapsack.state_cost(&vec![true; 4]);
        assert_eq!(evaluation.cost, 100.0 - 7.0 * 1000.0);
        assert!(!evaluation.feasible);
    }

    #[test]
    fn test_neighbour_flips_exactly_one_bit() {
        let mut knapsack = small_instance(42);
        let state = knapsack.initial_state();
        for _ in 0..200 {
            let neighbour = knapsack.random_neighbour(&state);
            let flipped = state
                .iter()
                .zip(&neighbour)
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(flipped, 1);
        }
    }

    #[test]
    fn test_neighbour_does_not_mutate_input() {
        let mut knapsack = small_instance(42);
        let state = vec![true, false, true, false];
        let copy = state.clone();
        let _ = knapsack.random_neighbour(&state);
        assert_eq!(state, copy);
    }

    #[test]
    fn test_neighbour_eventually_touches_every_index() {
        // Exercises the full index range, including the last item; an
        // inclusive upper bound would panic on the out-of-range flip.
        let mut knapsack = small_instance(7);
        let state = knapsack.initial_state();
        let mut touched = vec![false; 4];
        for _ in 0..500 {
            let neighbour = knapsack.random_neighbour(&state);
            for (index, (a, b)) in state.iter().zip(&neighbour).enumerate() {
                if a != b {
                    touched[index] = true;
                }
            }
        }
        assert!(touched.iter().all(|&t| t));
    }

    #[test]
    fn test_seeded_instances_are_reproducible() {
        let mut first = small_instance(99);
        let mut second = small_instance(99);
        assert_eq!(first.random_initial_state(), second.random_initial_state());
        let state = vec![false; 4];
        for _ in 0..50 {
            assert_eq!(
                first.random_neighbour(&state),
                second.random_neighbour(&state)
            );
        }
    }

    #[test]
    #[should_panic(expected = "one entry per item")]
    fn test_mismatched_lengths_panic() {
        let _ = Knapsack::seeded(vec![1, 2], vec![10], 5, 0);
    }
}
