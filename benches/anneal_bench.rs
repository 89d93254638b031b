//! Criterion benchmarks for the annealing engine.
//!
//! Uses synthetic problems (OneMax, random knapsack instances) to
//! measure pure solver overhead independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempering::{AnnealingSolver, CoolingSchedule, Evaluation, Knapsack, ProblemSpace, SolverConfig};

// ===========================================================================
// OneMax: maximize the number of set bits
// ===========================================================================

struct OneMax {
    n: usize,
    rng: StdRng,
}

impl OneMax {
    fn new(n: usize, seed: u64) -> Self {
        Self {
            n,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ProblemSpace for OneMax {
    type State = Vec<bool>;

    fn initial_state(&self) -> Vec<bool> {
        vec![false; self.n]
    }

    fn random_initial_state(&mut self) -> Vec<bool> {
        (0..self.n).map(|_| self.rng.random_bool(0.5)).collect()
    }

    fn random_neighbour(&mut self, state: &Vec<bool>) -> Vec<bool> {
        let index = self.rng.random_range(0..self.n);
        let mut next = state.clone();
        next[index] = !next[index];
        next
    }

    fn state_cost(&self, state: &Vec<bool>) -> Evaluation {
        Evaluation {
            cost: state.iter().filter(|&&bit| bit).count() as f64,
            feasible: true,
        }
    }

    fn instance_size(&self) -> usize {
        self.n
    }
}

// ===========================================================================
// Random knapsack instances
// ===========================================================================

fn random_knapsack(n: usize, seed: u64) -> Knapsack {
    let mut rng = StdRng::seed_from_u64(seed);
    let weights: Vec<u64> = (0..n).map(|_| rng.random_range(1..100)).collect();
    let costs: Vec<u64> = (0..n).map(|_| rng.random_range(1..1000)).collect();
    let capacity = weights.iter().sum::<u64>() / 2;
    Knapsack::seeded(weights, costs, capacity, seed)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_sa_onemax(c: &mut Criterion) {
    let mut group = c.benchmark_group("sa_onemax");
    group.sample_size(10);

    for &n in &[20, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let schedule = CoolingSchedule::geometric(50.0, 1.0, 0.9);
                let config = SolverConfig::default().with_seed(42);
                let mut solver =
                    AnnealingSolver::new(schedule, OneMax::new(n, 42), config).unwrap();
                let history = solver.solve();
                black_box((history, solver.best_cost()))
            })
        });
    }
    group.finish();
}

fn bench_sa_knapsack(c: &mut Criterion) {
    let mut group = c.benchmark_group("sa_knapsack");
    group.sample_size(10);

    for &n in &[10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let schedule = CoolingSchedule::geometric(70.0, 0.5, 0.95);
                let config = SolverConfig::default().with_seed(42);
                let mut solver =
                    AnnealingSolver::new(schedule, random_knapsack(n, 42), config).unwrap();
                let history = solver.solve();
                black_box((history, solver.best_cost()))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sa_onemax, bench_sa_knapsack);
criterion_main!(benches);
