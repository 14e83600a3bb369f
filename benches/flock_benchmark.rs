/*
 * Flock Simulation Benchmark
 *
 * Measures the neighbor query backends against each other and the cost of a
 * full simulation tick at several population sizes.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flocklife::{Agent, BruteForce, HslColor, InputState, NeighborQuery, Simulation, SimulationParams, SpatialGrid};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

const SIZES: [usize; 4] = [100, 500, 1000, 2000];

fn random_positions(n: usize, extent: f32) -> Vec<Vec3> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    (0..n)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
            )
        })
        .collect()
}

fn query_all(index: &dyn NeighborQuery, positions: &[Vec3]) -> usize {
    let mut out = Vec::new();
    let mut total = 0;
    for i in 0..positions.len() {
        index.neighbors_of(i, positions, &mut out);
        total += out.len();
    }
    total
}

// Benchmark brute force against the spatial grid
fn bench_neighbor_queries(c: &mut Criterion) {
    let params = SimulationParams::default();
    let mut group = c.benchmark_group("neighbor_queries");

    for &n in SIZES.iter() {
        let positions = random_positions(n, 8.0);

        group.bench_with_input(BenchmarkId::new("brute_force", n), &positions, |b, positions| {
            let mut index = BruteForce::new(params.neighbor_radius);
            b.iter(|| {
                index.rebuild(positions);
                black_box(query_all(&index, positions))
            });
        });

        group.bench_with_input(BenchmarkId::new("spatial_grid", n), &positions, |b, positions| {
            let mut index = SpatialGrid::new(params.neighbor_radius, params.world_radius);
            b.iter(|| {
                index.rebuild(positions);
                black_box(query_all(&index, positions))
            });
        });
    }

    group.finish();
}

// Benchmark a full tick, sequential and parallel
fn bench_update_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_loop");
    let color = HslColor::new(0.8, 1.0, 0.5);
    let input = InputState::new(Vec3::new(2.0, 1.0, 0.0), true).unwrap_or_default();

    for &n in SIZES.iter() {
        let positions = random_positions(n, 8.0);

        for parallel in [false, true] {
            let params = SimulationParams {
                seed: Some(7),
                parallel,
                // Keep the population size fixed while measuring
                spawn_interval_range: 1.0e6..2.0e6,
                ..SimulationParams::default()
            };
            let agents: Vec<Agent> = positions
                .iter()
                .map(|&p| Agent::mortal(p, Vec3::ZERO, 0.1, color, 1.0e6))
                .collect();
            let label = if parallel { "parallel" } else { "sequential" };

            group.bench_with_input(BenchmarkId::new(label, n), &agents, |b, agents| {
                b.iter_batched(
                    || {
                        Simulation::with_agents(params.clone(), agents.iter().cloned())
                            .unwrap_or_else(|err| panic!("benchmark parameters rejected: {err}"))
                    },
                    |mut simulation| black_box(simulation.step_fixed(&input)),
                    criterion::BatchSize::LargeInput,
                );
            });
        }
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_neighbor_queries, bench_update_loop
}

criterion_main!(benches);
