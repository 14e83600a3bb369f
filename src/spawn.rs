/*
 * Spawn Module
 *
 * While the pointer is dragged, a new generation of mortal offspring appears
 * around every immortal anchor at randomized intervals. The controller keeps
 * the timer; the batch itself splits a random group size across the anchors.
 */

use glam::Vec3;
use rand::Rng;
use tracing::debug;

use crate::agent::{Agent, AgentStore, HslColor};
use crate::params::SimulationParams;

/// Summary of one spawn batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnReport {
    pub group_size: u32,
    pub anchors: usize,
    pub offspring: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnController {
    last_spawn_time: f64,
    next_interval: f64,
}

impl SpawnController {
    pub fn new<R: Rng>(params: &SimulationParams, rng: &mut R) -> Self {
        Self {
            last_spawn_time: 0.0,
            next_interval: rng.gen_range(params.spawn_interval_range.clone()),
        }
    }

    pub fn last_spawn_time(&self) -> f64 {
        self.last_spawn_time
    }

    pub fn next_interval(&self) -> f64 {
        self.next_interval
    }

    pub fn is_due(&self, now: f64, is_dragging: bool) -> bool {
        is_dragging && now - self.last_spawn_time > self.next_interval
    }

    /// Spawn a batch if dragging and the interval has elapsed, then restart the timer.
    pub fn try_spawn<R: Rng>(
        &mut self,
        now: f64,
        is_dragging: bool,
        store: &mut AgentStore,
        params: &SimulationParams,
        rng: &mut R,
    ) -> Option<SpawnReport> {
        if !self.is_due(now, is_dragging) {
            return None;
        }

        let report = spawn_batch(store, params, rng);
        self.last_spawn_time = now;
        self.next_interval = rng.gen_range(params.spawn_interval_range.clone());

        debug!(
            time = now,
            offspring = report.offspring,
            group_size = report.group_size,
            next_interval = self.next_interval,
            "spawned generation"
        );
        Some(report)
    }
}

fn symmetric<R: Rng>(rng: &mut R, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.gen_range(-extent..extent)
    } else {
        0.0
    }
}

fn symmetric_vec3<R: Rng>(rng: &mut R, extent: f32) -> Vec3 {
    Vec3::new(
        symmetric(rng, extent),
        symmetric(rng, extent),
        symmetric(rng, extent),
    )
}

/// Add one generation of offspring around the current anchors.
pub fn spawn_batch<R: Rng>(
    store: &mut AgentStore,
    params: &SimulationParams,
    rng: &mut R,
) -> SpawnReport {
    let anchors: Vec<Vec3> = store.anchors().map(|anchor| anchor.position).collect();
    let group_size = rng.gen_range(params.group_size_range.clone());
    let mut report = SpawnReport {
        group_size,
        anchors: anchors.len(),
        offspring: 0,
    };

    if anchors.is_empty() {
        return report;
    }

    let share = group_size as f32 / anchors.len() as f32;
    let color = HslColor::new(params.young_hue, params.saturation, params.lightness);

    for anchor in anchors {
        let count = (rng.gen::<f32>() * share).floor() as usize;
        for _ in 0..count {
            // Anchors near the boundary must not place offspring outside the world
            let position = (anchor + symmetric_vec3(rng, params.spawn_jitter))
                .clamp_length_max(params.world_radius);
            let velocity = symmetric_vec3(rng, params.spawn_speed);
            let scale = rng.gen_range(params.offspring_scale_range.clone());
            let lifespan = rng.gen_range(params.offspring_lifespan_range.clone());
            store.add(Agent::mortal(position, velocity, scale, color, lifespan));
        }
        report.offspring += count;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn store_with_anchors(positions: &[Vec3]) -> AgentStore {
        let mut store = AgentStore::new();
        for &position in positions {
            store.add(Agent::immortal(position, Vec3::ZERO, 0.2, HslColor::new(0.98, 1.0, 0.5)));
        }
        store
    }

    #[test]
    fn interval_is_drawn_from_range() {
        let params = SimulationParams::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let controller = SpawnController::new(&params, &mut rng);
            assert!(params.spawn_interval_range.contains(&controller.next_interval()));
        }
    }

    #[test]
    fn never_spawns_without_drag() {
        let params = SimulationParams::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut store = store_with_anchors(&[Vec3::ZERO]);
        let mut controller = SpawnController::new(&params, &mut rng);

        for step in 0..10_000 {
            let now = step as f64 * 0.5;
            assert!(controller
                .try_spawn(now, false, &mut store, &params, &mut rng)
                .is_none());
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn spawns_after_interval_and_resets_timer() {
        let params = SimulationParams::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut store = store_with_anchors(&[Vec3::ZERO]);
        let mut controller = SpawnController::new(&params, &mut rng);

        let early = controller.next_interval() * 0.5;
        assert!(controller
            .try_spawn(early, true, &mut store, &params, &mut rng)
            .is_none());

        let now = params.spawn_interval_range.end + 0.01;
        let report = controller.try_spawn(now, true, &mut store, &params, &mut rng);
        assert!(report.is_some());
        assert_eq!(controller.last_spawn_time(), now);
        assert!(!controller.is_due(now, true));
    }

    #[test]
    fn offspring_stay_near_their_anchor() {
        let params = SimulationParams::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let anchor = Vec3::new(4.0, -2.0, 1.0);
        let mut store = store_with_anchors(&[anchor]);

        let report = spawn_batch(&mut store, &params, &mut rng);
        assert_eq!(store.len(), 1 + report.offspring);
        assert!(report.offspring < params.group_size_range.end as usize);

        for child in store.all().iter().filter(|agent| !agent.is_immortal()) {
            let offset = child.position - anchor;
            assert!(offset.abs().max_element() <= params.spawn_jitter);
            assert!(child.velocity.abs().max_element() <= params.spawn_speed);
            assert!(params.offspring_scale_range.contains(&child.scale));
            assert!(params.offspring_lifespan_range.contains(&child.max_lifespan));
            assert_eq!(child.lifespan, child.max_lifespan);
            assert_eq!(child.color.hue, params.young_hue);
        }
    }

    #[test]
    fn offspring_of_boundary_anchor_stay_in_world() {
        let params = SimulationParams::default();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut store = store_with_anchors(&[Vec3::X * params.world_radius]);

        let report = spawn_batch(&mut store, &params, &mut rng);
        assert!(report.offspring > 0);
        for agent in store.all() {
            assert!(agent.position.length() <= params.world_radius + 1e-4);
        }
    }

    #[test]
    fn batch_is_split_across_anchors() {
        let params = SimulationParams::default();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut store = store_with_anchors(&[Vec3::ZERO, Vec3::X * 5.0, Vec3::Y * 5.0, Vec3::Z * 5.0]);

        let report = spawn_batch(&mut store, &params, &mut rng);
        assert_eq!(report.anchors, 4);
        // Each anchor gets at most a quarter of the group
        assert!(report.offspring <= report.group_size as usize);
    }

    #[test]
    fn zero_jitter_spawns_on_the_anchor() {
        let params = SimulationParams {
            spawn_jitter: 0.0,
            spawn_speed: 0.0,
            ..SimulationParams::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut store = store_with_anchors(&[Vec3::ONE]);
        spawn_batch(&mut store, &params, &mut rng);
        assert!(store.all().iter().all(|agent| agent.position == Vec3::ONE));
    }

    #[test]
    fn empty_anchor_set_spawns_nothing() {
        let params = SimulationParams::default();
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut store = AgentStore::new();
        let report = spawn_batch(&mut store, &params, &mut rng);
        assert_eq!(report.offspring, 0);
        assert!(store.is_empty());
    }
}
