/*
 * Simulation Module
 *
 * The Simulation owns the agent population and runs one tick per frame:
 * 1. Gather a read-only snapshot and compute every agent's steering force
 * 2. Integrate motion and bounce off the world boundary
 * 3. Age mortal agents and drop the expired ones
 * 4. Let the spawn controller add a new generation while dragging
 * 5. Hand a render-ready snapshot back to the caller
 *
 * Forces are computed for all agents before any agent moves, so the result
 * does not depend on iteration order and the force pass can run in parallel.
 */

use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::agent::{Agent, AgentStore, HslColor};
use crate::error::{ConfigError, InputError};
use crate::flocking::{steering_force, ForceWeights};
use crate::lifecycle::{age_all, is_expired, AgingRules};
use crate::neighbors::{BruteForce, NeighborQuery};
use crate::params::{ParamChanges, SimulationParams};
use crate::physics::{integrate, MotionLimits};
use crate::spatial_grid::SpatialGrid;
use crate::spawn::{SpawnController, SpawnReport};

/// Pointer state for one tick, validated at construction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputState {
    target: Vec3,
    is_dragging: bool,
}

impl InputState {
    pub fn new(target: Vec3, is_dragging: bool) -> Result<Self, InputError> {
        if !target.is_finite() {
            return Err(InputError::NonFiniteTarget {
                x: target.x,
                y: target.y,
                z: target.z,
            });
        }
        Ok(Self { target, is_dragging })
    }

    pub fn idle() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }
}

/// Transform and color of one live agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderInstance {
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: f32,
    pub color: HslColor,
    pub is_immortal: bool,
}

impl From<&Agent> for RenderInstance {
    fn from(agent: &Agent) -> Self {
        Self {
            position: agent.position,
            orientation: agent.orientation,
            scale: agent.scale,
            color: agent.color,
            is_immortal: agent.is_immortal(),
        }
    }
}

/// Everything the renderer needs after a tick. Instance order is not stable
/// between ticks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameSnapshot {
    pub instances: Vec<RenderInstance>,
    pub alive: usize,
    pub immortal: usize,
    pub mortal: usize,
    pub expired: usize,
    pub spawned: Option<SpawnReport>,
    pub tick: u64,
    pub elapsed: f64,
}

type NeighborIndex = Box<dyn NeighborQuery + Send>;

fn build_index(params: &SimulationParams) -> NeighborIndex {
    if params.use_spatial_grid {
        Box::new(SpatialGrid::new(params.neighbor_radius, params.world_radius))
    } else {
        Box::new(BruteForce::new(params.neighbor_radius))
    }
}

pub struct Simulation {
    params: SimulationParams,
    store: AgentStore,
    spawner: SpawnController,
    index: NeighborIndex,
    rng: ChaCha8Rng,
    seed: u64,
    elapsed: f64,
    tick: u64,
}

impl Simulation {
    /// Build a world with `params.anchor_count` anchors scattered in a cube.
    pub fn new(params: SimulationParams) -> Result<Self, ConfigError> {
        let mut simulation = Self::with_agents(params, std::iter::empty())?;
        simulation.populate_anchors();
        info!(
            seed = simulation.seed,
            anchors = simulation.store.len(),
            "simulation initialized"
        );
        Ok(simulation)
    }

    /// Build a world from an explicit starting population.
    pub fn with_agents<I>(params: SimulationParams, agents: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Agent>,
    {
        params.validate()?;

        let agents: Vec<Agent> = agents.into_iter().collect();
        if let Some((index, agent)) = agents
            .iter()
            .enumerate()
            .find(|(_, agent)| !agent.has_valid_lifespan())
        {
            return Err(ConfigError::InvalidAgentLifespan {
                index,
                lifespan: agent.lifespan,
                max_lifespan: agent.max_lifespan,
            });
        }

        let seed = params.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let spawner = SpawnController::new(&params, &mut rng);
        let mut store = AgentStore::new();
        store.rebuild(agents);

        Ok(Self {
            index: build_index(&params),
            params,
            store,
            spawner,
            rng,
            seed,
            elapsed: 0.0,
            tick: 0,
        })
    }

    fn populate_anchors(&mut self) {
        let spread = self.params.anchor_spread;
        let color = HslColor::new(
            self.params.young_hue,
            self.params.saturation,
            self.params.lightness,
        );

        for _ in 0..self.params.anchor_count {
            let position = random_in_cube(&mut self.rng, spread);
            let velocity = random_in_cube(&mut self.rng, self.params.spawn_speed);
            self.store.add(Agent::immortal(
                position,
                velocity,
                self.params.anchor_scale,
                color,
            ));
        }
    }

    /// Discard the population and rebuild anchors from the current parameters.
    pub fn reset(&mut self) {
        self.seed = self.params.seed.unwrap_or_else(|| rand::thread_rng().gen());
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.spawner = SpawnController::new(&self.params, &mut self.rng);
        self.store = AgentStore::new();
        self.index = build_index(&self.params);
        self.elapsed = 0.0;
        self.tick = 0;
        self.populate_anchors();
        info!(seed = self.seed, anchors = self.store.len(), "simulation reset");
    }

    /// Swap in edited parameters. Anchor or seed edits rebuild the world.
    pub fn set_params(&mut self, params: SimulationParams) -> Result<ParamChanges, ConfigError> {
        params.validate()?;
        let changes = params.detect_changes(&self.params);
        if !changes.any_changed {
            return Ok(changes);
        }

        self.params = params;
        if changes.world_reset_needed {
            self.reset();
        } else {
            self.index = build_index(&self.params);
        }
        Ok(changes)
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn store(&self) -> &AgentStore {
        &self.store
    }

    pub fn spawner(&self) -> &SpawnController {
        &self.spawner
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Advance by one tick of the configured fixed delta.
    pub fn step_fixed(&mut self, input: &InputState) -> FrameSnapshot {
        let dt = self.params.tick_delta;
        self.step(input, dt)
    }

    /// Advance by one tick; `dt` only drives the spawn clock, aging always
    /// uses the fixed tick delta.
    pub fn step(&mut self, input: &InputState, dt: f32) -> FrameSnapshot {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        let accelerations = self.compute_forces(input);

        let limits = MotionLimits::from(&self.params);
        for (agent, acceleration) in self.store.all_mut().iter_mut().zip(accelerations) {
            agent.apply_force(acceleration);
            integrate(agent, &limits);
        }

        let rules = AgingRules::from(&self.params);
        let expired = age_all(self.store.all_mut(), &rules);
        if expired > 0 {
            let agents = self.store.take();
            self.store
                .rebuild(agents.into_iter().filter(|agent| !is_expired(agent)));
            debug!(expired, remaining = self.store.len(), "agents expired");
        }

        self.elapsed += dt as f64;
        self.tick += 1;
        let spawned = self.spawner.try_spawn(
            self.elapsed,
            input.is_dragging(),
            &mut self.store,
            &self.params,
            &mut self.rng,
        );

        let mut snapshot = self.snapshot();
        snapshot.expired = expired;
        snapshot.spawned = spawned;
        trace!(
            tick = self.tick,
            alive = snapshot.alive,
            dragging = input.is_dragging(),
            "tick complete"
        );
        snapshot
    }

    /// Steering force for every agent, read from the current positions only.
    fn compute_forces(&mut self, input: &InputState) -> Vec<Vec3> {
        let agents = self.store.all();
        let positions: Vec<Vec3> = agents.iter().map(|agent| agent.position).collect();
        self.index.rebuild(&positions);

        let index = &*self.index;
        let weights = ForceWeights::from(&self.params);

        if self.params.parallel {
            (0..agents.len())
                .into_par_iter()
                .map_init(Vec::new, |neighbors, i| {
                    index.neighbors_of(i, &positions, neighbors);
                    steering_force(i, agents, neighbors, input, &weights)
                })
                .collect()
        } else {
            let mut neighbors = Vec::new();
            (0..agents.len())
                .map(|i| {
                    index.neighbors_of(i, &positions, &mut neighbors);
                    steering_force(i, agents, &neighbors, input, &weights)
                })
                .collect()
        }
    }

    /// Render data for the current population.
    pub fn snapshot(&self) -> FrameSnapshot {
        let instances: Vec<RenderInstance> =
            self.store.all().iter().map(RenderInstance::from).collect();
        let immortal = instances.iter().filter(|instance| instance.is_immortal).count();

        FrameSnapshot {
            alive: instances.len(),
            immortal,
            mortal: instances.len() - immortal,
            instances,
            expired: 0,
            spawned: None,
            tick: self.tick,
            elapsed: self.elapsed,
        }
    }
}

fn random_in_cube<R: Rng>(rng: &mut R, half_extent: f32) -> Vec3 {
    if half_extent <= 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(
        rng.gen_range(-half_extent..half_extent),
        rng.gen_range(-half_extent..half_extent),
        rng.gen_range(-half_extent..half_extent),
    )
}
