/*
 * Flocking Module
 *
 * Steering forces for one agent given its neighbors:
 * 1. Alignment: match the average velocity of neighbors
 * 2. Cohesion: move towards the average position of neighbors
 * 3. Separation: push away from neighbors, harder the closer they are
 * 4. Seek: pull towards the drag target while the pointer is held
 *
 * All forces read from the tick's snapshot of agents and never mutate it.
 */

use glam::Vec3;

use crate::agent::Agent;
use crate::params::SimulationParams;
use crate::simulation::InputState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceWeights {
    pub alignment: f32,
    pub cohesion: f32,
    pub separation: f32,
    pub seek: f32,
}

impl From<&SimulationParams> for ForceWeights {
    fn from(params: &SimulationParams) -> Self {
        Self {
            alignment: params.alignment_weight,
            cohesion: params.cohesion_weight,
            separation: params.separation_weight,
            seek: params.seek_weight,
        }
    }
}

pub fn alignment(agent: &Agent, agents: &[Agent], neighbors: &[usize], weight: f32) -> Vec3 {
    if neighbors.is_empty() {
        return Vec3::ZERO;
    }
    let sum: Vec3 = neighbors.iter().map(|&i| agents[i].velocity).sum();
    let average = sum / neighbors.len() as f32;
    (average - agent.velocity) * weight
}

pub fn cohesion(agent: &Agent, agents: &[Agent], neighbors: &[usize], weight: f32) -> Vec3 {
    if neighbors.is_empty() {
        return Vec3::ZERO;
    }
    let sum: Vec3 = neighbors.iter().map(|&i| agents[i].position).sum();
    let center = sum / neighbors.len() as f32;
    (center - agent.position) * weight
}

pub fn separation(agent: &Agent, agents: &[Agent], neighbors: &[usize], weight: f32) -> Vec3 {
    let mut steering = Vec3::ZERO;

    for &i in neighbors {
        let diff = agent.position - agents[i].position;
        let distance_squared = diff.length_squared();

        // Coincident agents contribute nothing
        if distance_squared > 0.0 {
            steering += diff / distance_squared;
        }
    }

    steering * weight
}

pub fn seek(agent: &Agent, input: &InputState, weight: f32) -> Vec3 {
    if !input.is_dragging() {
        return Vec3::ZERO;
    }
    (input.target() - agent.position) * weight
}

/// Sum of all four forces for `agents[index]`.
pub fn steering_force(
    index: usize,
    agents: &[Agent],
    neighbors: &[usize],
    input: &InputState,
    weights: &ForceWeights,
) -> Vec3 {
    let agent = &agents[index];
    alignment(agent, agents, neighbors, weights.alignment)
        + cohesion(agent, agents, neighbors, weights.cohesion)
        + separation(agent, agents, neighbors, weights.separation)
        + seek(agent, input, weights.seek)
}
