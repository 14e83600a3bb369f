/*
 * Physics Module
 *
 * This module advances one agent by one tick once its forces are known:
 * velocity from acceleration (speed-limited), position from velocity,
 * orientation from the direction of travel, and a bounce off the spherical
 * world boundary.
 */

use glam::{Mat3, Quat, Vec3};

use crate::agent::Agent;
use crate::params::SimulationParams;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionLimits {
    pub max_speed: f32,
    pub world_radius: f32,
    /// Below this speed the heading is too noisy to orient by.
    pub orientation_epsilon: f32,
}

impl From<&SimulationParams> for MotionLimits {
    fn from(params: &SimulationParams) -> Self {
        Self {
            max_speed: params.max_speed,
            world_radius: params.world_radius,
            orientation_epsilon: params.orientation_epsilon,
        }
    }
}

/// Rotation taking the local +Z axis onto `direction`, keeping +Y as close
/// to world up as possible.
pub fn orientation_towards(direction: Vec3) -> Quat {
    let forward = direction.normalize();
    let right = Vec3::Y.cross(forward);

    // Heading straight up or down leaves no horizontal reference
    if right.length_squared() < 1e-12 {
        return Quat::from_rotation_arc(Vec3::Z, forward);
    }

    let right = right.normalize();
    let up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward))
}

/// Clamp the agent onto the boundary sphere and send it back the way it came.
/// Returns whether the boundary was hit.
pub fn enforce_boundary(agent: &mut Agent, world_radius: f32) -> bool {
    let distance = agent.position.length();
    if distance <= world_radius {
        return false;
    }

    agent.position *= world_radius / distance;
    agent.velocity = -agent.velocity;
    true
}

// Update the agent's position based on its velocity and acceleration
pub fn integrate(agent: &mut Agent, limits: &MotionLimits) -> bool {
    // Update velocity and limit speed
    agent.velocity = (agent.velocity + agent.acceleration).clamp_length_max(limits.max_speed);

    agent.position += agent.velocity;

    // Forces do not carry over to the next tick
    agent.acceleration = Vec3::ZERO;

    if agent.velocity.length() > limits.orientation_epsilon {
        agent.orientation = orientation_towards(agent.velocity);
    }

    enforce_boundary(agent, limits.world_radius)
}
