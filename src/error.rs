/*
 * Error Module
 *
 * Errors raised at the edges of the simulation: invalid parameter sets are
 * rejected before a world is built, and malformed input snapshots are rejected
 * before they reach a tick. The tick itself has no failure path.
 */

use thiserror::Error;

/// Reasons a `SimulationParams` value cannot drive a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("neighbor radius must be finite and positive, got {0}")]
    InvalidNeighborRadius(f32),
    #[error("world radius must be finite and positive, got {0}")]
    InvalidWorldRadius(f32),
    #[error("max speed must be finite and positive, got {0}")]
    InvalidMaxSpeed(f32),
    #[error("orientation epsilon must be finite and non-negative, got {0}")]
    InvalidOrientationEpsilon(f32),
    #[error("{name} weight must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f32 },
    #[error("tick delta must be finite and positive, got {0}")]
    InvalidTickDelta(f32),
    #[error("anchor count must be at least 1")]
    NoAnchors,
    #[error("anchor spread must be finite and non-negative, got {0}")]
    InvalidAnchorSpread(f32),
    #[error("anchor scale must be finite and positive, got {0}")]
    InvalidAnchorScale(f32),
    #[error("agent {index} has lifespan {lifespan} outside (0, {max_lifespan}]")]
    InvalidAgentLifespan {
        index: usize,
        lifespan: f32,
        max_lifespan: f32,
    },
    #[error("{name} range [{min}, {max}) is empty or not positive")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidSpawnSpread { name: &'static str, value: f32 },
    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidColor { name: &'static str, value: f32 },
}

/// Reasons an input snapshot is refused at the collaborator boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("drag target must be finite, got ({x}, {y}, {z})")]
    NonFiniteTarget { x: f32, y: f32, z: f32 },
}
