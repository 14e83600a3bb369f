/*
 * Agent Module
 *
 * This module defines the Agent struct and the AgentStore that owns every
 * live agent. Agents are either immortal anchors, created once when the world
 * is built, or mortal offspring that age each tick and are dropped from the
 * store when their lifespan runs out.
 */

use glam::{Quat, Vec3};

/// Color in hue/saturation/lightness, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl HslColor {
    pub fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub orientation: Quat,
    pub scale: f32,
    pub color: HslColor,
    pub lifespan: f32,
    pub max_lifespan: f32,
    is_immortal: bool,
}

impl Agent {
    /// An anchor that never ages and is never removed.
    pub fn immortal(position: Vec3, velocity: Vec3, scale: f32, color: HslColor) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale,
            color,
            lifespan: f32::INFINITY,
            max_lifespan: f32::INFINITY,
            is_immortal: true,
        }
    }

    /// An offspring that starts with a full lifespan of `lifespan`.
    pub fn mortal(position: Vec3, velocity: Vec3, scale: f32, color: HslColor, lifespan: f32) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale,
            color,
            lifespan,
            max_lifespan: lifespan,
            is_immortal: false,
        }
    }

    pub fn is_immortal(&self) -> bool {
        self.is_immortal
    }

    // Accumulate a steering force for this tick
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }

    /// Immortals always; mortals need a finite positive maximum and a
    /// lifespan in (0, max_lifespan].
    pub fn has_valid_lifespan(&self) -> bool {
        if self.is_immortal {
            return true;
        }
        self.max_lifespan.is_finite()
            && self.max_lifespan > 0.0
            && self.lifespan > 0.0
            && self.lifespan <= self.max_lifespan
    }

    /// Remaining fraction of life; 1.0 for immortals.
    pub fn life_ratio(&self) -> f32 {
        if self.is_immortal {
            1.0
        } else {
            self.lifespan / self.max_lifespan
        }
    }
}

/// Sole owner of the live agent population.
#[derive(Debug, Default, Clone)]
pub struct AgentStore {
    agents: Vec<Agent>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, agent: Agent) {
        self.agents.push(agent);
    }

    /// Replace the whole population with exactly `survivors`.
    pub fn rebuild<I>(&mut self, survivors: I)
    where
        I: IntoIterator<Item = Agent>,
    {
        self.agents = survivors.into_iter().collect();
    }

    pub fn all(&self) -> &[Agent] {
        &self.agents
    }

    pub(crate) fn all_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    /// Move the population out, leaving the store empty until `rebuild`.
    pub(crate) fn take(&mut self) -> Vec<Agent> {
        std::mem::take(&mut self.agents)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn anchors(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(|agent| agent.is_immortal())
    }

    /// (immortal, mortal)
    pub fn counts(&self) -> (usize, usize) {
        let immortal = self.anchors().count();
        (immortal, self.agents.len() - immortal)
    }
}
