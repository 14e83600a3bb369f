/*
 * Lifecycle Module
 *
 * Aging for mortal agents. Each tick removes a fixed slice of life, shifts
 * the hue from the young color towards the old one, and flags agents whose
 * life has run out. Immortal anchors are never touched.
 */

use crate::agent::Agent;
use crate::params::SimulationParams;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgingRules {
    /// Life removed per tick, independent of wall-clock frame time.
    pub tick_delta: f32,
    pub young_hue: f32,
    pub old_hue: f32,
}

impl From<&SimulationParams> for AgingRules {
    fn from(params: &SimulationParams) -> Self {
        Self {
            tick_delta: params.tick_delta,
            young_hue: params.young_hue,
            old_hue: params.old_hue,
        }
    }
}

impl AgingRules {
    /// Hue at a given remaining-life ratio: young at 1.0, old at 0.0.
    pub fn hue_for_ratio(&self, ratio: f32) -> f32 {
        self.young_hue - (self.young_hue - self.old_hue) * (1.0 - ratio)
    }
}

pub fn is_expired(agent: &Agent) -> bool {
    !agent.is_immortal() && agent.lifespan <= 0.0
}

/// Age one agent by a tick. Returns false once the agent has expired.
pub fn age(agent: &mut Agent, rules: &AgingRules) -> bool {
    if agent.is_immortal() {
        return true;
    }

    agent.lifespan -= rules.tick_delta;
    if is_expired(agent) {
        return false;
    }

    agent.lifespan = agent.lifespan.min(agent.max_lifespan);
    let ratio = agent.life_ratio();
    agent.color.hue = rules.hue_for_ratio(ratio);
    true
}

/// Age every agent in place; returns how many expired this tick.
pub fn age_all(agents: &mut [Agent], rules: &AgingRules) -> usize {
    agents
        .iter_mut()
        .map(|agent| age(agent, rules))
        .filter(|alive| !alive)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::HslColor;
    use glam::Vec3;

    fn rules() -> AgingRules {
        AgingRules::from(&SimulationParams::default())
    }

    fn mortal(lifespan: f32) -> Agent {
        Agent::mortal(Vec3::ZERO, Vec3::ZERO, 0.1, HslColor::new(0.98, 1.0, 0.5), lifespan)
    }

    #[test]
    fn hue_runs_from_young_to_old() {
        let rules = rules();
        assert!((rules.hue_for_ratio(1.0) - 0.98).abs() < 1e-6);
        assert!((rules.hue_for_ratio(0.0) - 0.65).abs() < 1e-6);
        assert!((rules.hue_for_ratio(0.5) - 0.815).abs() < 1e-6);
    }

    #[test]
    fn immortals_never_age() {
        let mut anchor = Agent::immortal(Vec3::ZERO, Vec3::ZERO, 0.2, HslColor::new(0.5, 1.0, 0.5));
        for _ in 0..1000 {
            assert!(age(&mut anchor, &rules()));
        }
        assert!(anchor.lifespan.is_infinite());
        assert_eq!(anchor.color.hue, 0.5);
    }

    #[test]
    fn mortal_loses_one_tick_of_life() {
        let rules = rules();
        let mut agent = mortal(10.0);
        assert!(age(&mut agent, &rules));
        assert!((agent.lifespan - (10.0 - rules.tick_delta)).abs() < 1e-6);
        assert!(agent.color.hue < 0.98);
        assert!(agent.color.hue > 0.65);
    }

    #[test]
    fn saturation_and_lightness_are_constant() {
        let mut agent = mortal(2.0);
        for _ in 0..60 {
            age(&mut agent, &rules());
        }
        assert_eq!(agent.color.saturation, 1.0);
        assert_eq!(agent.color.lightness, 0.5);
    }

    #[test]
    fn expired_agents_are_flagged() {
        let rules = rules();
        let mut agent = mortal(rules.tick_delta * 0.5);
        assert!(!age(&mut agent, &rules));
        assert!(is_expired(&agent));
    }

    #[test]
    fn expiry_follows_lifespan_not_ratio() {
        let rules = rules();
        let mut agent = mortal(1.0);
        agent.max_lifespan = -1.0;
        agent.lifespan = -0.5;
        assert!(is_expired(&agent));
        assert!(!age(&mut agent, &rules));
    }

    #[test]
    fn surviving_lifespan_is_clamped_to_max() {
        let rules = rules();
        let mut agent = mortal(1.0);
        agent.lifespan = 3.0;
        assert!(age(&mut agent, &rules));
        assert_eq!(agent.lifespan, agent.max_lifespan);
        assert!((agent.color.hue - rules.young_hue).abs() < 1e-6);
    }

    #[test]
    fn age_all_counts_deaths() {
        let rules = rules();
        let mut agents = vec![mortal(0.001), mortal(5.0), mortal(0.002)];
        assert_eq!(age_all(&mut agents, &rules), 2);
    }
}
