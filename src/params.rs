/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that holds every tunable
 * constant of the flocking and lifecycle model. Defaults are exposed as named
 * constants; the viewer edits a copy through its control panel and the
 * simulation re-validates it before use.
 */

use std::ops::{Range, RangeInclusive};

use crate::error::ConfigError;

// Neighborhood and motion
pub const DEFAULT_NEIGHBOR_RADIUS: f32 = 2.0;
pub const DEFAULT_WORLD_RADIUS: f32 = 15.0;
pub const DEFAULT_MAX_SPEED: f32 = 1.0;
pub const DEFAULT_ORIENTATION_EPSILON: f32 = 0.01;

// Force weights
pub const DEFAULT_ALIGNMENT_WEIGHT: f32 = 0.05;
pub const DEFAULT_COHESION_WEIGHT: f32 = 0.05;
pub const DEFAULT_SEPARATION_WEIGHT: f32 = 0.05;
pub const DEFAULT_SEEK_WEIGHT: f32 = 0.1;

// Spawning
pub const DEFAULT_GROUP_SIZE_RANGE: Range<u32> = 600..1000;
pub const DEFAULT_SPAWN_INTERVAL_RANGE: Range<f64> = 1.0..3.0;
pub const DEFAULT_OFFSPRING_LIFESPAN_RANGE: Range<f32> = 1.0..30.0;
pub const DEFAULT_OFFSPRING_SCALE_RANGE: Range<f32> = 0.05..0.15;
pub const DEFAULT_SPAWN_JITTER: f32 = 0.5;
pub const DEFAULT_SPAWN_SPEED: f32 = 0.1;

// Anchors
pub const DEFAULT_ANCHOR_COUNT: usize = 10;
pub const DEFAULT_ANCHOR_SPREAD: f32 = 5.0;
pub const DEFAULT_ANCHOR_SCALE: f32 = 0.2;

// Color over lifetime
pub const DEFAULT_YOUNG_HUE: f32 = 0.98;
pub const DEFAULT_OLD_HUE: f32 = 0.65;
pub const DEFAULT_SATURATION: f32 = 1.0;
pub const DEFAULT_LIGHTNESS: f32 = 0.5;

/// Aging step per tick, assuming a 60 Hz simulation rate.
pub const DEFAULT_TICK_DELTA: f32 = 1.0 / 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub neighbor_radius: f32,
    pub world_radius: f32,
    pub max_speed: f32,
    pub orientation_epsilon: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub separation_weight: f32,
    pub seek_weight: f32,
    pub group_size_range: Range<u32>,
    pub spawn_interval_range: Range<f64>,
    pub offspring_lifespan_range: Range<f32>,
    pub offspring_scale_range: Range<f32>,
    pub spawn_jitter: f32,
    pub spawn_speed: f32,
    pub anchor_count: usize,
    pub anchor_spread: f32,
    pub anchor_scale: f32,
    pub young_hue: f32,
    pub old_hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub tick_delta: f32,
    // Performance settings
    pub use_spatial_grid: bool,
    pub parallel: bool,
    /// Fixed RNG seed; `None` draws a fresh one per world.
    pub seed: Option<u64>,
}

/// What a parameter edit requires from the running simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParamChanges {
    pub any_changed: bool,
    /// Anchor layout or seed changed, so the world has to be rebuilt.
    pub world_reset_needed: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            neighbor_radius: DEFAULT_NEIGHBOR_RADIUS,
            world_radius: DEFAULT_WORLD_RADIUS,
            max_speed: DEFAULT_MAX_SPEED,
            orientation_epsilon: DEFAULT_ORIENTATION_EPSILON,
            alignment_weight: DEFAULT_ALIGNMENT_WEIGHT,
            cohesion_weight: DEFAULT_COHESION_WEIGHT,
            separation_weight: DEFAULT_SEPARATION_WEIGHT,
            seek_weight: DEFAULT_SEEK_WEIGHT,
            group_size_range: DEFAULT_GROUP_SIZE_RANGE,
            spawn_interval_range: DEFAULT_SPAWN_INTERVAL_RANGE,
            offspring_lifespan_range: DEFAULT_OFFSPRING_LIFESPAN_RANGE,
            offspring_scale_range: DEFAULT_OFFSPRING_SCALE_RANGE,
            spawn_jitter: DEFAULT_SPAWN_JITTER,
            spawn_speed: DEFAULT_SPAWN_SPEED,
            anchor_count: DEFAULT_ANCHOR_COUNT,
            anchor_spread: DEFAULT_ANCHOR_SPREAD,
            anchor_scale: DEFAULT_ANCHOR_SCALE,
            young_hue: DEFAULT_YOUNG_HUE,
            old_hue: DEFAULT_OLD_HUE,
            saturation: DEFAULT_SATURATION,
            lightness: DEFAULT_LIGHTNESS,
            tick_delta: DEFAULT_TICK_DELTA,
            use_spatial_grid: true,
            parallel: true,
            seed: None,
        }
    }
}

fn finite_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn finite_non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

impl SimulationParams {
    /// Reject parameter sets that would produce NaN or empty state at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_world()?;
        self.validate_forces()?;
        self.validate_spawning()?;
        self.validate_colors()?;
        Ok(())
    }

    fn validate_world(&self) -> Result<(), ConfigError> {
        if !finite_positive(self.neighbor_radius) {
            return Err(ConfigError::InvalidNeighborRadius(self.neighbor_radius));
        }
        if !finite_positive(self.world_radius) {
            return Err(ConfigError::InvalidWorldRadius(self.world_radius));
        }
        if !finite_positive(self.max_speed) {
            return Err(ConfigError::InvalidMaxSpeed(self.max_speed));
        }
        if !finite_non_negative(self.orientation_epsilon) {
            return Err(ConfigError::InvalidOrientationEpsilon(self.orientation_epsilon));
        }
        if !finite_positive(self.tick_delta) {
            return Err(ConfigError::InvalidTickDelta(self.tick_delta));
        }
        if self.anchor_count == 0 {
            return Err(ConfigError::NoAnchors);
        }
        if !finite_non_negative(self.anchor_spread) {
            return Err(ConfigError::InvalidAnchorSpread(self.anchor_spread));
        }
        if !finite_positive(self.anchor_scale) {
            return Err(ConfigError::InvalidAnchorScale(self.anchor_scale));
        }
        Ok(())
    }

    fn validate_forces(&self) -> Result<(), ConfigError> {
        let weights = [
            ("alignment", self.alignment_weight),
            ("cohesion", self.cohesion_weight),
            ("separation", self.separation_weight),
            ("seek", self.seek_weight),
        ];
        for (name, value) in weights {
            if !finite_non_negative(value) {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }

    fn validate_spawning(&self) -> Result<(), ConfigError> {
        let group = &self.group_size_range;
        if group.start == 0 || group.start >= group.end {
            return Err(ConfigError::InvalidRange {
                name: "group size",
                min: group.start as f64,
                max: group.end as f64,
            });
        }

        let interval = &self.spawn_interval_range;
        if !(interval.start.is_finite() && interval.end.is_finite())
            || interval.start < 0.0
            || interval.start >= interval.end
        {
            return Err(ConfigError::InvalidRange {
                name: "spawn interval",
                min: interval.start,
                max: interval.end,
            });
        }

        let float_ranges = [
            ("offspring lifespan", &self.offspring_lifespan_range),
            ("offspring scale", &self.offspring_scale_range),
        ];
        for (name, range) in float_ranges {
            if !finite_positive(range.start) || !range.end.is_finite() || range.start >= range.end {
                return Err(ConfigError::InvalidRange {
                    name,
                    min: range.start as f64,
                    max: range.end as f64,
                });
            }
        }

        if !finite_non_negative(self.spawn_jitter) {
            return Err(ConfigError::InvalidSpawnSpread {
                name: "spawn jitter",
                value: self.spawn_jitter,
            });
        }
        if !finite_non_negative(self.spawn_speed) {
            return Err(ConfigError::InvalidSpawnSpread {
                name: "spawn speed",
                value: self.spawn_speed,
            });
        }
        Ok(())
    }

    fn validate_colors(&self) -> Result<(), ConfigError> {
        let channels = [
            ("young hue", self.young_hue),
            ("old hue", self.old_hue),
            ("saturation", self.saturation),
            ("lightness", self.lightness),
        ];
        for (name, value) in channels {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidColor { name, value });
            }
        }
        Ok(())
    }

    // Compare against the values before an edit
    pub fn detect_changes(&self, previous: &SimulationParams) -> ParamChanges {
        let world_reset_needed = self.anchor_count != previous.anchor_count
            || self.anchor_spread != previous.anchor_spread
            || self.anchor_scale != previous.anchor_scale
            || self.seed != previous.seed;

        ParamChanges {
            any_changed: self != previous,
            world_reset_needed,
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_radius_range() -> RangeInclusive<f32> {
        0.25..=8.0
    }

    pub fn get_world_radius_range() -> RangeInclusive<f32> {
        5.0..=50.0
    }

    pub fn get_max_speed_range() -> RangeInclusive<f32> {
        0.05..=3.0
    }

    pub fn get_weight_range() -> RangeInclusive<f32> {
        0.0..=0.5
    }

    pub fn get_anchor_count_range() -> RangeInclusive<usize> {
        1..=100
    }

    pub fn get_hue_range() -> RangeInclusive<f32> {
        0.0..=1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SimulationParams::default().validate(), Ok(()));
    }

    #[test]
    fn negative_radius_is_rejected() {
        let params = SimulationParams {
            neighbor_radius: -1.0,
            ..SimulationParams::default()
        };
        assert_eq!(params.validate(), Err(ConfigError::InvalidNeighborRadius(-1.0)));
    }

    #[test]
    fn empty_anchor_set_is_rejected() {
        let params = SimulationParams {
            anchor_count: 0,
            ..SimulationParams::default()
        };
        assert_eq!(params.validate(), Err(ConfigError::NoAnchors));
    }

    #[test]
    fn non_finite_weight_is_rejected() {
        let params = SimulationParams {
            seek_weight: f32::NAN,
            ..SimulationParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidWeight { name: "seek", .. })
        ));
    }

    #[test]
    fn inverted_lifespan_range_is_rejected() {
        let params = SimulationParams {
            offspring_lifespan_range: 5.0..2.0,
            ..SimulationParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidRange { name: "offspring lifespan", .. })
        ));
    }

    #[test]
    fn zero_group_size_is_rejected() {
        let params = SimulationParams {
            group_size_range: 0..10,
            ..SimulationParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidRange { name: "group size", .. })
        ));
    }

    #[test]
    fn hue_outside_unit_interval_is_rejected() {
        let params = SimulationParams {
            old_hue: 1.5,
            ..SimulationParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidColor { name: "old hue", .. })
        ));
    }

    #[test]
    fn anchor_edits_require_world_reset() {
        let before = SimulationParams::default();
        let after = SimulationParams {
            anchor_count: before.anchor_count + 1,
            ..before.clone()
        };
        let changes = after.detect_changes(&before);
        assert!(changes.any_changed);
        assert!(changes.world_reset_needed);
    }

    #[test]
    fn weight_edits_apply_in_place() {
        let before = SimulationParams::default();
        let after = SimulationParams {
            cohesion_weight: 0.2,
            ..before.clone()
        };
        let changes = after.detect_changes(&before);
        assert!(changes.any_changed);
        assert!(!changes.world_reset_needed);
    }
}
