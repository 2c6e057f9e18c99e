//! Tunables for the energy model and both behavior state machines.
//!
//! Everything here is immutable once a simulation starts; agents receive their own copy at
//! construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Energy, hunger and speed-tier parameters for one agent variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    pub max_energy: f32,
    pub max_hunger: f32,

    /// At or below this level an active agent stops and enters recovery.
    pub exhaustion_threshold: f32,
    /// Below this level the agent drops to `slow_speed`.
    pub slow_threshold: f32,
    /// Above this level an agent in an urgent mode may sprint.
    pub sprint_threshold: f32,

    /// World units per tick.
    pub base_speed: f32,
    pub slow_speed: f32,
    pub sprint_speed: f32,

    /// Energy regained per tick while recovering.
    pub recovery_regen: f32,
    /// Energy regained per tick while active with an empty path.
    pub idle_regen: f32,
    /// Energy spent per moving tick at `base_speed`; scales with `(speed / base_speed)^2`.
    pub move_drain: f32,

    pub hunger_rate: f32,
    pub hunger_relief: f32,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            max_energy: 100.0,
            max_hunger: 100.0,
            exhaustion_threshold: 5.0,
            slow_threshold: 30.0,
            sprint_threshold: 60.0,
            base_speed: 2.0,
            slow_speed: 1.0,
            sprint_speed: 3.5,
            recovery_regen: 2.0,
            idle_regen: 0.5,
            move_drain: 0.4,
            hunger_rate: 0.05,
            hunger_relief: 0.2,
        }
    }
}

impl EnergyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_energy > 0.0) {
            return Err(ConfigError::invalid("max_energy", "must be positive"));
        }
        if self.max_hunger < 0.0 {
            return Err(ConfigError::invalid("max_hunger", "must not be negative"));
        }
        if !(self.exhaustion_threshold >= 0.0 && self.exhaustion_threshold < self.max_energy) {
            return Err(ConfigError::invalid(
                "exhaustion_threshold",
                "must lie in [0, max_energy)",
            ));
        }
        if self.slow_threshold >= self.sprint_threshold {
            return Err(ConfigError::invalid(
                "slow_threshold",
                format!(
                    "must be below sprint_threshold ({} >= {})",
                    self.slow_threshold, self.sprint_threshold
                ),
            ));
        }
        for (field, speed) in [
            ("base_speed", self.base_speed),
            ("slow_speed", self.slow_speed),
            ("sprint_speed", self.sprint_speed),
        ] {
            if !(speed > 0.0) {
                return Err(ConfigError::invalid(field, "must be positive"));
            }
        }
        if !(self.recovery_regen > 0.0) {
            return Err(ConfigError::invalid(
                "recovery_regen",
                "must be positive or recovery never ends",
            ));
        }
        for (field, rate) in [
            ("idle_regen", self.idle_regen),
            ("move_drain", self.move_drain),
            ("hunger_rate", self.hunger_rate),
            ("hunger_relief", self.hunger_relief),
        ] {
            if rate < 0.0 {
                return Err(ConfigError::invalid(field, "must not be negative"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HiderConfig {
    pub energy: EnergyConfig,

    /// Manhattan distance at or below which the Hider panics.
    pub panic_distance: u32,
    /// Manhattan distance beyond which an idle Hider in cover counts as hidden.
    pub far_distance: u32,
    /// Random tiles sampled per tick while looking for a hiding spot.
    pub spot_attempts: u32,
    /// Bounds (ticks, inclusive) of the re-rolled stay in the `hidden` mode.
    pub hidden_cooldown_min: u64,
    pub hidden_cooldown_max: u64,
    /// Escape rays start this many steps out and stop at `escape_max_steps`.
    pub escape_min_steps: u32,
    pub escape_max_steps: u32,
}

impl Default for HiderConfig {
    fn default() -> Self {
        Self {
            energy: EnergyConfig::default(),
            panic_distance: 4,
            far_distance: 8,
            spot_attempts: 40,
            hidden_cooldown_min: 60,
            hidden_cooldown_max: 180,
            escape_min_steps: 3,
            escape_max_steps: 10,
        }
    }
}

impl HiderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.energy.validate()?;
        if self.panic_distance >= self.far_distance {
            return Err(ConfigError::invalid(
                "panic_distance",
                "must be below far_distance",
            ));
        }
        if self.hidden_cooldown_min > self.hidden_cooldown_max {
            return Err(ConfigError::invalid(
                "hidden_cooldown_min",
                "must not exceed hidden_cooldown_max",
            ));
        }
        if self.escape_min_steps == 0 || self.escape_min_steps > self.escape_max_steps {
            return Err(ConfigError::invalid(
                "escape_min_steps",
                "must be in 1..=escape_max_steps",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeekerConfig {
    pub energy: EnergyConfig,

    /// Base vision radius (Manhattan).
    pub vision: u32,
    /// Added when neither agent stands in cover.
    pub open_ground_bonus: u32,
    /// Subtracted when both agents share the same concealing biome.
    pub concealed_penalty: u32,
    pub min_vision: u32,

    /// Random tiles sampled per tick while exploring.
    pub explore_attempts: u32,
    /// Random exploration rounds (one per idle tick, accepted or not) before switching to a
    /// search around the Hider's last known tile.
    pub explore_rounds_before_target: u32,
    /// Candidate paths revisiting at least this share of explored tiles are rejected.
    pub overlap_reject_ratio: f32,
    /// Offsets around the last known Hider tile tried by the targeted search.
    pub target_offsets: Vec<(i32, i32)>,

    /// Distances at or below this use `chase_cooldown_near` between path recomputations.
    pub chase_near_distance: u32,
    pub chase_cooldown_near: u64,
    pub chase_cooldown_far: u64,
}

fn default_target_offsets() -> Vec<(i32, i32)> {
    vec![
        (3, 0),
        (-3, 0),
        (0, 3),
        (0, -3),
        (2, 2),
        (-2, 2),
        (2, -2),
        (-2, -2),
    ]
}

impl Default for SeekerConfig {
    fn default() -> Self {
        Self {
            energy: EnergyConfig::default(),
            vision: 6,
            open_ground_bonus: 2,
            concealed_penalty: 3,
            min_vision: 1,
            explore_attempts: 30,
            explore_rounds_before_target: 3,
            overlap_reject_ratio: 0.39,
            target_offsets: default_target_offsets(),
            chase_near_distance: 3,
            chase_cooldown_near: 2,
            chase_cooldown_far: 6,
        }
    }
}

impl SeekerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.energy.validate()?;
        if self.min_vision > self.vision {
            return Err(ConfigError::invalid("min_vision", "must not exceed vision"));
        }
        if !(self.overlap_reject_ratio > 0.0 && self.overlap_reject_ratio <= 1.0) {
            return Err(ConfigError::invalid(
                "overlap_reject_ratio",
                "must lie in (0, 1]",
            ));
        }
        if self.target_offsets.is_empty() {
            return Err(ConfigError::invalid("target_offsets", "must not be empty"));
        }
        if self.target_offsets.contains(&(0, 0)) {
            return Err(ConfigError::invalid(
                "target_offsets",
                "(0, 0) would target the Hider's own tile",
            ));
        }
        if self.chase_cooldown_near > self.chase_cooldown_far {
            return Err(ConfigError::invalid(
                "chase_cooldown_near",
                "must not exceed chase_cooldown_far",
            ));
        }
        Ok(())
    }
}
