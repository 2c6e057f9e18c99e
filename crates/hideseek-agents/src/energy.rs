use crate::EnergyConfig;

/// What changed during one energy update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyEvent {
    Steady,
    /// Energy hit the exhaustion threshold; the agent is now recovering.
    Exhausted,
    /// Energy reached the maximum; the agent is active again.
    Recovered,
}

/// Energy, hunger and the recovery latch.
///
/// `energy` stays in `[0, max_energy]` and `hunger` in `[0, max_hunger]` after every update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyState {
    energy: f32,
    hunger: f32,
    recovering: bool,
}

impl EnergyState {
    /// Fresh agent: full energy, no hunger.
    pub fn full(config: &EnergyConfig) -> Self {
        Self {
            energy: config.max_energy,
            hunger: 0.0,
            recovering: false,
        }
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn hunger(&self) -> f32 {
        self.hunger
    }

    pub fn is_recovering(&self) -> bool {
        self.recovering
    }

    /// Overwrite the energy level, clamped to the configured range.
    pub fn set_energy(&mut self, energy: f32, config: &EnergyConfig) {
        self.energy = energy.clamp(0.0, config.max_energy);
    }

    /// Speed for the current energy level. `urgent` is true while panicking or chasing.
    pub fn speed_tier(&self, config: &EnergyConfig, urgent: bool) -> f32 {
        if self.recovering {
            0.0
        } else if self.energy < config.slow_threshold {
            config.slow_speed
        } else if urgent && self.energy > config.sprint_threshold {
            config.sprint_speed
        } else {
            config.base_speed
        }
    }

    /// Advance one tick. `speed` is the speed the agent is about to move at and `moving` whether
    /// it has a path to follow.
    ///
    /// Reaching the exhaustion threshold latches recovery on the same tick, so the agent never
    /// moves on the drain that exhausts it.
    pub fn tick(&mut self, config: &EnergyConfig, speed: f32, moving: bool) -> EnergyEvent {
        if self.recovering {
            self.energy = (self.energy + config.recovery_regen).min(config.max_energy);
            self.hunger = (self.hunger - config.hunger_relief).max(0.0);
            if self.energy >= config.max_energy {
                self.recovering = false;
                return EnergyEvent::Recovered;
            }
            return EnergyEvent::Steady;
        }

        if self.energy <= config.exhaustion_threshold {
            self.recovering = true;
            return EnergyEvent::Exhausted;
        }

        if moving {
            let ratio = speed / config.base_speed;
            self.energy -= config.move_drain * ratio * ratio;
        } else {
            self.energy += config.idle_regen;
        }
        self.energy = self.energy.clamp(0.0, config.max_energy);
        self.hunger = (self.hunger + config.hunger_rate).clamp(0.0, config.max_hunger);
        if self.energy <= config.exhaustion_threshold {
            self.recovering = true;
            return EnergyEvent::Exhausted;
        }
        EnergyEvent::Steady
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_tiers_follow_thresholds() {
        let cfg = EnergyConfig::default();
        let mut state = EnergyState::full(&cfg);
        assert_eq!(state.speed_tier(&cfg, false), cfg.base_speed);
        assert_eq!(state.speed_tier(&cfg, true), cfg.sprint_speed);

        state.set_energy(cfg.sprint_threshold, &cfg);
        assert_eq!(state.speed_tier(&cfg, true), cfg.base_speed);

        state.set_energy(cfg.slow_threshold - 1.0, &cfg);
        assert_eq!(state.speed_tier(&cfg, true), cfg.slow_speed);
    }

    #[test]
    fn sprinting_drains_quadratically() {
        let cfg = EnergyConfig::default();
        let mut walk = EnergyState::full(&cfg);
        let mut sprint = EnergyState::full(&cfg);
        walk.tick(&cfg, cfg.base_speed, true);
        sprint.tick(&cfg, cfg.sprint_speed, true);

        let walk_cost = cfg.max_energy - walk.energy();
        let sprint_cost = cfg.max_energy - sprint.energy();
        let ratio = cfg.sprint_speed / cfg.base_speed;
        assert!((walk_cost - cfg.move_drain).abs() < 1e-4);
        assert!((sprint_cost - cfg.move_drain * ratio * ratio).abs() < 1e-4);
    }

    #[test]
    fn drain_to_threshold_exhausts_on_the_same_tick() {
        let cfg = EnergyConfig::default();
        let mut state = EnergyState::full(&cfg);
        state.set_energy(cfg.exhaustion_threshold + 0.05, &cfg);

        let speed = state.speed_tier(&cfg, false);
        assert_eq!(state.tick(&cfg, speed, true), EnergyEvent::Exhausted);
        assert!(state.is_recovering());
        assert!(state.energy() < cfg.exhaustion_threshold);
        assert_eq!(state.speed_tier(&cfg, true), 0.0);
    }
}
