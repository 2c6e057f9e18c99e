use hideseek_core::AgentKind;
use hideseek_nav::{Grid, TilePath, TilePos, Vec2};

use crate::{EnergyConfig, EnergyEvent, EnergyState};

/// Movement and energy state shared by both agent kinds.
///
/// Holds the continuous position, the waypoint path the behavior layer hands it, and the
/// energy model that picks a speed each tick.
#[derive(Debug, Clone)]
pub struct Body {
    kind: AgentKind,
    position: Vec2,
    path: TilePath,
    energy: EnergyState,
    speed: f32,
    config: EnergyConfig,
}

impl Body {
    pub fn new(kind: AgentKind, position: Vec2, config: EnergyConfig) -> Self {
        let energy = EnergyState::full(&config);
        let speed = energy.speed_tier(&config, false);
        Self {
            kind,
            position,
            path: TilePath::default(),
            energy,
            speed,
            config,
        }
    }

    pub fn kind(&self) -> AgentKind {
        self.kind
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn tile<G: Grid + ?Sized>(&self, grid: &G) -> TilePos {
        grid.tile_of(self.position)
    }

    pub fn path(&self) -> &TilePath {
        &self.path
    }

    pub fn set_path(&mut self, waypoints: Vec<TilePos>) {
        self.path.replace(waypoints);
    }

    pub fn clear_path(&mut self) {
        self.path.clear();
    }

    pub fn energy(&self) -> &EnergyState {
        &self.energy
    }

    pub fn config(&self) -> &EnergyConfig {
        &self.config
    }

    /// Overwrite energy (clamped); used for scripted scenarios.
    pub fn set_energy(&mut self, energy: f32) {
        self.energy.set_energy(energy, &self.config);
        self.speed = self.energy.speed_tier(&self.config, false);
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Stop in place: drop the path and zero the speed.
    pub fn halt(&mut self) {
        self.path.clear();
        self.speed = 0.0;
    }

    /// Run one energy tick and pick this tick's speed.
    pub fn update_energy(&mut self, urgent: bool) -> EnergyEvent {
        let speed = self.energy.speed_tier(&self.config, urgent);
        let event = self.energy.tick(&self.config, speed, !self.path.is_empty());
        self.refresh_speed(urgent);
        event
    }

    /// Re-derive the speed tier, e.g. after the owner changed mode.
    pub fn refresh_speed(&mut self, urgent: bool) {
        self.speed = self.energy.speed_tier(&self.config, urgent);
    }

    /// Step toward the front waypoint. Returns the waypoint if it was reached and consumed.
    ///
    /// Never moves while recovering. A waypoint closer than one step is snapped to, so the body
    /// ends every consumed waypoint exactly on its tile center.
    pub fn advance<G: Grid + ?Sized>(&mut self, grid: &G) -> Option<TilePos> {
        if self.energy.is_recovering() {
            return None;
        }
        let next = self.path.front()?;
        let target = grid.tile_center(next);
        let to_target = target - self.position;
        let dist = to_target.length();

        if dist <= f32::EPSILON {
            return self.path.pop_front();
        }

        if dist < self.speed {
            self.position = target;
            return self.path.pop_front();
        }

        if self.speed > 0.0 {
            self.position += to_target * (self.speed / dist);
        }
        None
    }
}
