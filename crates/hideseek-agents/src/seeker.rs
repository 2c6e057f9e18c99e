use core::fmt;

use hideseek_core::{AgentKind, Cooldown, DeterministicRng, SplitMix64, TickContext};
use hideseek_nav::{Grid, GridMut, PathQuery, TilePos, Vec2};
use tracing::debug;

use crate::behavior::random_tile;
use crate::{Behavior, Body, EnergyEvent, SeekerConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeekerMode {
    Exploring,
    Chasing,
}

impl SeekerMode {
    pub fn label(self) -> &'static str {
        match self {
            SeekerMode::Exploring => "exploring",
            SeekerMode::Chasing => "chasing",
        }
    }
}

impl fmt::Display for SeekerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug)]
pub struct Seeker {
    body: Body,
    config: SeekerConfig,
    mode: SeekerMode,
    rng: SplitMix64,
    vision: u32,
    rounds_since_target: u32,
    chase_cooldown: Cooldown,
    query: PathQuery,
    scratch: Vec<TilePos>,
}

impl Seeker {
    pub fn new(config: SeekerConfig, position: Vec2, rng: SplitMix64) -> Self {
        Self {
            body: Body::new(AgentKind::Seeker, position, config.energy.clone()),
            vision: config.vision,
            config,
            mode: SeekerMode::Exploring,
            rng,
            rounds_since_target: 0,
            chase_cooldown: Cooldown::ready(),
            query: PathQuery::new(),
            scratch: Vec::new(),
        }
    }

    pub fn mode(&self) -> SeekerMode {
        self.mode
    }

    pub fn config(&self) -> &SeekerConfig {
        &self.config
    }

    /// Random exploration rounds since the last successful targeted search.
    pub fn rounds_since_target(&self) -> u32 {
        self.rounds_since_target
    }

    /// Vision radius used by the most recent decision.
    pub fn vision(&self) -> u32 {
        self.vision
    }

    fn set_mode(&mut self, mode: SeekerMode) {
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "seeker mode");
            self.mode = mode;
        }
    }

    /// Vision radius for the current pair of tiles.
    ///
    /// Open ground on both ends widens it; both agents inside the same concealing biome
    /// narrows it (never below `min_vision`).
    pub fn effective_vision<G: Grid + ?Sized>(&self, grid: &G, own: TilePos, hider: TilePos) -> u32 {
        let own_biome = grid.tile_info(own).map(|info| info.biome);
        let hider_biome = grid.tile_info(hider).map(|info| info.biome);
        let own_cover = own_biome.is_some_and(|b| b.is_cover());
        let hider_cover = hider_biome.is_some_and(|b| b.is_cover());

        if !own_cover && !hider_cover {
            self.config.vision + self.config.open_ground_bonus
        } else if own_cover && hider_cover && own_biome == hider_biome {
            self.config
                .vision
                .saturating_sub(self.config.concealed_penalty)
                .max(self.config.min_vision)
        } else {
            self.config.vision
        }
    }

    fn chase<G: Grid + ?Sized>(&mut self, now: u64, grid: &G, from: TilePos, hider: TilePos) {
        if !self.chase_cooldown.is_ready(now) && !self.body.path().is_empty() {
            return;
        }
        let dist = from.manhattan(hider);
        // The search result never contains `from`, so the path starts one step out.
        if self.query.find_path_into(grid, from, hider, &mut self.scratch) {
            self.body.set_path(self.scratch.clone());
        }
        let wait = if dist <= self.config.chase_near_distance {
            self.config.chase_cooldown_near
        } else {
            self.config.chase_cooldown_far
        };
        self.chase_cooldown.start(now, wait);
    }

    /// Share of `path` already marked explored.
    fn overlap<G: Grid + ?Sized>(grid: &G, path: &[TilePos]) -> f32 {
        if path.is_empty() {
            return 0.0;
        }
        let seen = path.iter().filter(|t| grid.is_explored(**t)).count();
        seen as f32 / path.len() as f32
    }

    fn accept_leg<G: Grid + ?Sized>(&mut self, grid: &G, from: TilePos, goal: TilePos) -> bool {
        if goal == from || !grid.is_walkable(goal) {
            return false;
        }
        if !self.query.find_path_into(grid, from, goal, &mut self.scratch) {
            return false;
        }
        self.accepts_route(grid, &self.scratch)
    }

    /// Overlap filter: `route` passes while its explored share stays below
    /// `overlap_reject_ratio`.
    pub fn accepts_route<G: Grid + ?Sized>(&self, grid: &G, route: &[TilePos]) -> bool {
        Self::overlap(grid, route) < self.config.overlap_reject_ratio
    }

    fn explore<G: GridMut + ?Sized>(&mut self, grid: &mut G, from: TilePos, hider: TilePos) {
        if !self.body.path().is_empty() {
            return;
        }

        // Counts rounds, accepted or not.
        if self.rounds_since_target < self.config.explore_rounds_before_target {
            self.rounds_since_target += 1;
            for _ in 0..self.config.explore_attempts {
                let goal = random_tile(&*grid, &mut self.rng);
                if self.accept_leg(&*grid, from, goal) {
                    debug!(goal = %goal, steps = self.scratch.len(), "seeker explore leg");
                    self.body.set_path(self.scratch.clone());
                    return;
                }
            }
            return;
        }

        // Targeted search: forget what we have seen and sweep the ring around the Hider's
        // last reported tile.
        grid.clear_explored();
        let anchor = hider;
        let mut offsets = self.config.target_offsets.clone();
        self.rng.shuffle(&mut offsets);
        for (dx, dy) in offsets {
            let goal = anchor.offset(dx, dy);
            if self.accept_leg(&*grid, from, goal) {
                debug!(goal = %goal, anchor = %anchor, "seeker targeted search");
                self.body.set_path(self.scratch.clone());
                self.rounds_since_target = 0;
                return;
            }
        }
    }
}

impl Behavior for Seeker {
    fn kind(&self) -> AgentKind {
        AgentKind::Seeker
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn mode_label(&self) -> &'static str {
        self.mode.label()
    }

    fn decide<G: GridMut + ?Sized>(&mut self, ctx: &TickContext, hider: TilePos, grid: &mut G) {
        let tile = self.body.tile(&*grid);
        grid.mark_explored(tile);

        let event = self.body.update_energy(self.mode == SeekerMode::Chasing);
        if event == EnergyEvent::Recovered {
            self.set_mode(SeekerMode::Exploring);
            self.body.refresh_speed(false);
        }
        if self.body.energy().is_recovering() {
            return;
        }

        self.vision = self.effective_vision(&*grid, tile, hider);
        if tile.manhattan(hider) <= self.vision {
            if self.mode != SeekerMode::Chasing {
                self.set_mode(SeekerMode::Chasing);
                self.chase_cooldown.reset();
            }
            self.chase(ctx.tick, &*grid, tile, hider);
        } else {
            self.set_mode(SeekerMode::Exploring);
            self.explore(grid, tile, hider);
        }
        self.body.refresh_speed(self.mode == SeekerMode::Chasing);
    }
}
