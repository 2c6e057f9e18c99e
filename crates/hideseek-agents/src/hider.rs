use core::fmt;

use hideseek_core::{AgentKind, Cooldown, DeterministicRng, SplitMix64, TickContext};
use hideseek_nav::{Grid, GridMut, PathQuery, TilePos, Vec2};
use tracing::debug;

use crate::behavior::random_tile;
use crate::{Behavior, Body, HiderConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HiderMode {
    /// Looking for a concealing tile to move to.
    Hiding,
    /// Moving to, or waiting at, a chosen spot.
    FoundSpot,
    /// Seeker is close; running along an escape ray.
    Panic,
    /// In cover and far from the Seeker; stays put until the cooldown runs out.
    Hidden,
    /// Terminal.
    Caught,
}

impl HiderMode {
    pub fn label(self) -> &'static str {
        match self {
            HiderMode::Hiding => "hiding",
            HiderMode::FoundSpot => "found_spot",
            HiderMode::Panic => "panic",
            HiderMode::Hidden => "hidden",
            HiderMode::Caught => "caught",
        }
    }
}

impl fmt::Display for HiderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug)]
pub struct Hider {
    body: Body,
    config: HiderConfig,
    mode: HiderMode,
    rng: SplitMix64,
    hidden_cooldown: Cooldown,
    query: PathQuery,
    scratch: Vec<TilePos>,
}

impl Hider {
    pub fn new(config: HiderConfig, position: Vec2, rng: SplitMix64) -> Self {
        Self {
            body: Body::new(AgentKind::Hider, position, config.energy.clone()),
            config,
            mode: HiderMode::Hiding,
            rng,
            hidden_cooldown: Cooldown::ready(),
            query: PathQuery::new(),
            scratch: Vec::new(),
        }
    }

    pub fn mode(&self) -> HiderMode {
        self.mode
    }

    pub fn config(&self) -> &HiderConfig {
        &self.config
    }

    pub fn is_caught(&self) -> bool {
        self.mode == HiderMode::Caught
    }

    /// Ticks left before a hidden Hider starts looking for a new spot.
    pub fn hidden_remaining(&self, now: u64) -> u64 {
        self.hidden_cooldown.remaining(now)
    }

    fn set_mode(&mut self, mode: HiderMode) {
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "hider mode");
            self.mode = mode;
        }
    }

    fn enter_hidden(&mut self, now: u64) {
        let ticks = self
            .rng
            .next_range_inclusive(self.config.hidden_cooldown_min, self.config.hidden_cooldown_max);
        self.hidden_cooldown.start(now, ticks);
        self.set_mode(HiderMode::Hidden);
    }

    /// Sample random tiles for a concealing one we can reach. Sets a path and returns `true` on
    /// success; otherwise leaves the path alone so the next tick retries.
    fn find_spot<G: Grid + ?Sized>(&mut self, grid: &G, from: TilePos) -> bool {
        for _ in 0..self.config.spot_attempts {
            let candidate = random_tile(grid, &mut self.rng);
            if candidate == from {
                continue;
            }
            let Some(info) = grid.tile_info(candidate) else {
                continue;
            };
            if !info.walkable || !info.conceals() {
                continue;
            }
            if self
                .query
                .find_path_into(grid, from, candidate, &mut self.scratch)
            {
                debug!(spot = %candidate, steps = self.scratch.len(), "hider picked spot");
                self.body.set_path(self.scratch.clone());
                self.set_mode(HiderMode::FoundSpot);
                return true;
            }
        }
        false
    }

    /// Pick an escape route from `from`, running away from `threat`.
    ///
    /// Candidate directions are tried in a fixed order: straight away, both perpendiculars,
    /// then the two diagonals between away and each perpendicular. The first direction whose
    /// ray ends on a reachable concealing tile wins. `None` when no ray finds cover; the Hider
    /// stays in panic and tries again next tick.
    pub fn plan_escape<G: Grid + ?Sized>(
        &mut self,
        grid: &G,
        from: TilePos,
        threat: TilePos,
    ) -> Option<Vec<TilePos>> {
        let here = Vec2::new(from.x as f32, from.y as f32);
        let there = Vec2::new(threat.x as f32, threat.y as f32);
        let away = (here - there)
            .try_normalize()
            .unwrap_or(Vec2::new(1.0, 0.0));
        let left = away.perp();
        let right = -left;
        let directions = [
            away,
            left,
            right,
            (away + left).normalize_or_zero(),
            (away + right).normalize_or_zero(),
        ];

        for dir in directions {
            let Some(target) = self.cast_escape_ray(grid, from, threat, dir) else {
                continue;
            };
            if self.query.find_path_into(grid, from, target, &mut self.scratch) {
                return Some(self.scratch.clone());
            }
        }
        None
    }

    /// Walk outward along `dir` starting `escape_min_steps` out and return the last concealing
    /// tile.
    ///
    /// The walk stops at the grid edge, at a non-walkable or non-concealing tile, or at the
    /// Seeker's tile. `None` when the first tile inspected already fails.
    fn cast_escape_ray<G: Grid + ?Sized>(
        &self,
        grid: &G,
        from: TilePos,
        threat: TilePos,
        dir: Vec2,
    ) -> Option<TilePos> {
        if dir == Vec2::ZERO {
            return None;
        }
        let mut terminal = None;
        for step in self.config.escape_min_steps..=self.config.escape_max_steps {
            let reach = dir * step as f32;
            let tile = from.offset(reach.x.round() as i32, reach.y.round() as i32);
            if tile == from {
                continue;
            }
            if tile == threat {
                break;
            }
            match grid.tile_info(tile) {
                Some(info) if info.walkable && info.conceals() => terminal = Some(tile),
                _ => break,
            }
        }
        terminal
    }
}

impl Behavior for Hider {
    fn kind(&self) -> AgentKind {
        AgentKind::Hider
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

    fn decide<G: GridMut + ?Sized>(&mut self, ctx: &TickContext, seeker: TilePos, grid: &mut G) {
        if self.mode == HiderMode::Caught {
            return;
        }

        let tile = self.body.tile(&*grid);
        if tile == seeker {
            self.set_mode(HiderMode::Caught);
            self.body.halt();
            return;
        }

        self.body.update_energy(self.mode == HiderMode::Panic);
        if self.body.energy().is_recovering() {
            return;
        }

        // Never replan mid-route; every branch below starts from an empty path.
        if !self.body.path().is_empty() {
            return;
        }

        let dist = tile.manhattan(seeker);
        if dist <= self.config.panic_distance {
            self.set_mode(HiderMode::Panic);
            self.body.refresh_speed(true);
            match self.plan_escape(&*grid, tile, seeker) {
                Some(route) => self.body.set_path(route),
                None => debug!(at = %tile, "hider has no escape route"),
            }
            return;
        }

        let concealed = grid.tile_info(tile).is_some_and(|info| info.conceals());
        let far = dist > self.config.far_distance;
        match self.mode {
            HiderMode::Hiding => {
                self.find_spot(&*grid, tile);
            }
            HiderMode::Panic => {
                if concealed && far {
                    self.enter_hidden(ctx.tick);
                } else {
                    self.set_mode(HiderMode::Hiding);
                    self.find_spot(&*grid, tile);
                }
            }
            HiderMode::FoundSpot => {
                if !concealed {
                    self.set_mode(HiderMode::Hiding);
                } else if far {
                    self.enter_hidden(ctx.tick);
                }
            }
            HiderMode::Hidden => {
                if !concealed || self.hidden_cooldown.is_ready(ctx.tick) {
                    self.set_mode(HiderMode::Hiding);
                }
            }
            HiderMode::Caught => {}
        }
        self.body.refresh_speed(self.mode == HiderMode::Panic);
    }
}
