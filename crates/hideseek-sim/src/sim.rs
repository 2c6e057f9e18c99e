use std::io;

use hideseek_agents::{Behavior, Hider, Seeker};
use hideseek_core::{AgentKind, DeterministicRng, TickContext};
use hideseek_nav::{Grid, TileGrid, TilePos};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::{
    AgentView, ConfigError, Frame, NullTraceSink, Renderer, SimConfig, TraceEvent, TraceSink,
};

/// RNG stream used for picking spawn tiles.
const SPAWN_STREAM: u64 = 0x5B;
/// RNG stream each agent draws its decisions from.
const BEHAVIOR_STREAM: u64 = 0xBE;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("need at least two walkable tiles to spawn both agents, found {walkable}")]
    NoSpawnTile { walkable: usize },

    #[error("{agent} spawn {tile} is not a walkable tile")]
    UnwalkableSpawn { agent: AgentKind, tile: TilePos },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("renderer failed")]
    Render(#[from] io::Error),
}

/// Uniform pick from `walkable`, skipping `exclude`. `walkable` holds at least two tiles.
fn pick_spawn<R: DeterministicRng>(
    rng: &mut R,
    walkable: &[TilePos],
    exclude: Option<TilePos>,
) -> TilePos {
    loop {
        let candidate = walkable[rng.next_below(walkable.len() as u64) as usize];
        if Some(candidate) != exclude {
            return candidate;
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub ticks: u64,
    pub caught: bool,
}

/// The tick driver: owns the grid and both agents and steps them in a fixed order.
#[derive(Debug)]
pub struct Simulation<S = NullTraceSink> {
    grid: TileGrid,
    hider: Hider,
    seeker: Seeker,
    tick: u64,
    seed: u64,
    sink: S,
}

impl Simulation<NullTraceSink> {
    /// Spawn both agents from `config`: fixed spawns when given, otherwise distinct random
    /// walkable tiles.
    pub fn new(grid: TileGrid, config: &SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let walkable: Vec<TilePos> = grid.walkable_tiles().collect();
        if walkable.len() < 2 {
            return Err(SimError::NoSpawnTile {
                walkable: walkable.len(),
            });
        }

        let mut rng =
            TickContext::new(0, config.seed).rng_for_agent(AgentKind::Hider, SPAWN_STREAM);
        let hider = config
            .hider_spawn
            .unwrap_or_else(|| pick_spawn(&mut rng, &walkable, config.seeker_spawn));
        let seeker = config
            .seeker_spawn
            .unwrap_or_else(|| pick_spawn(&mut rng, &walkable, Some(hider)));

        Self::with_agents(grid, config, hider, seeker)
    }

    /// Place both agents on explicit tiles.
    pub fn with_agents(
        grid: TileGrid,
        config: &SimConfig,
        hider: TilePos,
        seeker: TilePos,
    ) -> Result<Self, SimError> {
        config.validate()?;
        for (agent, tile) in [(AgentKind::Hider, hider), (AgentKind::Seeker, seeker)] {
            if !grid.is_walkable(tile) {
                return Err(SimError::UnwalkableSpawn { agent, tile });
            }
        }
        if hider == seeker {
            return Err(ConfigError::SharedSpawn {
                agent: "seeker",
                tile: seeker,
            }
            .into());
        }

        let ctx = TickContext::new(0, config.seed);
        let hider_agent = Hider::new(
            config.hider.clone(),
            grid.tile_center(hider),
            ctx.rng_for_agent(AgentKind::Hider, BEHAVIOR_STREAM),
        );
        let seeker_agent = Seeker::new(
            config.seeker.clone(),
            grid.tile_center(seeker),
            ctx.rng_for_agent(AgentKind::Seeker, BEHAVIOR_STREAM),
        );
        info!(seed = config.seed, hider = %hider, seeker = %seeker, "agents spawned");

        Ok(Self {
            grid,
            hider: hider_agent,
            seeker: seeker_agent,
            tick: 0,
            seed: config.seed,
            sink: NullTraceSink,
        })
    }
}

impl<S: TraceSink> Simulation<S> {
    /// Swap the trace sink, keeping all simulation state.
    pub fn with_trace_sink<T: TraceSink>(self, sink: T) -> Simulation<T> {
        Simulation {
            grid: self.grid,
            hider: self.hider,
            seeker: self.seeker,
            tick: self.tick,
            seed: self.seed,
            sink,
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn hider(&self) -> &Hider {
        &self.hider
    }

    pub fn seeker(&self) -> &Seeker {
        &self.seeker
    }

    /// Ticks completed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn is_over(&self) -> bool {
        self.hider.is_caught()
    }

    /// Run one tick: Hider decides and moves, then the Seeker does.
    pub fn step(&mut self) {
        let ctx = TickContext::new(self.tick, self.seed);

        let before = self.hider.mode_label();
        let seeker_tile = self.seeker.tile(&self.grid);
        self.hider.decide(&ctx, seeker_tile, &mut self.grid);
        self.hider.advance(&self.grid);
        self.record(AgentKind::Hider, before, self.hider.mode_label());

        let before = self.seeker.mode_label();
        let hider_tile = self.hider.tile(&self.grid);
        self.seeker.decide(&ctx, hider_tile, &mut self.grid);
        self.seeker.advance(&self.grid);
        self.record(AgentKind::Seeker, before, self.seeker.mode_label());

        trace!(
            tick = self.tick,
            hider = %self.hider.tile(&self.grid),
            seeker = %self.seeker.tile(&self.grid),
            "tick"
        );
        self.tick += 1;
    }

    fn record(&mut self, agent: AgentKind, from: &'static str, to: &'static str) {
        if from == to {
            return;
        }
        debug!(tick = self.tick, agent = %agent, from, to, "mode transition");
        self.sink
            .emit(TraceEvent::transition(self.tick, agent, from, to));
    }

    /// Snapshot for renderers.
    pub fn frame(&self) -> Frame {
        Frame {
            tick: self.tick,
            hider: AgentView::capture(&self.hider, &self.grid),
            seeker: AgentView::capture(&self.seeker, &self.grid),
        }
    }

    /// Step until the Hider is caught or `max_ticks` more ticks have run, rendering after every
    /// tick.
    pub fn run<R>(&mut self, max_ticks: u64, renderer: &mut R) -> Result<Outcome, SimError>
    where
        R: Renderer + ?Sized,
    {
        info!(max_ticks, "run started");
        renderer.render(&self.grid, &self.frame())?;

        let start = self.tick;
        while !self.is_over() && self.tick - start < max_ticks {
            self.step();
            renderer.render(&self.grid, &self.frame())?;
        }

        let outcome = Outcome {
            ticks: self.tick - start,
            caught: self.is_over(),
        };
        renderer.finish(&outcome)?;
        info!(ticks = outcome.ticks, caught = outcome.caught, "run finished");
        Ok(outcome)
    }
}
