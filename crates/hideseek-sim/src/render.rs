//! The read-only boundary between the simulation and whatever draws it.
//!
//! Renderers receive one [`Frame`] per tick. They never mutate agents; a frame is a snapshot.

use std::io::{self, Write};

use hideseek_agents::Behavior;
use hideseek_core::AgentKind;
use hideseek_nav::{Grid, Obstacle, TilePos, Vec2};
use serde::Serialize;

use crate::Outcome;

/// What a renderer may know about one agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentView {
    pub kind: AgentKind,
    pub position: Vec2,
    pub tile: TilePos,
    pub mode: &'static str,
    pub energy: f32,
    pub hunger: f32,
    pub recovering: bool,
    pub speed: f32,
    pub path: Vec<TilePos>,
}

impl AgentView {
    pub fn capture<A, G>(agent: &A, grid: &G) -> Self
    where
        A: Behavior,
        G: Grid + ?Sized,
    {
        let body = agent.body();
        Self {
            kind: agent.kind(),
            position: body.position(),
            tile: body.tile(grid),
            mode: agent.mode_label(),
            energy: body.energy().energy(),
            hunger: body.energy().hunger(),
            recovering: body.energy().is_recovering(),
            speed: body.speed(),
            path: body.path().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub hider: AgentView,
    pub seeker: AgentView,
}

pub trait Renderer {
    fn render(&mut self, grid: &dyn Grid, frame: &Frame) -> io::Result<()>;

    /// Called once after the last frame.
    fn finish(&mut self, _outcome: &Outcome) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _grid: &dyn Grid, _frame: &Frame) -> io::Result<()> {
        Ok(())
    }
}

/// Text map with `H`/`S` for the agents (`X` when they share a tile) and `*` along both paths.
#[derive(Debug)]
pub struct AsciiRenderer<W: Write> {
    out: W,
    every: u64,
    show_paths: bool,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            every: 1,
            show_paths: true,
        }
    }

    /// Only draw every `every`-th tick. Zero is treated as one.
    pub fn every(mut self, every: u64) -> Self {
        self.every = every.max(1);
        self
    }

    pub fn show_paths(mut self, show: bool) -> Self {
        self.show_paths = show;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn glyph(grid: &dyn Grid, frame: &Frame, tile: TilePos, show_paths: bool) -> char {
        let hider = frame.hider.tile == tile;
        let seeker = frame.seeker.tile == tile;
        match (hider, seeker) {
            (true, true) => return 'X',
            (true, false) => return 'H',
            (false, true) => return 'S',
            (false, false) => {}
        }
        if show_paths && (frame.hider.path.contains(&tile) || frame.seeker.path.contains(&tile)) {
            return '*';
        }
        match grid.tile_info(tile).and_then(|info| info.obstacle) {
            None => '.',
            Some(Obstacle::Tree) => 'T',
            Some(Obstacle::Rock) => 'R',
            Some(Obstacle::Water) => '~',
        }
    }

    fn status(view: &AgentView) -> String {
        format!(
            "{} {}{} e={:.1} h={:.1} @ {}",
            view.kind,
            view.mode,
            if view.recovering { " (recovering)" } else { "" },
            view.energy,
            view.hunger,
            view.tile,
        )
    }
}

impl<W: Write> Renderer for AsciiRenderer<W> {
    fn render(&mut self, grid: &dyn Grid, frame: &Frame) -> io::Result<()> {
        if frame.tick % self.every != 0 {
            return Ok(());
        }
        let (cols, rows) = grid.dimensions();
        writeln!(self.out, "tick {}", frame.tick)?;
        let mut line = String::with_capacity(cols.max(0) as usize);
        for y in 0..rows {
            line.clear();
            for x in 0..cols {
                line.push(Self::glyph(grid, frame, TilePos::new(x, y), self.show_paths));
            }
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out, "{}", Self::status(&frame.hider))?;
        writeln!(self.out, "{}", Self::status(&frame.seeker))?;
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self, outcome: &Outcome) -> io::Result<()> {
        if outcome.caught {
            writeln!(self.out, "hider caught after {} ticks", outcome.ticks)?;
        } else {
            writeln!(self.out, "hider survived {} ticks", outcome.ticks)?;
        }
        self.out.flush()
    }
}

/// One JSON object per frame, newline separated.
#[derive(Debug)]
pub struct JsonLinesRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn render(&mut self, _grid: &dyn Grid, frame: &Frame) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, frame)?;
        self.out.write_all(b"\n")
    }

    fn finish(&mut self, _outcome: &Outcome) -> io::Result<()> {
        self.out.flush()
    }
}
