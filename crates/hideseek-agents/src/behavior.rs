use hideseek_core::{AgentKind, TickContext};
use hideseek_nav::{Grid, GridMut, TilePos};

use crate::Body;

/// The seam the tick driver talks to.
///
/// Each tick the driver calls [`Behavior::decide`] with the opponent's current tile, then
/// [`Behavior::advance`]. Implementations own their [`Body`] and only differ in how they pick
/// modes and paths.
pub trait Behavior {
    fn kind(&self) -> AgentKind;

    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    /// Short lowercase name of the current mode, for rendering and traces.
    fn mode_label(&self) -> &'static str;

    /// Update energy, evaluate transitions and (re)plan a path if needed.
    fn decide<G: GridMut + ?Sized>(&mut self, ctx: &TickContext, opponent: TilePos, grid: &mut G);

    fn advance<G: Grid + ?Sized>(&mut self, grid: &G) -> Option<TilePos> {
        self.body_mut().advance(grid)
    }

    fn tile<G: Grid + ?Sized>(&self, grid: &G) -> TilePos {
        self.body().tile(grid)
    }
}

/// Uniformly sampled in-bounds tile. Walkability is left to the caller.
pub(crate) fn random_tile<G, R>(grid: &G, rng: &mut R) -> TilePos
where
    G: Grid + ?Sized,
    R: hideseek_core::DeterministicRng,
{
    let (cols, rows) = grid.dimensions();
    let x = rng.next_below(cols.max(0) as u64) as i32;
    let y = rng.next_below(rows.max(0) as u64) as i32;
    TilePos::new(x, y)
}
