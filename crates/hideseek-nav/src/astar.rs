//! A* over a 4-connected tile grid with unit step cost.
//!
//! Heuristic is Manhattan distance, which is admissible and consistent here, so the first time
//! the goal is popped its path is optimal. The frontier is ordered by `(f, h, seq)`: lowest `f`
//! first, then the node closer to the goal, then insertion order. Neighbors are expanded in the
//! fixed order N, E, S, W, so a given grid/start/goal always yields the same path.

use core::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{Grid, TilePos};

#[derive(Debug)]
struct OpenNode {
    f: u32,
    h: u32,
    seq: u64,
    g: u32,
    idx: usize,
}

impl OpenNode {
    fn key(&self) -> (u32, u32, u64) {
        (self.f, self.h, self.seq)
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

/// Reusable scratch buffers for repeated searches.
///
/// Agents replan often on the same grid; holding one `PathQuery` avoids reallocating the
/// score and predecessor arrays each time.
#[derive(Debug, Default)]
pub struct PathQuery {
    open: BinaryHeap<OpenNode>,
    g_score: Vec<u32>,
    came_from: Vec<Option<usize>>,
    expanded: usize,
}

impl PathQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes popped from the frontier by the last search.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Search from `start` to `goal`, writing the steps into `out`.
    ///
    /// `out` receives the tiles after `start` up to and including `goal`. Returns `false` (with
    /// `out` empty) when `start == goal` or no path exists.
    pub fn find_path_into<G: Grid + ?Sized>(
        &mut self,
        grid: &G,
        start: TilePos,
        goal: TilePos,
        out: &mut Vec<TilePos>,
    ) -> bool {
        out.clear();
        self.expanded = 0;
        if start == goal || !grid.in_bounds(start) || !grid.in_bounds(goal) {
            return false;
        }

        let (cols, rows) = grid.dimensions();
        let len = (cols as usize) * (rows as usize);
        let idx_of = |t: TilePos| (t.y as usize) * (cols as usize) + t.x as usize;
        let tile_of = |i: usize| TilePos::new((i % cols as usize) as i32, (i / cols as usize) as i32);

        self.open.clear();
        self.g_score.clear();
        self.g_score.resize(len, u32::MAX);
        self.came_from.clear();
        self.came_from.resize(len, None);

        let start_idx = idx_of(start);
        let goal_idx = idx_of(goal);
        let mut seq: u64 = 0;

        self.g_score[start_idx] = 0;
        let h0 = start.manhattan(goal);
        self.open.push(OpenNode {
            f: h0,
            h: h0,
            seq,
            g: 0,
            idx: start_idx,
        });
        seq += 1;

        while let Some(node) = self.open.pop() {
            if node.g != self.g_score[node.idx] {
                // Stale heap entry.
                continue;
            }
            self.expanded += 1;

            if node.idx == goal_idx {
                let mut current = goal_idx;
                while current != start_idx {
                    out.push(tile_of(current));
                    match self.came_from[current] {
                        Some(prev) => current = prev,
                        None => break,
                    }
                }
                out.reverse();
                return true;
            }

            let cell = tile_of(node.idx);
            for n in cell.neighbors4() {
                if !grid.is_walkable(n) {
                    continue;
                }
                let n_idx = idx_of(n);

                let tentative_g = node.g.saturating_add(1);
                if tentative_g >= self.g_score[n_idx] {
                    continue;
                }

                self.came_from[n_idx] = Some(node.idx);
                self.g_score[n_idx] = tentative_g;
                let h = n.manhattan(goal);
                self.open.push(OpenNode {
                    f: tentative_g.saturating_add(h),
                    h,
                    seq,
                    g: tentative_g,
                    idx: n_idx,
                });
                seq += 1;
            }
        }

        false
    }
}

/// Shortest 4-connected path from `start` to `goal`, excluding `start`.
///
/// An empty result means either `start == goal` or that `goal` cannot be reached; callers treat
/// the latter as a soft failure and try again later.
pub fn find_path<G: Grid + ?Sized>(grid: &G, start: TilePos, goal: TilePos) -> Vec<TilePos> {
    let mut out = Vec::new();
    PathQuery::new().find_path_into(grid, start, goal, &mut out);
    out
}
