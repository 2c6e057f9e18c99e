use core::fmt;

use thiserror::Error;

use crate::{Obstacle, TileInfo, TilePos, Vec2};

/// Read-only tile queries the agents make while deciding.
pub trait Grid {
    /// `(cols, rows)`.
    fn dimensions(&self) -> (i32, i32);

    /// Edge length of one tile in world units.
    fn tile_size(&self) -> f32;

    /// Attributes of `tile`, or `None` when it lies outside the grid.
    fn tile_info(&self, tile: TilePos) -> Option<TileInfo>;

    fn is_explored(&self, tile: TilePos) -> bool;

    fn in_bounds(&self, tile: TilePos) -> bool {
        let (cols, rows) = self.dimensions();
        tile.x >= 0 && tile.y >= 0 && tile.x < cols && tile.y < rows
    }

    fn is_walkable(&self, tile: TilePos) -> bool {
        self.tile_info(tile).is_some_and(|info| info.walkable)
    }

    fn tile_of(&self, p: Vec2) -> TilePos {
        let size = self.tile_size();
        TilePos::new((p.x / size).floor() as i32, (p.y / size).floor() as i32)
    }

    fn tile_center(&self, tile: TilePos) -> Vec2 {
        let size = self.tile_size();
        Vec2::new(
            (tile.x as f32 + 0.5) * size,
            (tile.y as f32 + 0.5) * size,
        )
    }
}

/// Bookkeeping writes. The Seeker's "explored" marks are the only tile mutation the engine makes.
pub trait GridMut: Grid {
    fn mark_explored(&mut self, tile: TilePos);
    fn clear_explored(&mut self);
}

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid layout is empty")]
    Empty,

    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile glyph {glyph:?} at line {line}, column {column}")]
    UnknownGlyph {
        glyph: char,
        line: usize,
        column: usize,
    },

    #[error("tile size must be positive, got {0}")]
    InvalidTileSize(f32),
}

/// Dense in-memory grid, row-major.
#[derive(Debug, Clone)]
pub struct TileGrid {
    cols: i32,
    rows: i32,
    tile_size: f32,
    tiles: Vec<Option<Obstacle>>,
    explored: Vec<bool>,
}

impl TileGrid {
    /// An all-grassland grid.
    pub fn new(cols: u32, rows: u32, tile_size: f32) -> Self {
        assert!(cols > 0 && rows > 0, "grid must be non-empty");
        assert!(tile_size > 0.0, "tile_size must be > 0");
        let cols = cols as i32;
        let rows = rows as i32;
        let len = (cols * rows) as usize;
        Self {
            cols,
            rows,
            tile_size,
            tiles: vec![None; len],
            explored: vec![false; len],
        }
    }

    /// Parse a text layout: `.` grassland, `T` tree, `R` rock, `~` water.
    ///
    /// Blank lines and trailing whitespace are ignored; every remaining row must have the same
    /// width.
    pub fn from_ascii(text: &str, tile_size: f32) -> Result<Self, GridError> {
        if !(tile_size > 0.0) {
            return Err(GridError::InvalidTileSize(tile_size));
        }

        let mut rows: Vec<Vec<Option<Obstacle>>> = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let mut row = Vec::with_capacity(line.len());
            for (col, glyph) in line.chars().enumerate() {
                row.push(match glyph {
                    '.' => None,
                    'T' => Some(Obstacle::Tree),
                    'R' => Some(Obstacle::Rock),
                    '~' => Some(Obstacle::Water),
                    other => {
                        return Err(GridError::UnknownGlyph {
                            glyph: other,
                            line: line_no + 1,
                            column: col + 1,
                        })
                    }
                });
            }
            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(GridError::RaggedRow {
                        row: rows.len(),
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            rows.push(row);
        }

        let Some(width) = rows.first().map(Vec::len) else {
            return Err(GridError::Empty);
        };

        let mut grid = TileGrid::new(width as u32, rows.len() as u32, tile_size);
        for (y, row) in rows.into_iter().enumerate() {
            for (x, obstacle) in row.into_iter().enumerate() {
                grid.set_obstacle(TilePos::new(x as i32, y as i32), obstacle);
            }
        }
        Ok(grid)
    }

    pub fn set_obstacle(&mut self, tile: TilePos, obstacle: Option<Obstacle>) {
        if let Some(idx) = self.idx(tile) {
            self.tiles[idx] = obstacle;
        }
    }

    pub fn obstacle(&self, tile: TilePos) -> Option<Obstacle> {
        self.idx(tile).and_then(|idx| self.tiles[idx])
    }

    /// All walkable tiles in row-major order.
    pub fn walkable_tiles(&self) -> impl Iterator<Item = TilePos> + '_ {
        (0..self.tiles.len())
            .map(|idx| self.tile_from_idx(idx))
            .filter(|tile| self.is_walkable(*tile))
    }

    pub fn explored_count(&self) -> usize {
        self.explored.iter().filter(|e| **e).count()
    }

    fn idx(&self, tile: TilePos) -> Option<usize> {
        if !self.in_bounds(tile) {
            return None;
        }
        Some((tile.y * self.cols + tile.x) as usize)
    }

    fn tile_from_idx(&self, idx: usize) -> TilePos {
        let idx = idx as i32;
        TilePos::new(idx % self.cols, idx / self.cols)
    }
}

impl Grid for TileGrid {
    fn dimensions(&self) -> (i32, i32) {
        (self.cols, self.rows)
    }

    fn tile_size(&self) -> f32 {
        self.tile_size
    }

    fn tile_info(&self, tile: TilePos) -> Option<TileInfo> {
        self.idx(tile).map(|idx| TileInfo::with_obstacle(self.tiles[idx]))
    }

    fn is_explored(&self, tile: TilePos) -> bool {
        self.idx(tile).is_some_and(|idx| self.explored[idx])
    }
}

impl GridMut for TileGrid {
    fn mark_explored(&mut self, tile: TilePos) {
        if let Some(idx) = self.idx(tile) {
            self.explored[idx] = true;
        }
    }

    fn clear_explored(&mut self) {
        self.explored.fill(false);
    }
}

/// Renders the layout back in the glyphs accepted by [`TileGrid::from_ascii`].
impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            for x in 0..self.cols {
                let glyph = match self.obstacle(TilePos::new(x, y)) {
                    None => '.',
                    Some(Obstacle::Tree) => 'T',
                    Some(Obstacle::Rock) => 'R',
                    Some(Obstacle::Water) => '~',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
