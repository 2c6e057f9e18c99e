use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One discrete grid cell, addressed by integer (column, row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(self, other: TilePos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn offset(self, dx: i32, dy: i32) -> TilePos {
        TilePos::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// 4-connected neighbors in fixed N, E, S, W order.
    pub fn neighbors4(self) -> [TilePos; 4] {
        [
            self.offset(0, -1),
            self.offset(1, 0),
            self.offset(0, 1),
            self.offset(-1, 0),
        ]
    }
}

impl From<(i32, i32)> for TilePos {
    fn from((x, y): (i32, i32)) -> Self {
        TilePos::new(x, y)
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Tile classification affecting concealment and vision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Biome {
    #[default]
    Grassland,
    Forest,
    Rocky,
    Lake,
}

impl Biome {
    /// Whether standing in this biome hides an agent from casual sight.
    pub fn is_cover(self) -> bool {
        matches!(self, Biome::Forest)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Obstacle {
    Tree,
    Rock,
    Water,
}

impl Obstacle {
    pub fn is_walkable(self) -> bool {
        matches!(self, Obstacle::Tree)
    }

    pub fn biome(self) -> Biome {
        match self {
            Obstacle::Tree => Biome::Forest,
            Obstacle::Rock => Biome::Rocky,
            Obstacle::Water => Biome::Lake,
        }
    }
}

/// Attributes of a single tile as seen by the agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TileInfo {
    pub obstacle: Option<Obstacle>,
    pub biome: Biome,
    pub walkable: bool,
}

impl TileInfo {
    pub fn open() -> Self {
        Self {
            obstacle: None,
            biome: Biome::Grassland,
            walkable: true,
        }
    }

    pub fn with_obstacle(obstacle: Option<Obstacle>) -> Self {
        match obstacle {
            None => Self::open(),
            Some(o) => Self {
                obstacle: Some(o),
                biome: o.biome(),
                walkable: o.is_walkable(),
            },
        }
    }

    /// Whether this tile offers a hiding spot.
    pub fn conceals(&self) -> bool {
        self.obstacle == Some(Obstacle::Tree)
    }
}
