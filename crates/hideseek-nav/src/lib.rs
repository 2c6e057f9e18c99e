//! Tile grid, tile attributes and grid pathfinding.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod astar;
pub mod grid;
pub mod math;
pub mod path;
pub mod tile;

pub use astar::{find_path, PathQuery};
pub use grid::{Grid, GridError, GridMut, TileGrid};
pub use math::Vec2;
pub use path::TilePath;
pub use tile::{Biome, Obstacle, TileInfo, TilePos};
