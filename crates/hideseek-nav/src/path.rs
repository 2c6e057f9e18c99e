use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::TilePos;

/// Waypoints an agent still has to visit, consumed front-to-back.
///
/// Replaced wholesale on replanning; an empty path means the agent is idle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TilePath {
    waypoints: VecDeque<TilePos>,
}

impl TilePath {
    pub fn new(waypoints: Vec<TilePos>) -> Self {
        Self {
            waypoints: waypoints.into(),
        }
    }

    pub fn front(&self) -> Option<TilePos> {
        self.waypoints.front().copied()
    }

    pub fn back(&self) -> Option<TilePos> {
        self.waypoints.back().copied()
    }

    pub fn pop_front(&mut self) -> Option<TilePos> {
        self.waypoints.pop_front()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    /// Discard whatever is left and adopt `waypoints`.
    pub fn replace(&mut self, waypoints: Vec<TilePos>) {
        self.waypoints = waypoints.into();
    }

    pub fn iter(&self) -> impl Iterator<Item = TilePos> + '_ {
        self.waypoints.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<TilePos> {
        self.iter().collect()
    }
}

impl From<Vec<TilePos>> for TilePath {
    fn from(waypoints: Vec<TilePos>) -> Self {
        Self::new(waypoints)
    }
}
