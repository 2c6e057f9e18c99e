//! Whole-run configuration loading.

use std::io;
use std::path::{Path, PathBuf};

use hideseek_agents::{HiderConfig, SeekerConfig};
use hideseek_nav::TilePos;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported config format for {} (expected .yaml, .yml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("failed to parse YAML config")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON config")]
    Json(#[from] serde_json::Error),

    #[error("tile_size must be positive, got {0}")]
    TileSize(f32),

    #[error("{agent} spawn {tile} equals the other agent's spawn")]
    SharedSpawn { agent: &'static str, tile: TilePos },

    #[error(transparent)]
    Agents(#[from] hideseek_agents::ConfigError),
}

/// Everything a run needs besides the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seeds spawning and both agents' decision RNGs.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Edge length of one tile in world units.
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,

    /// Tick budget for `hideseek run` when `--ticks` is not given.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Fixed spawn tiles; random walkable tiles when absent.
    pub hider_spawn: Option<TilePos>,
    pub seeker_spawn: Option<TilePos>,

    pub hider: HiderConfig,
    pub seeker: SeekerConfig,
}

fn default_seed() -> u64 {
    0x5EED
}
fn default_tile_size() -> f32 {
    16.0
}
fn default_max_ticks() -> u64 {
    5_000
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            tile_size: default_tile_size(),
            max_ticks: default_max_ticks(),
            hider_spawn: None,
            seeker_spawn: None,
            hider: HiderConfig::default(),
            seeker: SeekerConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load and validate a config file. The format follows the extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tile_size > 0.0) {
            return Err(ConfigError::TileSize(self.tile_size));
        }
        if let (Some(hider), Some(seeker)) = (self.hider_spawn, self.seeker_spawn) {
            if hider == seeker {
                return Err(ConfigError::SharedSpawn {
                    agent: "seeker",
                    tile: seeker,
                });
            }
        }
        self.hider.validate()?;
        self.seeker.validate()?;
        Ok(())
    }
}
