use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::policy::Policy;

/// Largest grid side a simulation accepts.
pub const MAX_GRID_SIZE: usize = 64;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("grid_size must be between 2 and {MAX_GRID_SIZE}, got {0}")]
    GridSize(usize),

    #[error("episodes must be at least 1")]
    NoEpisodes,
}

/// Simulation settings. Every key is optional in the TOML file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "defaults::seed")]
    pub seed: u64,
    #[serde(default = "defaults::episodes")]
    pub episodes: u32,
    /// 0 means unlimited.
    #[serde(default = "defaults::max_steps")]
    pub max_steps: u32,
    #[serde(default = "defaults::grid_size")]
    pub grid_size: usize,
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: defaults::seed(),
            episodes: defaults::episodes(),
            max_steps: defaults::max_steps(),
            grid_size: defaults::grid_size(),
            policy: Policy::default(),
            verbose: false,
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::GridSize(self.grid_size));
        }
        if self.episodes == 0 {
            return Err(ConfigError::NoEpisodes);
        }
        Ok(())
    }
}

mod defaults {
    pub fn seed() -> u64 { 42 }
    pub fn episodes() -> u32 { 100 }
    pub fn max_steps() -> u32 { 10_000 }
    pub fn grid_size() -> usize { tilemerge_core::DEFAULT_SIZE }
}
