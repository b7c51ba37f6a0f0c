use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use macroquad::prelude::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::boid::Role;

/// Path to an optional JSON file with configuration overrides.
pub const CONFIG_ENV: &str = "BOIDS_CONFIG";
/// Overrides the RNG seed from the config file.
pub const SEED_ENV: &str = "BOIDS_SEED";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Which neighbor search backs the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborSearchKind {
    #[default]
    Grid,
    BruteForce,
}

/// Everything the flock needs to know, fixed for the lifetime of a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlockConfig {
    /// Arena width in world units.
    pub width: f32,
    /// Arena height in world units.
    pub height: f32,
    /// Distance from an edge at which soft steering starts.
    pub margin: f32,
    /// Velocity nudge applied per step inside the margin band.
    pub turn_force: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Alignment/cohesion range; also the grid cell size.
    pub vision_radius: f32,
    /// Below this distance a neighbor is avoided instead of followed.
    pub protected_radius: f32,
    pub center_gain: f32,
    pub avoid_gain: f32,
    pub match_gain: f32,
    /// Upper bound of the random jitter magnitude; 0 disables jitter.
    pub randomness: f32,
    pub boid_count: usize,
    pub scout_a_count: usize,
    pub scout_b_count: usize,
    /// Goal of `ScoutA` boids; `None` means one third across, half down.
    pub scout_a_goal: Option<[f32; 2]>,
    /// Goal of `ScoutB` boids; `None` means two thirds across, half down.
    pub scout_b_goal: Option<[f32; 2]>,
    pub bias_weight: f32,
    /// Frame rate assumed when a frame reports zero elapsed time.
    pub default_fps: f32,
    /// Frame rate assumed for the first step after a reset.
    pub initial_fps: f32,
    pub neighbor_search: NeighborSearchKind,
    pub seed: Option<u64>,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            width: 1700.0,
            height: 925.0,
            margin: 40.0,
            turn_force: 3.0,
            min_speed: 125.0,
            max_speed: 250.0,
            vision_radius: 35.0,
            protected_radius: 9.0,
            center_gain: 0.0005,
            avoid_gain: 0.25,
            match_gain: 0.05,
            randomness: 5.0,
            boid_count: 500,
            scout_a_count: 100,
            scout_b_count: 100,
            scout_a_goal: None,
            scout_b_goal: None,
            bias_weight: 0.4,
            default_fps: 250.0,
            initial_fps: 60.0,
            neighbor_search: NeighborSearchKind::Grid,
            seed: None,
        }
    }
}

impl FlockConfig {
    /// Defaults, then the file named by `BOIDS_CONFIG`, then `BOIDS_SEED`.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let mut config = match env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        if let Some(seed) = seed_from_env() {
            config.seed = Some(seed);
        }
        config.validate()?;
        Ok(config)
    }

    /// Like `load_from_env`, but a broken config file only costs the file:
    /// the run continues on defaults and `BOIDS_SEED` is still honoured.
    pub fn load_from_env_or_default() -> Self {
        Self::load_from_env().unwrap_or_else(|err| {
            error!(%err, "falling back to default configuration");
            Self {
                seed: seed_from_env(),
                ..Self::default()
            }
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), "loaded flock configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::Invalid("arena dimensions must be positive"));
        }
        if self.margin < 0.0 || self.turn_force < 0.0 {
            return Err(ConfigError::Invalid(
                "margin and turn_force must be non-negative",
            ));
        }
        if self.min_speed < 0.0 || self.min_speed > self.max_speed {
            return Err(ConfigError::Invalid(
                "speeds must satisfy 0 <= min_speed <= max_speed",
            ));
        }
        if !(self.vision_radius > 0.0) {
            return Err(ConfigError::Invalid("vision_radius must be positive"));
        }
        if self.protected_radius < 0.0 || self.protected_radius > self.vision_radius {
            return Err(ConfigError::Invalid(
                "protected_radius must lie in [0, vision_radius]",
            ));
        }
        if self.center_gain < 0.0 || self.avoid_gain < 0.0 || self.match_gain < 0.0 {
            return Err(ConfigError::Invalid("gains must be non-negative"));
        }
        if self.randomness < 0.0 {
            return Err(ConfigError::Invalid("randomness must be non-negative"));
        }
        if !(0.0..=1.0).contains(&self.bias_weight) {
            return Err(ConfigError::Invalid("bias_weight must lie in [0, 1]"));
        }
        if !(self.default_fps > 0.0 && self.initial_fps > 0.0) {
            return Err(ConfigError::Invalid("frame rates must be positive"));
        }
        Ok(())
    }

    /// Same configuration over a differently sized arena.
    pub fn with_arena(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Fixed goal point for a scout role, `None` for normal boids.
    pub fn goal_for(&self, role: Role) -> Option<Vec2> {
        match role {
            Role::Normal => None,
            Role::ScoutA => Some(self.scout_a_goal.map(Vec2::from).unwrap_or_else(|| {
                Vec2::new(self.width / 3.0, self.height / 2.0)
            })),
            Role::ScoutB => Some(self.scout_b_goal.map(Vec2::from).unwrap_or_else(|| {
                Vec2::new(2.0 * self.width / 3.0, self.height / 2.0)
            })),
        }
    }
}

fn seed_from_env() -> Option<u64> {
    let raw = env::var(SEED_ENV).ok()?;
    match raw.parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(_) => {
            warn!(value = %raw, "ignoring unparsable {SEED_ENV}");
            None
        }
    }
}
