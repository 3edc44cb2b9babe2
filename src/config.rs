//! Game configuration
//!
//! Loaded from `config.ron` in the platform config directory, falling back
//! to `./config.ron` and then to built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE: &str = "config.ron";
/// Largest allowed map width or height
pub const MAX_MAP_SIDE: i32 = 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Map dimensions supplied to the level generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self { width: 80, height: 50 }
    }
}

/// Tuning for how many items get scattered and of which kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    /// Items every map gets before density is considered
    pub base_items: usize,
    /// Extra items for a map made entirely of floor
    pub density_scale: f64,
    /// Inclusive random adjustment range
    pub jitter_min: i32,
    pub jitter_max: i32,
    pub min_items: usize,
    pub max_items: usize,
    /// Placement attempts allowed per targeted item
    pub attempts_per_item: usize,
    pub weapon_chance: f64,
    pub armor_chance: f64,
    /// Share of the remaining rolls that become rings rather than talismans
    pub ring_share: f64,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            base_items: 10,
            density_scale: 30.0,
            jitter_min: -5,
            jitter_max: 4,
            min_items: 10,
            max_items: 40,
            attempts_per_item: 10,
            weapon_chance: 0.40,
            armor_chance: 0.30,
            ring_share: 0.5,
        }
    }
}

impl DistributionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_items > self.max_items {
            return Err(ConfigError::Invalid(format!(
                "min_items {} exceeds max_items {}",
                self.min_items, self.max_items
            )));
        }
        if self.jitter_min > self.jitter_max {
            return Err(ConfigError::Invalid(format!(
                "jitter_min {} exceeds jitter_max {}",
                self.jitter_min, self.jitter_max
            )));
        }
        if !(self.density_scale.is_finite() && self.density_scale >= 0.0) {
            return Err(ConfigError::Invalid(format!("density_scale {} must be finite and non-negative", self.density_scale)));
        }
        let chances = [self.weapon_chance, self.armor_chance, self.ring_share];
        if chances.iter().any(|c| !(0.0..=1.0).contains(c)) || self.weapon_chance + self.armor_chance > 1.0 {
            return Err(ConfigError::Invalid("type chances must lie in [0, 1] and sum to at most 1".into()));
        }
        Ok(())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub map: MapConfig,
    pub distribution: DistributionConfig,
    /// Fixed RNG seed for reproducible levels
    pub seed: Option<u64>,
    /// Directory holding optional data overrides such as `items.ron`
    pub data_dir: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            distribution: DistributionConfig::default(),
            seed: None,
            data_dir: PathBuf::from("assets/data"),
        }
    }
}

impl GameConfig {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        use directories::ProjectDirs;

        if let Some(proj_dirs) = ProjectDirs::from("com", "asciicrawl", "Asciicrawl") {
            let path = proj_dirs.config_dir().join(CONFIG_FILE);
            if path.exists() {
                return path;
            }
        }
        PathBuf::from(CONFIG_FILE)
    }

    /// Load the config (or defaults if missing or broken)
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            log::info!("No config file found, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("Config loaded from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load and validate a config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content)
    }

    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sides = [self.map.width, self.map.height];
        if sides.iter().any(|s| !(1..=MAX_MAP_SIDE).contains(s)) {
            return Err(ConfigError::Invalid(format!(
                "map size {}x{} must lie between 1 and {} on each side",
                self.map.width, self.map.height, MAX_MAP_SIDE
            )));
        }
        self.distribution.validate()
    }

    /// Write the config as pretty RON
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io { path: path.to_path_buf(), source };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, text).map_err(io_err)?;
        log::info!("Config saved to {:?}", path);
        Ok(())
    }
}
