//! Configuration system
//!
//! Engine tunables load from TOML or RON files through the `Config` trait.
//! Everything has sensible defaults, so a host that never touches a config
//! file still gets a working engine.

use serde::{Deserialize, Serialize};

/// Shared load/save behavior for configuration types
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a `.toml` or `.ron` file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        if !path.ends_with(".toml") && !path.ends_with(".ron") {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        }
    }

    /// Save configuration to a `.toml` or `.ron` file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Default update-order slots for the built-in system families
///
/// Lower values run earlier: decisions, then movement integration, then
/// collision resolution, then audio reaction. Hosts may remap these freely;
/// the values are a convention, not a law.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SystemOrders {
    /// AI / decision systems
    pub ai: i32,
    /// Velocity integration
    pub movement: i32,
    /// Collision detection and response
    pub physics: i32,
    /// Audio reaction systems
    pub audio: i32,
}

impl Default for SystemOrders {
    fn default() -> Self {
        Self {
            ai: 50,
            movement: 100,
            physics: 200,
            audio: 400,
        }
    }
}

/// Top-level engine tunables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Side length of a broad-phase grid cell in world units
    ///
    /// Smaller cells mean more buckets and less query fan-out; larger cells
    /// the reverse.
    pub grid_cell_size: f32,

    /// Use the spatial grid for broad-phase; brute-force all pairs when off
    pub use_spatial_grid: bool,

    /// Update-order slots for the built-in systems
    pub orders: SystemOrders,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_cell_size: 64.0,
            use_spatial_grid: true,
            orders: SystemOrders::default(),
        }
    }
}

impl Config for EngineConfig {}
