//! Simulation configuration: serializable parameters for the world
//!
//! All tunables live here as plain data, serializable to RON. Loading falls
//! back to defaults when no file is present; a present-but-invalid file is
//! an error so typos do not silently vanish.

use serde::{Deserialize, Serialize};

/// Configuration loading/validation failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// World extents and determinism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Simulation area width in pixels
    pub width: f32,
    /// Simulation area height in pixels
    pub height: f32,
    /// Border margin creatures steer away from
    pub margin: f32,
    /// RNG seed; None seeds from the OS
    pub seed: Option<u64>,
}

/// Wave-field tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveConfig {
    /// Damping coefficient, strictly inside (0, 1)
    pub damping: f32,
    /// Square radius (in cells) of pointer disturbances
    pub disturbance_radius: i32,
    /// Cell edge length in pixels
    pub cell_size: usize,
}

/// Per-species population targets for backfilling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Non-user plants are respawned up to this count
    pub max_plants: usize,
    /// Non-user prey are respawned up to this count
    pub max_prey: usize,
}

/// Blight growth tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlightConfig {
    /// Probability scale for node spawning, in [0, 1]
    pub spread_probability: f32,
}

/// Complete simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub wave: WaveConfig,
    pub population: PopulationConfig,
    pub blight: BlightConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig {
                width: 700.0,
                height: 490.0,
                margin: 50.0,
                seed: None,
            },
            wave: WaveConfig {
                damping: 0.95,
                disturbance_radius: 1,
                cell_size: 7,
            },
            population: PopulationConfig {
                max_plants: 6,
                max_prey: 3,
            },
            blight: BlightConfig {
                spread_probability: 0.7,
            },
        }
    }
}

impl SimConfig {
    /// Parse from RON and validate.
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, or fall back to defaults when the path is None.
    pub fn load(path: Option<&std::path::Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                let config = Self::from_ron(&content)?;
                log::info!("loaded config from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn ensure(ok: bool, message: &str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid(message.to_string()))
            }
        }

        ensure(self.world.width > 0.0, "world width must be positive")?;
        ensure(self.world.height > 0.0, "world height must be positive")?;
        ensure(self.world.margin >= 0.0, "world margin must be non-negative")?;
        ensure(
            self.wave.damping > 0.0 && self.wave.damping < 1.0,
            "wave damping must be inside (0, 1)",
        )?;
        ensure(
            self.wave.disturbance_radius >= 0,
            "disturbance radius must be non-negative",
        )?;
        ensure(self.wave.cell_size >= 1, "cell size must be at least 1")?;
        ensure(self.population.max_plants >= 1, "max plants must be at least 1")?;
        ensure(self.population.max_prey >= 1, "max prey must be at least 1")?;
        ensure(
            (0.0..=1.0).contains(&self.blight.spread_probability),
            "spread probability must be in [0, 1]",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_ron_round_trip() {
        let config = SimConfig::default();
        let serialized = ron::to_string(&config).expect("serialize");
        let parsed = SimConfig::from_ron(&serialized).expect("parse");
        assert_eq!(parsed.population.max_plants, config.population.max_plants);
        assert_eq!(parsed.wave.cell_size, config.wave.cell_size);
    }

    #[test]
    fn test_damping_out_of_range_is_invalid() {
        let mut config = SimConfig::default();
        config.wave.damping = 1.0;
        assert!(config.validate().is_err());
        config.wave.damping = -0.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_spread_probability_out_of_range_is_invalid() {
        let mut config = SimConfig::default();
        config.blight.spread_probability = 1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_garbage_ron_is_an_error() {
        assert!(SimConfig::from_ron("(world: oops").is_err());
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        let config = SimConfig::load(None).expect("defaults");
        assert_eq!(config.population.max_prey, 3);
    }
}
