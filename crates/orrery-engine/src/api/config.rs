use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::comet::CometTuning;
use crate::core::units::SIM_UNITS_PER_AU;
use crate::systems::format::Locale;

/// Errors raised while loading a [`SimConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Conversion factors from catalog values to scene units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneScale {
    /// Scene units per AU of catalog orbit.
    pub orbit: f64,
    /// Scene units per unit of catalog body size.
    pub planet: f64,
    /// Rendered star radius; star-centred orbits are offset by this.
    pub sun: f64,
}

impl Default for SceneScale {
    fn default() -> Self {
        Self {
            orbit: SIM_UNITS_PER_AU,
            planet: 4.0,
            sun: 25.0,
        }
    }
}

/// Configuration for the simulation, provided by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimConfig {
    /// Simulated seconds per real second (default: 1000, 0 = paused).
    pub time_multiplier: f64,
    /// Multiplier at which comets move at their authored pace (default: 1000).
    pub reference_multiplier: f64,
    /// Largest raw frame delta in seconds (default: 0.25).
    pub max_frame_dt: f64,
    /// Seed for the initial mean anomalies (default: 42).
    pub seed: u64,
    pub scale: SceneScale,
    pub comet: CometTuning,
    pub locale: Locale,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_multiplier: 1000.0,
            reference_multiplier: 1000.0,
            max_frame_dt: 0.25,
            seed: 42,
            scale: SceneScale::default(),
            comet: CometTuning::default(),
            locale: Locale::default(),
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.time_multiplier.is_finite() && self.time_multiplier >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "timeMultiplier must be finite and >= 0, got {}",
                self.time_multiplier
            )));
        }
        let positive = [
            ("referenceMultiplier", self.reference_multiplier),
            ("maxFrameDt", self.max_frame_dt),
            ("scale.orbit", self.scale.orbit),
            ("scale.planet", self.scale.planet),
            ("comet.respawnDelay", self.comet.respawn_delay),
            ("comet.pathScale", self.comet.path_scale),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{field} must be > 0, got {value}")));
            }
        }
        if !(self.scale.sun.is_finite() && self.scale.sun >= 0.0) {
            let sun = self.scale.sun;
            return Err(ConfigError::Invalid(format!("scale.sun must be >= 0, got {sun}")));
        }
        if self.comet.restart_t >= self.comet.end_t || self.comet.initial_t >= self.comet.end_t {
            return Err(ConfigError::Invalid(
                "comet start parameters must lie below comet.endT".to_string(),
            ));
        }
        Ok(())
    }
}
