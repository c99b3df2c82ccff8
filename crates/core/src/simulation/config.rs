//! Simulation configuration
//!
//! An immutable record of every coefficient the integrator needs. The
//! simulator copies it at construction, so later edits to the caller's value
//! never reach a running simulation.

use crate::error::{Result, SurfaceError};
use crate::solver::{GrayScottParams, PatternPreset};
use serde::{Deserialize, Serialize};

/// Largest supported grid side length (a 8192² pair of f32 fields is ~1 GiB
/// including back buffers)
pub const MAX_RESOLUTION: usize = 8192;

/// Gray-Scott simulation configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Feed rate F, strictly inside (0, 1)
    pub feed_rate: f32,
    /// Kill rate k, strictly inside (0, 1)
    pub kill_rate: f32,
    /// Diffusion coefficient of U
    pub du: f32,
    /// Diffusion coefficient of V
    pub dv: f32,
    /// Timestep
    pub dt: f32,
    /// Grid side length in cells
    pub resolution: usize,
    /// Number of timesteps a pipeline run performs
    pub steps: usize,
    /// Number of seed patches placed by random initialisation
    pub n_seeds: usize,
    /// Seed for patch placement
    pub random_seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            feed_rate: 0.055,
            kill_rate: 0.062,
            du: 0.16,
            dv: 0.08,
            dt: 1.0,
            resolution: 256,
            steps: 10_000,
            n_seeds: 5,
            random_seed: 42,
        }
    }
}

impl SimulationConfig {
    /// Default configuration with the feed and kill rates of `preset`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the preset does not resolve.
    pub fn from_preset(preset: PatternPreset) -> Result<Self> {
        let (feed_rate, kill_rate) = preset.resolve()?;
        Ok(Self {
            feed_rate,
            kill_rate,
            ..Self::default()
        })
    }

    /// Check every invariant of the record
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first violated constraint:
    /// feed/kill outside (0, 1), non-positive or non-finite `du`/`dv`/`dt`,
    /// resolution outside `1..=MAX_RESOLUTION`, or zero steps.
    pub fn validate(&self) -> Result<()> {
        PatternPreset::Custom {
            feed: self.feed_rate,
            kill: self.kill_rate,
        }
        .resolve()?;

        for (name, value) in [("du", self.du), ("dv", self.dv), ("dt", self.dt)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SurfaceError::not_positive(name, value));
            }
        }

        if self.resolution == 0 || self.resolution > MAX_RESOLUTION {
            return Err(SurfaceError::invalid_parameter(
                "resolution",
                format!(
                    "must be between 1 and {MAX_RESOLUTION}, got {}",
                    self.resolution
                ),
            ));
        }

        if self.steps == 0 {
            return Err(SurfaceError::invalid_parameter(
                "steps",
                "must be at least 1",
            ));
        }

        Ok(())
    }

    /// Per-step coefficients for the update kernel
    #[must_use]
    pub fn params(&self) -> GrayScottParams {
        GrayScottParams {
            feed: self.feed_rate,
            kill: self.kill_rate,
            du: self.du,
            dv: self.dv,
            dt: self.dt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        config.validate().unwrap();
        assert!(config.params().diffusion_is_stable());
    }

    #[test]
    fn test_from_preset() {
        let config = SimulationConfig::from_preset(PatternPreset::Waves).unwrap();
        assert_eq!(config.feed_rate, 0.014);
        assert_eq!(config.kill_rate, 0.054);
        assert_eq!(config.du, 0.16);
    }

    #[test]
    fn test_validate_rejects_each_bad_field() {
        let base = SimulationConfig::default();
        let cases = [
            ("feed_rate", SimulationConfig { feed_rate: 0.0, ..base }),
            ("kill_rate", SimulationConfig { kill_rate: 1.5, ..base }),
            ("du", SimulationConfig { du: -0.1, ..base }),
            ("dv", SimulationConfig { dv: f32::NAN, ..base }),
            ("dt", SimulationConfig { dt: 0.0, ..base }),
            ("resolution", SimulationConfig { resolution: 0, ..base }),
            ("resolution", SimulationConfig { resolution: MAX_RESOLUTION + 1, ..base }),
            ("steps", SimulationConfig { steps: 0, ..base }),
        ];

        for (expected, config) in cases {
            match config.validate() {
                Err(SurfaceError::InvalidParameter { name, .. }) => {
                    assert_eq!(name, expected, "wrong parameter reported");
                }
                other => panic!("{expected}: expected InvalidParameter, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"resolution": 64, "random_seed": 7}"#).unwrap();
        assert_eq!(config.resolution, 64);
        assert_eq!(config.random_seed, 7);
        assert_eq!(config.feed_rate, 0.055);
    }
}
