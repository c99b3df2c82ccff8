//! Surface texturing configuration
//!
//! `SurfaceConfig` is the flat, serde-friendly option set accepted by the
//! pipeline. Everything is checked up front by [`SurfaceConfig::validate`]
//! so no simulation work starts on a bad configuration.

use crate::error::{Result, SurfaceError};
use crate::mapping::{AxisPolicy, Taper};
use crate::simulation::SimulationConfig;
use crate::solver::{Backend, PatternPreset};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options for one texturing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Preset identifier: `spots`, `stripes`, `waves`, `holes` or `custom`
    pub pattern_type: String,
    /// Feed rate, read only for `custom`
    pub feed_rate: Option<f32>,
    /// Kill rate, read only for `custom`
    pub kill_rate: Option<f32>,
    /// Diffusion coefficient of U
    pub du: f32,
    /// Diffusion coefficient of V
    pub dv: f32,
    /// Timestep
    pub dt: f32,
    /// Field side length in cells
    pub field_resolution: usize,
    /// Timesteps to integrate
    pub simulation_steps: usize,
    /// Number of random seed patches
    pub n_seeds: usize,
    /// Largest displacement in mesh units (millimetres for printable parts)
    pub displacement_amplitude: f32,
    /// Field value that maps to zero displacement
    pub baseline: f32,
    /// Fraction of the height fading out at the top
    ///
    /// The two taper fractions must not overlap: `taper_top + taper_bottom`
    /// is at most 1, otherwise validation fails naming `taper_top`.
    pub taper_top: f32,
    /// Fraction of the height fading in at the bottom
    pub taper_bottom: f32,
    /// Seed for patch placement
    pub random_seed: u64,
    /// Solver execution strategy
    pub backend: Backend,
    /// Unwrap axis placement
    pub axis: AxisPolicy,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            pattern_type: "spots".to_string(),
            feed_rate: None,
            kill_rate: None,
            du: 0.16,
            dv: 0.08,
            dt: 1.0,
            field_resolution: 256,
            simulation_steps: 10_000,
            n_seeds: 7,
            displacement_amplitude: 8.0,
            baseline: 0.5,
            taper_top: 0.3,
            taper_bottom: 0.15,
            random_seed: 42,
            backend: Backend::Auto,
            axis: AxisPolicy::Origin,
        }
    }
}

impl SurfaceConfig {
    /// Read a configuration from a JSON file, filling absent keys with defaults
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read or parsed. The result is not
    /// validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).map_err(|e| SurfaceError::io(path, e.to_string()))?;
        serde_json::from_str(&contents)
            .map_err(|e| SurfaceError::io(path, format!("parse failed: {e}")))
    }

    /// Configuration for a custom `(feed, kill)` pair, other options copied
    #[must_use]
    pub fn with_rates(&self, feed: f32, kill: f32) -> Self {
        Self {
            pattern_type: "custom".to_string(),
            feed_rate: Some(feed),
            kill_rate: Some(kill),
            ..self.clone()
        }
    }

    /// Resolve the pattern identifier and overrides
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an unknown or incomplete pattern.
    pub fn preset(&self) -> Result<PatternPreset> {
        PatternPreset::from_name(&self.pattern_type, self.feed_rate, self.kill_rate)
    }

    /// Simulation parameters described by this configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the pattern does not resolve.
    pub fn simulation_config(&self) -> Result<SimulationConfig> {
        let (feed_rate, kill_rate) = self.preset()?.resolve()?;
        Ok(SimulationConfig {
            feed_rate,
            kill_rate,
            du: self.du,
            dv: self.dv,
            dt: self.dt,
            resolution: self.field_resolution,
            steps: self.simulation_steps,
            n_seeds: self.n_seeds,
            random_seed: self.random_seed,
        })
    }

    /// Height taper described by this configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for fractions outside `[0, 1]` or summing
    /// above 1.
    pub fn taper(&self) -> Result<Taper> {
        Taper::new(self.taper_top, self.taper_bottom)
    }

    /// Check every option
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first bad option.
    pub fn validate(&self) -> Result<()> {
        self.simulation_config()?.validate()?;

        if !(self.displacement_amplitude.is_finite() && self.displacement_amplitude >= 0.0) {
            return Err(SurfaceError::invalid_parameter(
                "displacement_amplitude",
                format!(
                    "must be finite and non-negative, got {}",
                    self.displacement_amplitude
                ),
            ));
        }

        self.taper()?;

        if !self.baseline.is_finite() {
            return Err(SurfaceError::invalid_parameter(
                "baseline",
                format!("must be finite, got {}", self.baseline),
            ));
        }

        Ok(())
    }
}
