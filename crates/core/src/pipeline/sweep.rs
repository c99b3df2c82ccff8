//! Parameter sweeps over the Gray-Scott `(F, k)` plane

use super::config::SurfaceConfig;
use crate::error::{Result, SurfaceError};
use crate::solver::{FieldData, FieldStats};
use serde::{Deserialize, Serialize};

/// Rectangle of the `(F, k)` plane sampled on a `grid × grid` lattice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    /// Smallest feed rate
    pub feed_min: f32,
    /// Largest feed rate
    pub feed_max: f32,
    /// Smallest kill rate
    pub kill_min: f32,
    /// Largest kill rate
    pub kill_max: f32,
    /// Samples per axis
    pub grid: usize,
}

impl Default for SweepRange {
    fn default() -> Self {
        Self {
            feed_min: 0.02,
            feed_max: 0.08,
            kill_min: 0.045,
            kill_max: 0.065,
            grid: 3,
        }
    }
}

impl SweepRange {
    /// Lattice points, feed-major
    ///
    /// Both ends of each axis are included; a grid of 1 samples only the
    /// minimum corner.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero grid or an inverted or
    /// non-finite axis.
    pub fn points(&self) -> Result<Vec<(f32, f32)>> {
        if self.grid == 0 {
            return Err(SurfaceError::invalid_parameter("grid", "must be at least 1"));
        }
        for (name, lo, hi) in [
            ("feed_range", self.feed_min, self.feed_max),
            ("kill_range", self.kill_min, self.kill_max),
        ] {
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(SurfaceError::invalid_parameter(
                    name,
                    format!("expected finite min <= max, got [{lo}, {hi}]"),
                ));
            }
        }

        let feeds = linspace(self.feed_min, self.feed_max, self.grid);
        let kills = linspace(self.kill_min, self.kill_max, self.grid);
        Ok(feeds
            .iter()
            .flat_map(|&f| kills.iter().map(move |&k| (f, k)))
            .collect())
    }
}

fn linspace(lo: f32, hi: f32, n: usize) -> Vec<f32> {
    if n == 1 {
        return vec![lo];
    }
    (0..n)
        .map(|i| lo + (hi - lo) * i as f32 / (n - 1) as f32)
        .collect()
}

/// Field produced for one lattice point
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    /// Feed rate used
    pub feed: f32,
    /// Kill rate used
    pub kill: f32,
    /// Final activator field
    pub field: FieldData,
    /// Summary of `field`
    pub stats: FieldStats,
}

/// Per-point configurations for a sweep, validated as a whole
pub(super) fn sweep_configs(base: &SurfaceConfig, range: &SweepRange) -> Result<Vec<SurfaceConfig>> {
    let configs: Vec<SurfaceConfig> = range
        .points()?
        .into_iter()
        .map(|(feed, kill)| base.with_rates(feed, kill))
        .collect();

    for config in &configs {
        config.validate()?;
    }
    Ok(configs)
}
