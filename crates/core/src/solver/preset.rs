//! Pattern presets for the Gray-Scott model
//!
//! Each named preset is a `(F, k)` pair taken from a known region of the
//! Gray-Scott parameter map. `Custom` carries caller-supplied values that
//! override the table.

use crate::error::{Result, SurfaceError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pattern preset selecting the feed and kill rates
///
/// The named variants sit inside stable pattern-forming regions of the
/// Gray-Scott bifurcation map. `Holes` is the mirror image of `Spots`: the
/// activator forms a connected sheet perforated by gaps.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternPreset {
    /// Isolated self-replicating spots: F = 0.055, k = 0.062
    #[default]
    Spots,
    /// Labyrinthine stripes: F = 0.035, k = 0.060
    Stripes,
    /// Travelling waves and spirals: F = 0.014, k = 0.054
    Waves,
    /// Negative spots (perforated sheet): F = 0.039, k = 0.058
    Holes,
    /// Caller-supplied feed and kill rates
    Custom {
        /// Feed rate F
        feed: f32,
        /// Kill rate k
        kill: f32,
    },
}

impl PatternPreset {
    /// Every named (non-custom) preset
    pub const ALL_NAMED: [Self; 4] = [Self::Spots, Self::Stripes, Self::Waves, Self::Holes];

    /// Identifier used in configuration files and on the command line
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Spots => "spots",
            Self::Stripes => "stripes",
            Self::Waves => "waves",
            Self::Holes => "holes",
            Self::Custom { .. } => "custom",
        }
    }

    /// Literal `(F, k)` pair before validation
    const fn raw_rates(&self) -> (f32, f32) {
        match self {
            Self::Spots => (0.055, 0.062),
            Self::Stripes => (0.035, 0.060),
            Self::Waves => (0.014, 0.054),
            Self::Holes => (0.039, 0.058),
            Self::Custom { feed, kill } => (*feed, *kill),
        }
    }

    /// Resolve the preset to a validated `(feed, kill)` pair
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either rate is not finite or lies outside
    /// the open interval `(0, 1)`. Only `Custom` can fail.
    pub fn resolve(&self) -> Result<(f32, f32)> {
        let (feed, kill) = self.raw_rates();
        check_rate("feed_rate", feed)?;
        check_rate("kill_rate", kill)?;
        Ok((feed, kill))
    }

    /// Build a preset from its identifier and optional rate overrides
    ///
    /// The overrides are only consulted for `custom`, where both are required.
    /// For named presets they are ignored, matching the configuration surface
    /// where `feed_rate`/`kill_rate` apply to custom patterns only.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an unknown identifier, for `custom`
    /// without both overrides, or for out-of-range custom rates.
    pub fn from_name(name: &str, feed: Option<f32>, kill: Option<f32>) -> Result<Self> {
        let preset = match name.trim().to_ascii_lowercase().as_str() {
            "spots" => Self::Spots,
            "stripes" => Self::Stripes,
            "waves" => Self::Waves,
            "holes" => Self::Holes,
            "custom" => match (feed, kill) {
                (Some(feed), Some(kill)) => Self::Custom { feed, kill },
                _ => {
                    return Err(SurfaceError::invalid_parameter(
                        "pattern_type",
                        "custom pattern requires both feed_rate and kill_rate",
                    ))
                }
            },
            other => {
                return Err(SurfaceError::invalid_parameter(
                    "pattern_type",
                    format!(
                        "unknown pattern '{other}' (expected spots, stripes, waves, holes or custom)"
                    ),
                ))
            }
        };
        preset.resolve()?;
        Ok(preset)
    }
}

impl fmt::Display for PatternPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom { feed, kill } => write!(f, "custom(F={feed}, k={kill})"),
            named => f.write_str(named.name()),
        }
    }
}

impl FromStr for PatternPreset {
    type Err = SurfaceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s, None, None)
    }
}

fn check_rate(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(SurfaceError::out_of_unit_interval(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_presets_lie_inside_unit_square() {
        for preset in PatternPreset::ALL_NAMED {
            let (feed, kill) = preset.resolve().unwrap();
            assert!(feed > 0.0 && feed < 1.0, "{preset}: F = {feed}");
            assert!(kill > 0.0 && kill < 1.0, "{preset}: k = {kill}");
        }
    }

    #[test]
    fn test_preset_literals() {
        assert_eq!(PatternPreset::Spots.resolve().unwrap(), (0.055, 0.062));
        assert_eq!(PatternPreset::Stripes.resolve().unwrap(), (0.035, 0.060));
        assert_eq!(PatternPreset::Waves.resolve().unwrap(), (0.014, 0.054));
        assert_eq!(PatternPreset::Holes.resolve().unwrap(), (0.039, 0.058));
    }

    #[test]
    fn test_presets_are_distinct() {
        let rates: Vec<_> = PatternPreset::ALL_NAMED
            .iter()
            .map(|p| p.resolve().unwrap())
            .collect();
        for i in 0..rates.len() {
            for j in (i + 1)..rates.len() {
                assert_ne!(rates[i], rates[j]);
            }
        }
    }

    #[test]
    fn test_custom_passes_through() {
        let preset = PatternPreset::Custom {
            feed: 0.03,
            kill: 0.06,
        };
        assert_eq!(preset.resolve().unwrap(), (0.03, 0.06));
    }

    #[test]
    fn test_custom_out_of_range_rejected() {
        for (feed, kill) in [(0.0, 0.06), (0.03, 1.0), (-0.1, 0.06), (f32::NAN, 0.06)] {
            let err = PatternPreset::Custom { feed, kill }.resolve().unwrap_err();
            assert!(matches!(err, SurfaceError::InvalidParameter { .. }));
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            PatternPreset::from_name("Stripes", None, None).unwrap(),
            PatternPreset::Stripes
        );
        // Overrides are ignored for named presets
        assert_eq!(
            PatternPreset::from_name("waves", Some(0.5), Some(0.5)).unwrap(),
            PatternPreset::Waves
        );
        assert_eq!(
            PatternPreset::from_name("custom", Some(0.03), Some(0.06)).unwrap(),
            PatternPreset::Custom {
                feed: 0.03,
                kill: 0.06
            }
        );
    }

    #[test]
    fn test_unknown_or_incomplete_name_rejected() {
        assert!(matches!(
            "zebra".parse::<PatternPreset>(),
            Err(SurfaceError::InvalidParameter { .. })
        ));
        assert!(PatternPreset::from_name("custom", Some(0.03), None).is_err());
        assert!(PatternPreset::from_name("custom", Some(1.2), Some(0.06)).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(PatternPreset::Holes.to_string(), "holes");
        assert_eq!(
            PatternPreset::Custom {
                feed: 0.03,
                kill: 0.06
            }
            .to_string(),
            "custom(F=0.03, k=0.06)"
        );
    }
}
