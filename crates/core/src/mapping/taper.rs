//! Height taper fading the displacement out towards the ends of a surface

use crate::error::{Result, SurfaceError};

/// Linear fade-out near the bottom and top of the normalised height range
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Taper {
    /// Fraction of the height over which the top ramps down
    pub top: f32,
    /// Fraction of the height over which the bottom ramps up
    pub bottom: f32,
}

impl Taper {
    /// Validated taper
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either fraction is outside `[0, 1]` or
    /// the two overlap (`top + bottom > 1`).
    pub fn new(top: f32, bottom: f32) -> Result<Self> {
        for (name, value) in [("taper_top", top), ("taper_bottom", bottom)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SurfaceError::invalid_parameter(
                    name,
                    format!("must be within [0, 1], got {value}"),
                ));
            }
        }
        if top + bottom > 1.0 {
            return Err(SurfaceError::invalid_parameter(
                "taper_top",
                format!("taper_top + taper_bottom must not exceed 1, got {}", top + bottom),
            ));
        }
        Ok(Self { top, bottom })
    }

    /// Taper with both ramps disabled
    #[must_use]
    pub const fn none() -> Self {
        Self { top: 0.0, bottom: 0.0 }
    }

    /// Displacement weight in `[0, 1]` at height fraction `h`
    #[must_use]
    pub fn weight(&self, h: f32) -> f32 {
        let h = h.clamp(0.0, 1.0);
        let mut weight = 1.0_f32;
        if self.bottom > 0.0 && h < self.bottom {
            weight = weight.min(h / self.bottom);
        }
        if self.top > 0.0 && h > 1.0 - self.top {
            weight = weight.min((1.0 - h) / self.top);
        }
        weight.clamp(0.0, 1.0)
    }
}
