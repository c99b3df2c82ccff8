//! Cylindrical unwrapping of mesh vertices onto the field grid
//!
//! Angle around a vertical axis maps to the field's periodic column axis and
//! normalised height maps to its row axis.

use crate::core_types::Vec3;
use crate::error::{Result, SurfaceError};
use crate::mesh::Mesh;
use crate::solver::FieldData;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

/// Radial distance below which a point counts as lying on the axis
pub const AXIS_EPSILON: f32 = 1e-9;
/// Smallest accepted vertical extent of a mesh
pub const MIN_HEIGHT_RANGE: f32 = 1e-9;

/// Where the vertical unwrap axis passes through the xy plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisPolicy {
    /// World z axis through `(0, 0)`
    #[default]
    Origin,
    /// Vertical line through the xy centre of the mesh bounding box
    BoundsCenter,
}

impl AxisPolicy {
    /// Identifier used in configuration files and on the command line
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::BoundsCenter => "bounds_center",
        }
    }
}

impl fmt::Display for AxisPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AxisPolicy {
    type Err = SurfaceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "origin" => Ok(Self::Origin),
            "bounds_center" | "bounds-center" | "bounds" => Ok(Self::BoundsCenter),
            other => Err(SurfaceError::invalid_parameter(
                "axis",
                format!("unknown axis policy '{other}' (expected origin or bounds_center)"),
            )),
        }
    }
}

/// Vertical cylinder used to unwrap a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylindricalFrame {
    /// Axis position in the xy plane
    pub center: (f32, f32),
    /// Lowest vertex height
    pub z_min: f32,
    /// Highest vertex height
    pub z_max: f32,
}

impl CylindricalFrame {
    /// Fit a frame to the vertical extent of `mesh`
    ///
    /// # Errors
    ///
    /// Returns `MeshMapping` for an empty mesh, a non-finite vertex, or a
    /// height range not above [`MIN_HEIGHT_RANGE`].
    pub fn from_mesh(mesh: &Mesh, axis: AxisPolicy) -> Result<Self> {
        if let Some(i) = mesh
            .vertices
            .iter()
            .position(|p| !p.iter().all(|c| c.is_finite()))
        {
            return Err(SurfaceError::mesh_mapping(format!(
                "vertex {i} is not finite"
            )));
        }

        let bounds = mesh
            .bounds()
            .ok_or_else(|| SurfaceError::mesh_mapping("mesh has no vertices"))?;

        let range = bounds.max.z - bounds.min.z;
        if range.is_nan() || range <= MIN_HEIGHT_RANGE {
            return Err(SurfaceError::mesh_mapping(format!(
                "mesh height range {range} is too small to unwrap"
            )));
        }

        let center = match axis {
            AxisPolicy::Origin => (0.0, 0.0),
            AxisPolicy::BoundsCenter => {
                let c = bounds.center();
                (c.x, c.y)
            }
        };

        Ok(Self {
            center,
            z_min: bounds.min.z,
            z_max: bounds.max.z,
        })
    }

    /// Cylindrical coordinates `(theta, h)` of `p`, both normalised
    ///
    /// `theta` is the angle around the axis as a fraction of a turn in
    /// `[0, 1)`; points on the axis get `theta = 0`. `h` is the height
    /// fraction clamped to `[0, 1]`.
    #[must_use]
    pub fn unwrap(&self, p: &Vec3) -> (f32, f32) {
        let dx = p.x - self.center.0;
        let dy = p.y - self.center.1;

        let theta = if dx.hypot(dy) < AXIS_EPSILON {
            0.0
        } else {
            let t = dy.atan2(dx) / TAU;
            let t = if t < 0.0 { t + 1.0 } else { t };
            // -tiny + 1 rounds up to exactly 1
            if t >= 1.0 {
                0.0
            } else {
                t
            }
        };

        let h = ((p.z - self.z_min) / (self.z_max - self.z_min)).clamp(0.0, 1.0);
        (theta, h)
    }
}

/// Bilinearly interpolate `field` at normalised `(theta, h)`
///
/// The column axis is periodic: `theta` wraps, so column `width - 1` blends
/// with column 0 and `theta = 1` samples exactly like `theta = 0`. The row
/// axis is clamped, `h = 0` hitting row 0 and `h = 1` the last row.
#[must_use]
pub fn sample_bilinear(field: &FieldData, theta: f32, h: f32) -> f32 {
    let (width, height) = (field.width, field.height);
    if width == 0 || height == 0 {
        return 0.0;
    }

    let gx = theta.rem_euclid(1.0) * width as f32;
    let x0f = gx.floor();
    let fx = gx - x0f;
    let x0 = (x0f as usize) % width;
    let x1 = (x0 + 1) % width;

    let gy = h.clamp(0.0, 1.0) * (height - 1) as f32;
    let y0f = gy.floor();
    let fy = gy - y0f;
    let y0 = (y0f as usize).min(height - 1);
    let y1 = (y0 + 1).min(height - 1);

    let top = field.get(x0, y0) * (1.0 - fx) + field.get(x1, y0) * fx;
    let bottom = field.get(x0, y1) * (1.0 - fx) + field.get(x1, y1) * fx;
    top * (1.0 - fy) + bottom * fy
}
