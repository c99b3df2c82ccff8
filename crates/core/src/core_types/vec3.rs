//! Vector type alias for 3D positions and directions.

use nalgebra::Vector3;

/// 3D vector type for positions and directions.
///
/// This is a simple alias for `nalgebra::Vector3<f32>`, used throughout
/// the crate for mesh vertex positions and vertex normals.
pub type Vec3 = Vector3<f32>;

/// Axis-aligned bounding box of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    /// Component-wise minimum corner
    pub min: Vec3,
    /// Component-wise maximum corner
    pub max: Vec3,
}

impl Bounds3 {
    /// Compute the bounds of a set of points.
    ///
    /// Returns `None` for an empty set.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            min: *first,
            max: *first,
        };
        for p in &points[1..] {
            bounds.min = bounds.min.inf(p);
            bounds.max = bounds.max.sup(p);
        }
        Some(bounds)
    }

    /// Centre of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths of the box.
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}
