//! Field sampling on mesh vertices
//!
//! Each vertex is unwrapped into cylindrical `(theta, h)` coordinates, the
//! activator field is interpolated there, and the taper weight for its height
//! is recorded alongside the value.

pub mod cylindrical;
pub mod taper;

pub use cylindrical::{sample_bilinear, AxisPolicy, CylindricalFrame};
pub use taper::Taper;

use crate::displacement::{DisplacementField, VertexSample};
use crate::mesh::Mesh;
use crate::solver::FieldData;
use rayon::prelude::*;

/// Sample `field` and the taper at every vertex of `mesh`
#[must_use]
pub fn sample_vertices(
    mesh: &Mesh,
    field: &FieldData,
    frame: &CylindricalFrame,
    taper: &Taper,
) -> DisplacementField {
    let samples = mesh
        .vertices
        .par_iter()
        .map(|p| {
            let (theta, h) = frame.unwrap(p);
            VertexSample {
                value: sample_bilinear(field, theta, h),
                weight: taper.weight(h),
            }
        })
        .collect();

    DisplacementField { samples }
}
