//! Moving mesh vertices along their normals
//!
//! A vertex moves by `amplitude * weight * (value - baseline)`: cells above
//! the baseline push outwards, cells below pull inwards, and the taper weight
//! scales the result towards zero at the ends of the surface.

use crate::error::{Result, SurfaceError};
use crate::mesh::Mesh;

/// Field value and taper weight sampled at one vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexSample {
    /// Interpolated activator concentration
    pub value: f32,
    /// Taper weight in `[0, 1]`
    pub weight: f32,
}

/// Per-vertex samples, parallel to the vertices of the sampled mesh
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplacementField {
    /// One sample per vertex
    pub samples: Vec<VertexSample>,
}

impl DisplacementField {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether there are no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Signed offset along the normal for every vertex
    #[must_use]
    pub fn offsets(&self, amplitude: f32, baseline: f32) -> Vec<f32> {
        self.samples
            .iter()
            .map(|s| amplitude * s.weight * (s.value - baseline))
            .collect()
    }
}

/// Range of the signed vertex offsets of one run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplacementStats {
    /// Largest inward offset (most negative)
    pub min_offset: f32,
    /// Largest outward offset
    pub max_offset: f32,
}

impl DisplacementStats {
    /// Range of `offsets`, zero for an empty slice
    #[must_use]
    pub fn from_offsets(offsets: &[f32]) -> Self {
        if offsets.is_empty() {
            return Self {
                min_offset: 0.0,
                max_offset: 0.0,
            };
        }
        let (min_offset, max_offset) = offsets
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &o| (lo.min(o), hi.max(o)));
        Self {
            min_offset,
            max_offset,
        }
    }

    /// Largest absolute offset
    #[must_use]
    pub fn max_abs(&self) -> f32 {
        self.min_offset.abs().max(self.max_offset.abs())
    }
}

/// Displace every vertex of `mesh` along its normal
///
/// Faces and normals are copied unchanged. The function is pure, so equal
/// inputs always produce equal meshes.
///
/// # Errors
///
/// Returns `MeshMapping` if `field` does not have one sample per vertex, the
/// mesh normals do not match its vertices, or `amplitude`/`baseline` is not
/// finite.
pub fn apply_displacement(
    mesh: &Mesh,
    field: &DisplacementField,
    amplitude: f32,
    baseline: f32,
) -> Result<Mesh> {
    if field.len() != mesh.vertices.len() {
        return Err(SurfaceError::mesh_mapping(format!(
            "{} displacement samples for {} vertices",
            field.len(),
            mesh.vertices.len()
        )));
    }
    if mesh.normals.len() != mesh.vertices.len() {
        return Err(SurfaceError::mesh_mapping(format!(
            "{} normals for {} vertices",
            mesh.normals.len(),
            mesh.vertices.len()
        )));
    }
    if !amplitude.is_finite() || !baseline.is_finite() {
        return Err(SurfaceError::mesh_mapping(format!(
            "amplitude ({amplitude}) and baseline ({baseline}) must be finite"
        )));
    }

    let vertices = mesh
        .vertices
        .iter()
        .zip(&mesh.normals)
        .zip(field.offsets(amplitude, baseline))
        .map(|((p, n), offset)| p + n * offset)
        .collect();

    Ok(Mesh {
        vertices,
        faces: mesh.faces.clone(),
        normals: mesh.normals.clone(),
    })
}
