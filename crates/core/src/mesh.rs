//! Triangle mesh container
//!
//! The core only reads meshes and returns new ones; it never repairs topology.
//! Faces index into `vertices`, and `normals` holds one unit normal per vertex.

use crate::core_types::{Bounds3, Vec3};
use crate::error::{Result, SurfaceError};
use std::f32::consts::TAU;

/// Indexed triangle mesh with per-vertex normals
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex positions
    pub vertices: Vec<Vec3>,
    /// Triangles as vertex index triples, counter-clockwise seen from outside
    pub faces: Vec<[u32; 3]>,
    /// Unit vertex normals, parallel to `vertices`
    pub normals: Vec<Vec3>,
}

impl Mesh {
    /// Build a mesh and compute area-weighted vertex normals
    ///
    /// Each face contributes its unnormalised cross product (twice its area)
    /// to its three corners. A vertex touched only by degenerate faces, or by
    /// none, gets a zero normal and is therefore never displaced.
    ///
    /// # Errors
    ///
    /// Returns `MeshMapping` if a face references a missing vertex.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<[u32; 3]>) -> Result<Self> {
        check_faces(vertices.len(), &faces)?;

        let mut normals = vec![Vec3::zeros(); vertices.len()];
        for face in &faces {
            let [a, b, c] = face.map(|i| i as usize);
            let n = (vertices[b] - vertices[a]).cross(&(vertices[c] - vertices[a]));
            normals[a] += n;
            normals[b] += n;
            normals[c] += n;
        }
        for n in &mut normals {
            *n = n.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros);
        }

        Ok(Self {
            vertices,
            faces,
            normals,
        })
    }

    /// Build a mesh from caller-supplied normals
    ///
    /// # Errors
    ///
    /// Returns `MeshMapping` on a normal count mismatch, a non-finite normal,
    /// or a face referencing a missing vertex.
    pub fn with_normals(vertices: Vec<Vec3>, faces: Vec<[u32; 3]>, normals: Vec<Vec3>) -> Result<Self> {
        if normals.len() != vertices.len() {
            return Err(SurfaceError::mesh_mapping(format!(
                "{} normals for {} vertices",
                normals.len(),
                vertices.len()
            )));
        }
        if let Some(i) = normals.iter().position(|n| !n.iter().all(|c| c.is_finite())) {
            return Err(SurfaceError::mesh_mapping(format!(
                "normal {i} is not finite"
            )));
        }
        check_faces(vertices.len(), &faces)?;

        Ok(Self {
            vertices,
            faces,
            normals,
        })
    }

    /// Closed or open cylinder around the z axis, from `z = 0` to `z = height`
    ///
    /// The side has `rings + 1` rings of `segments` vertices. With `capped`,
    /// each end gets a centre vertex on the axis and a triangle fan.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for fewer than 3 segments, zero rings, or a
    /// radius or height that is not finite and positive.
    pub fn cylinder(radius: f32, height: f32, segments: usize, rings: usize, capped: bool) -> Result<Self> {
        for (name, value) in [("radius", radius), ("height", height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SurfaceError::not_positive(name, value));
            }
        }
        if segments < 3 {
            return Err(SurfaceError::invalid_parameter(
                "segments",
                format!("must be at least 3, got {segments}"),
            ));
        }
        if rings == 0 {
            return Err(SurfaceError::invalid_parameter("rings", "must be at least 1"));
        }

        let mut vertices = Vec::with_capacity((rings + 1) * segments + 2);
        for ring in 0..=rings {
            let z = height * ring as f32 / rings as f32;
            for s in 0..segments {
                let angle = TAU * s as f32 / segments as f32;
                vertices.push(Vec3::new(radius * angle.cos(), radius * angle.sin(), z));
            }
        }

        let index = |ring: usize, s: usize| (ring * segments + s % segments) as u32;
        let mut faces = Vec::with_capacity(2 * rings * segments + 2 * segments);
        for ring in 0..rings {
            for s in 0..segments {
                let a = index(ring, s);
                let b = index(ring, s + 1);
                let c = index(ring + 1, s + 1);
                let d = index(ring + 1, s);
                faces.push([a, b, c]);
                faces.push([a, c, d]);
            }
        }

        if capped {
            let bottom = vertices.len() as u32;
            vertices.push(Vec3::new(0.0, 0.0, 0.0));
            let top = vertices.len() as u32;
            vertices.push(Vec3::new(0.0, 0.0, height));
            for s in 0..segments {
                faces.push([bottom, index(0, s + 1), index(0, s)]);
                faces.push([top, index(rings, s), index(rings, s + 1)]);
            }
        }

        Self::new(vertices, faces)
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Axis-aligned bounds of the vertices, `None` when empty
    pub fn bounds(&self) -> Option<Bounds3> {
        Bounds3::from_points(&self.vertices)
    }
}

fn check_faces(vertex_count: usize, faces: &[[u32; 3]]) -> Result<()> {
    for (f, face) in faces.iter().enumerate() {
        if let Some(&bad) = face.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(SurfaceError::mesh_mapping(format!(
                "face {f} references vertex {bad}, mesh has {vertex_count}"
            )));
        }
    }
    Ok(())
}
