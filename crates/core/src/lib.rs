//! Reaction-Diffusion Surface Texturing Core Library
//!
//! Generates organic surface textures for 3D-printable objects. A Gray-Scott
//! reaction-diffusion system is integrated on a periodic 2D field, and the
//! resulting activator pattern is wrapped around a mesh as a displacement
//! along its vertex normals.
//!
//! ## Pipeline
//!
//! - Pattern presets resolving to Gray-Scott `(F, k)` pairs
//! - Explicit-Euler simulator with scalar and rayon data-parallel backends
//! - Cylindrical unwrapping with bilinear field sampling and height taper
//! - Displacement of vertices along their normals
//! - Batch runs and `(F, k)` parameter sweeps
//!
//! ```rust
//! use rd_surface_core::{Mesh, SurfaceConfig, TexturePipeline};
//!
//! let mesh = Mesh::cylinder(20.0, 60.0, 32, 8, true).unwrap();
//! let config = SurfaceConfig {
//!     field_resolution: 32,
//!     simulation_steps: 100,
//!     ..SurfaceConfig::default()
//! };
//! let output = TexturePipeline::new(config).unwrap().run(&mesh).unwrap();
//! assert_eq!(output.mesh.faces.len(), mesh.faces.len());
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;
pub mod mesh;

// Reaction-diffusion integration
pub mod simulation;
pub mod solver;

// Mesh texturing
pub mod displacement;
pub mod mapping;
pub mod pipeline;

// Re-export core types
pub use core_types::{Bounds3, Vec3};
pub use error::{Result, SurfaceError};
pub use mesh::Mesh;

// Re-export simulation types
pub use simulation::{FieldSnapshot, GrayScottSimulator, SimulationConfig, SimulatorState};
pub use solver::{Backend, FieldData, FieldStats, PatternPreset};

// Re-export texturing types
pub use displacement::{apply_displacement, DisplacementField, DisplacementStats, VertexSample};
pub use mapping::{sample_vertices, AxisPolicy, CylindricalFrame, Taper};
pub use pipeline::{PipelineOutput, SurfaceConfig, SweepRange, SweepResult, TexturePipeline};
