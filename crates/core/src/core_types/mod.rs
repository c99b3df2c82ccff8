//! Core types and utilities

pub mod vec3;

pub use vec3::{Bounds3, Vec3};
