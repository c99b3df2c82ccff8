//! Field data structures shared by all solver backends
//!
//! A field is a dense 2D grid of concentrations stored row-major. Rows run
//! along the height axis of the textured surface, columns along its angular
//! axis, so the column index is periodic once the field is wrapped onto a
//! cylinder.

use crate::error::{Result, SurfaceError};
use serde::{Deserialize, Serialize};

/// Field data container
///
/// Stores 2D field data as a flat `Vec<f32>` in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldData {
    /// Field values in row-major order (y * width + x)
    pub data: Vec<f32>,
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
}

impl FieldData {
    /// Create a new field with given dimensions, initialized to zero
    ///
    /// # Arguments
    ///
    /// * `width` - Grid width in cells
    /// * `height` - Grid height in cells
    ///
    /// # Returns
    ///
    /// New field initialized to all zeros
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0.0; width * height],
            width,
            height,
        }
    }

    /// Create a new field with given dimensions, initialized to a value
    ///
    /// # Arguments
    ///
    /// * `width` - Grid width in cells
    /// * `height` - Grid height in cells
    /// * `value` - Initial value for all cells
    ///
    /// # Returns
    ///
    /// New field initialized to the specified value
    #[must_use]
    pub fn with_value(width: usize, height: usize, value: f32) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Wrap an existing row-major buffer
    ///
    /// # Errors
    ///
    /// Returns `InvalidFieldState` if `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != width * height {
            return Err(SurfaceError::invalid_state(format!(
                "buffer of {} values cannot form a {width}x{height} field",
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Number of cells in the field
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the field has no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether two fields have the same dimensions
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Get value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x]
    }

    /// Get value at a signed position, wrapping both axes periodically
    #[must_use]
    #[inline]
    pub fn get_wrapped(&self, x: isize, y: isize) -> f32 {
        let wx = x.rem_euclid(self.width as isize) as usize;
        let wy = y.rem_euclid(self.height as isize) as usize;
        self.data[wy * self.width + wx]
    }

    /// Set value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x] = value;
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Largest absolute per-cell difference between two equally shaped fields
    ///
    /// Returns `f32::INFINITY` when the shapes differ.
    #[must_use]
    pub fn max_abs_diff(&self, other: &Self) -> f32 {
        if !self.same_shape(other) {
            return f32::INFINITY;
        }
        self.data
            .iter()
            .zip(&other.data)
            .fold(0.0_f32, |acc, (a, b)| acc.max((a - b).abs()))
    }
}

/// Double-buffered `U`/`V` field pair
///
/// Each step reads the front buffers and writes the back buffers, then swaps
/// them, so no cell update can observe another cell's value from the same step.
#[derive(Debug, Clone)]
pub struct FieldPair {
    u: FieldData,
    v: FieldData,
    u_back: FieldData,
    v_back: FieldData,
}

impl FieldPair {
    /// Allocate a square pair at the quiescent equilibrium `U = 1`, `V = 0`
    #[must_use]
    pub fn equilibrium(resolution: usize) -> Self {
        Self {
            u: FieldData::with_value(resolution, resolution, 1.0),
            v: FieldData::new(resolution, resolution),
            u_back: FieldData::new(resolution, resolution),
            v_back: FieldData::new(resolution, resolution),
        }
    }

    /// Current `U` field
    #[must_use]
    pub fn u(&self) -> &FieldData {
        &self.u
    }

    /// Current `V` field
    #[must_use]
    pub fn v(&self) -> &FieldData {
        &self.v
    }

    /// Grid dimensions as `(width, height)`
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.u.width, self.u.height)
    }

    /// Split into read-only front buffers and writable back buffers
    pub fn split(&mut self) -> (&FieldData, &FieldData, &mut [f32], &mut [f32]) {
        (
            &self.u,
            &self.v,
            self.u_back.as_mut_slice(),
            self.v_back.as_mut_slice(),
        )
    }

    /// Make the freshly written back buffers current
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.u, &mut self.u_back);
        std::mem::swap(&mut self.v, &mut self.v_back);
    }

    /// Replace the current fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidFieldState` if either field's shape differs from the pair's.
    pub fn load(&mut self, u: &FieldData, v: &FieldData) -> Result<()> {
        if !u.same_shape(&self.u) || !v.same_shape(&self.v) {
            let (width, height) = self.dimensions();
            return Err(SurfaceError::invalid_state(format!(
                "expected {width}x{height} fields, got U {}x{} and V {}x{}",
                u.width, u.height, v.width, v.height
            )));
        }
        self.u.as_mut_slice().copy_from_slice(u.as_slice());
        self.v.as_mut_slice().copy_from_slice(v.as_slice());
        Ok(())
    }
}

/// Summary statistics of a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    /// Smallest cell value
    pub min: f32,
    /// Largest cell value
    pub max: f32,
    /// Mean cell value
    pub mean: f32,
}

impl FieldStats {
    /// Spread below which a field counts as uniform
    pub const DEGENERATE_RANGE: f32 = 1e-6;

    /// Compute statistics over every cell of `field`
    #[must_use]
    pub fn of(field: &FieldData) -> Self {
        if field.is_empty() {
            return Self {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
            };
        }
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0_f64;
        for &value in field.as_slice() {
            min = min.min(value);
            max = max.max(value);
            sum += f64::from(value);
        }
        Self {
            min,
            max,
            mean: (sum / field.len() as f64) as f32,
        }
    }

    /// Whether the pattern collapsed to a uniform field (all-zero, all-one, ...)
    ///
    /// A degenerate field is a valid result, not a failure; it simply carries
    /// no texture.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.max - self.min < Self::DEGENERATE_RANGE
    }
}
