//! Solver trait definition
//!
//! This module defines the `ReactionDiffusionSolver` trait, which provides a
//! backend-agnostic interface for advancing the two Gray-Scott fields. Both the
//! scalar and the parallel implementations implement this trait and must agree
//! within a small absolute tolerance for identical inputs.

use super::backend::Backend;
use super::fields::FieldData;
use super::kernel::GrayScottParams;
use crate::error::Result;
use std::borrow::Cow;

/// Backend-agnostic interface for Gray-Scott reaction-diffusion
///
/// Implementations own a double-buffered pair of `U`/`V` fields. A step reads
/// only the previous fields and writes only the next fields, then swaps.
pub trait ReactionDiffusionSolver: Send + Sync {
    /// Advance both fields by one explicit timestep
    ///
    /// # Arguments
    ///
    /// * `params` - Reaction and diffusion coefficients for the step
    fn step(&mut self, params: &GrayScottParams);

    /// Read the `U` (substrate) field in row-major order
    fn read_u(&self) -> Cow<'_, [f32]>;

    /// Read the `V` (activator) field in row-major order
    fn read_v(&self) -> Cow<'_, [f32]>;

    /// Overwrite both fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidFieldState` if either field does not match the solver's
    /// grid dimensions.
    fn load_state(&mut self, u: &FieldData, v: &FieldData) -> Result<()>;

    /// Grid dimensions as `(width, height)` in cells
    fn dimensions(&self) -> (usize, usize);

    /// Which execution strategy this solver uses
    fn backend(&self) -> Backend;
}
