//! Single-threaded solver implementation
//!
//! This module provides the scalar implementation of the
//! `ReactionDiffusionSolver` trait. It sweeps the grid row by row on the calling
//! thread and is the reference the parallel backend is checked against.

use super::backend::Backend;
use super::fields::{FieldData, FieldPair};
use super::kernel::{update_row, GrayScottParams};
use super::ReactionDiffusionSolver;
use crate::error::Result;
use std::borrow::Cow;

/// Single-threaded Gray-Scott solver
pub struct ScalarSolver {
    // Ping-pong buffers (read from front, write to back, then swap)
    fields: FieldPair,
}

impl ScalarSolver {
    /// Create a new scalar solver on a `resolution × resolution` grid
    ///
    /// Fields start at the quiescent equilibrium `U = 1`, `V = 0`.
    #[must_use]
    pub fn new(resolution: usize) -> Self {
        Self {
            fields: FieldPair::equilibrium(resolution),
        }
    }
}

impl ReactionDiffusionSolver for ScalarSolver {
    fn step(&mut self, params: &GrayScottParams) {
        let (width, _) = self.fields.dimensions();
        if width == 0 {
            return;
        }

        let (u, v, u_out, v_out) = self.fields.split();
        for (y, (row_u, row_v)) in u_out
            .chunks_mut(width)
            .zip(v_out.chunks_mut(width))
            .enumerate()
        {
            update_row(u, v, y, row_u, row_v, params);
        }

        // Swap buffers
        self.fields.swap();
    }

    fn read_u(&self) -> Cow<'_, [f32]> {
        Cow::Borrowed(self.fields.u().as_slice())
    }

    fn read_v(&self) -> Cow<'_, [f32]> {
        Cow::Borrowed(self.fields.v().as_slice())
    }

    fn load_state(&mut self, u: &FieldData, v: &FieldData) -> Result<()> {
        self.fields.load(u, v)
    }

    fn dimensions(&self) -> (usize, usize) {
        self.fields.dimensions()
    }

    fn backend(&self) -> Backend {
        Backend::Scalar
    }
}
