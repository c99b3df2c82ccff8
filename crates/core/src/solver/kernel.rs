//! Gray-Scott update kernel
//!
//! The per-cell update is written once, as a pure function over the
//! [`GridView`] capability, and every backend schedules calls to it. This keeps
//! the scalar and parallel solvers arithmetically identical: they evaluate the
//! same expressions in the same order for every cell, so they can be verified
//! against each other.
//!
//! # Model
//!
//! ```text
//! ∂U/∂t = Du∇²U − UV² + F(1 − U)
//! ∂V/∂t = Dv∇²V + UV² − (F + k)V
//! ```
//!
//! Discretised with forward Euler and the 5-point Laplacian on a unit grid with
//! periodic (wraparound) boundaries. Each updated value is clamped to `[0, 1]`.

use super::fields::FieldData;

/// Reaction and diffusion coefficients for one timestep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayScottParams {
    /// Feed rate F
    pub feed: f32,
    /// Kill rate k
    pub kill: f32,
    /// Diffusion coefficient of U
    pub du: f32,
    /// Diffusion coefficient of V
    pub dv: f32,
    /// Timestep
    pub dt: f32,
}

impl GrayScottParams {
    /// Largest `dt · D` for which explicit 2D diffusion on a unit grid is stable
    pub const DIFFUSION_STABILITY_LIMIT: f32 = 0.25;

    /// Whether the diffusion part of the update stays inside the explicit
    /// stability limit. Outside it the clamp still bounds the state, but the
    /// pattern degrades into grid-scale noise.
    #[must_use]
    pub fn diffusion_is_stable(&self) -> bool {
        self.dt * self.du.max(self.dv) <= Self::DIFFUSION_STABILITY_LIMIT
    }
}

/// Read access to a 2D periodic grid
///
/// The update kernel needs only two capabilities: reading the cell itself and
/// reading a neighbour at a small offset with wraparound.
pub trait GridView {
    /// Grid dimensions as `(width, height)`
    fn dims(&self) -> (usize, usize);

    /// Value at an in-bounds cell
    fn at(&self, x: usize, y: usize) -> f32;

    /// Value at `(x + dx, y + dy)`, wrapping both axes
    fn neighbour(&self, x: usize, y: usize, dx: isize, dy: isize) -> f32;
}

impl GridView for FieldData {
    #[inline]
    fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    fn at(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    #[inline]
    fn neighbour(&self, x: usize, y: usize, dx: isize, dy: isize) -> f32 {
        self.get_wrapped(x as isize + dx, y as isize + dy)
    }
}

/// 5-point Laplacian with periodic boundaries
#[inline]
pub fn laplacian<G: GridView>(grid: &G, x: usize, y: usize) -> f32 {
    let left = grid.neighbour(x, y, -1, 0);
    let right = grid.neighbour(x, y, 1, 0);
    let up = grid.neighbour(x, y, 0, -1);
    let down = grid.neighbour(x, y, 0, 1);
    left + right + up + down - 4.0 * grid.at(x, y)
}

/// Compute the next `(U, V)` values of one cell from the previous step
///
/// Reads only the previous fields; the caller writes the result into the
/// next-step buffers.
#[inline]
pub fn update_cell<G: GridView>(
    u: &G,
    v: &G,
    x: usize,
    y: usize,
    params: &GrayScottParams,
) -> (f32, f32) {
    let u0 = u.at(x, y);
    let v0 = v.at(x, y);
    let lu = laplacian(u, x, y);
    let lv = laplacian(v, x, y);
    let reaction = u0 * v0 * v0;

    let next_u = u0 + params.dt * (params.du * lu - reaction + params.feed * (1.0 - u0));
    let next_v = v0 + params.dt * (params.dv * lv + reaction - (params.feed + params.kill) * v0);

    (next_u.clamp(0.0, 1.0), next_v.clamp(0.0, 1.0))
}

/// Update one full output row
///
/// `out_u` and `out_v` are the row `y` slices of the next-step buffers.
#[inline]
pub fn update_row<G: GridView>(
    u: &G,
    v: &G,
    y: usize,
    out_u: &mut [f32],
    out_v: &mut [f32],
    params: &GrayScottParams,
) {
    for (x, (cell_u, cell_v)) in out_u.iter_mut().zip(out_v.iter_mut()).enumerate() {
        let (next_u, next_v) = update_cell(u, v, x, y, params);
        *cell_u = next_u;
        *cell_v = next_v;
    }
}
