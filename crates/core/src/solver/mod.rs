//! Reaction-diffusion solver module
//!
//! This module provides an execution-strategy abstraction for the Gray-Scott
//! integrator. The core abstraction is the `ReactionDiffusionSolver` trait, with
//! a single-threaded and a Rayon data-parallel implementation sharing one
//! per-cell kernel.
//!
//! # Backend Selection
//!
//! [`create_solver`] honours an explicit [`Backend`] or, for `Backend::Auto`,
//! picks the parallel solver on multi-core machines for grids of at least
//! [`Backend::PARALLEL_MIN_ROWS`] rows.
//!
//! # Example
//!
//! ```rust
//! use rd_surface_core::solver::{create_solver, Backend, GrayScottParams};
//!
//! let mut solver = create_solver(Backend::Scalar, 64);
//! let params = GrayScottParams { feed: 0.055, kill: 0.062, du: 0.16, dv: 0.08, dt: 1.0 };
//! solver.step(&params);
//! assert_eq!(solver.dimensions(), (64, 64));
//! ```

mod backend;
mod cpu;
mod fields;
pub mod kernel;
mod parallel;
pub mod preset;
pub mod profiler;
#[allow(clippy::module_name_repetitions)]
mod r#trait;

// Re-exports
pub use backend::Backend;
pub use cpu::ScalarSolver;
pub use fields::{FieldData, FieldPair, FieldStats};
pub use kernel::{GrayScottParams, GridView};
pub use parallel::ParallelSolver;
pub use preset::PatternPreset;
pub use profiler::ProfilerScope;
pub use r#trait::ReactionDiffusionSolver;

use tracing::info;

/// Create a solver with the requested execution strategy
///
/// # Arguments
///
/// * `backend` - Requested strategy (`Auto` is resolved here)
/// * `resolution` - Grid side length in cells
///
/// # Returns
///
/// A boxed `ReactionDiffusionSolver` at the quiescent equilibrium
pub fn create_solver(backend: Backend, resolution: usize) -> Box<dyn ReactionDiffusionSolver> {
    match backend.resolve(resolution) {
        Backend::Parallel => {
            info!(
                "Using parallel backend ({} threads, {}x{} grid)",
                rayon::current_num_threads(),
                resolution,
                resolution
            );
            Box::new(ParallelSolver::new(resolution))
        }
        // `resolve` never returns Auto
        Backend::Scalar | Backend::Auto => {
            info!("Using scalar backend ({}x{} grid)", resolution, resolution);
            Box::new(ScalarSolver::new(resolution))
        }
    }
}
