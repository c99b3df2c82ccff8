//! Shared setup for the integration suites
#![allow(dead_code)]

use rd_surface_core::{Backend, Mesh, SurfaceConfig};
use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Small, fast configuration used where the exact pattern does not matter
pub fn quick_config(backend: Backend) -> SurfaceConfig {
    SurfaceConfig {
        field_resolution: 48,
        simulation_steps: 300,
        n_seeds: 3,
        backend,
        ..SurfaceConfig::default()
    }
}

/// Capped cylinder from z = 0 to z = 100 with a ring every 5 units
pub fn vase() -> Mesh {
    Mesh::cylinder(30.0, 100.0, 48, 20, true).expect("valid cylinder")
}
