//! End-to-end texturing scenarios
//!
//! Runs the full pipeline on cylinders and checks the displacement envelope,
//! taper behaviour, axis handling, and the error surface.

mod common;

use approx::assert_relative_eq;
use common::{quick_config, vase};
use rd_surface_core::{
    Backend, FieldSnapshot, FieldStats, GrayScottSimulator, Mesh, SimulationConfig, SurfaceConfig,
    SurfaceError, SweepRange, TexturePipeline, Vec3,
};

#[test]
fn test_same_seed_same_field() {
    let config = SurfaceConfig {
        pattern_type: "spots".into(),
        field_resolution: 64,
        simulation_steps: 500,
        n_seeds: 3,
        random_seed: 42,
        backend: Backend::Scalar,
        ..SurfaceConfig::default()
    };

    let first = TexturePipeline::new(config.clone()).unwrap().generate_field().unwrap();
    let second = TexturePipeline::new(config).unwrap().generate_field().unwrap();

    assert_eq!(first.width, 64);
    assert!(first.max_abs_diff(&second) <= 1e-6);
}

#[test]
fn test_displacement_envelope_and_taper() {
    let mesh = vase();
    let config = SurfaceConfig {
        field_resolution: 64,
        simulation_steps: 500,
        displacement_amplitude: 8.0,
        taper_top: 0.3,
        taper_bottom: 0.15,
        ..quick_config(Backend::Auto)
    };
    let output = TexturePipeline::new(config).unwrap().run(&mesh).unwrap();

    for (i, (before, after)) in mesh.vertices.iter().zip(&output.mesh.vertices).enumerate() {
        let moved = (after - before).norm();
        let h = before.z / 100.0;
        assert!(moved <= 8.0 + 1e-4, "vertex {i} moved {moved}");

        if h == 0.0 {
            assert_eq!(moved, 0.0, "vertex {i} on the bottom edge moved");
        } else if h < 0.15 {
            // Weight ramps linearly to 1 at h = 0.15; |value - 0.5| <= 0.5
            let limit = 8.0 * 0.5 * (h / 0.15);
            assert!(moved <= limit + 1e-4, "vertex {i} at h={h} moved {moved} > {limit}");
        }
    }

    assert!(output.stats.max_abs() <= 8.0);
    assert!(output.stats.min_offset <= output.stats.max_offset);
}

#[test]
fn test_axis_vertex_displaces_finitely() {
    let mesh = vase();
    let axis_indices: Vec<usize> = mesh
        .vertices
        .iter()
        .enumerate()
        .filter(|(_, p)| p.x == 0.0 && p.y == 0.0)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(axis_indices.len(), 2);

    let config = SurfaceConfig {
        taper_top: 0.0,
        taper_bottom: 0.0,
        ..quick_config(Backend::Scalar)
    };
    let output = TexturePipeline::new(config).unwrap().run(&mesh).unwrap();

    for i in axis_indices {
        let p = output.mesh.vertices[i];
        assert!(p.iter().all(|c| c.is_finite()), "axis vertex {i} became {p:?}");
        // Cap normals are vertical, so the vertex stays on the axis
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
    }
}

#[test]
fn test_applying_twice_is_identical() {
    let mesh = vase();
    let mut pipeline = TexturePipeline::new(quick_config(Backend::Parallel)).unwrap();
    let a = pipeline.apply_to_mesh(&mesh).unwrap();
    let b = pipeline.apply_to_mesh(&mesh).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_bad_feed_rejected_before_simulation() {
    let config = quick_config(Backend::Scalar).with_rates(1.2, 0.06);
    match TexturePipeline::new(config) {
        Err(SurfaceError::InvalidParameter { name, .. }) => assert_eq!(name, "feed_rate"),
        other => panic!("expected InvalidParameter, got {:?}", other.err()),
    }
}

#[test]
fn test_flat_mesh_rejected() {
    let flat = Mesh::new(
        vec![
            Vec3::new(-1.0, -1.0, 3.0),
            Vec3::new(1.0, -1.0, 3.0),
            Vec3::new(0.0, 1.0, 3.0),
        ],
        vec![[0, 1, 2]],
    )
    .unwrap();

    let mut pipeline = TexturePipeline::new(quick_config(Backend::Scalar)).unwrap();
    assert!(matches!(
        pipeline.run(&flat),
        Err(SurfaceError::MeshMapping { .. })
    ));
}

#[test]
fn test_run_before_seeding_rejected() {
    let mut sim = GrayScottSimulator::new(SimulationConfig::default(), Backend::Scalar).unwrap();
    assert!(matches!(
        sim.run(1),
        Err(SurfaceError::InvalidFieldState { .. })
    ));
}

#[test]
fn test_parameter_sweep() {
    let base = SurfaceConfig {
        field_resolution: 16,
        simulation_steps: 50,
        backend: Backend::Scalar,
        ..SurfaceConfig::default()
    };
    let range = SweepRange {
        feed_min: 0.02,
        feed_max: 0.05,
        kill_min: 0.055,
        kill_max: 0.065,
        grid: 2,
    };

    let results = TexturePipeline::parameter_sweep(&base, &range).unwrap();
    assert_eq!(results.len(), 4);
    for r in &results {
        assert_eq!(r.field.width, 16);
        assert_eq!(r.stats, FieldStats::of(&r.field));
    }
    assert_eq!((results[0].feed, results[0].kill), (0.02, 0.055));
    assert_relative_eq!(results[3].feed, 0.05, epsilon = 1e-6);
    assert_relative_eq!(results[3].kill, 0.065, epsilon = 1e-6);
}

#[test]
fn test_snapshot_file_resumes_run() {
    let config = SimulationConfig {
        resolution: 24,
        ..SimulationConfig::default()
    };
    let mut sim = GrayScottSimulator::new(config, Backend::Scalar).unwrap();
    sim.initialize_random(2, 8).unwrap();
    sim.run(40).unwrap();

    let path = std::env::temp_dir().join(format!("rd_surface_it_{}.json", std::process::id()));
    sim.snapshot().unwrap().save(&path).unwrap();
    let loaded = FieldSnapshot::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let mut resumed = GrayScottSimulator::from_snapshot(&loaded, Backend::Parallel).unwrap();
    assert_eq!(resumed.run(25).unwrap(), sim.run(25).unwrap());
}
