//! Gray-Scott simulation driver
//!
//! `GrayScottSimulator` owns a solver backend and walks it through its
//! lifecycle:
//! - allocation at the quiescent equilibrium (`U = 1`, `V = 0`)
//! - seeding, either with random circular patches or caller fields
//! - resumable integration for a fixed number of steps
//!
//! The simulator never stops early; a run is bounded only by its step count.

pub mod config;
pub mod persistence;

pub use config::{SimulationConfig, MAX_RESOLUTION};
pub use persistence::FieldSnapshot;

use crate::error::{Result, SurfaceError};
use crate::solver::{
    create_solver, Backend, FieldData, FieldStats, GrayScottParams, ProfilerScope,
    ReactionDiffusionSolver,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

/// Substrate concentration inside a seed patch
const SEED_U: f32 = 0.5;
/// Activator concentration inside a seed patch
const SEED_V: f32 = 0.25;
/// Smallest seed patch radius in cells
const MIN_SEED_RADIUS: usize = 2;

/// Lifecycle of a simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorState {
    /// Fields allocated at equilibrium, not yet seeded
    Uninitialised,
    /// Seeded and ready to integrate
    Seeded,
    /// Integration in progress
    Running,
    /// The last requested run completed
    Converged,
}

/// Explicit-Euler Gray-Scott integrator on a periodic square grid
pub struct GrayScottSimulator {
    config: SimulationConfig,
    params: GrayScottParams,
    solver: Box<dyn ReactionDiffusionSolver>,
    state: SimulatorState,
    steps_taken: usize,
}

impl GrayScottSimulator {
    /// Create a simulator at the quiescent equilibrium
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `config` fails validation.
    pub fn new(config: SimulationConfig, backend: Backend) -> Result<Self> {
        config.validate()?;

        let params = config.params();
        if !params.diffusion_is_stable() {
            warn!(
                dt = params.dt,
                du = params.du,
                dv = params.dv,
                "dt * max(du, dv) exceeds {}, explicit diffusion may oscillate",
                GrayScottParams::DIFFUSION_STABILITY_LIMIT
            );
        }

        Ok(Self {
            config,
            params,
            solver: create_solver(backend, config.resolution),
            state: SimulatorState::Uninitialised,
            steps_taken: 0,
        })
    }

    /// Rebuild a simulator from a saved snapshot
    ///
    /// The result is `Seeded` with the snapshot's step count, so a following
    /// `run` continues the original integration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an invalid stored configuration and
    /// `InvalidFieldState` if the stored fields do not fit it.
    pub fn from_snapshot(snapshot: &FieldSnapshot, backend: Backend) -> Result<Self> {
        let mut sim = Self::new(snapshot.config, backend)?;
        sim.initialize_custom(&snapshot.u, &snapshot.v)?;
        sim.steps_taken = snapshot.steps_taken;
        Ok(sim)
    }

    /// Capture the current fields for [`FieldSnapshot::save`]
    ///
    /// # Errors
    ///
    /// Returns `InvalidFieldState` if the backend reports a malformed buffer.
    pub fn snapshot(&self) -> Result<FieldSnapshot> {
        Ok(FieldSnapshot {
            config: self.config,
            steps_taken: self.steps_taken,
            u: self.read_u()?,
            v: self.read_v()?,
        })
    }

    /// Seed `n_seeds` circular patches at positions drawn from `seed`
    ///
    /// Centres are uniform in the middle half of the grid on each axis (the
    /// whole grid below 4 cells). Every cell whose periodic distance to a
    /// centre is below `max(2, resolution / 20)` is set to `U = 0.5`,
    /// `V = 0.25`. Any earlier state is discarded first.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFieldState` if the backend rejects the seeded fields.
    pub fn initialize_random(&mut self, n_seeds: usize, seed: u64) -> Result<()> {
        let (u, v) = seeded_fields(self.config.resolution, n_seeds, seed);
        self.solver.load_state(&u, &v)?;
        self.state = SimulatorState::Seeded;
        self.steps_taken = 0;

        info!(
            n_seeds,
            seed,
            resolution = self.config.resolution,
            "Seeded Gray-Scott fields"
        );
        Ok(())
    }

    /// Load caller-supplied fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidFieldState` if either field does not match the grid or
    /// holds a non-finite value.
    pub fn initialize_custom(&mut self, u: &FieldData, v: &FieldData) -> Result<()> {
        let (width, height) = self.solver.dimensions();
        for (name, field) in [("u", u), ("v", v)] {
            if field.width != width || field.height != height {
                return Err(SurfaceError::invalid_state(format!(
                    "field {name} is {}x{}, expected {width}x{height}",
                    field.width, field.height
                )));
            }
            if let Some(index) = field.as_slice().iter().position(|c| !c.is_finite()) {
                return Err(SurfaceError::invalid_state(format!(
                    "field {name} holds a non-finite value at index {index}"
                )));
            }
        }

        self.solver.load_state(u, v)?;
        self.state = SimulatorState::Seeded;
        self.steps_taken = 0;
        debug!(width, height, "Loaded custom Gray-Scott fields");
        Ok(())
    }

    /// Advance the fields by one timestep
    ///
    /// # Errors
    ///
    /// Returns `InvalidFieldState` before the simulator is seeded.
    pub fn step(&mut self) -> Result<()> {
        self.ensure_seeded()?;
        self.solver.step(&self.params);
        self.steps_taken += 1;
        self.state = SimulatorState::Running;
        Ok(())
    }

    /// Integrate `steps` timesteps and return the final activator field
    ///
    /// Runs are resumable: `run(a)` followed by `run(b)` yields the same field
    /// as a single `run(a + b)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFieldState` before the simulator is seeded.
    pub fn run(&mut self, steps: usize) -> Result<FieldData> {
        self.integrate(steps, None, |_, _| {})
    }

    /// Like [`run`](Self::run), calling `callback(steps_taken, &v)` every
    /// `interval` steps
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero interval and `InvalidFieldState`
    /// before the simulator is seeded.
    pub fn run_with_callback<F>(
        &mut self,
        steps: usize,
        interval: usize,
        callback: F,
    ) -> Result<FieldData>
    where
        F: FnMut(usize, &FieldData),
    {
        if interval == 0 {
            return Err(SurfaceError::invalid_parameter(
                "interval",
                "callback interval must be at least 1",
            ));
        }
        self.integrate(steps, Some(interval), callback)
    }

    fn integrate<F>(&mut self, steps: usize, interval: Option<usize>, mut callback: F) -> Result<FieldData>
    where
        F: FnMut(usize, &FieldData),
    {
        self.ensure_seeded()?;

        let start_step = self.steps_taken;
        let scope = ProfilerScope::new("gray_scott_run");
        self.state = SimulatorState::Running;

        for i in 1..=steps {
            self.solver.step(&self.params);
            self.steps_taken += 1;

            if interval.is_some_and(|n| i % n == 0) {
                let v = self.read_v()?;
                callback(self.steps_taken, &v);
            }
        }

        self.state = SimulatorState::Converged;
        let v = self.read_v()?;
        let stats = FieldStats::of(&v);

        info!(
            steps,
            from = start_step,
            total = self.steps_taken,
            elapsed_ms = scope.elapsed_ms(),
            v_min = stats.min,
            v_max = stats.max,
            "Gray-Scott run finished"
        );
        if stats.is_degenerate() {
            warn!(
                value = stats.mean,
                "Activator field is uniform; the pattern died out or never formed"
            );
        }

        Ok(v)
    }

    fn ensure_seeded(&self) -> Result<()> {
        if self.state == SimulatorState::Uninitialised {
            return Err(SurfaceError::invalid_state(
                "simulator must be seeded before stepping",
            ));
        }
        Ok(())
    }

    /// Current lifecycle state
    pub fn state(&self) -> SimulatorState {
        self.state
    }

    /// Steps integrated since the last seeding
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Copy of the substrate field
    ///
    /// # Errors
    ///
    /// Returns `InvalidFieldState` if the backend buffer has the wrong length.
    pub fn read_u(&self) -> Result<FieldData> {
        let (width, height) = self.solver.dimensions();
        FieldData::from_vec(width, height, self.solver.read_u().into_owned())
    }

    /// Copy of the activator field
    ///
    /// # Errors
    ///
    /// Returns `InvalidFieldState` if the backend buffer has the wrong length.
    pub fn read_v(&self) -> Result<FieldData> {
        let (width, height) = self.solver.dimensions();
        FieldData::from_vec(width, height, self.solver.read_v().into_owned())
    }

    /// Configuration the simulator was built with
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Backend actually in use (never `Auto`)
    pub fn backend(&self) -> Backend {
        self.solver.backend()
    }
}

/// Equilibrium fields with `n_seeds` circular patches stamped in
fn seeded_fields(resolution: usize, n_seeds: usize, seed: u64) -> (FieldData, FieldData) {
    let mut u = FieldData::with_value(resolution, resolution, 1.0);
    let mut v = FieldData::new(resolution, resolution);

    let (lo, hi) = if resolution >= 4 {
        (resolution / 4, 3 * resolution / 4)
    } else {
        (0, resolution)
    };
    let radius = (resolution / 20).max(MIN_SEED_RADIUS) as isize;
    let size = resolution as isize;
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..n_seeds {
        let cx = rng.random_range(lo..hi) as isize;
        let cy = rng.random_range(lo..hi) as isize;

        // Offsets wrap, so a patch near an edge continues on the far side
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy >= radius * radius {
                    continue;
                }
                let x = (cx + dx).rem_euclid(size) as usize;
                let y = (cy + dy).rem_euclid(size) as usize;
                u.set(x, y, SEED_U);
                v.set(x, y, SEED_V);
            }
        }
    }

    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            resolution: 32,
            steps: 50,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_new_starts_at_equilibrium() {
        let sim = GrayScottSimulator::new(small_config(), Backend::Scalar).unwrap();
        assert_eq!(sim.state(), SimulatorState::Uninitialised);
        assert_eq!(sim.steps_taken(), 0);

        let u = sim.read_u().unwrap();
        let v = sim.read_v().unwrap();
        assert!(u.as_slice().iter().all(|&c| c == 1.0));
        assert!(v.as_slice().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SimulationConfig {
            feed_rate: 1.5,
            ..small_config()
        };
        assert!(matches!(
            GrayScottSimulator::new(config, Backend::Scalar),
            Err(SurfaceError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_step_before_seeding_fails() {
        let mut sim = GrayScottSimulator::new(small_config(), Backend::Scalar).unwrap();
        assert!(matches!(
            sim.step(),
            Err(SurfaceError::InvalidFieldState { .. })
        ));
        assert!(matches!(
            sim.run(10),
            Err(SurfaceError::InvalidFieldState { .. })
        ));
        assert_eq!(sim.state(), SimulatorState::Uninitialised);
    }

    #[test]
    fn test_seeding_is_deterministic() {
        let (u1, v1) = seeded_fields(64, 5, 42);
        let (u2, v2) = seeded_fields(64, 5, 42);
        assert_eq!(u1, u2);
        assert_eq!(v1, v2);

        let (_, v3) = seeded_fields(64, 5, 43);
        assert_ne!(v1, v3);
    }

    #[test]
    fn test_seed_patches_use_seed_concentrations() {
        let (u, v) = seeded_fields(64, 3, 7);
        let seeded: Vec<usize> = (0..v.len()).filter(|&i| v.data[i] > 0.0).collect();
        assert!(!seeded.is_empty());
        for i in seeded {
            assert_eq!(v.data[i], SEED_V);
            assert_eq!(u.data[i], SEED_U);
        }
    }

    #[test]
    fn test_seeding_tiny_grids() {
        for res in 1..4 {
            let (_, v) = seeded_fields(res, 2, 1);
            assert!(v.as_slice().iter().any(|&c| c == SEED_V), "res {res}");
        }
    }

    #[test]
    fn test_reseeding_resets_fields() {
        let mut sim = GrayScottSimulator::new(small_config(), Backend::Scalar).unwrap();
        sim.initialize_random(3, 42).unwrap();
        let fresh = sim.read_v().unwrap();
        sim.run(20).unwrap();

        sim.initialize_random(3, 42).unwrap();
        assert_eq!(sim.state(), SimulatorState::Seeded);
        assert_eq!(sim.steps_taken(), 0);
        assert_eq!(sim.read_v().unwrap(), fresh);
    }

    #[test]
    fn test_run_stays_bounded_and_converges() {
        let mut sim = GrayScottSimulator::new(small_config(), Backend::Scalar).unwrap();
        sim.initialize_random(3, 42).unwrap();
        let v = sim.run(100).unwrap();

        assert_eq!(sim.state(), SimulatorState::Converged);
        assert_eq!(sim.steps_taken(), 100);
        assert!(v.as_slice().iter().all(|&c| (0.0..=1.0).contains(&c)));
        let u = sim.read_u().unwrap();
        assert!(u.as_slice().iter().all(|&c| (0.0..=1.0).contains(&c)));
    }

    #[test]
    fn test_run_is_resumable() {
        let mut split = GrayScottSimulator::new(small_config(), Backend::Scalar).unwrap();
        split.initialize_random(3, 9).unwrap();
        split.run(30).unwrap();
        let resumed = split.run(45).unwrap();

        let mut whole = GrayScottSimulator::new(small_config(), Backend::Scalar).unwrap();
        whole.initialize_random(3, 9).unwrap();
        let direct = whole.run(75).unwrap();

        assert_eq!(split.steps_taken(), 75);
        assert_eq!(resumed, direct);
    }

    #[test]
    fn test_step_matches_run() {
        let mut stepped = GrayScottSimulator::new(small_config(), Backend::Scalar).unwrap();
        stepped.initialize_random(2, 3).unwrap();
        for _ in 0..10 {
            stepped.step().unwrap();
        }
        assert_eq!(stepped.state(), SimulatorState::Running);

        let mut run = GrayScottSimulator::new(small_config(), Backend::Scalar).unwrap();
        run.initialize_random(2, 3).unwrap();
        assert_eq!(run.run(10).unwrap(), stepped.read_v().unwrap());
    }

    #[test]
    fn test_callback_interval() {
        let mut sim = GrayScottSimulator::new(small_config(), Backend::Scalar).unwrap();
        sim.initialize_random(3, 42).unwrap();

        let mut seen = Vec::new();
        sim.run_with_callback(25, 10, |step, v| {
            assert_eq!(v.width, 32);
            seen.push(step);
        })
        .unwrap();
        assert_eq!(seen, vec![10, 20]);

        assert!(sim.run_with_callback(5, 0, |_, _| {}).is_err());
    }

    #[test]
    fn test_initialize_custom_validates_fields() {
        let mut sim = GrayScottSimulator::new(small_config(), Backend::Scalar).unwrap();

        let wrong = FieldData::new(16, 16);
        let ok = FieldData::new(32, 32);
        assert!(matches!(
            sim.initialize_custom(&wrong, &ok),
            Err(SurfaceError::InvalidFieldState { .. })
        ));

        let mut nan = FieldData::new(32, 32);
        nan.set(4, 4, f32::NAN);
        assert!(matches!(
            sim.initialize_custom(&ok, &nan),
            Err(SurfaceError::InvalidFieldState { .. })
        ));
        assert_eq!(sim.state(), SimulatorState::Uninitialised);

        let u = FieldData::with_value(32, 32, 1.0);
        let mut v = FieldData::new(32, 32);
        v.set(16, 16, 0.5);
        sim.initialize_custom(&u, &v).unwrap();
        assert_eq!(sim.state(), SimulatorState::Seeded);
        assert_relative_eq!(sim.read_v().unwrap().get(16, 16), 0.5);
    }

    #[test]
    fn test_no_seeds_stays_degenerate() {
        let mut sim = GrayScottSimulator::new(small_config(), Backend::Scalar).unwrap();
        sim.initialize_random(0, 42).unwrap();
        let v = sim.run(20).unwrap();
        assert!(FieldStats::of(&v).is_degenerate());
    }

    #[test]
    fn test_snapshot_resumes_integration() {
        let mut original = GrayScottSimulator::new(small_config(), Backend::Scalar).unwrap();
        original.initialize_random(3, 11).unwrap();
        original.run(20).unwrap();

        let snapshot = original.snapshot().unwrap();
        let mut restored = GrayScottSimulator::from_snapshot(&snapshot, Backend::Scalar).unwrap();
        assert_eq!(restored.steps_taken(), 20);

        assert_eq!(restored.run(15).unwrap(), original.run(15).unwrap());
        assert_eq!(restored.steps_taken(), 35);
    }
}
