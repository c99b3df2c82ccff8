//! Texturing pipeline
//!
//! `TexturePipeline` sequences the stages of one texturing run:
//! 1. Validate the configuration (before any simulation work)
//! 2. Unwrap the mesh and build the taper (before any simulation work)
//! 3. Resolve the preset and integrate the Gray-Scott field
//! 4. Sample the field and the taper per vertex
//! 5. Displace vertices along their normals
//!
//! Independent runs (batches and parameter sweeps) execute concurrently on
//! the rayon pool, each with its own simulator.

pub mod config;
pub mod sweep;

pub use config::SurfaceConfig;
pub use sweep::{SweepRange, SweepResult};

use crate::displacement::{apply_displacement, DisplacementStats};
use crate::error::Result;
use crate::mapping::{sample_vertices, CylindricalFrame, Taper};
use crate::mesh::Mesh;
use crate::simulation::GrayScottSimulator;
use crate::solver::{FieldData, FieldStats, PatternPreset};
use rayon::prelude::*;
use tracing::info;

/// Everything produced by [`TexturePipeline::run`]
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Displaced copy of the input mesh
    pub mesh: Mesh,
    /// Final activator field
    pub field: FieldData,
    /// Range of the applied offsets
    pub stats: DisplacementStats,
}

/// One configured texturing run
pub struct TexturePipeline {
    config: SurfaceConfig,
    preset: PatternPreset,
    field: Option<FieldData>,
}

impl TexturePipeline {
    /// Validate `config` and prepare a pipeline
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for any bad option.
    pub fn new(config: SurfaceConfig) -> Result<Self> {
        config.validate()?;
        let preset = config.preset()?;
        Ok(Self {
            config,
            preset,
            field: None,
        })
    }

    /// Configuration the pipeline was built with
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Resolved pattern preset
    pub fn preset(&self) -> PatternPreset {
        self.preset
    }

    /// Field from the last [`generate_field`](Self::generate_field), if any
    pub fn field(&self) -> Option<&FieldData> {
        self.field.as_ref()
    }

    /// Simulate the activator field, reusing a cached one if present
    ///
    /// # Errors
    ///
    /// Propagates simulator errors.
    pub fn generate_field(&mut self) -> Result<FieldData> {
        if let Some(field) = &self.field {
            return Ok(field.clone());
        }

        let sim_config = self.config.simulation_config()?;
        info!(
            pattern = %self.preset,
            resolution = sim_config.resolution,
            steps = sim_config.steps,
            "Generating reaction-diffusion field"
        );

        let mut sim = GrayScottSimulator::new(sim_config, self.config.backend)?;
        sim.initialize_random(sim_config.n_seeds, sim_config.random_seed)?;
        let field = sim.run(sim_config.steps)?;

        self.field = Some(field.clone());
        Ok(field)
    }

    /// Texture `mesh`, generating the field first if needed
    ///
    /// The mesh is unwrapped before any simulation work, so geometry that
    /// cannot be mapped fails without running or caching a field.
    ///
    /// # Errors
    ///
    /// Returns `MeshMapping` for geometry that cannot be unwrapped and
    /// propagates simulator errors.
    pub fn apply_to_mesh(&mut self, mesh: &Mesh) -> Result<Mesh> {
        let (frame, taper) = self.prepare(mesh)?;
        let field = self.generate_field()?;
        let (displaced, _) = self.displace(mesh, &field, &frame, &taper)?;
        Ok(displaced)
    }

    /// Generate the field and texture `mesh` with it
    ///
    /// # Errors
    ///
    /// See [`generate_field`](Self::generate_field) and
    /// [`apply_to_mesh`](Self::apply_to_mesh).
    pub fn run(&mut self, mesh: &Mesh) -> Result<PipelineOutput> {
        let (frame, taper) = self.prepare(mesh)?;
        let field = self.generate_field()?;
        let (mesh, stats) = self.displace(mesh, &field, &frame, &taper)?;
        Ok(PipelineOutput { mesh, field, stats })
    }

    fn prepare(&self, mesh: &Mesh) -> Result<(CylindricalFrame, Taper)> {
        let frame = CylindricalFrame::from_mesh(mesh, self.config.axis)?;
        let taper = self.config.taper()?;
        Ok((frame, taper))
    }

    fn displace(
        &self,
        mesh: &Mesh,
        field: &FieldData,
        frame: &CylindricalFrame,
        taper: &Taper,
    ) -> Result<(Mesh, DisplacementStats)> {
        let samples = sample_vertices(mesh, field, frame, taper);

        let amplitude = self.config.displacement_amplitude;
        let baseline = self.config.baseline;
        let stats = DisplacementStats::from_offsets(&samples.offsets(amplitude, baseline));
        let displaced = apply_displacement(mesh, &samples, amplitude, baseline)?;

        info!(
            vertices = mesh.vertex_count(),
            min_offset = stats.min_offset,
            max_offset = stats.max_offset,
            "Applied displacement"
        );
        Ok((displaced, stats))
    }

    /// Run every configuration against `mesh` concurrently
    ///
    /// Results keep the order of `configs`; a failing configuration does not
    /// affect the others.
    pub fn run_batch(configs: &[SurfaceConfig], mesh: &Mesh) -> Vec<Result<PipelineOutput>> {
        info!(runs = configs.len(), "Starting batch");
        configs
            .par_iter()
            .map(|config| Self::new(config.clone())?.run(mesh))
            .collect()
    }

    /// Generate one field per `(F, k)` lattice point of `range`
    ///
    /// All other options come from `base`. Every point is validated before any
    /// simulation starts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a bad range or base configuration and
    /// propagates simulator errors.
    pub fn parameter_sweep(base: &SurfaceConfig, range: &SweepRange) -> Result<Vec<SweepResult>> {
        let configs = sweep::sweep_configs(base, range)?;
        info!(points = configs.len(), grid = range.grid, "Starting parameter sweep");

        configs
            .into_par_iter()
            .map(|config| {
                let feed = config.feed_rate.unwrap_or_default();
                let kill = config.kill_rate.unwrap_or_default();
                let field = Self::new(config)?.generate_field()?;
                let stats = FieldStats::of(&field);
                Ok(SweepResult {
                    feed,
                    kill,
                    field,
                    stats,
                })
            })
            .collect()
    }
}
