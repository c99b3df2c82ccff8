use clap::Parser;
use rd_surface_core::{
    AxisPolicy, Backend, FieldData, Mesh, SurfaceConfig, SweepRange, TexturePipeline, Vec3,
};
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Reaction-diffusion surface texturing demo
#[derive(Parser, Debug)]
#[command(name = "rd-surface-demo")]
#[command(about = "Textures a cylinder with a Gray-Scott pattern and writes STL", long_about = None)]
struct Args {
    /// JSON configuration file (command-line options below are ignored)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pattern preset (spots, stripes, waves, holes, custom)
    #[arg(short, long, default_value = "spots")]
    pattern: String,

    /// Feed rate for the custom pattern
    #[arg(long)]
    feed: Option<f32>,

    /// Kill rate for the custom pattern
    #[arg(long)]
    kill: Option<f32>,

    /// Field resolution in cells
    #[arg(short, long, default_value_t = 128)]
    resolution: usize,

    /// Simulation steps
    #[arg(short, long, default_value_t = 5000)]
    steps: usize,

    /// Number of seed patches
    #[arg(long, default_value_t = 7)]
    n_seeds: usize,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Displacement amplitude in mm
    #[arg(short, long, default_value_t = 8.0)]
    amplitude: f32,

    /// Field value mapped to zero displacement
    #[arg(long, default_value_t = 0.5)]
    baseline: f32,

    /// Taper fraction at the top (0-1)
    #[arg(long, default_value_t = 0.3)]
    taper_top: f32,

    /// Taper fraction at the bottom (0-1)
    #[arg(long, default_value_t = 0.15)]
    taper_bottom: f32,

    /// Solver backend (scalar, parallel, auto)
    #[arg(short, long, default_value = "auto")]
    backend: String,

    /// Unwrap axis (origin, bounds_center)
    #[arg(long, default_value = "origin")]
    axis: String,

    /// Cylinder radius in mm
    #[arg(long, default_value_t = 40.0)]
    radius: f32,

    /// Cylinder height in mm
    #[arg(long, default_value_t = 120.0)]
    height: f32,

    /// Vertices around the cylinder
    #[arg(long, default_value_t = 256)]
    segments: usize,

    /// Height subdivisions of the cylinder side
    #[arg(long, default_value_t = 128)]
    rings: usize,

    /// Output STL path
    #[arg(short, long, default_value = "textured.stl")]
    output: PathBuf,

    /// Also write the final field as JSON
    #[arg(long)]
    field_out: Option<PathBuf>,

    /// Run a (F, k) parameter sweep instead of texturing
    #[arg(long)]
    sweep: bool,

    /// Sweep samples per axis
    #[arg(long, default_value_t = 3)]
    grid: usize,
}

impl Args {
    fn surface_config(&self) -> Result<SurfaceConfig, Box<dyn Error>> {
        if let Some(path) = &self.config {
            println!("Loading configuration from {}", path.display());
            return Ok(SurfaceConfig::load(path)?);
        }

        Ok(SurfaceConfig {
            pattern_type: self.pattern.clone(),
            feed_rate: self.feed,
            kill_rate: self.kill,
            field_resolution: self.resolution,
            simulation_steps: self.steps,
            n_seeds: self.n_seeds,
            displacement_amplitude: self.amplitude,
            baseline: self.baseline,
            taper_top: self.taper_top,
            taper_bottom: self.taper_bottom,
            random_seed: self.seed,
            backend: self.backend.parse::<Backend>()?,
            axis: self.axis.parse::<AxisPolicy>()?,
            ..SurfaceConfig::default()
        })
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.surface_config()?;

    if args.sweep {
        run_sweep(&config, args.grid)
    } else {
        run_texture(&args, config)
    }
}

fn run_texture(args: &Args, config: SurfaceConfig) -> Result<(), Box<dyn Error>> {
    println!("=== Reaction-Diffusion Surface Demo ===\n");

    let mesh = Mesh::cylinder(args.radius, args.height, args.segments, args.rings, true)?;
    println!(
        "Template: cylinder r={:.1}mm h={:.1}mm ({} vertices, {} faces)",
        args.radius,
        args.height,
        mesh.vertex_count(),
        mesh.face_count()
    );

    let mut pipeline = TexturePipeline::new(config)?;
    println!(
        "Pattern: {} | field {}x{} | {} steps | backend {}",
        pipeline.preset(),
        pipeline.config().field_resolution,
        pipeline.config().field_resolution,
        pipeline.config().simulation_steps,
        pipeline.config().backend
    );

    let output = pipeline.run(&mesh)?;
    println!(
        "Displacement range: {:.3}mm .. {:.3}mm",
        output.stats.min_offset, output.stats.max_offset
    );

    write_ascii_stl(&args.output, &output.mesh, "rd_surface")?;
    println!("Wrote {}", args.output.display());

    if let Some(path) = &args.field_out {
        write_field_json(path, &output.field)?;
        println!("Wrote field to {}", path.display());
    }

    Ok(())
}

fn run_sweep(base: &SurfaceConfig, grid: usize) -> Result<(), Box<dyn Error>> {
    println!("=== Gray-Scott Parameter Sweep ({grid}x{grid}) ===\n");

    let range = SweepRange {
        grid,
        ..SweepRange::default()
    };
    let results = TexturePipeline::parameter_sweep(base, &range)?;

    println!("{:>8} {:>8} {:>8} {:>8} {:>8}  pattern", "F", "k", "min", "max", "mean");
    for r in &results {
        println!(
            "{:>8.4} {:>8.4} {:>8.4} {:>8.4} {:>8.4}  {}",
            r.feed,
            r.kill,
            r.stats.min,
            r.stats.max,
            r.stats.mean,
            if r.stats.is_degenerate() { "none" } else { "yes" }
        );
    }

    Ok(())
}

/// Write `mesh` as ASCII STL with per-facet normals
fn write_ascii_stl(path: &Path, mesh: &Mesh, name: &str) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "solid {name}")?;

    for face in &mesh.faces {
        let [a, b, c] = face.map(|i| mesh.vertices[i as usize]);
        let normal = (b - a)
            .cross(&(c - a))
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vec3::zeros);

        writeln!(out, "  facet normal {:e} {:e} {:e}", normal.x, normal.y, normal.z)?;
        writeln!(out, "    outer loop")?;
        for v in [a, b, c] {
            writeln!(out, "      vertex {:e} {:e} {:e}", v.x, v.y, v.z)?;
        }
        writeln!(out, "    endloop")?;
        writeln!(out, "  endfacet")?;
    }

    writeln!(out, "endsolid {name}")?;
    out.flush()
}

/// Write `field` as JSON, surfacing flush errors
fn write_field_json(path: &Path, field: &FieldData) -> Result<(), Box<dyn Error>> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut out, field)?;
    out.flush()?;
    Ok(())
}
