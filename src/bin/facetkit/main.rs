//! facetkit CLI - principal curvature on procedural meshes.
//!
//! Usage: facetkit <COMMAND> [OPTIONS]
//!
//! Run `facetkit --help` for available commands.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Args, Parser, Subcommand, ValueEnum};

use facetkit::algo::create::{create_disk, create_icosphere, create_uv_sphere};
use facetkit::algo::curvature::{self, CurvatureAlgorithm, CurvatureOptions};
use facetkit::algo::logger::ProgressLogger;
use facetkit::algo::stat;
use facetkit::algo::topology::{update_per_face_adjacent_faces, update_per_vertex_adjacent_faces};
use facetkit::mesh::{MeshPos, PolyMesh};

#[derive(Parser)]
#[command(name = "facetkit")]
#[command(author, version, about = "Mesh curvature CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display information about a generated mesh
    Info {
        #[command(flatten)]
        shape: ShapeArgs,
    },

    /// Estimate principal curvatures on a generated mesh
    Curvature {
        #[command(flatten)]
        shape: ShapeArgs,

        /// Estimator
        #[arg(short, long, value_enum, default_value = "taubin95")]
        algorithm: Algorithm,

        /// PCA neighborhood radius (default: 10% of the bounding box diagonal)
        #[arg(short, long)]
        radius: Option<f64>,

        /// PCA: integrate the clipped surface instead of sampling vertices
        #[arg(long)]
        exact: bool,

        /// Fail on one-ring walks longer than this many steps
        #[arg(long)]
        max_ring_steps: Option<usize>,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },
}

#[derive(Args)]
struct ShapeArgs {
    /// Shape to generate
    #[arg(short, long, value_enum, default_value = "icosphere")]
    shape: Shape,

    /// Sphere or disk radius
    #[arg(long, default_value = "1.0")]
    size: f64,

    /// Resolution: subdivisions for the icosphere, rings for the UV sphere and disk
    #[arg(short = 'n', long, default_value = "3")]
    resolution: usize,

    /// Segments around the UV sphere or disk
    #[arg(long, default_value = "32")]
    segments: usize,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Shape {
    /// Subdivided icosahedron
    Icosphere,
    /// Latitude-longitude sphere
    UvSphere,
    /// Flat disk
    Disk,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    /// Taubin's tensor of curvature (1995)
    Taubin95,
    /// Principal component analysis of ball neighborhoods
    Pca,
}

impl From<Algorithm> for CurvatureAlgorithm {
    fn from(a: Algorithm) -> Self {
        match a {
            Algorithm::Taubin95 => CurvatureAlgorithm::Taubin95,
            Algorithm::Pca => CurvatureAlgorithm::Pca,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { shape } => cmd_info(&shape)?,

        Commands::Curvature {
            shape,
            algorithm,
            radius,
            exact,
            max_ring_steps,
            sequential,
        } => {
            let mut options = CurvatureOptions::default()
                .with_algorithm(algorithm.into())
                .with_montecarlo_sampling(!exact)
                .with_parallel(!sequential);
            options.radius = radius;
            options.max_ring_steps = max_ring_steps;
            cmd_curvature(&shape, &options)?;
        }
    }

    Ok(())
}

fn generate(args: &ShapeArgs) -> PolyMesh {
    let mut mesh = match args.shape {
        Shape::Icosphere => create_icosphere(args.size, args.resolution),
        Shape::UvSphere => create_uv_sphere(args.size, args.resolution, args.segments),
        Shape::Disk => create_disk(args.size, args.resolution, args.segments),
    };
    update_per_vertex_adjacent_faces(&mut mesh);
    update_per_face_adjacent_faces(&mut mesh);
    mesh
}

/// Create a logger that displays a progress bar on the terminal.
fn create_progress() -> ProgressLogger {
    let max_percent = Arc::new(AtomicUsize::new(0));

    ProgressLogger::new(move |current, total, message| {
        if total == 0 {
            return;
        }
        let percent = (current * 100 / total).min(100);

        // Monotonic even if messages from several stages interleave
        let previous = max_percent.fetch_max(percent, Ordering::Relaxed);
        if percent < previous {
            return;
        }

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;
        let bar = "=".repeat(filled);
        let space = " ".repeat(bar_width - filled);

        eprint!("\r[{}{}] {:3}% {:<40}", bar, space, percent, message);
        let _ = std::io::stderr().flush();

        if percent == 100 && !message.is_empty() {
            eprintln!();
        }
    })
}

fn cmd_info(args: &ShapeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = generate(args);

    println!("Vertices: {}", mesh.num_vertices());
    println!("Faces: {}", mesh.num_faces());

    let mut min_area = f64::MAX;
    let mut max_area = 0.0_f64;
    for f in mesh.face_ids() {
        let area = mesh.face_area(f);
        min_area = min_area.min(area);
        max_area = max_area.max(area);
    }
    println!("Surface area: {:.6}", stat::surface_area(&mesh));
    println!("Face area range: [{:.6}, {:.6}]", min_area, max_area);

    let bb = stat::bounding_box(&mesh);
    println!(
        "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
        bb.min.x, bb.min.y, bb.min.z, bb.max.x, bb.max.y, bb.max.z
    );
    println!("Diagonal: {:.6}", bb.diagonal());

    let border = stat::border_length(&mesh)?;
    if border == 0.0 {
        println!("Topology: Closed (no border)");
    } else {
        println!("Topology: Open (border length {:.6})", border);
    }

    let valences: Vec<usize> = mesh
        .vertex_ids()
        .filter_map(|v| MeshPos::around_vertex(&mesh, v))
        .map(|pos| pos.number_of_adjacent_faces_to_v())
        .collect();
    if let (Some(min), Some(max)) = (valences.iter().min(), valences.iter().max()) {
        println!("Faces per vertex: [{}, {}]", min, max);
    }

    Ok(())
}

fn cmd_curvature(args: &ShapeArgs, options: &CurvatureOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh = generate(args);
    mesh.enable_per_vertex_principal_curvature();

    let mode = if options.parallel { "parallel" } else { "sequential" };
    println!(
        "Estimating curvature on {} vertices ({:?}, {})...",
        mesh.num_vertices(),
        options.algorithm,
        mode
    );

    let logger = create_progress();
    let start = Instant::now();
    curvature::update_principal_curvature(&mut mesh, options, &logger)?;
    let elapsed = start.elapsed();

    let values = mesh.principal_curvatures().unwrap_or_default();
    let degenerate = values.iter().filter(|k| k.is_degenerate()).count();
    let finite: Vec<_> = values.iter().filter(|k| !k.is_degenerate()).collect();

    let summarize = |name: &str, get: &dyn Fn(&&facetkit::mesh::PrincipalCurvature) -> f64| {
        let min = finite.iter().map(get).fold(f64::INFINITY, f64::min);
        let max = finite.iter().map(get).fold(f64::NEG_INFINITY, f64::max);
        let avg = finite.iter().map(get).sum::<f64>() / finite.len() as f64;
        println!("  {}: min={:.4}, max={:.4}, avg={:.4}", name, min, max, avg);
    };
    println!("Curvature ({:.2?}):", elapsed);
    summarize("Max ", &|k| k.max_value);
    summarize("Min ", &|k| k.min_value);
    summarize("Mean", &|k| k.mean());
    println!("  NaN/Inf vertices: {}", degenerate);

    Ok(())
}
