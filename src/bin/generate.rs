//! Write random problem data files for the `scatter` and `serial`
//! binaries.

use clap::Parser;
use std::path::PathBuf;
use std::process::exit;
use teamscatter::points::{random_system, DEFAULT_SEED};
use teamscatter::{app, cli, io};

/// Generate random points and charges
#[derive(Parser)]
#[command(name = "generate", version)]
struct Cli {
    /// Output file for the points
    points_file: PathBuf,

    /// Output file for the charges
    charges_file: PathBuf,

    /// Number of points (and charges) to generate
    numpoints: usize,

    /// PRNG seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

fn main() {
    let args: Cli = cli::parse_or_usage();
    app::init_tracing();

    let (points, charges) = random_system(args.numpoints, args.seed);
    if let Err(e) = io::write_points(&args.points_file, &points) {
        eprintln!("Error writing {}: {e}", args.points_file.display());
        exit(1);
    }
    if let Err(e) = io::write_scalars(&args.charges_file, &charges) {
        eprintln!("Error writing {}: {e}", args.charges_file.display());
        exit(1);
    }
}
