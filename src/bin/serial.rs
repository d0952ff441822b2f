//! Single-process direct evaluation over file data, for timing
//! baselines and for producing reference results.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::exit;
use std::time::Instant;
use teamscatter::kernel::{p2p_self, InvSq};
use teamscatter::{app, cli, io, verify};

/// Direct O(N²) all-pairs sum over points and charges read from files
#[derive(Parser)]
#[command(name = "serial", version)]
struct Cli {
    /// File of source points, three coordinates per point
    source_file: PathBuf,

    /// File of charges, one per point
    charge_file: PathBuf,
}

fn main() {
    let args: Cli = cli::parse_or_usage();
    app::init_tracing();

    let data = io::read_points(&args.source_file).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", args.source_file.display());
        exit(1);
    });
    let sigma = io::read_scalars(&args.charge_file).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", args.charge_file.display());
        exit(1);
    });
    if data.len() != sigma.len() {
        eprintln!("Error: {} points but {} charges", data.len(), sigma.len());
        exit(1);
    }

    let n = data.len();
    println!("N = {n}");

    let mut phi = vec![0.0f64; n];
    let t0 = Instant::now();
    p2p_self(&InvSq, &data, &sigma, &mut phi);
    println!("Computed in {} seconds", t0.elapsed().as_secs_f64());

    let checksum: f64 = phi.iter().sum();
    println!("Serial - checksum answer is: {checksum}");

    let out = Path::new(verify::DATA_DIR).join("phi.txt");
    if let Err(e) = io::write_scalars(&out, &phi) {
        tracing::warn!("could not write {}: {e}", out.display());
    }
}
