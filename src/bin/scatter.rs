//! Plain ring version of the all-pairs sum over file data: P teams of
//! one process each, so every process owns a block and the traveling
//! blocks circle the whole world once.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::exit;
use teamscatter::comm::Transport;
use teamscatter::driver::run_team_scatter;
use teamscatter::kernel::{p2p_self, NonParaBayesian};
use teamscatter::topology::MASTER;
use teamscatter::{app, cli, io, verify};

/// Ring all-pairs sum over points and charges read from files
#[derive(Parser)]
#[command(name = "scatter", version)]
struct Cli {
    /// File of source points, three coordinates per point
    source_file: PathBuf,

    /// File of charges, one per point
    charge_file: PathBuf,

    /// Skip the verification pass
    #[arg(long)]
    nocheck: bool,
}

fn main() {
    let args: Cli = cli::parse_or_usage();
    app::init_tracing();
    let world = app::init_world();
    let comm = &world.comm;
    let master = comm.rank() == MASTER;

    let kernel = NonParaBayesian::new(1.0, 1.0);

    let (source, charge) = if master {
        let source = io::read_points(&args.source_file).unwrap_or_else(|e| {
            eprintln!("Error reading {}: {e}", args.source_file.display());
            exit(1);
        });
        let charge = io::read_scalars(&args.charge_file).unwrap_or_else(|e| {
            eprintln!("Error reading {}: {e}", args.charge_file.display());
            exit(1);
        });
        if source.len() != charge.len() {
            eprintln!(
                "Error: {} points but {} charges",
                source.len(),
                charge.len()
            );
            exit(1);
        }
        println!("N = {}", source.len());
        println!("P = {}", comm.size());
        (source, charge)
    } else {
        (Vec::new(), Vec::new())
    };

    let report = run_team_scatter(&kernel, comm, source.len(), 1, &source, &charge);

    if let Some(report) = report {
        report.timing.print_report("c=1", false);

        if !args.nocheck {
            println!("Computing direct matvec...");
            let mut exact = vec![0.0f64; source.len()];
            p2p_self(&kernel, &source, &charge, &mut exact);
            let error = verify::relative_error(&exact, &report.result);
            println!("Relative error: {error:e}");
        }

        let out = Path::new(verify::DATA_DIR).join("result.txt");
        if let Err(e) = io::write_scalars(&out, &report.result) {
            tracing::warn!("could not write {}: {e}", out.display());
        }
    }
}
