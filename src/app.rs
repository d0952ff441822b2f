//! Run harness shared by the `ts` and `sts` binaries: transport
//! bootstrap, problem generation on the master, algorithm dispatch,
//! report printing and the optional verification pass.

use crate::cli::RunArgs;
use crate::comm::Transport;
use crate::driver::{run_symmetric, run_team_scatter};
use crate::kernel::InvSq;
use crate::points::{random_system, DEFAULT_SEED};
use crate::topology::MASTER;
use crate::verify;

#[cfg(not(feature = "distributed"))]
use crate::comm::local::{LocalTransport, LocalWorld};
#[cfg(feature = "distributed")]
use crate::comm::mpi::MpiTransport;

/// Which algorithm a binary runs.
#[derive(Clone, Copy, Debug)]
pub enum Algorithm {
    TeamScatter,
    SymmetricTeamScatter,
}

/// The process's world transport, plus whatever must stay alive for its
/// duration (the MPI universe, when the `distributed` feature is on).
#[cfg(feature = "distributed")]
pub struct World {
    _universe: mpi::environment::Universe,
    pub comm: MpiTransport,
}

#[cfg(not(feature = "distributed"))]
pub struct World {
    pub comm: LocalTransport,
}

/// Initialize the transport this build was compiled for. Without the
/// `distributed` feature this is a single-process world.
#[cfg(feature = "distributed")]
pub fn init_world() -> World {
    let universe = mpi::initialize().expect("MPI init failed");
    World {
        _universe: universe,
        comm: MpiTransport::world(),
    }
}

#[cfg(not(feature = "distributed"))]
pub fn init_world() -> World {
    World {
        comm: LocalWorld::solo(),
    }
}

/// Route tracing output to stderr, filtered by `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Generate the problem on the master, run the selected algorithm, and
/// print the timing report and (unless `--nocheck`) the relative error
/// on the master.
pub fn run(algorithm: Algorithm, args: &RunArgs) {
    let world = init_world();
    let comm = &world.comm;
    let master = comm.rank() == MASTER;

    let kernel = InvSq;
    let (source, charge) = if master {
        println!("N = {}", args.numpoints);
        println!("P = {}", comm.size());
        println!("Teamsize = {}", args.teamsize);
        random_system(args.numpoints, DEFAULT_SEED)
    } else {
        (Vec::new(), Vec::new())
    };

    let report = match algorithm {
        Algorithm::TeamScatter => run_team_scatter(
            &kernel,
            comm,
            args.numpoints,
            args.teamsize,
            &source,
            &charge,
        ),
        Algorithm::SymmetricTeamScatter => run_symmetric(
            &kernel,
            comm,
            args.numpoints,
            args.teamsize,
            &source,
            &charge,
        ),
    };

    if let Some(report) = report {
        match algorithm {
            Algorithm::TeamScatter => report
                .timing
                .print_report(&format!("c={}", args.teamsize), false),
            Algorithm::SymmetricTeamScatter => report
                .timing
                .print_report(&format!("C={}", args.teamsize), true),
        }
        if !args.nocheck {
            verify::check(&kernel, &source, &charge, &report.result, DEFAULT_SEED);
        }
    }
}
