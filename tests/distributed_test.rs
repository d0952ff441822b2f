//! Multi-process MPI smoke test.
//!
//! Requires MPI and the `distributed` feature flag.
//! Run with: mpirun -n 4 cargo test --features distributed --test distributed_test
//!
//! Without MPI installed, this test is excluded from the default build.

#![cfg(feature = "distributed")]

use teamscatter::comm::mpi::MpiTransport;
use teamscatter::comm::Transport;
use teamscatter::driver::run_team_scatter;
use teamscatter::kernel::{p2p_self, InvSq};
use teamscatter::points::random_system;

#[test]
fn team_scatter_matches_direct_over_mpi() {
    let _universe = mpi::initialize().expect("MPI init failed");
    let world = MpiTransport::world();

    let n = 8 * world.size();
    let master = world.rank() == 0;
    let (source, charge) = if master {
        random_system(n, 1337)
    } else {
        (Vec::new(), Vec::new())
    };

    let report = run_team_scatter(&InvSq, &world, n, 1, &source, &charge);

    if let Some(report) = report {
        let mut exact = vec![0.0f64; n];
        p2p_self(&InvSq, &source, &charge, &mut exact);
        for (e, g) in exact.iter().zip(report.result.iter()) {
            assert!(
                ((e - g) / e).abs() <= 1e-10,
                "distributed result diverges: got {g}, expected {e}"
            );
        }
    }
}
