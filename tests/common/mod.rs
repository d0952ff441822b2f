//! Helpers shared by the end-to-end tests: a direct reference
//! evaluation and a harness that runs an algorithm over a simulated
//! world and returns the master's gathered result.
#![allow(dead_code)] // each test binary uses a subset of these helpers

use teamscatter::comm::local::LocalWorld;
use teamscatter::driver::{run_symmetric, run_team_scatter};
use teamscatter::kernel::{p2p_self, InvSq};
use teamscatter::points::random_system;

pub const SEED: u64 = 1337;

#[derive(Clone, Copy)]
pub enum Algo {
    Ts,
    Sts,
}

/// Direct O(N²) reference over the same seeded problem the distributed
/// runs use.
pub fn direct_reference(n: usize) -> Vec<f64> {
    let (source, charge) = random_system(n, SEED);
    let mut exact = vec![0.0f64; n];
    p2p_self(&InvSq, &source, &charge, &mut exact);
    exact
}

/// Run the chosen algorithm on `p` simulated ranks with teamsize `c` and
/// problem size `n`, returning the master's gathered result. Problem
/// data and run metadata are only supplied on the master, so the
/// metadata broadcast path is exercised.
pub fn run_world(algo: Algo, p: usize, c: usize, n: usize) -> Vec<f64> {
    let results = LocalWorld::run(p, |world| {
        use teamscatter::comm::Transport;
        let master = world.rank() == 0;
        let (source, charge) = if master {
            random_system(n, SEED)
        } else {
            (Vec::new(), Vec::new())
        };
        let (n_arg, c_arg) = if master { (n, c) } else { (0, 0) };
        let report = match algo {
            Algo::Ts => run_team_scatter(&InvSq, &world, n_arg, c_arg, &source, &charge),
            Algo::Sts => run_symmetric(&InvSq, &world, n_arg, c_arg, &source, &charge),
        };
        report.map(|r| r.result)
    });
    results
        .into_iter()
        .flatten()
        .next()
        .expect("master produced a result")
}

/// Largest per-element relative difference.
pub fn max_rel_err(exact: &[f64], got: &[f64]) -> f64 {
    assert_eq!(exact.len(), got.len());
    exact
        .iter()
        .zip(got.iter())
        .map(|(e, g)| ((e - g) / e).abs())
        .fold(0.0, f64::max)
}
