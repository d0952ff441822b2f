//! End-to-end Symmetric Team Scatter runs, their agreement with the
//! plain algorithm, and the verifier cache round trip.

mod common;

use common::{direct_reference, max_rel_err, run_world, Algo};

#[test]
fn single_process_reduces_to_the_direct_evaluation() {
    let got = run_world(Algo::Sts, 1, 1, 8);
    let exact = direct_reference(8);
    assert!(max_rel_err(&exact, &got) <= 1e-15);
}

#[test]
fn pure_ring_exchanges_transpose_blocks() {
    // num_teams = 4, C = 1: three iterations, with one real transpose
    // send/receive in the middle of the schedule
    let got = run_world(Algo::Sts, 4, 1, 16);
    let exact = direct_reference(16);
    assert!(max_rel_err(&exact, &got) <= 1e-12);
}

#[test]
fn two_teams_of_two_single_iteration() {
    let got = run_world(Algo::Sts, 4, 2, 16);
    let exact = direct_reference(16);
    assert!(max_rel_err(&exact, &got) <= 1e-12);
}

#[test]
fn four_teams_of_four_single_iteration() {
    let got = run_world(Algo::Sts, 16, 4, 64);
    let exact = direct_reference(64);
    assert!(max_rel_err(&exact, &got) <= 1e-10);
}

#[test]
fn eight_teams_of_four_two_iterations() {
    // num_teams = 8, C = 4: the transpose exchange spans two iterations
    let got = run_world(Algo::Sts, 32, 4, 256);
    let exact = direct_reference(256);
    assert!(max_rel_err(&exact, &got) <= 1e-10);
}

#[test]
fn four_teams_of_two() {
    let got = run_world(Algo::Sts, 8, 2, 32);
    let exact = direct_reference(32);
    assert!(max_rel_err(&exact, &got) <= 1e-10);
}

#[test]
fn symmetric_agrees_with_plain_team_scatter() {
    for &(p, c, n) in &[(4, 1, 16), (8, 2, 32), (16, 4, 64)] {
        let ts = run_world(Algo::Ts, p, c, n);
        let sts = run_world(Algo::Sts, p, c, n);
        assert!(
            max_rel_err(&ts, &sts) <= 1e-11,
            "P={p} C={c} N={n}: TS and STS disagree"
        );
    }
}

#[test]
fn verification_is_idempotent_across_runs() {
    use common::SEED;
    use teamscatter::kernel::InvSq;
    use teamscatter::points::random_system;
    use teamscatter::verify;

    let dir = std::env::temp_dir().join(format!("teamscatter-e2e-{}", std::process::id()));
    std::fs::remove_dir_all(&dir).ok();

    let n = 16;
    let got = run_world(Algo::Sts, 4, 2, n);
    let (source, charge) = random_system(n, SEED);

    // first run computes and caches the exact vector, second reads it
    let first = verify::check_in(&dir, &InvSq, &source, &charge, &got, SEED);
    assert!(verify::cache_path(&dir, "invsq", n, SEED).exists());
    let second = verify::check_in(&dir, &InvSq, &source, &charge, &got, SEED);
    assert_eq!(first, second);
    assert!(first <= 1e-10);

    std::fs::remove_dir_all(&dir).ok();
}
