//! Symmetric Team Scatter: Team Scatter with the Newton-third-law
//! optimization.
//!
//! An off-diagonal block evaluation produces the transpose block's
//! contribution at the same time, which is shipped to the process
//! scheduled to hold that block. The iteration count roughly halves; in
//! exchange each round opens with one extra send/receive whose endpoints
//! come from the index transposer, with absent partners expressed as
//! null endpoints.

use super::{finish, setup, RunReport};
use crate::comm::Transport;
use crate::kernel::{p2p_block, p2p_block_symmetric, p2p_self, SymmetricKernel};
use crate::ring::ring_shift;
use crate::timing::{Phase, PhaseTimers};
use crate::transpose::IndexTransposer;

/// Run the Symmetric Team Scatter algorithm across `world`.
///
/// `source` and `charge` are significant on the world master. Returns
/// the gathered result and averaged phase times on the master, `None`
/// elsewhere. The kernel must be symmetric, which the trait bound
/// guarantees at compile time.
pub fn run_symmetric<K, T>(
    kernel: &K,
    world: &T,
    numpoints: usize,
    teamsize: usize,
    source: &[K::Source],
    charge: &[K::Charge],
) -> Option<RunReport>
where
    K: SymmetricKernel<Result = f64> + Sync,
    T: Transport,
{
    let mut timers = PhaseTimers::start();
    let (grid, topo, mut blk) =
        setup::<K, T>(world, numpoints, teamsize, source, charge, &mut timers);
    let _span = tracing::debug_span!(
        "symmetric_team_scatter",
        rank = grid.rank,
        team = grid.team,
        trank = grid.trank
    )
    .entered();

    let transposer = IndexTransposer::new(grid.num_teams, grid.teamsize);
    let last_iter = ((grid.num_teams + 1).div_ceil(2 * grid.teamsize) - 1) as i64;
    tracing::debug!(last_iter, "starting iteration loop");

    let b = blk.r_i.len();
    // r_j accumulates the transpose block's contribution; temp_r receives
    // the contribution shipped to this process.
    let mut r_j = vec![0.0f64; b];
    let mut temp_r = vec![0.0f64; b];
    let mut r_dst: Option<usize> = None;

    // Zeroth iteration. Leaders take the diagonal, which has no transpose
    // partner. Everyone else evaluates symmetrically unless the partner
    // would revisit the block on its own final iteration, in which case
    // the one-way evaluation avoids double counting.
    if grid.is_leader() {
        timers.time(Phase::Computation, || {
            p2p_self(kernel, &blk.x_j, &blk.c_j, &mut blk.r_i)
        });
    } else {
        let (i_dst, rank_dst) = transposer.partner(0, grid.team, grid.trank);
        if i_dst != last_iter {
            r_dst = Some(rank_dst);
            timers.time(Phase::Computation, || {
                p2p_block_symmetric(
                    kernel, &blk.x_j, &blk.c_j, &mut r_j, &blk.x_i, &blk.c_i, &mut blk.r_i,
                )
            });
        } else {
            timers.time(Phase::Computation, || {
                p2p_block(kernel, &blk.x_j, &blk.c_j, &blk.x_i, &mut blk.r_i)
            });
        }
    }

    // Leaders consumed the diagonal at iteration 0, leaving them one
    // fewer off-diagonal slot than the rest of their team; the receive
    // schedule shifts accordingly.
    let i_prime_offset: i64 = if grid.is_leader() { 0 } else { 1 };

    for curr in 1..=last_iter {
        // Which iteration's block would be arriving, and from whom.
        // The derivation can step outside [0, last_iter]; such slots and
        // self-pairings mean nothing is inbound.
        let i_src = (grid.num_teams / grid.teamsize) as i64 - (curr - 1) - i_prime_offset;
        let (_, rank_src) = transposer.partner(i_src, grid.team, grid.trank);
        let r_src = (i_src != last_iter && rank_src != grid.rank).then_some(rank_src);

        timers.time(Phase::SendReceive, || {
            world.send_receive(&r_j, r_dst, &mut temp_r, r_src)
        });

        if r_src.is_some() {
            for (r, t) in blk.r_i.iter_mut().zip(&temp_r) {
                *r += *t;
            }
        }

        timers.time(Phase::Shift, || {
            ring_shift(&topo.row, &grid, grid.teamsize, &mut blk.x_j);
            ring_shift(&topo.row, &grid, grid.teamsize, &mut blk.c_j);
        });

        let (i_dst, rank_dst) = transposer.partner(curr, grid.team, grid.trank);
        if i_dst != last_iter {
            r_dst = Some(rank_dst);
            r_j.fill(0.0);
            timers.time(Phase::Computation, || {
                p2p_block_symmetric(
                    kernel, &blk.x_j, &blk.c_j, &mut r_j, &blk.x_i, &blk.c_i, &mut blk.r_i,
                )
            });
        } else {
            r_dst = None;
            timers.time(Phase::Computation, || {
                p2p_block(kernel, &blk.x_j, &blk.c_j, &blk.x_i, &mut blk.r_i)
            });
        }
    }

    finish(world, &grid, &topo, &blk.r_i, &mut timers)
}
