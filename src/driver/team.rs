//! Team Scatter: the 2-D decomposition without the transpose
//! optimization.
//!
//! Each team's block is replicated across its C members; the traveling
//! blocks advance C row positions per iteration, so the members of one
//! team jointly sweep C consecutive source teams each round. Every pair
//! of teams is evaluated in both directions.

use super::{finish, setup, RunReport};
use crate::comm::Transport;
use crate::kernel::{p2p_block, p2p_self, SymmetricKernel};
use crate::ring::ring_shift;
use crate::timing::{Phase, PhaseTimers};

/// Run the Team Scatter algorithm across `world`.
///
/// `source` and `charge` are significant on the world master. Returns
/// the gathered result and averaged phase times on the master, `None`
/// elsewhere.
pub fn run_team_scatter<K, T>(
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
        "team_scatter",
        rank = grid.rank,
        team = grid.team,
        trank = grid.trank
    )
    .entered();

    // ceil(P / C²), equivalently ceil(num_teams / C), rounds of blocks
    let last_iter = grid.num_teams.div_ceil(grid.teamsize) - 1;
    tracing::debug!(last_iter, "starting iteration loop");

    // Zeroth iteration: the leader's traveling block is still its own
    // block, so it takes the diagonal; the rest hold a skewed block and
    // compute one off-diagonal direction.
    if grid.is_leader() {
        timers.time(Phase::Computation, || {
            p2p_self(kernel, &blk.x_j, &blk.c_j, &mut blk.r_i)
        });
    } else {
        timers.time(Phase::Computation, || {
            p2p_block(kernel, &blk.x_j, &blk.c_j, &blk.x_i, &mut blk.r_i)
        });
    }

    for curr in 1..=last_iter {
        timers.time(Phase::Shift, || {
            ring_shift(&topo.row, &grid, grid.teamsize, &mut blk.x_j);
            ring_shift(&topo.row, &grid, grid.teamsize, &mut blk.c_j);
        });

        // On the final round, when the teamsize does not divide the team
        // count, only the first num_teams mod C members hold a block that
        // has not already been consumed by a teammate.
        let tail = grid.num_teams % grid.teamsize;
        if curr < last_iter || tail == 0 || grid.trank < tail {
            timers.time(Phase::Computation, || {
                p2p_block(kernel, &blk.x_j, &blk.c_j, &blk.x_i, &mut blk.r_i)
            });
        } else {
            tracing::debug!(iteration = curr, "tail member skips the final block");
        }
    }

    finish(world, &grid, &topo, &blk.r_i, &mut timers)
}
