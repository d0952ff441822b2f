//! Distributed iteration drivers.
//!
//! Both algorithms share the same bootstrap (metadata broadcast,
//! precondition check, communicator construction, block distribution,
//! initial skew) and the same teardown (team reduce, row gather, timing
//! averages); the loops in between differ.

mod symmetric;
mod team;

pub use symmetric::run_symmetric;
pub use team::run_team_scatter;

use crate::comm::Transport;
use crate::distribute::{distribute_blocks, gather_blocks};
use crate::kernel::Kernel;
use crate::ring::ring_shift;
use crate::timing::{Phase, PhaseAverages, PhaseTimers};
use crate::topology::{TeamGrid, Topology, MASTER};

/// Abort code used when a precondition fails after the metadata
/// broadcast. Usage errors exit with 1 before the distributed phase.
const PRECONDITION_EXIT: i32 = 2;

/// What the master gets back from a run. All other ranks get `None`.
pub struct RunReport {
    /// The gathered result vector, ordered by team block.
    pub result: Vec<f64>,
    /// World-averaged phase times.
    pub timing: PhaseAverages,
}

/// The per-process block buffers. `x_j`/`c_j` travel around the ring;
/// `x_i`/`c_i` stay put; `r_i` accumulates this process's share of the
/// home block's result.
pub(crate) struct Blocks<K: Kernel> {
    pub x_j: Vec<K::Source>,
    pub c_j: Vec<K::Charge>,
    pub x_i: Vec<K::Source>,
    pub c_i: Vec<K::Charge>,
    pub r_i: Vec<K::Result>,
}

/// Broadcast run metadata, validate, build communicators, distribute the
/// blocks and apply the initial per-team-rank skew.
///
/// `numpoints` and `teamsize` are significant on the world master;
/// every rank learns them from the broadcast. A precondition violation
/// is reported on the master and aborts the whole world, so no process
/// is left waiting in a later collective.
pub(crate) fn setup<K, T>(
    world: &T,
    numpoints: usize,
    teamsize: usize,
    source: &[K::Source],
    charge: &[K::Charge],
    timers: &mut PhaseTimers,
) -> (TeamGrid, Topology<T>, Blocks<K>)
where
    K: Kernel,
    T: Transport,
{
    let mut meta = [numpoints as u64];
    timers.time(Phase::Split, || world.broadcast(MASTER, &mut meta));
    let n = meta[0] as usize;
    let mut meta = [teamsize as u64];
    timers.time(Phase::Split, || world.broadcast(MASTER, &mut meta));
    let c = meta[0] as usize;

    let grid = match TeamGrid::new(world.rank(), world.size(), c, n) {
        Ok(grid) => grid,
        Err(e) => {
            if world.rank() == MASTER {
                eprintln!("Quitting. {e}");
            }
            world.abort(PRECONDITION_EXIT);
        }
    };

    let topo = Topology::build(world, &grid);

    let b = grid.block_len(n);
    let mut x_j = vec![K::Source::default(); b];
    let mut c_j = vec![K::Charge::default(); b];
    timers.time(Phase::Split, || {
        distribute_blocks(&topo, &grid, source, &mut x_j);
        distribute_blocks(&topo, &grid, charge, &mut c_j);
    });

    // The home block is an independent copy; the traveling block departs
    // with the first shift.
    let x_i = x_j.clone();
    let c_i = c_j.clone();
    let r_i = vec![K::Result::default(); b];

    timers.time(Phase::Shift, || {
        ring_shift(&topo.row, &grid, grid.trank, &mut x_j);
        ring_shift(&topo.row, &grid, grid.trank, &mut c_j);
    });

    (
        grid,
        topo,
        Blocks {
            x_j,
            c_j,
            x_i,
            c_i,
            r_i,
        },
    )
}

/// Team sum-reduce of the result accumulators to the leaders, row gather
/// to the master, then the timing reduction. Returns the master's
/// report.
pub(crate) fn finish<T: Transport>(
    world: &T,
    grid: &TeamGrid,
    topo: &Topology<T>,
    r_i: &[f64],
    timers: &mut PhaseTimers,
) -> Option<RunReport> {
    let b = r_i.len();
    let mut team_r = if grid.is_leader() {
        vec![0.0f64; b]
    } else {
        Vec::new()
    };
    timers.time(Phase::Reduce, || {
        topo.team.reduce_sum(MASTER, r_i, &mut team_r)
    });

    let mut result = if grid.rank == MASTER {
        vec![0.0f64; b * grid.num_teams]
    } else {
        Vec::new()
    };
    gather_blocks(topo, grid, &team_r, &mut result);

    let timing = timers.average(world)?;
    Some(RunReport { result, timing })
}
