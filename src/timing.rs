//! Per-phase wall-clock accounting.
//!
//! Every process accumulates monotonic-clock time into one bucket per
//! phase. At end of run the buckets are sum-reduced to the master and
//! divided by the world size, giving the per-phase averages reported on
//! stdout.

use crate::comm::Transport;
use crate::topology::MASTER;
use std::time::{Duration, Instant};

/// The instrumented phases of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Computation,
    Split,
    Shift,
    SendReceive,
    Reduce,
}

const PHASE_COUNT: usize = 5;

/// Per-process phase accumulators plus the run's wall clock.
pub struct PhaseTimers {
    acc: [Duration; PHASE_COUNT],
    run_start: Instant,
}

impl PhaseTimers {
    /// Start the run clock with all phase buckets empty.
    pub fn start() -> Self {
        Self {
            acc: [Duration::ZERO; PHASE_COUNT],
            run_start: Instant::now(),
        }
    }

    /// Run `f`, charging its elapsed time to `phase`.
    pub fn time<R>(&mut self, phase: Phase, f: impl FnOnce() -> R) -> R {
        let t0 = Instant::now();
        let out = f();
        self.acc[phase as usize] += t0.elapsed();
        out
    }

    /// Seconds accumulated in `phase` on this process.
    pub fn elapsed(&self, phase: Phase) -> f64 {
        self.acc[phase as usize].as_secs_f64()
    }

    /// Seconds since the run clock started.
    pub fn total_elapsed(&self) -> f64 {
        self.run_start.elapsed().as_secs_f64()
    }

    /// Sum-reduce each phase across the world and divide by the world
    /// size. Collective; returns the averages on the master, `None`
    /// elsewhere. The master's wall clock is captured before the
    /// reduction so the reported total excludes it.
    pub fn average<T: Transport>(&self, world: &T) -> Option<PhaseAverages> {
        let p = world.size() as f64;
        let total = self.total_elapsed();
        let mut avg = [0.0f64; PHASE_COUNT];
        for (i, slot) in avg.iter_mut().enumerate() {
            let local = [self.acc[i].as_secs_f64()];
            let mut sum = [0.0f64];
            world.reduce_sum(MASTER, &local, &mut sum);
            *slot = sum[0] / p;
        }
        (world.rank() == MASTER).then_some(PhaseAverages {
            computation: avg[Phase::Computation as usize],
            split: avg[Phase::Split as usize],
            shift: avg[Phase::Shift as usize],
            send_receive: avg[Phase::SendReceive as usize],
            reduce: avg[Phase::Reduce as usize],
            rank0_total: total,
        })
    }
}

/// World-averaged phase times, available on the master.
#[derive(Clone, Copy, Debug)]
pub struct PhaseAverages {
    pub computation: f64,
    pub split: f64,
    pub shift: f64,
    pub send_receive: f64,
    pub reduce: f64,
    pub rank0_total: f64,
}

impl PhaseAverages {
    /// Print the tab-separated single-row report. The SendReceive column
    /// only exists for the symmetric algorithm.
    pub fn print_report(&self, label: &str, with_send_receive: bool) {
        if with_send_receive {
            println!("Label\tComputation\tSplit\tShift\tSendReceive\tReduce");
            println!(
                "{}\t{:e}\t{:e}\t{:e}\t{:e}\t{:e}",
                label, self.computation, self.split, self.shift, self.send_receive, self.reduce
            );
        } else {
            println!("Label\tComputation\tSplit\tShift\tReduce");
            println!(
                "{}\t{:e}\t{:e}\t{:e}\t{:e}",
                label, self.computation, self.split, self.shift, self.reduce
            );
        }
        println!("Rank 0 Total Time: {:e}", self.rank0_total);
    }
}
