//! In-process substitute transport.
//!
//! Runs P simulated ranks as threads of one process, communicating over
//! unbounded channels. Each endpoint owns a mailbox; messages are matched
//! by (communicator, sender) with out-of-order arrivals stashed, which
//! preserves FIFO delivery per sender per communicator — the same
//! ordering guarantee the real transport provides. Collectives are built
//! on the point-to-point layer with deterministic member ordering, so a
//! run is reproducible for a fixed configuration.
//!
//! `LocalWorld::run` drives a full simulated world and is what the
//! integration tests use; `LocalWorld::solo` provides the degenerate
//! single-process transport the binaries fall back to when the
//! `distributed` feature is disabled.

use super::{Transport, Wire};
use std::any::Any;
use std::cell::Cell;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// How long a receive may sit idle before the simulated world declares a
/// deadlock. Generous enough for debug-build kernels on loaded machines.
const RECV_TIMEOUT: Duration = Duration::from_secs(60);

struct Envelope {
    comm: u64,
    src: usize,
    /// Collective traffic is matched separately from point-to-point
    /// traffic, as the real transport's internal tag space does, so a
    /// stray point-to-point message can never satisfy a collective.
    collective: bool,
    payload: Box<dyn Any + Send>,
}

struct Mailbox {
    rx: Mutex<Receiver<Envelope>>,
    stash: Mutex<Vec<Envelope>>,
}

/// One simulated rank's handle onto the world (or onto a communicator
/// produced by `split`).
pub struct LocalTransport {
    endpoint: usize,
    mailbox: Arc<Mailbox>,
    senders: Vec<Sender<Envelope>>,
    /// Endpoint ids of this communicator's members, indexed by rank.
    members: Arc<Vec<usize>>,
    rank: usize,
    comm: u64,
    splits: Cell<u32>,
}

impl LocalTransport {
    fn send_to(&self, dst: usize, collective: bool, payload: Box<dyn Any + Send>) {
        let env = Envelope {
            comm: self.comm,
            src: self.endpoint,
            collective,
            payload,
        };
        self.senders[self.members[dst]]
            .send(env)
            .expect("local transport peer hung up");
    }

    fn recv_from<T: Wire>(&self, src: usize, collective: bool) -> Vec<T> {
        let want = self.members[src];
        let matches =
            |e: &Envelope| e.comm == self.comm && e.src == want && e.collective == collective;
        {
            let mut stash = self.mailbox.stash.lock().unwrap();
            if let Some(pos) = stash.iter().position(|e| matches(e)) {
                return unpack(stash.remove(pos));
            }
        }
        let rx = self.mailbox.rx.lock().unwrap();
        loop {
            let env = rx
                .recv_timeout(RECV_TIMEOUT)
                .expect("local transport receive timed out or peer hung up");
            if matches(&env) {
                return unpack(env);
            }
            self.mailbox.stash.lock().unwrap().push(env);
        }
    }
}

fn unpack<T: Wire>(env: Envelope) -> Vec<T> {
    *env.payload
        .downcast::<Vec<T>>()
        .expect("local transport payload type mismatch")
}

impl Transport for LocalTransport {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.members.len()
    }

    fn split(&self, color: usize, key: usize) -> Self {
        // All members agree on the per-parent split sequence number, so
        // the derived communicator id is identical across the group and
        // distinct from any other split of any communicator.
        let seq = self.splits.get();
        self.splits.set(seq + 1);
        let child = self
            .comm
            .wrapping_mul(0x9e37_79b9_7f4a_7c15)
            .wrapping_add(((seq as u64) << 32) ^ (color as u64 + 1));

        let p = self.size();
        let mine = [color as u64, key as u64];
        let mut all = vec![0u64; 2 * p];
        self.gather(0, &mine, &mut all);
        self.broadcast(0, &mut all);

        let mut group: Vec<(u64, usize)> = (0..p)
            .filter(|&r| all[2 * r] == color as u64)
            .map(|r| (all[2 * r + 1], r))
            .collect();
        group.sort_unstable();
        let members: Vec<usize> = group.iter().map(|&(_, r)| self.members[r]).collect();
        let rank = group
            .iter()
            .position(|&(_, r)| r == self.rank)
            .expect("split color must include the calling rank");

        LocalTransport {
            endpoint: self.endpoint,
            mailbox: Arc::clone(&self.mailbox),
            senders: self.senders.clone(),
            members: Arc::new(members),
            rank,
            comm: child,
            splits: Cell::new(0),
        }
    }

    fn broadcast<T: Wire>(&self, root: usize, buf: &mut [T]) {
        if self.rank == root {
            for r in 0..self.size() {
                if r != root {
                    self.send_to(r, true, Box::new(buf.to_vec()));
                }
            }
        } else {
            let v = self.recv_from::<T>(root, true);
            buf.copy_from_slice(&v);
        }
    }

    fn scatter<T: Wire>(&self, root: usize, send: &[T], recv: &mut [T]) {
        let b = recv.len();
        if self.rank == root {
            for r in 0..self.size() {
                let chunk = &send[r * b..(r + 1) * b];
                if r == root {
                    recv.copy_from_slice(chunk);
                } else {
                    self.send_to(r, true, Box::new(chunk.to_vec()));
                }
            }
        } else {
            let v = self.recv_from::<T>(root, true);
            recv.copy_from_slice(&v);
        }
    }

    fn gather<T: Wire>(&self, root: usize, send: &[T], recv: &mut [T]) {
        let b = send.len();
        if self.rank == root {
            for r in 0..self.size() {
                if r == root {
                    recv[r * b..(r + 1) * b].copy_from_slice(send);
                } else {
                    let v = self.recv_from::<T>(r, true);
                    recv[r * b..(r + 1) * b].copy_from_slice(&v);
                }
            }
        } else {
            self.send_to(root, true, Box::new(send.to_vec()));
        }
    }

    fn reduce_sum(&self, root: usize, send: &[f64], recv: &mut [f64]) {
        if self.rank == root {
            recv.copy_from_slice(send);
            for r in 0..self.size() {
                if r != root {
                    let v = self.recv_from::<f64>(r, true);
                    for (acc, x) in recv.iter_mut().zip(v) {
                        *acc += x;
                    }
                }
            }
        } else {
            self.send_to(root, true, Box::new(send.to_vec()));
        }
    }

    fn send_receive_replace<T: Wire>(&self, buf: &mut [T], dst: usize, src: usize) {
        // Channels are unbounded, so a send never blocks; a self-shift
        // simply passes through this endpoint's own mailbox.
        self.send_to(dst, false, Box::new(buf.to_vec()));
        let v = self.recv_from::<T>(src, false);
        buf.copy_from_slice(&v);
    }

    fn send_receive<T: Wire>(
        &self,
        send: &[T],
        dst: Option<usize>,
        recv: &mut [T],
        src: Option<usize>,
    ) {
        if let Some(d) = dst {
            self.send_to(d, false, Box::new(send.to_vec()));
        }
        if let Some(s) = src {
            let v = self.recv_from::<T>(s, false);
            recv.copy_from_slice(&v);
        }
    }

    fn barrier(&self) {
        let mut sink = vec![0u8; self.size()];
        self.gather(0, &[0u8], &mut sink);
        let mut token = [0u8];
        self.broadcast(0, &mut token);
    }

    fn abort(&self, code: i32) -> ! {
        panic!("transport abort with code {code}");
    }
}

/// Factory for simulated worlds.
pub struct LocalWorld;

impl LocalWorld {
    fn endpoints(size: usize) -> Vec<LocalTransport> {
        let mut txs = Vec::with_capacity(size);
        let mut rxs = Vec::with_capacity(size);
        for _ in 0..size {
            let (tx, rx) = channel();
            txs.push(tx);
            rxs.push(rx);
        }
        let members = Arc::new((0..size).collect::<Vec<_>>());
        rxs.into_iter()
            .enumerate()
            .map(|(i, rx)| LocalTransport {
                endpoint: i,
                mailbox: Arc::new(Mailbox {
                    rx: Mutex::new(rx),
                    stash: Mutex::new(Vec::new()),
                }),
                senders: txs.clone(),
                members: Arc::clone(&members),
                rank: i,
                comm: 0,
                splits: Cell::new(0),
            })
            .collect()
    }

    /// Run `f` on `size` simulated ranks, one thread each, and return the
    /// per-rank results ordered by rank. A panic on any rank (including a
    /// transport abort) is propagated to the caller.
    pub fn run<R, F>(size: usize, f: F) -> Vec<R>
    where
        F: Fn(LocalTransport) -> R + Sync,
        R: Send,
    {
        assert!(size > 0, "world must have at least one rank");
        let transports = Self::endpoints(size);
        thread::scope(|scope| {
            let handles: Vec<_> = transports
                .into_iter()
                .map(|t| {
                    let f = &f;
                    scope.spawn(move || f(t))
                })
                .collect();
            handles
                .into_iter()
                .map(|h| match h.join() {
                    Ok(r) => r,
                    Err(e) => std::panic::resume_unwind(e),
                })
                .collect()
        })
    }

    /// A world of one rank, running on the calling thread.
    pub fn solo() -> LocalTransport {
        Self::endpoints(1).pop().unwrap()
    }
}
