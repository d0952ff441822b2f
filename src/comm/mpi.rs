//! MPI transport backend.
//!
//! Requires the `distributed` feature flag and an MPI installation.
//! The caller must initialize MPI before constructing the world
//! transport and keep the `Universe` alive for the duration of the run:
//!
//! ```ignore
//! let _universe = mpi::initialize().expect("MPI init failed");
//! let world = MpiTransport::world();
//! ```
//!
//! Errors raised by the MPI library terminate the job; nothing at this
//! layer is recoverable.

use super::{Transport, Wire};
use mpi::collective::SystemOperation;
use mpi::topology::{Color, SimpleCommunicator};
use mpi::traits::*;

/// Transport backed by an MPI communicator.
pub struct MpiTransport {
    comm: SimpleCommunicator,
}

impl MpiTransport {
    /// The world communicator. Panics if MPI has not been initialized.
    pub fn world() -> Self {
        Self {
            comm: SimpleCommunicator::world(),
        }
    }
}

impl Transport for MpiTransport {
    fn rank(&self) -> usize {
        self.comm.rank() as usize
    }

    fn size(&self) -> usize {
        self.comm.size() as usize
    }

    fn split(&self, color: usize, key: usize) -> Self {
        let comm = self
            .comm
            .split_by_color_with_key(Color::with_value(color as i32), key as i32)
            .expect("communicator split returned no communicator");
        Self { comm }
    }

    fn broadcast<T: Wire>(&self, root: usize, buf: &mut [T]) {
        self.comm.process_at_rank(root as i32).broadcast_into(buf);
    }

    fn scatter<T: Wire>(&self, root: usize, send: &[T], recv: &mut [T]) {
        let root_process = self.comm.process_at_rank(root as i32);
        if self.rank() == root {
            root_process.scatter_into_root(send, recv);
        } else {
            root_process.scatter_into(recv);
        }
    }

    fn gather<T: Wire>(&self, root: usize, send: &[T], recv: &mut [T]) {
        let root_process = self.comm.process_at_rank(root as i32);
        if self.rank() == root {
            root_process.gather_into_root(send, recv);
        } else {
            root_process.gather_into(send);
        }
    }

    fn reduce_sum(&self, root: usize, send: &[f64], recv: &mut [f64]) {
        let root_process = self.comm.process_at_rank(root as i32);
        if self.rank() == root {
            root_process.reduce_into_root(send, recv, SystemOperation::sum());
        } else {
            root_process.reduce_into(send, SystemOperation::sum());
        }
    }

    fn send_receive_replace<T: Wire>(&self, buf: &mut [T], dst: usize, src: usize) {
        let me = self.rank();
        if dst == me && src == me {
            return;
        }
        mpi::point_to_point::send_receive_replace_into(
            buf,
            &self.comm.process_at_rank(dst as i32),
            &self.comm.process_at_rank(src as i32),
        );
    }

    fn send_receive<T: Wire>(
        &self,
        send: &[T],
        dst: Option<usize>,
        recv: &mut [T],
        src: Option<usize>,
    ) {
        match (dst, src) {
            (Some(d), Some(s)) => {
                if d == self.rank() && s == self.rank() {
                    recv.copy_from_slice(send);
                } else {
                    mpi::point_to_point::send_receive_into(
                        send,
                        &self.comm.process_at_rank(d as i32),
                        recv,
                        &self.comm.process_at_rank(s as i32),
                    );
                }
            }
            (Some(d), None) => {
                self.comm.process_at_rank(d as i32).send(send);
            }
            (None, Some(s)) => {
                self.comm.process_at_rank(s as i32).receive_into(recv);
            }
            (None, None) => {}
        }
    }

    fn barrier(&self) {
        self.comm.barrier();
    }

    fn abort(&self, code: i32) -> ! {
        self.comm.abort(code)
    }
}
