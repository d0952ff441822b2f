//! Transport abstraction for the distributed choreography.
//!
//! Provides a trait covering the message-passing surface the algorithms
//! need (communicator split, broadcast, scatter, gather, sum-reduce,
//! blocking send-receive with in-place replace) together with two
//! implementations: `MpiTransport` (via the mpi crate, `distributed`
//! feature) and `LocalTransport` (in-process threads, used by the test
//! suite and by single-process runs).

pub mod local;
#[cfg(feature = "distributed")]
pub mod mpi;

/// Marker for element types that can cross the transport: plain
/// fixed-size values with a zero default. With the `distributed` feature
/// the type must additionally map to an MPI datatype.
#[cfg(feature = "distributed")]
pub trait Wire: Copy + Default + Send + Sync + 'static + ::mpi::traits::Equivalence {}
#[cfg(not(feature = "distributed"))]
pub trait Wire: Copy + Default + Send + Sync + 'static {}

impl Wire for u8 {}
impl Wire for u64 {}
impl Wire for f64 {}

/// Abstraction over inter-process communication.
///
/// All operations are blocking and collective in the MPI sense: every
/// member of the communicator must enter the matching call. Failures at
/// this layer are fatal — implementations panic or abort rather than
/// return errors, so that no process unwinds past a pending collective.
pub trait Transport: Sized {
    /// This process's rank within the communicator.
    fn rank(&self) -> usize;

    /// Number of processes in the communicator.
    fn size(&self) -> usize;

    /// Split into sub-communicators by `color`, ordering members within
    /// each new communicator by `key` (ties broken by the old rank).
    fn split(&self, color: usize, key: usize) -> Self;

    /// Broadcast `buf` from `root` to every member.
    fn broadcast<T: Wire>(&self, root: usize, buf: &mut [T]);

    /// Distribute equal-length chunks of `send` (significant on `root`
    /// only) to every member's `recv`.
    fn scatter<T: Wire>(&self, root: usize, send: &[T], recv: &mut [T]);

    /// Collect every member's `send` into `recv` on `root` (ignored
    /// elsewhere), ordered by rank.
    fn gather<T: Wire>(&self, root: usize, send: &[T], recv: &mut [T]);

    /// Element-wise sum of `send` across members into `recv` on `root`
    /// (ignored elsewhere).
    fn reduce_sum(&self, root: usize, send: &[f64], recv: &mut [f64]);

    /// Send `buf` to `dst` and refill it with the block received from
    /// `src`, in place.
    fn send_receive_replace<T: Wire>(&self, buf: &mut [T], dst: usize, src: usize);

    /// Combined send/receive where either endpoint may be absent: a
    /// `None` destination sends nothing, a `None` source leaves `recv`
    /// untouched. Neither case blocks the other side.
    fn send_receive<T: Wire>(
        &self,
        send: &[T],
        dst: Option<usize>,
        recv: &mut [T],
        src: Option<usize>,
    );

    /// Synchronization barrier.
    fn barrier(&self);

    /// Terminate all processes of the world this communicator belongs to.
    fn abort(&self, code: i32) -> !;
}
