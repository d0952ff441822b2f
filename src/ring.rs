//! Ring shift of the traveling blocks across the row communicator.

use crate::comm::{Transport, Wire};
use crate::topology::TeamGrid;

/// Shift `buf` by `stride` positions around the row ring, in place:
/// send to (team − stride) mod num_teams, refill from
/// (team + stride) mod num_teams. After the shift the block held at row
/// position t originates from position (t + stride) mod num_teams.
///
/// The initial skew uses stride = trank; each loop iteration uses
/// stride = teamsize.
pub fn ring_shift<T, W>(row: &T, grid: &TeamGrid, stride: usize, buf: &mut [W])
where
    T: Transport,
    W: Wire,
{
    let nt = grid.num_teams;
    let s = stride % nt;
    let dst = (grid.team + nt - s) % nt;
    let src = (grid.team + s) % nt;
    row.send_receive_replace(buf, dst, src);
}
