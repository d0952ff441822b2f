//! Process-grid derivation and communicator construction.
//!
//! P processes are arranged as num_teams = P/C teams of C members. The
//! team index and team rank are derived from the world rank; two split
//! communicators connect, respectively, the members of one team and the
//! same-team-rank processes across teams.

use crate::comm::Transport;
use crate::error::{Result, TeamScatterError};

/// Rank of the coordinating process in every communicator.
pub const MASTER: usize = 0;

/// A process's coordinates in the team grid.
#[derive(Clone, Copy, Debug)]
pub struct TeamGrid {
    /// World rank.
    pub rank: usize,
    /// World size P.
    pub size: usize,
    /// Members per team, C.
    pub teamsize: usize,
    /// P / C.
    pub num_teams: usize,
    /// Team index, rank / C.
    pub team: usize,
    /// Rank within the team, rank mod C.
    pub trank: usize,
}

impl TeamGrid {
    /// Derive the grid for one process, checking the problem-size and
    /// team-shape preconditions in the order the runtime reports them.
    pub fn new(rank: usize, size: usize, teamsize: usize, numpoints: usize) -> Result<Self> {
        if teamsize == 0 {
            return Err(TeamScatterError::Precondition(
                "the teamsize (c) must be positive".into(),
            ));
        }
        if numpoints % size != 0 {
            return Err(TeamScatterError::Precondition(
                "the number of processors must divide the number of points".into(),
            ));
        }
        if size % teamsize != 0 {
            return Err(TeamScatterError::Precondition(
                "the teamsize (c) must divide the total number of processors (p)".into(),
            ));
        }
        if teamsize * teamsize > size {
            return Err(TeamScatterError::Precondition(
                "the teamsize squared (c^2) must be at most the number of processors (p)".into(),
            ));
        }
        Ok(Self {
            rank,
            size,
            teamsize,
            num_teams: size / teamsize,
            team: rank / teamsize,
            trank: rank % teamsize,
        })
    }

    /// Team leaders own the diagonal blocks and speak for their team in
    /// the scatter/gather stages.
    pub fn is_leader(&self) -> bool {
        self.trank == MASTER
    }

    /// Per-team block length B for a problem of `numpoints` points.
    pub fn block_len(&self, numpoints: usize) -> usize {
        numpoints.div_ceil(self.num_teams)
    }
}

/// The two split communicators of the team grid.
pub struct Topology<T: Transport> {
    /// The C processes sharing this process's team, ordered by trank.
    pub team: T,
    /// The num_teams processes sharing this process's trank, ordered by
    /// team — so a process's row rank equals its team index.
    pub row: T,
}

impl<T: Transport> Topology<T> {
    /// Split the world. Collective: every rank must call this.
    pub fn build(world: &T, grid: &TeamGrid) -> Self {
        let team = world.split(grid.team, grid.rank);
        let row = world.split(grid.trank, grid.rank);
        Self { team, row }
    }
}
