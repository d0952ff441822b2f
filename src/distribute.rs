//! Fanning problem data out to the grid and collecting results back.
//!
//! Source and charge arrays live on the world master. Team leaders
//! receive one block each through a scatter over the leaders' row
//! communicator; each leader then broadcasts its block to its team. The
//! reverse path gathers one block per team leader back to the master.

use crate::comm::{Transport, Wire};
use crate::topology::{TeamGrid, Topology, MASTER};

/// Master → team-leader scatter followed by intra-team broadcast.
/// `full` is significant on the world master only; on return every
/// process's `block` holds its team's data.
pub fn distribute_blocks<T, W>(topo: &Topology<T>, grid: &TeamGrid, full: &[W], block: &mut [W])
where
    T: Transport,
    W: Wire,
{
    if grid.is_leader() {
        topo.row.scatter(MASTER, full, block);
    }
    topo.team.broadcast(MASTER, block);
}

/// Team-leader row gather into the master's `full` buffer, ordered by
/// team index. Non-leaders do not participate.
pub fn gather_blocks<T, W>(topo: &Topology<T>, grid: &TeamGrid, block: &[W], full: &mut [W])
where
    T: Transport,
    W: Wire,
{
    if grid.is_leader() {
        topo.row.gather(MASTER, block, full);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comm::local::LocalWorld;
    use crate::comm::Transport;

    /// After distribution every member of a team holds the same block —
    /// the replication the compute loop depends on.
    #[test]
    fn every_team_member_holds_its_teams_block() {
        let got = LocalWorld::run(8, |world| {
            let grid = TeamGrid::new(world.rank(), world.size(), 2, 8).unwrap();
            let topo = Topology::build(&world, &grid);
            let full: Vec<f64> = if world.rank() == MASTER {
                (0..8).map(|i| i as f64 * 10.0).collect()
            } else {
                Vec::new()
            };
            let mut block = vec![0.0f64; 2];
            distribute_blocks(&topo, &grid, &full, &mut block);
            block
        });
        for rank in 0..8 {
            let team = rank / 2;
            let expect: Vec<f64> = (0..2).map(|i| (team * 2 + i) as f64 * 10.0).collect();
            assert_eq!(got[rank], expect, "rank {rank}");
        }
    }

    #[test]
    fn gather_orders_blocks_by_team() {
        let got = LocalWorld::run(4, |world| {
            let grid = TeamGrid::new(world.rank(), world.size(), 2, 8).unwrap();
            let topo = Topology::build(&world, &grid);
            let block = vec![grid.team as f64; 4];
            let mut full = if world.rank() == MASTER {
                vec![0.0f64; 8]
            } else {
                Vec::new()
            };
            gather_blocks(&topo, &grid, &block, &mut full);
            full
        });
        assert_eq!(got[0], vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
    }
}
