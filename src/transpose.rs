//! Locating the holder of a block's transpose.
//!
//! During the symmetric algorithm, the process computing block (a, b)
//! must route the simultaneously computed (b, a) contribution to the
//! process scheduled to hold that block. The mapping below identifies
//! that process from the block's (iteration, team, team-rank)
//! coordinates alone.

/// Maps (iteration, team, team-rank) to the (iteration, world rank) at
/// which the transpose block is scheduled.
#[derive(Clone, Copy, Debug)]
pub struct IndexTransposer {
    num_teams: usize,
    teamsize: usize,
}

impl IndexTransposer {
    pub fn new(num_teams: usize, teamsize: usize) -> Self {
        Self { num_teams, teamsize }
    }

    /// The column held at (team, trank) in iteration `iter` is
    /// Y = (team + trank + iter·C) mod T; its circular distance from the
    /// diagonal is D = (team − Y) mod T. The transpose block then sits at
    /// iteration D/C on world rank Y·C + D mod C.
    ///
    /// Iterations outside the loop range are accepted (the receive-side
    /// derivation produces them); callers null out the result.
    pub fn partner(&self, iter: i64, team: usize, trank: usize) -> (i64, usize) {
        let t = self.num_teams as i64;
        let c = self.teamsize as i64;
        let y = (team as i64 + trank as i64 + iter * c).rem_euclid(t);
        let d = (team as i64 - y).rem_euclid(t);
        (d / c, (y * c + d % c) as usize)
    }
}
