//! Distributed dense all-pairs interaction sums.
//!
//! Given N points with charges, computes r_i = Σ_j K(x_i, x_j)·c_j
//! across P processes using a 2-D team decomposition: the processes form
//! num_teams = P/C teams of C members, each team's block is replicated
//! across its members, and the traveling source blocks circulate around
//! a ring of team leaders' rows. Two variants are provided: plain Team
//! Scatter ([`driver::run_team_scatter`]) and Symmetric Team Scatter
//! ([`driver::run_symmetric`]), which exploits K(a,b) = K(b,a) to
//! evaluate each pair of blocks once, shipping the transpose
//! contribution to its scheduled owner.
//!
//! The transport is abstracted behind [`comm::Transport`]; an MPI
//! backend is available behind the `distributed` feature, and an
//! in-process multi-threaded transport backs the test suite and
//! single-process runs.

pub mod app;
pub mod cli;
pub mod comm;
pub mod distribute;
pub mod driver;
pub mod error;
pub mod io;
pub mod kernel;
pub mod points;
pub mod ring;
pub mod timing;
pub mod topology;
pub mod transpose;
pub mod verify;
