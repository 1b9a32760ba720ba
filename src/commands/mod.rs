//! Command implementations
//!
//! - `porcelain`: user-facing commands (init, add, commit, status, branch,
//!   checkout, merge, graph)

pub mod porcelain;
