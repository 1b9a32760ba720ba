//! Commit history traversal for `graph`
//!
//! - `rev_list`: every commit reachable from HEAD, children before parents

pub mod rev_list;
