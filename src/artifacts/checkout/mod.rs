//! Checkout planning
//!
//! Switching commits replaces the working tree and the staging area with a
//! stored snapshot. It is refused while staged or modified-unstaged changes
//! exist, so the only conflict left to handle is an untracked file standing
//! where a snapshot file goes; the snapshot wins.

pub mod migration;
