//! Working tree status
//!
//! Status is derived from three flattened trees (last commit, staging area,
//! working tree) and two [`TreeDiff`](crate::artifacts::diff::tree_diff::TreeDiff)s
//! between them. Nothing is written while computing it.
//!
//! ## Components
//!
//! - `file_change`: enum types for categorizing changes
//! - `status_info`: the classification and its change sets

pub mod file_change;
pub mod status_info;
