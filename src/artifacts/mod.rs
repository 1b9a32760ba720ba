//! Repository data structures and algorithms
//!
//! - `branch`: branch names and the reference set
//! - `checkout`: working tree migration plans
//! - `core`: shared utilities (pager wrapper, tree copies)
//! - `diff`: path-by-path tree comparison
//! - `log`: history traversal for `graph`
//! - `merge`: merge base search
//! - `objects`: object ids, file trees and commits
//! - `status`: working tree status classification

pub mod branch;
pub mod checkout;
pub mod core;
pub mod diff;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
