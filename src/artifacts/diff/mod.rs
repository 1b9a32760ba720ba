//! Tree comparison
//!
//! - `tree_diff`: tags every path of two [`FileTree`](crate::artifacts::objects::file_tree::FileTree)s
//!   as added, removed or modified

pub mod tree_diff;
