//! Repository data types
//!
//! - **ObjectId**: SHA-1 identifier used for file contents and commits
//! - **FileTree**: flattened path → content hash view of a directory
//! - **Commit**: parents, timestamp and message of one snapshot

pub mod commit;
pub mod file_tree;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of an abbreviated object id in user-facing output
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
