//! Porcelain commands (user-facing operations)
//!
//! Every command is an `impl Repository` block and holds the repository lock
//! for its whole run.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files or directories
//! - `commit`: Snapshot the staging area
//! - `status`: Show working tree status
//! - `branch`: Create or list branches
//! - `checkout`: Switch to a branch or commit
//! - `merge`: Union another branch into HEAD
//! - `graph`: Show the commit history reachable from HEAD

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod graph;
pub mod init;
pub mod merge;
pub mod status;
