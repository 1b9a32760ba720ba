//! Domain errors
//!
//! Commands return `anyhow::Result` like the rest of the crate; the failures a
//! caller may want to tell apart are raised as [`WitError`] values so they can
//! be recovered with `downcast_ref::<WitError>()`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WitError {
    /// The `add` target is neither a file nor a directory inside the repository.
    #[error("invalid path: {0}")]
    InvalidPath(PathBuf),

    /// The checkout target is neither a branch nor a known commit.
    #[error("invalid commit id: {0}")]
    InvalidCommitId(String),

    #[error("branch {0} already exists")]
    BranchExists(String),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// A reference lookup missed.
    #[error("reference not found: {0}")]
    NotFound(String),

    #[error("failed to {action} {path}")]
    IoFailure {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("your local changes would be overwritten; commit them before you {0}")]
    UncommittedChanges(&'static str),

    /// A merge would replace an untracked file with different content.
    #[error("untracked working tree file {0} would be overwritten by merge")]
    UntrackedOverwrite(PathBuf),

    #[error("not a wit repository (or any of the parent directories): {0}")]
    NotARepository(PathBuf),

    #[error("corrupt metadata in {path}: {reason}")]
    CorruptMetadata { path: PathBuf, reason: String },
}

impl WitError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WitError::IoFailure {
            action,
            path: path.into(),
            source,
        }
    }
}
