//! Working tree migration
//!
//! A [`Migration`] is the plan for bringing the working tree in line with a
//! tree of files on disk (a commit snapshot for checkout, the staging area for
//! merge):
//!
//! 1. Delete tracked files that the target does not contain
//! 2. Prune directories left empty by those deletions
//! 3. Copy every target file into place
//!
//! Planning is pure; [`Workspace::apply_migration`](crate::areas::workspace::Workspace::apply_migration)
//! performs it.

use crate::artifacts::objects::file_tree::FileTree;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// Directory the written files are copied from
    source_root: PathBuf,
    deletions: Vec<PathBuf>,
    writes: Vec<PathBuf>,
}

impl Migration {
    /// Switch from the files tracked in `tracked` to the snapshot `target`
    /// stored at `snapshot_path`
    ///
    /// Untracked files are left alone unless the target overwrites them.
    pub fn for_checkout(tracked: &FileTree, target: &FileTree, snapshot_path: &Path) -> Self {
        let deletions = tracked
            .paths()
            .filter(|path| !target.contains(path))
            .cloned()
            .collect();
        let writes = target.paths().cloned().collect();

        Migration {
            source_root: snapshot_path.to_path_buf(),
            deletions,
            writes,
        }
    }

    /// Write the `merged` paths from the staging area at `staging_path`
    pub fn for_merge(merged: impl IntoIterator<Item = PathBuf>, staging_path: &Path) -> Self {
        Migration {
            source_root: staging_path.to_path_buf(),
            deletions: Vec::new(),
            writes: merged.into_iter().collect(),
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn deletions(&self) -> &[PathBuf] {
        &self.deletions
    }

    pub fn writes(&self) -> &[PathBuf] {
        &self.writes
    }
}
