//! Staging area
//!
//! The next commit's contents, kept as a plain directory tree mirroring part of
//! the working tree (`.wit/staging_area`). `add` copies files in, a commit
//! copies the whole directory into an image, and checkout replaces it with the
//! target snapshot.
//!
//! Staging never shrinks on `add`: deleting a file from the working tree and
//! adding its directory again leaves the old copy staged.

use crate::artifacts::core::tree_copy::{copy_file, copy_tree, temp_name};
use crate::artifacts::objects::file_tree::FileTree;
use crate::errors::WitError;
use std::path::Path;

#[derive(Debug)]
pub struct StagingArea {
    path: Box<Path>,
}

impl StagingArea {
    pub fn new(path: Box<Path>) -> Self {
        StagingArea { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tree(&self) -> anyhow::Result<FileTree> {
        FileTree::scan(&self.path)
    }

    /// Copy the file at `src` to `relative_path` inside the staging area
    pub fn stage_file(&self, src: &Path, relative_path: &Path) -> anyhow::Result<()> {
        copy_file(src, &self.path.join(relative_path))?;
        tracing::debug!(path = %relative_path.display(), "staged file");

        Ok(())
    }

    /// Copy every file below the directory `src` to `relative_path` inside the
    /// staging area
    pub fn stage_tree(&self, src: &Path, relative_path: &Path) -> anyhow::Result<usize> {
        let dst = self.path.join(relative_path);
        if dst.is_file() {
            std::fs::remove_file(&dst).map_err(|source| WitError::io("remove", &dst, source))?;
        }

        let copied = copy_tree(src, &dst)?;
        tracing::debug!(path = %relative_path.display(), files = copied, "staged directory");

        Ok(copied)
    }

    /// Make the staging area an exact copy of `snapshot`
    ///
    /// The copy is built next to the staging area and swapped in, so a failed
    /// copy leaves the previous contents in place.
    pub fn reset_to(&self, snapshot: &Path) -> anyhow::Result<()> {
        let parent = self.path.parent().unwrap_or(&self.path);
        let temp_path = parent.join(temp_name("tmp-staging"));

        let copied = copy_tree(snapshot, &temp_path)?;
        self.clear()?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|source| WitError::io("rename", self.path(), source))?;

        tracing::debug!(files = copied, "reset staging area");

        Ok(())
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        if self.path.exists() {
            std::fs::remove_dir_all(&self.path)
                .map_err(|source| WitError::io("remove", self.path(), source))?;
        }

        Ok(())
    }
}
