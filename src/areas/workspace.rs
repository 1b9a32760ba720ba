use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::tree_copy::{copy_file, prune_empty_dirs};
use crate::artifacts::objects::file_tree::{FileTree, METADATA_DIR};
use crate::errors::WitError;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tree(&self) -> anyhow::Result<FileTree> {
        FileTree::scan(&self.path)
    }

    /// Turn a user supplied path into one relative to the workspace root
    ///
    /// Relative paths are taken from `cwd`. The path must exist, resolve inside
    /// the workspace and stay out of any `.wit` directory.
    pub fn resolve_path(&self, cwd: &Path, path: &Path) -> anyhow::Result<PathBuf> {
        let invalid = || WitError::InvalidPath(path.to_path_buf());

        let absolute_path = cwd.join(path).canonicalize().map_err(|_| invalid())?;
        let relative_path = absolute_path
            .strip_prefix(&self.path)
            .map_err(|_| invalid())?
            .to_path_buf();

        let touches_metadata = relative_path.ancestors().any(|ancestor| {
            ancestor.file_name().is_some_and(|name| name == METADATA_DIR)
                && self.path.join(ancestor).is_dir()
        });
        if touches_metadata {
            return Err(invalid().into());
        }

        Ok(relative_path)
    }

    // Deletions first, pruning directories they leave empty, then every
    // target file is written so nothing just written gets pruned.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for relative_path in migration.deletions() {
            let path = self.path.join(relative_path);
            if path.is_file() {
                std::fs::remove_file(&path)
                    .map_err(|source| WitError::io("remove", &path, source))?;
            }

            if let Some(parent) = path.parent() {
                prune_empty_dirs(&self.path, parent)?;
            }
        }

        for relative_path in migration.writes() {
            copy_file(
                &migration.source_root().join(relative_path),
                &self.path.join(relative_path),
            )?;
        }

        tracing::debug!(
            deleted = migration.deletions().len(),
            written = migration.writes().len(),
            "applied migration to workspace"
        );

        Ok(())
    }
}
