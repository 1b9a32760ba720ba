use crate::areas::repository::Repository;
use crate::errors::WitError;
use std::path::{Path, PathBuf};

impl Repository {
    /// Copy files or whole directories into the staging area
    ///
    /// Every path is validated before anything is staged, so one bad path
    /// leaves the staging area untouched. Only regular files and directories
    /// can be added.
    pub fn add(&mut self, cwd: &Path, paths: &[PathBuf]) -> anyhow::Result<()> {
        let _lock = self.lock()?;

        let relative_paths = paths
            .iter()
            .map(|path| {
                let relative_path = self.workspace().resolve_path(cwd, path)?;
                let source = self.path().join(&relative_path);
                if !source.is_file() && !source.is_dir() {
                    return Err(WitError::InvalidPath(path.clone()).into());
                }

                Ok(relative_path)
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        for relative_path in relative_paths {
            let source = self.path().join(&relative_path);

            if source.is_dir() {
                self.staging().stage_tree(&source, &relative_path)?;
            } else {
                self.staging().stage_file(&source, &relative_path)?;
            }
        }

        Ok(())
    }
}
