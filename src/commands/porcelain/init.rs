use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::reference_set::{Activated, ReferenceSet};
use crate::errors::WitError;
use std::fs;
use std::io::Write;

impl Repository {
    /// Create the `.wit` layout; running it again keeps every existing file
    pub fn init(&mut self) -> anyhow::Result<()> {
        let reinitialized = self.is_initialized();

        for dir in [
            self.metadata_path(),
            self.database().images_path().to_path_buf(),
            self.staging().path().to_path_buf(),
        ] {
            fs::create_dir_all(&dir).map_err(|source| WitError::io("create", dir, source))?;
        }

        let _lock = self.lock()?;

        if !self.refs().activated_path().exists() {
            let default_branch = BranchName::try_parse(self.config().default_branch.clone())?;
            self.refs()
                .save(&ReferenceSet::new(Activated::Branch(default_branch)))?;
        }

        let verb = if reinitialized {
            "Reinitialized existing"
        } else {
            "Initialized empty"
        };
        tracing::info!(path = %self.path().display(), reinitialized, "initialized repository");

        writeln!(
            self.writer(),
            "{} wit repository in {}",
            verb,
            self.metadata_path().display()
        )?;

        Ok(())
    }
}
