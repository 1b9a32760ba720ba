use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::reference_set::HEAD_REF_NAME;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Create `branch_name` at HEAD, or list every branch when no name is given
    pub fn branch(&mut self, branch_name: Option<&str>) -> anyhow::Result<()> {
        let _lock = self.lock()?;

        match branch_name {
            Some(branch_name) => self.create_branch(branch_name),
            None => self.list_branches(),
        }
    }

    fn create_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        self.refs().update(|reference_set| {
            let head = reference_set.resolve(HEAD_REF_NAME)?;
            tracing::info!(branch = %branch_name, at = %head.to_short_oid(), "creating branch");

            reference_set.create_branch(branch_name, head)
        })
    }

    fn list_branches(&self) -> anyhow::Result<()> {
        let reference_set = self.refs().load()?;
        let activated = reference_set.activated_branch();

        for (name, _) in reference_set.branches() {
            if Some(name) == activated {
                writeln!(self.writer(), "* {}", name.as_ref().green())?;
            } else {
                writeln!(self.writer(), "  {}", name)?;
            }
        }

        Ok(())
    }
}
