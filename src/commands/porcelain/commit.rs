use crate::areas::repository::Repository;
use crate::artifacts::branch::reference_set::ReferenceSet;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let _lock = self.lock()?;

        let parents = self.refs().load()?.head().cloned().into_iter().collect();
        let message = message.trim().to_string();

        let (commit, reference_set) = self.write_commit(parents, message, false)?;
        self.print_commit_summary(&commit, &reference_set)?;

        Ok(())
    }

    /// Snapshot the staging area as a commit with `parents` and move HEAD to it
    ///
    /// The image is fully written before any reference changes. `force_branch`
    /// advances the activated branch even when it is not at HEAD.
    pub(crate) fn write_commit(
        &self,
        parents: Vec<ObjectId>,
        message: String,
        force_branch: bool,
    ) -> anyhow::Result<(Commit, ReferenceSet)> {
        let tree = self.staging().tree()?;
        let commit = Commit::new(&tree, parents, self.config().now(), message);

        self.database().store(&commit, self.staging().path())?;

        let reference_set = self.refs().update(|reference_set| {
            reference_set.advance_head(commit.oid().clone(), force_branch);
            Ok(reference_set.clone())
        })?;

        Ok((commit, reference_set))
    }

    fn print_commit_summary(
        &self,
        commit: &Commit,
        reference_set: &ReferenceSet,
    ) -> anyhow::Result<()> {
        let location = match reference_set.activated_branch() {
            Some(branch) => branch.to_string(),
            None => "detached HEAD".to_string(),
        };
        let is_root = if commit.is_root() {
            " (root-commit)"
        } else {
            ""
        };

        writeln!(
            self.writer(),
            "[{}{} {}] {}",
            location,
            is_root,
            commit.oid().to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }
}
