use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::reference_set::{Activated, HEAD_REF_NAME, ReferenceSet};
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::WitError;

const DETACHMENT_NOTICE: &str = r#"
You are in 'detached HEAD' state. You can look around, make experimental
changes and commit them, and you can discard any commits you make in this
state without impacting any branches by performing another checkout.

If you want to create a new branch to retain commits you create, you may
do so (now or later) by using the branch command. Example:

    wit branch <new-branch-name>
"#;

impl Repository {
    /// Switch the working tree, the staging area and HEAD to a branch or commit
    ///
    /// Refused while there are staged or modified-unstaged changes. Untracked
    /// files survive unless the target has a file at the same path.
    pub fn checkout(&mut self, target: &str) -> anyhow::Result<()> {
        let _lock = self.lock()?;

        let reference_set = self.refs().load()?;
        let (target_oid, activated) = self.resolve_checkout_target(&reference_set, target)?;

        if self.status_info(&reference_set)?.is_dirty() {
            return Err(WitError::UncommittedChanges("checkout").into());
        }

        let tracked = self.staging().tree()?;
        let target_tree = self.database().load_snapshot(&target_oid)?;
        let snapshot_path = self.database().snapshot_path(&target_oid);

        let migration = Migration::for_checkout(&tracked, &target_tree, &snapshot_path);
        self.workspace().apply_migration(&migration)?;
        self.staging().reset_to(&snapshot_path)?;

        let previous = reference_set.activated().clone();
        self.refs().update(|reference_set| {
            reference_set.set(HEAD_REF_NAME, target_oid.clone())?;
            reference_set.set_activated(activated.clone());
            Ok(())
        })?;

        tracing::info!(
            target,
            oid = %target_oid.to_short_oid(),
            deleted = migration.deletions().len(),
            written = migration.writes().len(),
            "checked out"
        );
        self.print_new_head(&previous, &activated, &target_oid, target)?;

        Ok(())
    }

    /// A branch name wins over a commit id; ids may be abbreviated as long as
    /// the prefix is unique
    fn resolve_checkout_target(
        &self,
        reference_set: &ReferenceSet,
        target: &str,
    ) -> anyhow::Result<(ObjectId, Activated)> {
        if reference_set.is_branch(target) {
            let oid = reference_set.resolve(target)?;
            let branch_name = BranchName::try_parse(target.to_string())?;
            return Ok((oid, Activated::Branch(branch_name)));
        }

        match self.database().find_by_prefix(target)?.as_slice() {
            [oid] => Ok((oid.clone(), Activated::Detached)),
            [] => Err(WitError::InvalidCommitId(target.to_string()).into()),
            candidates => {
                tracing::debug!(target, candidates = candidates.len(), "ambiguous commit id");
                Err(WitError::InvalidCommitId(target.to_string()).into())
            }
        }
    }

    fn print_new_head(
        &self,
        previous: &Activated,
        activated: &Activated,
        target_oid: &ObjectId,
        target: &str,
    ) -> anyhow::Result<()> {
        match activated {
            Activated::Detached => {
                if previous != &Activated::Detached {
                    eprintln!("Note: checking out '{}'.\n{}", target, DETACHMENT_NOTICE);
                }

                let commit = self.database().load_commit(target_oid)?;
                eprintln!(
                    "HEAD is now at {} {}",
                    target_oid.to_short_oid(),
                    commit.short_message()
                );
            }
            Activated::Branch(_) if activated == previous => {
                eprintln!("Already on '{}'", target);
            }
            Activated::Branch(_) => {
                eprintln!("Switched to branch '{}'", target);
            }
        }

        Ok(())
    }
}
