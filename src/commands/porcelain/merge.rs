use crate::areas::repository::Repository;
use crate::artifacts::branch::reference_set::HEAD_REF_NAME;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::diff::tree_diff::{DiffFilter, TreeDiff};
use crate::artifacts::merge::bca_finder::BCAFinder;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_info::StatusInfo;
use crate::errors::WitError;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

impl Repository {
    /// Union the changes HEAD and `target` made since their merge base into a
    /// two-parent commit
    ///
    /// Paths changed on both sides take the target's version. Untracked files
    /// are never overwritten with different content.
    pub fn merge(&mut self, target: &str, message: Option<&str>) -> anyhow::Result<()> {
        let _lock = self.lock()?;

        let reference_set = self.refs().load()?;
        let head_oid = reference_set.resolve(HEAD_REF_NAME)?;
        let merge_oid = reference_set.resolve(target)?;

        let status = self.status_info(&reference_set)?;
        if status.is_dirty() {
            return Err(WitError::UncommittedChanges("merge").into());
        }

        let base_oid = BCAFinder::new(|oid| self.database().load_parents(oid))
            .find_best_common_ancestor(&head_oid, &merge_oid)?
            .ok_or_else(|| {
                WitError::NotFound(format!("common ancestor of {HEAD_REF_NAME} and {target}"))
            })?;

        eprintln!(
            "Merging {} into {} (base {})",
            merge_oid.to_short_oid(),
            head_oid.to_short_oid(),
            base_oid.to_short_oid()
        );
        if base_oid == merge_oid {
            eprintln!("'{}' is already contained in {}", target, HEAD_REF_NAME);
        }

        // later sides overwrite earlier ones
        let mut merged = BTreeMap::<PathBuf, ObjectId>::new();
        for side in [&head_oid, &merge_oid] {
            for path in self.changes_since(&base_oid, side)? {
                merged.insert(path, side.clone());
            }
        }

        self.check_untracked_overwrites(&status, &merged)?;

        for (path, side) in &merged {
            let source = self.database().snapshot_path(side).join(path);
            self.staging().stage_file(&source, path)?;
        }
        tracing::debug!(files = merged.len(), "staged merged changes");

        self.workspace().apply_migration(&Migration::for_merge(
            merged.into_keys(),
            self.staging().path(),
        ))?;

        let message = message
            .map(|message| message.trim().to_string())
            .unwrap_or_else(|| format!("merged {} and {}", head_oid, merge_oid));
        let (commit, _) = self.write_commit(vec![head_oid, merge_oid], message, true)?;

        writeln!(
            self.writer(),
            "Merge made by the 'union' strategy: {}",
            commit.oid().to_short_oid()
        )?;

        Ok(())
    }

    /// Paths added or modified between `base` and `side`
    fn changes_since(&self, base: &ObjectId, side: &ObjectId) -> anyhow::Result<Vec<PathBuf>> {
        let base_tree = self.database().load_snapshot(base)?;
        let side_tree = self.database().load_snapshot(side)?;

        Ok(TreeDiff::compare(&base_tree, &side_tree)
            .paths(DiffFilter::ADDED | DiffFilter::MODIFIED)
            .cloned()
            .collect())
    }

    /// Fail when a merged path would replace an untracked file holding
    /// different content
    fn check_untracked_overwrites(
        &self,
        status: &StatusInfo,
        merged: &BTreeMap<PathBuf, ObjectId>,
    ) -> anyhow::Result<()> {
        for path in status.untracked() {
            let Some(side) = merged.get(path) else {
                continue;
            };

            let incoming = read_bytes(&self.database().snapshot_path(side).join(path))?;
            let current = read_bytes(&self.workspace().path().join(path))?;
            if incoming != current {
                return Err(WitError::UntrackedOverwrite(path.clone()).into());
            }
        }

        Ok(())
    }
}

fn read_bytes(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| WitError::io("read", path, source).into())
}
