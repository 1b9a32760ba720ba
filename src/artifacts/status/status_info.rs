use crate::artifacts::diff::tree_diff::{DiffFilter, TreeChangeType, TreeDiff};
use crate::artifacts::objects::file_tree::FileTree;
use crate::artifacts::status::file_change::{
    FileChange, FileChangeType, IndexChangeType, WorkspaceChangeType,
};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub type ChangeSet = BTreeMap<PathBuf, FileChangeType>;
pub type FileSet = BTreeSet<PathBuf>;

/// Classification of every path against the last commit, the staging area and
/// the working tree
///
/// - `staged`: added or modified between the last commit and the staging area
/// - `modified_unstaged`: content differs between the staging area and the
///   working tree
/// - `untracked`: in the working tree but not in the staging area
///
/// Files missing from the working tree are not reported.
#[derive(Debug, Clone, Default)]
pub struct StatusInfo {
    pub(crate) changed_files: BTreeMap<PathBuf, FileChange>,
    pub(crate) index_changeset: ChangeSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

impl StatusInfo {
    pub fn from_trees(head: &FileTree, staging: &FileTree, workspace: &FileTree) -> Self {
        let mut status = StatusInfo::default();

        let head_diff = TreeDiff::compare(head, staging);
        for (path, change) in head_diff.changes() {
            let index_change = match change {
                TreeChangeType::Added(_) => IndexChangeType::Added,
                TreeChangeType::Modified { .. } => IndexChangeType::Modified,
                TreeChangeType::Removed(_) => continue,
            };

            status.record_index_change(path, index_change);
        }

        let workspace_diff = TreeDiff::compare(staging, workspace);
        for path in workspace_diff.paths(DiffFilter::MODIFIED) {
            status.record_workspace_change(path, WorkspaceChangeType::Modified);
        }
        for path in workspace_diff.paths(DiffFilter::ADDED) {
            status.untracked_files.insert(path.clone());
            status.record_workspace_change(path, WorkspaceChangeType::Untracked);
        }

        status
    }

    fn record_index_change(&mut self, path: &PathBuf, change: IndexChangeType) {
        self.index_changeset
            .insert(path.clone(), FileChangeType::Index(change.clone()));
        self.changed_files.entry(path.clone()).or_default().index_change = change;
    }

    fn record_workspace_change(&mut self, path: &PathBuf, change: WorkspaceChangeType) {
        if change == WorkspaceChangeType::Modified {
            self.workspace_changeset
                .insert(path.clone(), FileChangeType::Workspace(change.clone()));
        }
        self.changed_files
            .entry(path.clone())
            .or_default()
            .workspace_change = change;
    }

    pub fn staged(&self) -> impl Iterator<Item = &PathBuf> {
        self.index_changeset.keys()
    }

    pub fn modified_unstaged(&self) -> impl Iterator<Item = &PathBuf> {
        self.workspace_changeset.keys()
    }

    pub fn untracked(&self) -> impl Iterator<Item = &PathBuf> {
        self.untracked_files.iter()
    }

    pub fn index_changeset(&self) -> &ChangeSet {
        &self.index_changeset
    }

    pub fn workspace_changeset(&self) -> &ChangeSet {
        &self.workspace_changeset
    }

    pub fn changed_files(&self) -> &BTreeMap<PathBuf, FileChange> {
        &self.changed_files
    }

    /// Staged or modified-unstaged entries exist; untracked files don't count
    pub fn is_dirty(&self) -> bool {
        !self.index_changeset.is_empty() || !self.workspace_changeset.is_empty()
    }
}
