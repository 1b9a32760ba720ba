use crate::artifacts::objects::file_tree::FileTree;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::BTreeMap;
use std::path::PathBuf;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct DiffFilter: u32 {
        const ADDED = 0b0001;
        const REMOVED = 0b0010;
        const MODIFIED = 0b0100;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeChangeType {
    Added(ObjectId),
    Removed(ObjectId),
    Modified { old: ObjectId, new: ObjectId },
}

impl TreeChangeType {
    pub fn from_entries(old: Option<&ObjectId>, new: Option<&ObjectId>) -> Option<Self> {
        match (old, new) {
            (None, Some(new)) => Some(TreeChangeType::Added(new.clone())),
            (Some(old), None) => Some(TreeChangeType::Removed(old.clone())),
            (Some(old), Some(new)) if old != new => Some(TreeChangeType::Modified {
                old: old.clone(),
                new: new.clone(),
            }),
            _ => None,
        }
    }

    pub fn matches_filter(&self, filter: DiffFilter) -> bool {
        match self {
            TreeChangeType::Added(_) => filter.contains(DiffFilter::ADDED),
            TreeChangeType::Removed(_) => filter.contains(DiffFilter::REMOVED),
            TreeChangeType::Modified { .. } => filter.contains(DiffFilter::MODIFIED),
        }
    }
}

pub type ChangeSet = BTreeMap<PathBuf, TreeChangeType>;

/// Path-by-path comparison of two flattened trees
///
/// Every status category and the merge changeset are filtered views of one of
/// these.
#[derive(Debug, Default)]
pub struct TreeDiff {
    change_set: ChangeSet,
}

impl TreeDiff {
    pub fn compare(old: &FileTree, new: &FileTree) -> Self {
        let mut tree_diff = TreeDiff::default();
        tree_diff.detect_removals_and_modifications(old, new);
        tree_diff.detect_additions(old, new);
        tree_diff
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.change_set
    }

    /// Paths whose change kind is selected by `filter`, in path order
    pub fn paths(&self, filter: DiffFilter) -> impl Iterator<Item = &PathBuf> {
        self.change_set
            .iter()
            .filter(move |(_, change)| change.matches_filter(filter))
            .map(|(path, _)| path)
    }

    fn detect_removals_and_modifications(&mut self, old: &FileTree, new: &FileTree) {
        for (path, oid) in old.entries() {
            if let Some(change) = TreeChangeType::from_entries(Some(oid), new.get(path)) {
                self.change_set.insert(path.clone(), change);
            }
        }
    }

    fn detect_additions(&mut self, old: &FileTree, new: &FileTree) {
        for (path, oid) in new.entries() {
            if old.contains(path) {
                continue;
            }

            self.change_set
                .insert(path.clone(), TreeChangeType::Added(oid.clone()));
        }
    }
}
