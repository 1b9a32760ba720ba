//! Flattened view of a directory tree
//!
//! A [`FileTree`] maps every regular file below a root directory to the hash of
//! its contents. The staging area, the working tree and every commit snapshot
//! are all read into this shape before being compared, so a directory that
//! exists on one side only naturally contributes every file beneath it.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::WitError;
use anyhow::Context;
use sha1::{Digest, Sha1};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Name of the repository metadata directory, never part of any tree
pub const METADATA_DIR: &str = ".wit";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    entries: BTreeMap<PathBuf, ObjectId>,
}

impl FileTree {
    /// Read every regular file under `root`, skipping the metadata directory
    ///
    /// A missing root yields an empty tree.
    pub fn scan(root: &Path) -> anyhow::Result<Self> {
        let mut entries = BTreeMap::new();

        if !root.exists() {
            return Ok(FileTree { entries });
        }

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_metadata_dir(entry));

        for entry in walker {
            let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let data = std::fs::read(entry.path())
                .map_err(|source| WitError::io("read", entry.path(), source))?;
            let relative_path = entry
                .path()
                .strip_prefix(root)
                .with_context(|| format!("{} escapes {}", entry.path().display(), root.display()))?
                .to_path_buf();

            entries.insert(relative_path, ObjectId::hash(&data));
        }

        Ok(FileTree { entries })
    }

    pub fn get(&self, path: &Path) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&PathBuf, &ObjectId)> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.keys()
    }

    /// Canonical hash of the whole tree
    ///
    /// Sorted `/`-separated paths with their content hashes, so the value does
    /// not depend on the platform or on the order files were written in.
    pub fn digest(&self) -> ObjectId {
        let mut hasher = Sha1::new();
        for (path, oid) in &self.entries {
            hasher.update(to_slash_path(path).as_bytes());
            hasher.update([0u8]);
            hasher.update(oid.as_ref().as_bytes());
            hasher.update(b"\n");
        }

        ObjectId::from_hasher(hasher)
    }
}

impl FromIterator<(PathBuf, ObjectId)> for FileTree {
    fn from_iter<T: IntoIterator<Item = (PathBuf, ObjectId)>>(iter: T) -> Self {
        FileTree {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A `.wit` directory below the walk root; files that happen to be named
/// `.wit` are ordinary content
pub fn is_metadata_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == METADATA_DIR
}

/// Render a relative path with `/` separators
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
