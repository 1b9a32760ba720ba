//! Image store
//!
//! Every commit is an image: a full copy of the staging area at
//! `images/<id>/` plus its metadata record at `images/<id>.txt`.
//!
//! ## Write order
//!
//! The snapshot is copied into a temporary directory and renamed into place,
//! then the metadata record is written the same way. An image counts as present
//! only once its metadata exists, so a half-written snapshot left behind by an
//! interrupted commit is discarded and rebuilt on the next attempt.

use crate::artifacts::core::tree_copy::{copy_tree, temp_name, write_atomically};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::file_tree::FileTree;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::WitError;
use std::path::{Path, PathBuf};

const METADATA_EXTENSION: &str = "txt";

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn images_path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot_path(&self, oid: &ObjectId) -> PathBuf {
        self.path.join(oid.as_ref())
    }

    pub fn metadata_path(&self, oid: &ObjectId) -> PathBuf {
        self.path
            .join(format!("{}.{METADATA_EXTENSION}", oid.as_ref()))
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.metadata_path(oid).is_file()
    }

    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        let metadata_path = self.metadata_path(oid);
        let content = match std::fs::read_to_string(&metadata_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(WitError::NotFound(oid.to_string()).into());
            }
            Err(source) => return Err(WitError::io("read", metadata_path, source).into()),
        };

        Commit::deserialize(oid.clone(), &content).map_err(|e| {
            WitError::CorruptMetadata {
                path: metadata_path,
                reason: e.to_string(),
            }
            .into()
        })
    }

    pub fn load_parents(&self, oid: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
        Ok(self.load_commit(oid)?.parents().to_vec())
    }

    pub fn load_snapshot(&self, oid: &ObjectId) -> anyhow::Result<FileTree> {
        FileTree::scan(&self.snapshot_path(oid))
    }

    /// Persist `commit` with a copy of `staging_path` as its snapshot
    ///
    /// Returns `false` when an image with the same id already exists; it is
    /// left untouched.
    pub fn store(&self, commit: &Commit, staging_path: &Path) -> anyhow::Result<bool> {
        if self.contains(commit.oid()) {
            tracing::debug!(oid = %commit.oid().to_short_oid(), "image exists, reusing it");
            return Ok(false);
        }

        std::fs::create_dir_all(&self.path)
            .map_err(|source| WitError::io("create", self.images_path(), source))?;

        let snapshot_path = self.snapshot_path(commit.oid());
        if snapshot_path.exists() {
            tracing::warn!(path = %snapshot_path.display(), "discarding incomplete image");
            std::fs::remove_dir_all(&snapshot_path)
                .map_err(|source| WitError::io("remove", &snapshot_path, source))?;
        }

        let temp_path = self.path.join(temp_name("tmp-image"));
        let copied = copy_tree(staging_path, &temp_path)?;
        std::fs::rename(&temp_path, &snapshot_path)
            .map_err(|source| WitError::io("rename", &snapshot_path, source))?;

        write_atomically(
            &self.metadata_path(commit.oid()),
            commit.serialize().as_bytes(),
        )?;

        tracing::info!(
            oid = %commit.oid().to_short_oid(),
            files = copied,
            parents = commit.parents().len(),
            "stored image"
        );

        Ok(true)
    }

    /// Ids of every stored image whose id starts with `prefix`
    pub fn find_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        if !ObjectId::is_valid_prefix(prefix) || !self.path.is_dir() {
            return Ok(Vec::new());
        }
        let prefix = prefix.to_lowercase();

        let entries = std::fs::read_dir(&self.path)
            .map_err(|source| WitError::io("read", self.images_path(), source))?;

        let mut matches = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| WitError::io("read", self.images_path(), source))?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(METADATA_EXTENSION) {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if stem.starts_with(&prefix)
                && let Ok(oid) = ObjectId::try_parse(stem.to_string())
            {
                matches.push(oid);
            }
        }
        matches.sort();

        Ok(matches)
    }
}
