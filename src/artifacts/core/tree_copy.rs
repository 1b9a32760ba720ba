//! Filesystem primitives shared by the staging area, the image store and the
//! workspace
//!
//! Every tree in a repository is a plain directory, so staging a path,
//! snapshotting a commit and checking one out all reduce to copying files
//! verbatim between directories. The destination always wins: a directory in
//! the way of a file is removed, and so is a file in the way of a directory.

use crate::artifacts::objects::file_tree::is_metadata_dir;
use crate::errors::WitError;
use anyhow::Context;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Copy one file, creating (or clearing) whatever stands on the way to `dst`
pub fn copy_file(src: &Path, dst: &Path) -> anyhow::Result<()> {
    if dst.is_dir() {
        std::fs::remove_dir_all(dst).map_err(|source| WitError::io("remove", dst, source))?;
    }

    if let Some(parent) = dst.parent() {
        make_parent_dirs(parent)?;
    }

    std::fs::copy(src, dst).map_err(|source| WitError::io("copy", src, source))?;

    Ok(())
}

/// Copy every regular file below `src` into the same relative place below
/// `dst`, skipping metadata directories
///
/// Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> anyhow::Result<usize> {
    std::fs::create_dir_all(dst).map_err(|source| WitError::io("create", dst, source))?;
    if !src.exists() {
        return Ok(0);
    }

    let walker = WalkDir::new(src)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_metadata_dir(entry));

    let mut copied = 0;
    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", src.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative_path = entry.path().strip_prefix(src)?;
        copy_file(entry.path(), &dst.join(relative_path))?;
        copied += 1;
    }

    Ok(copied)
}

/// Replace `path` with `content` through a temporary file in the same
/// directory, so readers see either the old or the new content
pub fn write_atomically(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .with_context(|| format!("invalid file path {}", path.display()))?;
    let temp_path = dir.join(temp_name("tmp"));

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|source| WitError::io("create", &temp_path, source))?;
    file.write_all(content)
        .map_err(|source| WitError::io("write", &temp_path, source))?;
    file.sync_all()
        .map_err(|source| WitError::io("sync", &temp_path, source))?;

    std::fs::rename(&temp_path, path).map_err(|source| WitError::io("rename", path, source))?;

    Ok(())
}

/// Remove empty directories from `dir` upwards, stopping at `root`
pub fn prune_empty_dirs(root: &Path, dir: &Path) -> anyhow::Result<()> {
    let mut current = Some(dir);

    while let Some(dir) = current {
        if dir == root || !dir.starts_with(root) || !dir.is_dir() {
            break;
        }

        let is_empty = std::fs::read_dir(dir)
            .map_err(|source| WitError::io("read", dir, source))?
            .next()
            .is_none();
        if !is_empty {
            break;
        }

        std::fs::remove_dir(dir).map_err(|source| WitError::io("remove", dir, source))?;
        current = dir.parent();
    }

    Ok(())
}

pub fn temp_name(prefix: &str) -> String {
    format!("{prefix}-{}", rand::random::<u32>())
}

/// `create_dir_all`, except that files standing where a directory is needed
/// are removed first
fn make_parent_dirs(dir: &Path) -> anyhow::Result<()> {
    let blocking_file = dir
        .ancestors()
        .filter(|ancestor| ancestor.is_file())
        .map(PathBuf::from)
        .last();

    if let Some(file) = blocking_file {
        std::fs::remove_file(&file).map_err(|source| WitError::io("remove", file, source))?;
    }

    std::fs::create_dir_all(dir).map_err(|source| WitError::io("create", dir, source))?;

    Ok(())
}
