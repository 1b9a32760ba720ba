//! Reference storage
//!
//! Branch tips, HEAD and the activated branch live in two small files under
//! `.wit`:
//!
//! - `references.txt`: `HEAD=<id>` followed by one `<branch>=<id>` line per branch
//! - `activated.txt`: the tracked branch name, or `None` when detached
//!
//! Commands never edit these files piecemeal. They load the whole
//! [`ReferenceSet`], change it in memory and save it back; both files are
//! replaced through a temporary file and a rename.

use crate::artifacts::branch::reference_set::{Activated, ReferenceSet};
use crate::artifacts::core::tree_copy::write_atomically;
use crate::errors::WitError;
use derive_new::new;
use std::path::{Path, PathBuf};

const REFERENCES_FILE: &str = "references.txt";
const ACTIVATED_FILE: &str = "activated.txt";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (`.wit`)
    path: Box<Path>,
}

impl Refs {
    pub fn references_path(&self) -> PathBuf {
        self.path.join(REFERENCES_FILE)
    }

    pub fn activated_path(&self) -> PathBuf {
        self.path.join(ACTIVATED_FILE)
    }

    /// Read the reference set; missing files read as empty
    pub fn load(&self) -> anyhow::Result<ReferenceSet> {
        let references = Self::read_optional(&self.references_path())?;
        let activated = Self::read_optional(&self.activated_path())?;

        let activated = Activated::parse(&activated).map_err(|e| WitError::CorruptMetadata {
            path: self.activated_path(),
            reason: e.to_string(),
        })?;
        let mut reference_set =
            ReferenceSet::parse(&references, "").map_err(|e| WitError::CorruptMetadata {
                path: self.references_path(),
                reason: e.to_string(),
            })?;
        reference_set.set_activated(activated);

        Ok(reference_set)
    }

    pub fn save(&self, reference_set: &ReferenceSet) -> anyhow::Result<()> {
        write_atomically(
            &self.references_path(),
            reference_set.serialize_references().as_bytes(),
        )?;
        write_atomically(
            &self.activated_path(),
            reference_set.activated().serialize().as_bytes(),
        )?;

        tracing::debug!(
            head = ?reference_set.head().map(|oid| oid.to_short_oid()),
            activated = %reference_set.activated().serialize(),
            "saved references"
        );

        Ok(())
    }

    /// Load, mutate and save the reference set
    ///
    /// Nothing is written when `update` fails.
    pub fn update<T>(
        &self,
        update: impl FnOnce(&mut ReferenceSet) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        let mut reference_set = self.load()?;
        let result = update(&mut reference_set)?;
        self.save(&reference_set)?;

        Ok(result)
    }

    fn read_optional(path: &Path) -> anyhow::Result<String> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(source) => Err(WitError::io("read", path, source).into()),
        }
    }
}
