//! Commit metadata
//!
//! A commit is the metadata half of an image: the snapshot directory lives at
//! `images/<id>/` and this record at `images/<id>.txt`.
//!
//! ## Format
//!
//! ```text
//! parent=<parent-id>[, <second-parent-id>]
//! date=<Mon Jan 02 15:04:05 2006 +0000>
//! message=<commit message, may continue on following lines>
//! ```
//!
//! The root commit is written with `parent=None`.
//!
//! ## Identity
//!
//! The id is the SHA-1 of the snapshot digest, the parent ids and the message.
//! The timestamp is deliberately left out so equal content yields equal ids.

use crate::artifacts::objects::file_tree::FileTree;
use crate::artifacts::objects::object_id::ObjectId;
use chrono::{DateTime, FixedOffset};
use sha1::{Digest, Sha1};

const PARENT_KEY: &str = "parent=";
const DATE_KEY: &str = "date=";
const MESSAGE_KEY: &str = "message=";
const NO_PARENT: &str = "None";
const PARENT_SEPARATOR: &str = ", ";
const DATE_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    oid: ObjectId,
    parents: Vec<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    message: String,
}

impl Commit {
    pub fn new(
        tree: &FileTree,
        parents: Vec<ObjectId>,
        timestamp: DateTime<FixedOffset>,
        message: String,
    ) -> Self {
        let oid = Self::compute_oid(tree, &parents, &message);

        Commit {
            oid,
            parents,
            timestamp,
            message,
        }
    }

    fn compute_oid(tree: &FileTree, parents: &[ObjectId], message: &str) -> ObjectId {
        let mut hasher = Sha1::new();
        hasher.update(format!("tree {}\n", tree.digest()).as_bytes());
        for parent in parents {
            hasher.update(format!("parent {}\n", parent).as_bytes());
        }
        hasher.update(b"\n");
        hasher.update(message.as_bytes());

        ObjectId::from_hasher(hasher)
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    /// Format timestamp like "Sun Jan 01 12:00:00 2023 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format(DATE_FORMAT).to_string()
    }

    pub fn serialize(&self) -> String {
        let parents = if self.parents.is_empty() {
            NO_PARENT.to_string()
        } else {
            self.parents
                .iter()
                .map(|parent| parent.as_ref())
                .collect::<Vec<_>>()
                .join(PARENT_SEPARATOR)
        };

        format!(
            "{PARENT_KEY}{parents}\n{DATE_KEY}{}\n{MESSAGE_KEY}{}",
            self.readable_timestamp(),
            self.message
        )
    }

    /// Parse a metadata record previously written by [`Commit::serialize`]
    ///
    /// The id is taken from the image name, not recomputed.
    pub fn deserialize(oid: ObjectId, content: &str) -> anyhow::Result<Self> {
        let mut lines = content.splitn(3, '\n');

        let parent_line = lines
            .next()
            .and_then(|line| line.trim_end_matches('\r').strip_prefix(PARENT_KEY))
            .ok_or_else(|| anyhow::anyhow!("missing '{PARENT_KEY}' line"))?;
        let date_line = lines
            .next()
            .and_then(|line| line.trim_end_matches('\r').strip_prefix(DATE_KEY))
            .ok_or_else(|| anyhow::anyhow!("missing '{DATE_KEY}' line"))?;
        let message = lines
            .next()
            .and_then(|rest| rest.strip_prefix(MESSAGE_KEY))
            .ok_or_else(|| anyhow::anyhow!("missing '{MESSAGE_KEY}' line"))?;

        let parents = match parent_line.trim() {
            "" | NO_PARENT => Vec::new(),
            parents => parents
                .split(',')
                .map(|parent| ObjectId::try_parse(parent.trim().to_string()))
                .collect::<anyhow::Result<Vec<_>>>()?,
        };
        let timestamp = DateTime::parse_from_str(date_line.trim(), DATE_FORMAT)
            .map_err(|e| anyhow::anyhow!("invalid date '{}': {}", date_line, e))?;

        Ok(Commit {
            oid,
            parents,
            timestamp,
            message: message.to_string(),
        })
    }
}
