//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character hexadecimal strings. They identify file contents
//! inside a snapshot and name commits in the image store.
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "abc123...def")
//! - Short: First 7 characters (e.g., "abc1234")

use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHORT_OBJECT_ID_LENGTH};
use sha1::{Digest, Sha1};

/// SHA-1 object identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character hexadecimal string
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Hash raw bytes into an object ID
    pub fn hash(data: &[u8]) -> Self {
        Self::from_hasher(Sha1::new_with_prefix(data))
    }

    pub fn from_hasher(hasher: Sha1) -> Self {
        let digest = hasher.finalize();
        Self(
            digest
                .iter()
                .map(|byte| format!("{:02x}", byte))
                .collect::<String>(),
        )
    }

    /// Whether `prefix` could abbreviate an object ID at all
    pub fn is_valid_prefix(prefix: &str) -> bool {
        !prefix.is_empty()
            && prefix.len() <= OBJECT_ID_LENGTH
            && prefix.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Get abbreviated form of the object ID
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(SHORT_OBJECT_ID_LENGTH).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
