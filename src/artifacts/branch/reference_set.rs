//! In-memory reference set
//!
//! Branch tips, HEAD and the activated branch, loaded once per command by
//! [`Refs`](crate::areas::refs::Refs), mutated in memory and written back as a
//! whole.
//!
//! ## File Format
//!
//! `references.txt` holds one `name=commit_id` pair per line, `HEAD` first and
//! branches after it in name order. `activated.txt` holds the name of the
//! branch HEAD tracks, or `None` when HEAD is detached.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::WitError;
use std::collections::BTreeMap;

/// Reserved key of the checked-out commit
pub const HEAD_REF_NAME: &str = "HEAD";

/// Content of `activated.txt` when no branch is tracked
pub const DETACHED_SENTINEL: &str = "None";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activated {
    Branch(BranchName),
    Detached,
}

impl Activated {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        match content.trim() {
            "" | DETACHED_SENTINEL => Ok(Activated::Detached),
            name => Ok(Activated::Branch(BranchName::try_parse(name.to_string())?)),
        }
    }

    pub fn serialize(&self) -> String {
        match self {
            Activated::Branch(name) => name.to_string(),
            Activated::Detached => DETACHED_SENTINEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSet {
    head: Option<ObjectId>,
    branches: BTreeMap<BranchName, ObjectId>,
    activated: Activated,
}

impl ReferenceSet {
    pub fn new(activated: Activated) -> Self {
        ReferenceSet {
            head: None,
            branches: BTreeMap::new(),
            activated,
        }
    }

    pub fn parse(references: &str, activated: &str) -> anyhow::Result<Self> {
        let mut reference_set = ReferenceSet::new(Activated::parse(activated)?);

        for (line_number, line) in references.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (name, oid) = line.split_once('=').ok_or_else(|| {
                anyhow::anyhow!("line {} is not a name=commit_id pair", line_number + 1)
            })?;
            let oid = ObjectId::try_parse(oid.trim().to_string())?;

            if name == HEAD_REF_NAME {
                reference_set.head = Some(oid);
            } else {
                let name = BranchName::try_parse(name.to_string())?;
                reference_set.branches.insert(name, oid);
            }
        }

        Ok(reference_set)
    }

    pub fn serialize_references(&self) -> String {
        let mut content = String::new();

        if let Some(head) = &self.head {
            content.push_str(&format!("{HEAD_REF_NAME}={head}\n"));
        }
        for (name, oid) in &self.branches {
            content.push_str(&format!("{name}={oid}\n"));
        }

        content
    }

    /// Look up `HEAD` or a branch name
    pub fn resolve(&self, name: &str) -> anyhow::Result<ObjectId> {
        self.try_resolve(name)
            .cloned()
            .ok_or_else(|| WitError::NotFound(name.to_string()).into())
    }

    pub fn try_resolve(&self, name: &str) -> Option<&ObjectId> {
        if name == HEAD_REF_NAME {
            return self.head.as_ref();
        }

        self.branches
            .iter()
            .find(|(branch, _)| branch.as_ref() == name)
            .map(|(_, oid)| oid)
    }

    /// Create or replace `HEAD` or a branch
    pub fn set(&mut self, name: &str, oid: ObjectId) -> anyhow::Result<()> {
        if name == HEAD_REF_NAME {
            self.head = Some(oid);
        } else {
            self.branches
                .insert(BranchName::try_parse(name.to_string())?, oid);
        }

        Ok(())
    }

    pub fn create_branch(&mut self, name: BranchName, oid: ObjectId) -> anyhow::Result<()> {
        if self.branches.contains_key(&name) {
            return Err(WitError::BranchExists(name.to_string()).into());
        }

        self.branches.insert(name, oid);
        Ok(())
    }

    pub fn head(&self) -> Option<&ObjectId> {
        self.head.as_ref()
    }

    pub fn activated(&self) -> &Activated {
        &self.activated
    }

    pub fn activated_branch(&self) -> Option<&BranchName> {
        match &self.activated {
            Activated::Branch(name) => Some(name),
            Activated::Detached => None,
        }
    }

    pub fn set_activated(&mut self, activated: Activated) {
        self.activated = activated;
    }

    pub fn branches(&self) -> impl Iterator<Item = (&BranchName, &ObjectId)> {
        self.branches.iter()
    }

    pub fn is_branch(&self, name: &str) -> bool {
        self.branches.keys().any(|branch| branch.as_ref() == name)
    }

    /// Move HEAD to a freshly written commit
    ///
    /// The activated branch follows only when it pointed at the previous HEAD,
    /// unless `force_branch` is set (merge commits). A branch that does not
    /// exist yet is created, which is how the first commit creates the default
    /// branch.
    pub fn advance_head(&mut self, new_head: ObjectId, force_branch: bool) {
        let previous_head = self.head.replace(new_head.clone());

        if let Activated::Branch(name) = &self.activated {
            let follows = match self.branches.get(name) {
                Some(tip) => force_branch || previous_head.as_ref() == Some(tip),
                None => true,
            };

            if follows {
                self.branches.insert(name.clone(), new_head);
            } else {
                tracing::warn!(branch = %name, "activated branch is not at HEAD, leaving it behind");
            }
        }
    }
}
