//! Common ancestor finder for merges
//!
//! Finds the merge base of two commits: the common ancestor closest to the
//! second commit.
//!
//! ## Algorithm
//!
//! ### Phase 1: Mark the source history
//!
//! Breadth-first from the source commit over **every** parent, marking each
//! reached commit (the source itself included) as `VISITED_FROM_SOURCE`.
//!
//! ### Phase 2: Search from the target
//!
//! Breadth-first from the target commit (itself included), again over every
//! parent. The first commit already marked from the source side is the merge
//! base, the lowest common ancestor by BFS distance from the target.
//!
//! Following all parents instead of only the first one keeps the result right
//! for histories where the only way back to the real base goes through the
//! second parent of an earlier merge.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let finder = BCAFinder::new(|oid| database.load_commit(oid).map(|c| c.parents().to_vec()));
//! let base = finder.find_best_common_ancestor(&head_oid, &merge_oid)?;
//! ```

use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, VecDeque};
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

/// Finds the merge base between two commits
///
/// # Type Parameters
///
/// * `ParentsLoaderFn` - loads the ordered parent ids of a commit; root commits
///   yield an empty vector
pub struct BCAFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    parents_loader: ParentsLoaderFn,
}

impl<ParentsLoaderFn> BCAFinder<ParentsLoaderFn>
where
    ParentsLoaderFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    pub fn new(parents_loader: ParentsLoaderFn) -> Self {
        Self { parents_loader }
    }

    /// Returns the merge base of `source` and `target`, or `None` when their
    /// histories are disjoint
    pub fn find_best_common_ancestor(
        &self,
        source: &ObjectId,
        target: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut states = HashMap::<ObjectId, VisitState>::new();

        self.mark_ancestors(source, &mut states)?;
        tracing::debug!(
            source = %source.to_short_oid(),
            ancestors = states.len(),
            "marked source history"
        );

        let mut queue = VecDeque::from([target.clone()]);
        while let Some(oid) = queue.pop_front() {
            let state = states.entry(oid.clone()).or_insert(VisitState::NONE);
            if state.contains(VisitState::VISITED_FROM_TARGET) {
                continue;
            }
            *state |= VisitState::VISITED_FROM_TARGET;

            if state.contains(VisitState::VISITED_FROM_BOTH) {
                tracing::debug!(
                    base = %oid.to_short_oid(),
                    state = ?*state,
                    "found best common ancestor"
                );
                return Ok(Some(oid));
            }

            queue.extend((self.parents_loader)(&oid)?);
        }

        tracing::debug!(
            source = %source.to_short_oid(),
            target = %target.to_short_oid(),
            "no common ancestor"
        );
        Ok(None)
    }

    fn mark_ancestors(
        &self,
        start: &ObjectId,
        states: &mut HashMap<ObjectId, VisitState>,
    ) -> anyhow::Result<()> {
        let mut queue = VecDeque::from([start.clone()]);

        while let Some(oid) = queue.pop_front() {
            let state = states.entry(oid.clone()).or_insert(VisitState::NONE);
            if state.contains(VisitState::VISITED_FROM_SOURCE) {
                continue;
            }
            *state |= VisitState::VISITED_FROM_SOURCE;

            queue.extend((self.parents_loader)(&oid)?);
        }

        Ok(())
    }
}
