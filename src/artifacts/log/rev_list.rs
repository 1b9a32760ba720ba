use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::collections::{HashMap, VecDeque};

/// Every commit reachable from a start commit over all parent links
///
/// Commits come out children first; among commits whose children are all out
/// already the newest goes first, ties broken by discovery order.
#[derive(new)]
pub struct RevList<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<Commit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> RevList<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<Commit>,
{
    pub fn walk(&self, start: &ObjectId) -> anyhow::Result<Vec<Commit>> {
        let (commits, discovery) = self.collect_reachable(start)?;

        let mut pending_children = HashMap::<&ObjectId, usize>::new();
        for commit in commits.values() {
            for parent in commit.parents() {
                *pending_children.entry(parent).or_default() += 1;
            }
        }

        let mut ready = vec![start];
        let mut ordered = Vec::with_capacity(commits.len());

        while !ready.is_empty() {
            let next = ready
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| {
                    commits[**a]
                        .timestamp()
                        .cmp(&commits[**b].timestamp())
                        .then_with(|| discovery[**b].cmp(&discovery[**a]))
                })
                .map(|(index, _)| index)
                .unwrap_or_default();
            let oid = ready.swap_remove(next);
            let commit = &commits[oid];

            for parent in commit.parents() {
                if let Some(count) = pending_children.get_mut(parent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push(parent);
                    }
                }
            }

            ordered.push(commit.clone());
        }

        Ok(ordered)
    }

    #[allow(clippy::type_complexity)]
    fn collect_reachable(
        &self,
        start: &ObjectId,
    ) -> anyhow::Result<(HashMap<ObjectId, Commit>, HashMap<ObjectId, usize>)> {
        let mut commits = HashMap::new();
        let mut discovery = HashMap::new();
        let mut queue = VecDeque::from([start.clone()]);

        while let Some(oid) = queue.pop_front() {
            if commits.contains_key(&oid) {
                continue;
            }

            let commit = (self.commit_loader)(&oid)?;
            queue.extend(commit.parents().iter().cloned());
            discovery.insert(oid.clone(), discovery.len());
            commits.insert(oid, commit);
        }

        Ok((commits, discovery))
    }
}
