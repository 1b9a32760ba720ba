use crate::areas::repository::Repository;
use crate::artifacts::branch::reference_set::{HEAD_REF_NAME, ReferenceSet};
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Print every commit reachable from HEAD, newest first, with its parent
    /// links and the references pointing at it
    pub fn graph(&mut self) -> anyhow::Result<()> {
        let _lock = self.lock()?;

        let reference_set = self.refs().load()?;
        let Some(head) = reference_set.head().cloned() else {
            writeln!(self.writer(), "No commits yet")?;
            return Ok(());
        };

        let commits = RevList::new(|oid| self.database().load_commit(oid)).walk(&head)?;

        for commit in &commits {
            self.show_graph_node(commit, &reference_set)?;
        }

        Ok(())
    }

    fn show_graph_node(&self, commit: &Commit, reference_set: &ReferenceSet) -> anyhow::Result<()> {
        let marker = if commit.is_merge() { "M" } else { "*" };

        writeln!(
            self.writer(),
            "{} {}{} {}",
            marker,
            commit.oid().to_short_oid().yellow(),
            Self::decoration(commit, reference_set),
            commit.short_message()
        )?;

        let parents = commit
            .parents()
            .iter()
            .map(|parent| parent.to_short_oid())
            .collect::<Vec<_>>();
        if !parents.is_empty() {
            writeln!(self.writer(), "| \\-> {}", parents.join(", "))?;
        }
        writeln!(self.writer(), "|     {}", commit.readable_timestamp())?;

        Ok(())
    }

    fn decoration(commit: &Commit, reference_set: &ReferenceSet) -> String {
        let mut names = Vec::new();

        if reference_set.head() == Some(commit.oid()) {
            match reference_set.activated_branch() {
                Some(branch) => names.push(format!("{HEAD_REF_NAME} -> {branch}")),
                None => names.push(HEAD_REF_NAME.to_string()),
            }
        }

        let activated = reference_set.activated_branch();
        for (name, oid) in reference_set.branches() {
            let already_shown = Some(name) == activated && reference_set.head() == Some(oid);
            if oid == commit.oid() && !already_shown {
                names.push(name.to_string());
            }
        }

        if names.is_empty() {
            String::new()
        } else {
            format!(" ({})", names.join(", ")).cyan().to_string()
        }
    }
}
