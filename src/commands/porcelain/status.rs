use crate::areas::repository::Repository;
use crate::artifacts::branch::reference_set::ReferenceSet;
use crate::artifacts::objects::file_tree::to_slash_path;
use crate::artifacts::status::status_info::{ChangeSet, StatusInfo};
use colored::Colorize;
use std::io::Write;

const LABEL_WIDTH: usize = 8;

impl Repository {
    pub fn status(&mut self, porcelain: bool) -> anyhow::Result<()> {
        let _lock = self.lock()?;

        let reference_set = self.refs().load()?;
        let status = self.status_info(&reference_set)?;

        if porcelain {
            self.print_porcelain_format(&status)?;
        } else {
            self.print_long_format(&status, &reference_set)?;
        }

        Ok(())
    }

    fn print_porcelain_format(&self, status: &StatusInfo) -> anyhow::Result<()> {
        for (file, change) in status.changed_files() {
            writeln!(self.writer(), "{} {}", change, to_slash_path(file))?;
        }

        Ok(())
    }

    fn print_long_format(
        &self,
        status: &StatusInfo,
        reference_set: &ReferenceSet,
    ) -> anyhow::Result<()> {
        self.print_branch_status(reference_set)?;

        self.print_changeset("Changes to be committed", status.index_changeset())?;
        self.print_changeset("Changes not staged for commit", status.workspace_changeset())?;
        self.print_untracked_files(status)?;

        self.print_commit_status(status)?;

        Ok(())
    }

    fn print_branch_status(&self, reference_set: &ReferenceSet) -> anyhow::Result<()> {
        match (reference_set.activated_branch(), reference_set.head()) {
            (Some(branch), _) => writeln!(self.writer(), "On branch {}", branch)?,
            (None, Some(head)) => writeln!(
                self.writer(),
                "{} {}",
                "HEAD detached at".red(),
                head.to_short_oid()
            )?,
            (None, None) => writeln!(self.writer(), "Not currently on any branch.")?,
        }

        if reference_set.head().is_none() {
            writeln!(self.writer(), "\nNo commits yet")?;
        }

        Ok(())
    }

    fn print_changeset(&self, message: &str, changeset: &ChangeSet) -> anyhow::Result<()> {
        if changeset.is_empty() {
            return Ok(());
        }

        writeln!(self.writer(), "\n{}:", message)?;
        for (file, change) in changeset {
            writeln!(self.writer(), "{}{}", change, to_slash_path(file))?;
        }

        Ok(())
    }

    fn print_untracked_files(&self, status: &StatusInfo) -> anyhow::Result<()> {
        if status.untracked_files.is_empty() {
            return Ok(());
        }

        writeln!(self.writer(), "\nUntracked files:")?;
        for file in status.untracked() {
            writeln!(
                self.writer(),
                "{:>width$}{}",
                "",
                to_slash_path(file).red(),
                width = LABEL_WIDTH
            )?;
        }

        Ok(())
    }

    fn print_commit_status(&self, status: &StatusInfo) -> anyhow::Result<()> {
        if !status.index_changeset().is_empty() {
            return Ok(());
        }

        if !status.workspace_changeset().is_empty() {
            writeln!(self.writer(), "\nno changes added to commit")?;
        } else if !status.untracked_files.is_empty() {
            writeln!(
                self.writer(),
                "\nnothing added to commit but untracked files present"
            )?;
        } else {
            writeln!(self.writer(), "\nnothing to commit, working tree clean")?;
        }

        Ok(())
    }
}
