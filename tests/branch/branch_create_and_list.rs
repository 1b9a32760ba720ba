use crate::common::command::{
    activated_branch, head_commit_id, init_repository_dir, read_reference, run_wit_command,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn create_branch_at_head(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);

    run_wit_command(dir, &["branch", "feature"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(read_reference(dir, "feature"), Some(head.clone()));
    assert_eq!(read_reference(dir, "master"), Some(head));
    assert_eq!(activated_branch(dir), "master");

    Ok(())
}

#[rstest]
fn list_branches_marks_the_activated_one(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_wit_command(dir, &["branch", "feature"]).assert().success();
    run_wit_command(dir, &["branch", "bugfix/issue-1"])
        .assert()
        .success();

    run_wit_command(dir, &["branch"])
        .assert()
        .success()
        .stdout("  bugfix/issue-1\n  feature\n* master\n");

    run_wit_command(dir, &["checkout", "feature"])
        .assert()
        .success();

    run_wit_command(dir, &["branch"])
        .assert()
        .success()
        .stdout("  bugfix/issue-1\n* feature\n  master\n");

    Ok(())
}
