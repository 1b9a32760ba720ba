use crate::common::command::{
    activated_branch, commit_file, head_commit_id, init_repository_dir, read_reference,
    run_wit_command, status,
};
use crate::common::file::{FileSpec, read_file, snapshot_dir, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn switch_between_branches(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let initial = head_commit_id(dir);
    let initial_tree = snapshot_dir(dir);
    run_wit_command(dir, &["branch", "feature"]).assert().success();

    let feature_head = {
        run_wit_command(dir, &["checkout", "feature"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Switched to branch 'feature'"));
        commit_file(dir, "feature.txt", "feature work", "feature commit")
    };
    let feature_tree = snapshot_dir(dir);

    assert_eq!(read_reference(dir, "feature"), Some(feature_head.clone()));
    assert_eq!(read_reference(dir, "master"), Some(initial.clone()));

    run_wit_command(dir, &["checkout", "master"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Switched to branch 'master'"));

    assert_eq!(head_commit_id(dir), initial);
    assert_eq!(activated_branch(dir), "master");
    assert!(!dir.join("feature.txt").exists());
    assert_eq!(snapshot_dir(dir), initial_tree);
    assert_eq!(status(dir), "");

    run_wit_command(dir, &["checkout", "feature"])
        .assert()
        .success();

    assert_eq!(head_commit_id(dir), feature_head);
    assert_eq!(snapshot_dir(dir), feature_tree);

    Ok(())
}

#[rstest]
fn checkout_current_branch_reports_already_on(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_wit_command(dir, &["checkout", "master"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Already on 'master'"));

    assert_eq!(activated_branch(dir), "master");

    Ok(())
}

#[rstest]
fn removed_files_and_empty_directories_are_pruned(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_wit_command(dir, &["branch", "before-nested"])
        .assert()
        .success();
    commit_file(dir, "c/d/4.txt", "four", "nested commit");

    run_wit_command(dir, &["checkout", "before-nested"])
        .assert()
        .success();

    assert!(!dir.join("c").exists());
    assert_eq!(read_file(&dir.join("a").join("b").join("3.txt")), "three");

    Ok(())
}

#[rstest]
fn untracked_files_survive_checkout(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_wit_command(dir, &["branch", "feature"]).assert().success();
    commit_file(dir, "2.txt", "two", "second commit");
    write_file(FileSpec::new(dir.join("scratch.txt"), "scratch".to_string()));

    run_wit_command(dir, &["checkout", "feature"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("scratch.txt")), "scratch");
    assert!(!dir.join("2.txt").exists());
    assert_eq!(status(dir), "?? scratch.txt\n");

    Ok(())
}
