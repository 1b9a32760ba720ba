use crate::common::command::{
    commit_file, head_commit_id, init_repository_dir, repository_dir, run_wit_command, wit_merge,
};
use crate::common::file::{FileSpec, read_file, snapshot_dir, snapshot_metadata, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn dirty_tree_blocks_merge(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_wit_command(dir, &["branch", "feature"]).assert().success();
    commit_file(dir, "4.txt", "four", "master commit");
    write_file(FileSpec::new(dir.join("1.txt"), "local edit".to_string()));
    let working_tree_before = snapshot_dir(dir);
    let metadata_before = snapshot_metadata(dir);

    wit_merge(dir, "feature")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("commit them before you merge"));

    assert_eq!(snapshot_dir(dir), working_tree_before);
    assert_eq!(snapshot_metadata(dir), metadata_before);

    Ok(())
}

/// Commits `notes.txt` with `content` on a new `feature` branch, then returns
/// to master
fn commit_notes_on_feature(dir: &std::path::Path, content: &str) {
    run_wit_command(dir, &["branch", "feature"]).assert().success();
    run_wit_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir, "notes.txt", content, "feature notes");
    run_wit_command(dir, &["checkout", "master"])
        .assert()
        .success();
}

#[rstest]
fn untracked_file_blocks_merge_that_would_replace_it(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_notes_on_feature(dir, "branch notes");
    write_file(FileSpec::new(
        dir.join("notes.txt"),
        "my untracked notes".to_string(),
    ));
    let head = head_commit_id(dir);
    let metadata_before = snapshot_metadata(dir);

    wit_merge(dir, "feature")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "untracked working tree file notes.txt would be overwritten by merge",
        ));

    assert_eq!(read_file(&dir.join("notes.txt")), "my untracked notes");
    assert_eq!(snapshot_metadata(dir), metadata_before);
    assert_eq!(head_commit_id(dir), head);

    Ok(())
}

#[rstest]
fn identical_untracked_file_does_not_block_merge(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_notes_on_feature(dir, "same notes");
    write_file(FileSpec::new(dir.join("notes.txt"), "same notes".to_string()));

    wit_merge(dir, "feature").assert().success();

    assert_eq!(read_file(&dir.join("notes.txt")), "same notes");

    Ok(())
}

#[rstest]
fn unknown_branch_is_not_found(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);

    wit_merge(dir, "missing")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("reference not found: missing"));

    assert_eq!(head_commit_id(dir), head);

    Ok(())
}

#[rstest]
fn merge_needs_a_commit(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_wit_command(dir, &["init"]).assert().success();

    wit_merge(dir, "master")
        .assert()
        .failure()
        .stderr(predicate::str::contains("reference not found"));

    Ok(())
}
