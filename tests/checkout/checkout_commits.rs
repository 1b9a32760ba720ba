use crate::common::command::{
    activated_branch, commit_file, head_commit_id, init_repository_dir, read_reference,
    run_wit_command, status,
};
use crate::common::file::{empty_working_tree, snapshot_dir};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_full_id_detaches_head(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let initial = head_commit_id(dir);
    let second = commit_file(dir, "4.txt", "four", "second commit");

    run_wit_command(dir, &["checkout", &initial])
        .assert()
        .success()
        .stderr(predicate::str::contains("You are in 'detached HEAD' state."))
        .stderr(predicate::str::contains(format!(
            "HEAD is now at {} Initial commit",
            &initial[..7]
        )));

    assert_eq!(head_commit_id(dir), initial);
    assert_eq!(activated_branch(dir), "None");
    assert_eq!(read_reference(dir, "master"), Some(second));
    assert!(!dir.join("4.txt").exists());

    run_wit_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "HEAD detached at {}",
            &initial[..7]
        )));

    Ok(())
}

#[rstest]
fn checkout_unique_prefix(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let initial = head_commit_id(dir);
    commit_file(dir, "4.txt", "four", "second commit");

    run_wit_command(dir, &["checkout", &initial[..10]])
        .assert()
        .success();

    assert_eq!(head_commit_id(dir), initial);
    assert_eq!(activated_branch(dir), "None");

    Ok(())
}

#[rstest]
fn commit_while_detached_leaves_branches_alone(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let initial = head_commit_id(dir);
    run_wit_command(dir, &["checkout", &initial])
        .assert()
        .success();

    let detached = commit_file(dir, "4.txt", "four", "detached commit");

    assert_ne!(detached, initial);
    assert_eq!(head_commit_id(dir), detached);
    assert_eq!(read_reference(dir, "master"), Some(initial));

    Ok(())
}

#[rstest]
fn checkout_restores_an_emptied_working_tree(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let initial = head_commit_id(dir);
    let initial_tree = snapshot_dir(dir);

    empty_working_tree(dir);
    assert!(snapshot_dir(dir).is_empty());

    run_wit_command(dir, &["checkout", &initial])
        .assert()
        .success();

    assert_eq!(snapshot_dir(dir), initial_tree);
    assert_eq!(status(dir), "");

    Ok(())
}

#[rstest]
#[case("0000000000000000000000000000000000000000")]
#[case("not-a-commit")]
#[case("")]
fn unknown_target_is_an_invalid_commit_id(
    init_repository_dir: TempDir,
    #[case] target: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = head_commit_id(dir);

    run_wit_command(dir, &["checkout", target])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid commit id"));

    assert_eq!(head_commit_id(dir), head);
    assert_eq!(activated_branch(dir), "master");

    Ok(())
}
