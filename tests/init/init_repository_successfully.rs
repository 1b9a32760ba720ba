use crate::common::command::{activated_branch, repository_dir, run_wit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir_absolute_path = repository_dir.path().canonicalize()?.display().to_string();

    run_wit_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized empty wit repository in .+\.wit\n$",
        )?)
        .stdout(predicate::str::contains(dir_absolute_path));

    let metadata_dir = repository_dir.path().join(".wit");
    assert!(metadata_dir.join("images").is_dir());
    assert!(metadata_dir.join("staging_area").is_dir());
    assert_eq!(activated_branch(repository_dir.path()), "master");

    Ok(())
}

#[rstest]
fn init_repository_at_given_path(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_wit_command(repository_dir.path(), &["init", "project"])
        .assert()
        .success();

    assert!(repository_dir.path().join("project").join(".wit").is_dir());
    assert!(!repository_dir.path().join(".wit").exists());

    Ok(())
}

#[rstest]
fn init_uses_configured_default_branch(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_wit_command(repository_dir.path(), &["init"])
        .env("WIT_DEFAULT_BRANCH", "main")
        .assert()
        .success();

    assert_eq!(activated_branch(repository_dir.path()), "main");

    Ok(())
}
