use crate::common::command::{init_repository_dir, repository_dir, run_wit_command, status, wit_commit};
use crate::common::file::{FileSpec, delete_path, snapshot_metadata, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn modified_file_moves_from_unstaged_to_staged(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_wit_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "x".to_string()));
    run_wit_command(dir, &["add", "a.txt"]).assert().success();
    wit_commit(dir, "first").assert().success();

    assert_eq!(status(dir), "");

    write_file(FileSpec::new(dir.join("a.txt"), "y".to_string()));
    assert_eq!(status(dir), " M a.txt\n");

    run_wit_command(dir, &["add", "a.txt"]).assert().success();
    assert_eq!(status(dir), "M  a.txt\n");

    Ok(())
}

#[rstest]
fn staged_and_modified_again(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "staged".to_string()));
    run_wit_command(dir, &["add", "1.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "changed again".to_string()));

    assert_eq!(status(dir), "MM 1.txt\n");

    Ok(())
}

#[rstest]
fn new_files_are_untracked_until_added(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a").join("new.txt"), "new".to_string()));

    assert_eq!(status(dir), "?? a/new.txt\n");

    run_wit_command(dir, &["add", "a"]).assert().success();
    assert_eq!(status(dir), "A  a/new.txt\n");

    write_file(FileSpec::new(dir.join("a").join("new.txt"), "newer".to_string()));
    assert_eq!(status(dir), "AM a/new.txt\n");

    Ok(())
}

#[rstest]
fn deleted_files_are_not_reported(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    delete_path(&dir.join("a").join("b"));

    assert_eq!(status(dir), "");

    Ok(())
}

#[rstest]
fn status_does_not_touch_repository_state(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "staged".to_string()));
    run_wit_command(dir, &["add", "1.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("untracked.txt"), "u".to_string()));
    let metadata_before = snapshot_metadata(dir);

    let first = status(dir);
    let second = status(dir);

    assert_eq!(first, second);
    assert_eq!(snapshot_metadata(dir), metadata_before);

    Ok(())
}
