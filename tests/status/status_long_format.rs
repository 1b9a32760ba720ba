use crate::common::command::{init_repository_dir, repository_dir, run_wit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn long_status(dir: &std::path::Path) -> String {
    let output = run_wit_command(dir, &["status"]).assert().success();

    String::from_utf8_lossy(&output.get_output().stdout).to_string()
}

#[rstest]
fn clean_working_tree(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(
        long_status(init_repository_dir.path()),
        "On branch master\n\nnothing to commit, working tree clean\n"
    );

    Ok(())
}

#[rstest]
fn fresh_repository_has_no_commits(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_wit_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "x".to_string()));

    let expected = "\
On branch master

No commits yet

Untracked files:
        a.txt

nothing added to commit but untracked files present
";
    assert_eq!(long_status(dir), expected);

    Ok(())
}

#[rstest]
fn every_section_is_reported(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "staged".to_string()));
    run_wit_command(dir, &["add", "1.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("a").join("2.txt"), "edited".to_string()));
    write_file(FileSpec::new(dir.join("notes.txt"), "notes".to_string()));

    let expected = "\
On branch master

Changes to be committed:
        modified:   1.txt

Changes not staged for commit:
        modified:   a/2.txt

Untracked files:
        notes.txt
";
    assert_eq!(long_status(dir), expected);

    Ok(())
}

#[rstest]
fn unstaged_changes_only(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("a").join("b").join("3.txt"), "edited".to_string()));

    let expected = "\
On branch master

Changes not staged for commit:
        modified:   a/b/3.txt

no changes added to commit
";
    assert_eq!(long_status(dir), expected);

    Ok(())
}
