use derive_new::new;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file_spec: FileSpec) {
    // make sure the parent directory exists
    if let Some(parent) = file_spec.path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(&file_spec.path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file_spec.path, e));
}

pub fn write_generated_files(dir: &Path, files_count: usize) -> Vec<FileSpec> {
    use fake::{
        Fake,
        faker::lorem::en::{Word, Words},
    };

    (0..files_count)
        .map(|index| {
            // the index keeps generated names unique
            let file_name = format!("{}_{}.txt", Word().fake::<String>(), index);
            let file_path = dir.join(&file_name);
            let file_content = Words(5..10).fake::<Vec<String>>().join(" ");

            let file_spec = FileSpec::new(file_path, file_content);
            write_file(file_spec.clone());

            file_spec
        })
        .collect::<Vec<_>>()
}

pub fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e))
}

pub fn delete_path(path: &Path) {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };

    result.unwrap_or_else(|e| panic!("Failed to delete {:?}: {}", path, e));
}

/// Every file below `dir` except the `.wit` directory, keyed by relative path
pub fn snapshot_dir(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(dir)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".wit")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative_path = entry
                .path()
                .strip_prefix(dir)
                .expect("walked path is below its root")
                .to_path_buf();
            let content = std::fs::read(entry.path())
                .unwrap_or_else(|e| panic!("Failed to read {:?}: {}", entry.path(), e));

            (relative_path, content)
        })
        .collect()
}

/// Remove everything in `dir` except the `.wit` directory
pub fn empty_working_tree(dir: &Path) {
    for entry in std::fs::read_dir(dir).expect("Failed to list working tree") {
        let path = entry.expect("Failed to read directory entry").path();
        if path.file_name().is_some_and(|name| name == ".wit") {
            continue;
        }

        delete_path(&path);
    }
}

/// Every file below `.wit` except the lock file, keyed by relative path
pub fn snapshot_metadata(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let metadata_dir = dir.join(".wit");

    WalkDir::new(&metadata_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && entry.file_name() != "lock")
        .map(|entry| {
            let relative_path = entry
                .path()
                .strip_prefix(&metadata_dir)
                .expect("walked path is below its root")
                .to_path_buf();
            let content = std::fs::read(entry.path())
                .unwrap_or_else(|e| panic!("Failed to read {:?}: {}", entry.path(), e));

            (relative_path, content)
        })
        .collect()
}
