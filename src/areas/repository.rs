use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::staging::StagingArea;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::reference_set::ReferenceSet;
use crate::artifacts::objects::file_tree::{FileTree, METADATA_DIR};
use crate::artifacts::status::status_info::StatusInfo;
use crate::config::Config;
use crate::errors::WitError;
use file_guard::{FileGuard, Lock};
use std::cell::{RefCell, RefMut};
use std::fs::File;
use std::path::{Path, PathBuf};

const IMAGES_DIR: &str = "images";
const STAGING_DIR: &str = "staging_area";
const LOCK_FILE: &str = "lock";

/// Exclusive advisory lock on `.wit/lock`, released on drop
pub type RepositoryLock = FileGuard<Box<File>>;

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    config: Config,
    database: Database,
    staging: StagingArea,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open (without initializing) the repository rooted at `path`, creating
    /// the directory when it is missing
    pub fn new(
        path: &Path,
        writer: Box<dyn std::io::Write>,
        config: Config,
    ) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path).map_err(|source| WitError::io("create", path, source))?;
        }
        let path = path
            .canonicalize()
            .map_err(|source| WitError::io("resolve", path, source))?;

        let metadata_path = path.join(METADATA_DIR);
        let database = Database::new(metadata_path.join(IMAGES_DIR).into_boxed_path());
        let staging = StagingArea::new(metadata_path.join(STAGING_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(metadata_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            config,
            database,
            staging,
            workspace,
            refs,
        })
    }

    /// Open the repository containing `start`: the closest ancestor (or
    /// `start` itself) holding a `.wit` directory
    pub fn discover(
        start: &Path,
        writer: Box<dyn std::io::Write>,
        config: Config,
    ) -> anyhow::Result<Self> {
        let start = start
            .canonicalize()
            .map_err(|source| WitError::io("resolve", start, source))?;

        let root = start
            .ancestors()
            .find(|dir| dir.join(METADATA_DIR).is_dir())
            .ok_or_else(|| WitError::NotARepository(start.clone()))?;
        tracing::debug!(root = %root.display(), "found repository");

        Self::new(root, writer, config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.path.join(METADATA_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.metadata_path().is_dir()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Block until this process holds the repository lock
    pub fn lock(&self) -> anyhow::Result<RepositoryLock> {
        let lock_path = self.metadata_path().join(LOCK_FILE);
        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|source| WitError::io("open", &lock_path, source))?;

        let guard = file_guard::lock(Box::new(file), Lock::Exclusive, 0, 1)
            .map_err(|source| WitError::io("lock", &lock_path, source))?;

        Ok(guard)
    }

    /// Snapshot of the commit HEAD points at, empty before the first commit
    pub fn head_tree(&self, reference_set: &ReferenceSet) -> anyhow::Result<FileTree> {
        match reference_set.head() {
            Some(head) => self.database.load_snapshot(head),
            None => Ok(FileTree::default()),
        }
    }

    /// Classify every path; reads only
    pub fn status_info(&self, reference_set: &ReferenceSet) -> anyhow::Result<StatusInfo> {
        let head = self.head_tree(reference_set)?;
        let staging = self.staging.tree()?;
        let workspace = self.workspace.tree()?;

        Ok(StatusInfo::from_trees(&head, &staging, &workspace))
    }
}
