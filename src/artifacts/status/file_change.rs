use colored::Colorize;

const LABEL_WIDTH: usize = 8;

/// Change between the staging area and the working tree
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WorkspaceChangeType {
    #[default]
    None,
    Untracked,
    Modified,
}

impl From<&WorkspaceChangeType> for &str {
    fn from(change: &WorkspaceChangeType) -> Self {
        match change {
            WorkspaceChangeType::None => " ",
            WorkspaceChangeType::Untracked => "?",
            WorkspaceChangeType::Modified => "M",
        }
    }
}

/// Change between the last commit and the staging area
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum IndexChangeType {
    #[default]
    None,
    Added,
    Modified,
}

impl From<&IndexChangeType> for &str {
    fn from(change: &IndexChangeType) -> Self {
        match change {
            IndexChangeType::None => " ",
            IndexChangeType::Added => "A",
            IndexChangeType::Modified => "M",
        }
    }
}

/// One labelled line of the long status format
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileChangeType {
    Workspace(WorkspaceChangeType),
    Index(IndexChangeType),
}

impl From<&FileChangeType> for &str {
    fn from(change: &FileChangeType) -> Self {
        match change {
            FileChangeType::Workspace(workspace_change) => match workspace_change {
                WorkspaceChangeType::None | WorkspaceChangeType::Untracked => "",
                WorkspaceChangeType::Modified => "modified:   ",
            },
            FileChangeType::Index(index_change) => match index_change {
                IndexChangeType::None => "",
                IndexChangeType::Added => "new file:   ",
                IndexChangeType::Modified => "modified:   ",
            },
        }
    }
}

impl std::fmt::Display for FileChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label: &str = self.into();
        let colored_str = match self {
            FileChangeType::Workspace(_) => label.red(),
            FileChangeType::Index(_) => label.green(),
        };
        write!(f, "{:>width$}{}", "", colored_str, width = LABEL_WIDTH)
    }
}

/// Both columns of a path's porcelain status
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct FileChange {
    pub(crate) index_change: IndexChangeType,
    pub(crate) workspace_change: WorkspaceChangeType,
}

impl From<&FileChange> for String {
    fn from(change: &FileChange) -> Self {
        if change.workspace_change == WorkspaceChangeType::Untracked {
            return "??".to_string();
        }

        let index_str: &str = (&change.index_change).into();
        let workspace_str: &str = (&change.workspace_change).into();
        format!("{}{}", index_str, workspace_str)
    }
}

impl std::fmt::Display for FileChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let change_str: String = self.into();
        write!(f, "{}", change_str)
    }
}
