use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use std::path::{Path, PathBuf};
use wit::areas::repository::Repository;
use wit::artifacts::core::PagerWriter;
use wit::config::Config;
use wit::errors::WitError;

#[derive(Parser)]
#[command(
    name = "wit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small local version-control tool",
    long_about = "wit snapshots a working directory into immutable commits, \
    tracks branches, reports status against the last commit \
    and merges branches by unioning their changes.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path. \
        Running it on an existing repository leaves its state untouched."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "add",
        about = "Copy files into the staging area",
        long_about = "This command copies the given files, or every file below the given directories, \
        into the staging area so they are part of the next commit."
    )]
    Add {
        #[arg(index = 1, required = true, num_args = 1.., help = "Files or directories to stage")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command snapshots the staging area as a new commit and moves HEAD to it."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show the working tree status",
        long_about = "This command lists staged changes, unstaged modifications and untracked files."
    )]
    Status {
        #[arg(long, help = "Print the two-column machine-readable format")]
        porcelain: bool,
    },
    #[command(
        name = "checkout",
        about = "Switch to a branch or commit",
        long_about = "This command replaces the working tree and the staging area with the snapshot of a branch \
        or commit. A commit id may be abbreviated as long as it is unique. \
        It is refused while there are uncommitted changes."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name or commit id")]
        target: String,
    },
    #[command(
        name = "branch",
        about = "Create or list branches",
        long_about = "This command creates a branch at HEAD, or lists every branch when no name is given."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch to create")]
        name: Option<String>,
    },
    #[command(
        name = "merge",
        about = "Merge a branch into HEAD",
        long_about = "This command stages every file the branch and HEAD changed since their common ancestor \
        and records a commit with both as parents. Files changed on both sides take the branch's version."
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
        #[arg(short, long, help = "The merge commit message")]
        message: Option<String>,
    },
    #[command(
        name = "graph",
        about = "Show the commit history",
        long_about = "This command prints every commit reachable from HEAD, newest first, with its parents."
    )]
    Graph,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) if e.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            return Err(WitError::InvalidCommand("missing subcommand".to_string()).into());
        }
        Err(e) => {
            let reason = e.to_string();
            let reason = reason
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ");
            return Err(WitError::InvalidCommand(reason.to_string()).into());
        }
    };

    let config = Config::load_from_env()?;
    wit::logging::init(config.log_filter.as_deref())?;

    if !std::io::stdout().is_terminal() || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    let pwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { path } => {
            let path = path.map(|path| pwd.join(path)).unwrap_or_else(|| pwd.clone());
            let mut repository = Repository::new(&path, Box::new(std::io::stdout()), config)?;

            repository.init()?
        }
        Commands::Add { paths } => open(&pwd, config)?.add(&pwd, &paths)?,
        Commands::Commit { message } => open(&pwd, config)?.commit(&message)?,
        Commands::Status { porcelain } => open(&pwd, config)?.status(porcelain)?,
        Commands::Checkout { target } => open(&pwd, config)?.checkout(&target)?,
        Commands::Branch { name } => open(&pwd, config)?.branch(name.as_deref())?,
        Commands::Merge { branch, message } => {
            open(&pwd, config)?.merge(&branch, message.as_deref())?
        }
        Commands::Graph => {
            if config.use_pager && std::io::stdout().is_terminal() {
                let pager = Pager::new();
                let writer = PagerWriter::new(pager.clone());
                let mut repository = Repository::discover(&pwd, Box::new(writer), config)?;

                repository.graph()?;
                minus::page_all(pager)?;
            } else {
                open(&pwd, config)?.graph()?
            }
        }
    }

    Ok(())
}

fn open(pwd: &Path, config: Config) -> Result<Repository> {
    Repository::discover(pwd, Box::new(std::io::stdout()), config)
}
