//! Subcommand implementations.
//!
//! Each command lives in its own module with an `Args` struct for clap
//! and a `run` function returning the process exit code. Output meant
//! for scripts goes to stdout; human progress messages go to stderr.

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod status;

use anyhow::Result;
use clap::Subcommand;
use orion_repository::Repository;

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty orion repository or reinitialize an existing one
    Init(init::InitArgs),
    /// Add file contents to the staging index
    Add(add::AddArgs),
    /// Record the staged files as a new commit
    Commit(commit::CommitArgs),
    /// Show the commit history of the current HEAD
    Log(log::LogArgs),
    /// Show staged, modified, untracked, and deleted files
    Status(status::StatusArgs),
    /// List, create, or delete branches
    Branch(branch::BranchArgs),
    /// Switch to a branch or detach HEAD at a commit
    Checkout(checkout::CheckoutArgs),
}

/// Open the repository that contains the current directory.
pub fn open_repo(_cli: &Cli) -> Result<Repository> {
    Ok(Repository::discover(".")?)
}

pub fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Init(args) => init::run(args, &cli),
        Commands::Add(args) => add::run(args, &cli),
        Commands::Commit(args) => commit::run(args, &cli),
        Commands::Log(args) => log::run(args, &cli),
        Commands::Status(args) => status::run(args, &cli),
        Commands::Branch(args) => branch::run(args, &cli),
        Commands::Checkout(args) => checkout::run(args, &cli),
    }
}
