use std::path::PathBuf;

use orion_utils::LockError;

/// Error types for reference operations.
#[derive(Debug, thiserror::Error)]
pub enum RefError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("branch not found: {0}")]
    BranchNotFound(String),

    #[error("branch already exists: {0}")]
    BranchExists(String),

    #[error("no commits yet")]
    NoCommitsYet,

    #[error("cannot delete branch '{0}': currently checked out")]
    CannotDeleteCurrentBranch(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("lock file error: {0}")]
    Lock(#[from] LockError),

    #[error("I/O error on {path}: {source}")]
    IoPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Hash(#[from] orion_hash::HashError),
}
