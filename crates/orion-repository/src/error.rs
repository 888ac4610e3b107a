use std::path::PathBuf;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("not an orion repository (or any of the parent directories): {}", .0.display())]
    NotFound(PathBuf),

    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("conflicting path '{0}': staged as both a file and a directory")]
    ConflictingPath(String),

    #[error("author identity unknown: set ORION_AUTHOR or pass --author")]
    MissingAuthor,

    #[error(transparent)]
    Store(#[from] orion_odb::StoreError),

    #[error(transparent)]
    Object(#[from] orion_object::ObjectError),

    #[error(transparent)]
    Ref(#[from] orion_ref::RefError),

    #[error(transparent)]
    Index(#[from] orion_index::IndexError),

    #[error(transparent)]
    Hash(#[from] orion_hash::HashError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
