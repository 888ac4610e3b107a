use std::path::{Path, PathBuf};

use crate::{RepoError, ORION_DIR};

/// Find the repository root containing `start` by walking up the
/// directory tree until a `.orion` directory appears.
pub fn discover_root(start: &Path) -> Result<PathBuf, RepoError> {
    let start = std::fs::canonicalize(start)
        .map_err(|_| RepoError::NotFound(start.to_path_buf()))?;

    let mut current = start.clone();
    loop {
        if current.join(ORION_DIR).is_dir() {
            return Ok(current);
        }
        match current.parent() {
            Some(parent) if parent != current => current = parent.to_path_buf(),
            _ => return Err(RepoError::NotFound(start)),
        }
    }
}
