use std::fs;
use std::path::{Path, PathBuf};

use crate::{RepoError, DEFAULT_BRANCH, ORION_DIR};

/// Initialize a new orion repository.
///
/// Creates the control directory structure:
/// - `.orion/`
/// - `.orion/objects/`
/// - `.orion/refs/heads/`
/// - `.orion/HEAD` (pointing to the default branch)
/// - `.orion/index` (empty)
///
/// Re-running init on an existing repository is a safe no-op. Nothing is
/// overwritten.
pub fn init_repository(path: &Path) -> Result<PathBuf, RepoError> {
    let root = if path.is_relative() {
        std::env::current_dir()?.join(path)
    } else {
        path.to_path_buf()
    };
    let orion_dir = root.join(ORION_DIR);

    if orion_dir.join("HEAD").is_file() {
        return Ok(orion_dir);
    }

    fs::create_dir_all(orion_dir.join("objects"))?;
    fs::create_dir_all(orion_dir.join("refs").join("heads"))?;
    fs::write(orion_dir.join("index"), b"{}\n")?;
    fs::write(
        orion_dir.join("HEAD"),
        format!("ref: refs/heads/{DEFAULT_BRANCH}\n"),
    )?;

    Ok(orion_dir)
}
