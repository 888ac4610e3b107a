use std::fs;
use std::path::{Path, PathBuf};

use crate::{RepoError, ORION_DIR};

/// Working tree file access, rooted at the repository root.
///
/// Every read or write of real files by the engine goes through here.
/// Paths are repository-relative with `/` separators.
pub struct Worktree {
    root: PathBuf,
}

impl Worktree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Worktree { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path for a repository-relative one.
    pub fn abs_path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Every file under the root, sorted by path. Directories named
    /// `.orion` are skipped at any depth.
    pub fn files(&self) -> Result<Vec<String>, RepoError> {
        let mut out = Vec::new();
        collect_files(&self.root, "", &mut out)?;
        out.sort();
        Ok(out)
    }

    pub fn read_file(&self, rel: &str) -> Result<Vec<u8>, RepoError> {
        Ok(fs::read(self.abs_path(rel))?)
    }

    /// Write file contents, creating parent directories as needed.
    pub fn write_file(&self, rel: &str, data: &[u8]) -> Result<(), RepoError> {
        let path = self.abs_path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        Ok(())
    }

    pub fn create_dir(&self, rel: &str) -> Result<(), RepoError> {
        fs::create_dir_all(self.abs_path(rel))?;
        Ok(())
    }

    /// Best-effort removal. A file already gone is not an error, and
    /// directories left empty by the removal are pruned up to the root.
    pub fn remove_file(&self, rel: &str) {
        let path = self.abs_path(rel);
        let _ = fs::remove_file(&path);

        let mut dir = path.parent().map(Path::to_path_buf);
        while let Some(d) = dir {
            if d == self.root {
                break;
            }
            let empty = d
                .read_dir()
                .map(|mut entries| entries.next().is_none())
                .unwrap_or(false);
            if !empty {
                break;
            }
            let _ = fs::remove_dir(&d);
            dir = d.parent().map(Path::to_path_buf);
        }
    }
}

fn collect_files(dir: &Path, prefix: &str, out: &mut Vec<String>) -> Result<(), RepoError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = match file_name.to_str() {
            Some(name) => name,
            None => continue,
        };
        if name == ORION_DIR {
            continue;
        }
        let qualified = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}/{name}")
        };

        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_files(&entry.path(), &qualified, out)?;
        } else if file_type.is_file() {
            out.push(qualified);
        }
    }
    Ok(())
}
