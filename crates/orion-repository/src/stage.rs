use std::path::{Path, PathBuf};

use orion_index::Index;
use orion_object::{Blob, Object};

use crate::{RepoError, Repository, ORION_DIR};

impl Repository {
    /// Stage files for the next commit.
    ///
    /// Each target names a file or directory, resolved against the caller's
    /// current directory; directories expand to every file beneath them.
    /// File contents are written to the object store immediately, so the
    /// staged snapshot is pinned even if the working file changes afterwards.
    ///
    /// Returns the staged repository-relative paths in sorted order.
    pub fn add(&self, targets: &[PathBuf]) -> Result<Vec<String>, RepoError> {
        let mut index = Index::load(self.index_path())?;
        let mut staged = Vec::new();

        for target in targets {
            for rel in self.expand_target(target)? {
                let data = self.worktree().read_file(&rel)?;
                let oid = self.odb().write(&Object::Blob(Blob::new(data)))?;
                index.add(rel.clone(), oid);
                staged.push(rel);
            }
        }

        index.save(self.index_path())?;
        staged.sort();
        staged.dedup();
        Ok(staged)
    }

    /// Resolve one target to repository-relative file paths.
    ///
    /// A directory target expands to all files beneath it. Targets that do
    /// not exist, escape the repository root, or point into the control
    /// directory fail with `PathNotFound`.
    fn expand_target(&self, target: &Path) -> Result<Vec<String>, RepoError> {
        let not_found = || RepoError::PathNotFound(target.to_path_buf());

        let absolute = if target.is_absolute() {
            target.to_path_buf()
        } else {
            std::env::current_dir()?.join(target)
        };
        let canonical = absolute.canonicalize().map_err(|_| not_found())?;
        let rel = canonical.strip_prefix(self.root()).map_err(|_| not_found())?;

        if rel
            .components()
            .next()
            .is_some_and(|c| c.as_os_str() == ORION_DIR)
        {
            return Err(not_found());
        }

        let rel = rel.to_str().ok_or_else(not_found)?;

        if canonical.is_dir() {
            let files = self.worktree().files()?;
            if rel.is_empty() {
                return Ok(files);
            }
            let prefix = format!("{rel}/");
            Ok(files
                .into_iter()
                .filter(|path| path.starts_with(&prefix))
                .collect())
        } else {
            Ok(vec![rel.to_string()])
        }
    }
}
