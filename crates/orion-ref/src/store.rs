use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use orion_hash::ObjectId;
use orion_utils::lockfile::LockFile;

use crate::error::RefError;
use crate::name::validate_branch_name;
use crate::Head;

/// File-backed reference store.
///
/// HEAD lives at `<dir>/HEAD` and holds either `ref: refs/heads/<name>`
/// (symbolic, possibly pointing at a branch that has no commits yet) or a
/// bare hex id (detached). Branches are one file each under
/// `<dir>/refs/heads/`, containing the hex id of their tip commit.
pub struct RefStore {
    orion_dir: PathBuf,
}

const SYMREF_PREFIX: &str = "ref: ";
const HEADS_PREFIX: &str = "refs/heads/";

impl RefStore {
    pub fn new(orion_dir: impl Into<PathBuf>) -> Self {
        RefStore {
            orion_dir: orion_dir.into(),
        }
    }

    fn head_path(&self) -> PathBuf {
        self.orion_dir.join("HEAD")
    }

    fn heads_dir(&self) -> PathBuf {
        self.orion_dir.join("refs").join("heads")
    }

    fn branch_path(&self, name: &str) -> PathBuf {
        self.heads_dir().join(name)
    }

    /// Read and parse HEAD.
    pub fn read_head(&self) -> Result<Head, RefError> {
        let path = self.head_path();
        let contents = fs::read_to_string(&path).map_err(|e| RefError::IoPath {
            path: path.clone(),
            source: e,
        })?;
        let trimmed = contents.trim_end();

        if let Some(target) = trimmed.strip_prefix(SYMREF_PREFIX) {
            let target = target.trim();
            match target.strip_prefix(HEADS_PREFIX) {
                Some(name) if !name.is_empty() => Ok(Head::Branch(name.to_string())),
                _ => Err(RefError::Parse(format!(
                    "HEAD points outside refs/heads/: '{target}'"
                ))),
            }
        } else {
            let oid = ObjectId::from_hex(trimmed)?;
            Ok(Head::Detached(oid))
        }
    }

    /// The commit HEAD refers to, if any.
    ///
    /// Returns `None` on a branch with no commits yet.
    pub fn resolve_head(&self) -> Result<Option<ObjectId>, RefError> {
        match self.read_head()? {
            Head::Branch(name) => self.read_branch(&name),
            Head::Detached(oid) => Ok(Some(oid)),
        }
    }

    /// The branch HEAD is on, or `None` when detached.
    pub fn current_branch(&self) -> Result<Option<String>, RefError> {
        match self.read_head()? {
            Head::Branch(name) => Ok(Some(name)),
            Head::Detached(_) => Ok(None),
        }
    }

    /// Point HEAD at a branch (symbolic).
    pub fn set_head_to_branch(&self, name: &str) -> Result<(), RefError> {
        self.write_head(&format!("{SYMREF_PREFIX}{HEADS_PREFIX}{name}\n"))
    }

    /// Point HEAD at an exact commit (detached).
    pub fn set_head_detached(&self, oid: &ObjectId) -> Result<(), RefError> {
        self.write_head(&format!("{}\n", oid.to_hex()))
    }

    fn write_head(&self, content: &str) -> Result<(), RefError> {
        let mut lock = LockFile::acquire(self.head_path())?;
        lock.write_all(content.as_bytes())?;
        lock.commit()?;
        Ok(())
    }

    /// The tip of a branch, or `None` if the branch does not exist.
    pub fn read_branch(&self, name: &str) -> Result<Option<ObjectId>, RefError> {
        let path = self.branch_path(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RefError::IoPath { path, source: e }),
        };
        Ok(Some(ObjectId::from_hex(contents.trim_end())?))
    }

    /// Move a branch tip. Creates the branch file if needed.
    pub fn update_branch(&self, name: &str, oid: &ObjectId) -> Result<(), RefError> {
        let path = self.branch_path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| RefError::IoPath {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut lock = LockFile::acquire(&path)?;
        lock.write_all(format!("{}\n", oid.to_hex()).as_bytes())?;
        lock.commit()?;
        Ok(())
    }

    /// Create a new branch pointing at `oid`.
    pub fn create_branch(&self, name: &str, oid: &ObjectId) -> Result<(), RefError> {
        validate_branch_name(name)?;
        self.check_branch_conflicts(name)?;
        self.update_branch(name, oid)
    }

    /// Create a new branch at the commit HEAD currently resolves to.
    pub fn create_branch_from_head(&self, name: &str) -> Result<(), RefError> {
        let oid = self.resolve_head()?.ok_or(RefError::NoCommitsYet)?;
        self.create_branch(name, &oid)
    }

    /// Delete a branch. The branch HEAD is on cannot be deleted.
    pub fn delete_branch(&self, name: &str) -> Result<(), RefError> {
        if self.current_branch()?.as_deref() == Some(name) {
            return Err(RefError::CannotDeleteCurrentBranch(name.to_string()));
        }

        let path = self.branch_path(name);
        if !path.is_file() {
            return Err(RefError::BranchNotFound(name.to_string()));
        }
        fs::remove_file(&path).map_err(|e| RefError::IoPath {
            path: path.clone(),
            source: e,
        })?;

        self.prune_empty_dirs(&path);
        Ok(())
    }

    /// All branch names, sorted, with `/` separators for nested ones.
    pub fn list_branches(&self) -> Result<Vec<String>, RefError> {
        let heads = self.heads_dir();
        if !heads.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        collect_branches(&heads, "", &mut names)?;
        names.sort();
        Ok(names)
    }

    /// Hierarchical names map to nested files, so a branch and a branch
    /// directory cannot share a path. `feature` as a branch rules out
    /// `feature/x` and vice versa.
    fn check_branch_conflicts(&self, name: &str) -> Result<(), RefError> {
        let path = self.branch_path(name);
        if path.is_file() {
            return Err(RefError::BranchExists(name.to_string()));
        }
        if path.is_dir() {
            return Err(RefError::InvalidBranchName(format!(
                "'{name}': existing branches nest under this name"
            )));
        }

        let mut current = self.heads_dir();
        for component in name.split('/') {
            current = current.join(component);
            if current == path {
                break;
            }
            if current.is_file() {
                return Err(RefError::InvalidBranchName(format!(
                    "'{}': '{}' exists as a branch",
                    name,
                    component_prefix(name, component)
                )));
            }
        }
        Ok(())
    }

    /// Remove directories left empty after a branch deletion, walking up
    /// until the heads directory.
    fn prune_empty_dirs(&self, deleted: &Path) {
        let heads = self.heads_dir();
        let mut dir = deleted.parent().map(Path::to_path_buf);
        while let Some(d) = dir {
            if d == heads {
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

/// The prefix of `name` up to and including `component`.
fn component_prefix<'a>(name: &'a str, component: &str) -> &'a str {
    let mut end = 0;
    for part in name.split('/') {
        end += part.len();
        if part == component {
            break;
        }
        end += 1;
    }
    &name[..end]
}

fn collect_branches(dir: &Path, prefix: &str, out: &mut Vec<String>) -> Result<(), RefError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = match file_name.to_str() {
            Some(name) => name,
            None => continue,
        };
        let qualified = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}/{name}")
        };

        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_branches(&entry.path(), &qualified, out)?;
        } else if file_type.is_file() {
            out.push(qualified);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const COMMIT_A: &str = "3b18e512dba79e4c8300dd08aeb37f8e728b8dad";
    const COMMIT_B: &str = "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";

    fn oid(hex: &str) -> ObjectId {
        hex.parse().unwrap()
    }

    fn temp_store() -> (TempDir, RefStore) {
        let dir = TempDir::new().unwrap();
        let store = RefStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn symbolic_head_roundtrips() {
        let (_dir, store) = temp_store();
        store.set_head_to_branch("main").unwrap();

        assert_eq!(store.read_head().unwrap(), Head::Branch("main".into()));
        assert_eq!(store.current_branch().unwrap().as_deref(), Some("main"));
    }

    #[test]
    fn detached_head_roundtrips() {
        let (_dir, store) = temp_store();
        store.set_head_detached(&oid(COMMIT_A)).unwrap();

        assert_eq!(store.read_head().unwrap(), Head::Detached(oid(COMMIT_A)));
        assert_eq!(store.current_branch().unwrap(), None);
        assert_eq!(store.resolve_head().unwrap(), Some(oid(COMMIT_A)));
    }

    #[test]
    fn unborn_branch_resolves_to_none() {
        let (_dir, store) = temp_store();
        store.set_head_to_branch("main").unwrap();

        assert_eq!(store.resolve_head().unwrap(), None);
    }

    #[test]
    fn head_follows_branch_tip() {
        let (_dir, store) = temp_store();
        store.set_head_to_branch("main").unwrap();
        store.update_branch("main", &oid(COMMIT_A)).unwrap();

        assert_eq!(store.resolve_head().unwrap(), Some(oid(COMMIT_A)));

        store.update_branch("main", &oid(COMMIT_B)).unwrap();
        assert_eq!(store.resolve_head().unwrap(), Some(oid(COMMIT_B)));
    }

    #[test]
    fn garbage_head_is_a_parse_error() {
        let (dir, store) = temp_store();
        fs::write(dir.path().join("HEAD"), "ref: refs/tags/v1\n").unwrap();

        assert!(matches!(store.read_head(), Err(RefError::Parse(_))));
    }

    #[test]
    fn create_and_read_branch() {
        let (_dir, store) = temp_store();
        store.create_branch("main", &oid(COMMIT_A)).unwrap();

        assert_eq!(store.read_branch("main").unwrap(), Some(oid(COMMIT_A)));
        assert_eq!(store.read_branch("other").unwrap(), None);
    }

    #[test]
    fn create_existing_branch_fails() {
        let (_dir, store) = temp_store();
        store.create_branch("main", &oid(COMMIT_A)).unwrap();

        match store.create_branch("main", &oid(COMMIT_B)) {
            Err(RefError::BranchExists(name)) => assert_eq!(name, "main"),
            other => panic!("expected BranchExists, got {other:?}"),
        }
    }

    #[test]
    fn create_rejects_invalid_name() {
        let (_dir, store) = temp_store();
        assert!(matches!(
            store.create_branch("bad name", &oid(COMMIT_A)),
            Err(RefError::InvalidBranchName(_))
        ));
    }

    #[test]
    fn branch_from_unborn_head_fails() {
        let (_dir, store) = temp_store();
        store.set_head_to_branch("main").unwrap();

        assert!(matches!(
            store.create_branch_from_head("feature"),
            Err(RefError::NoCommitsYet)
        ));
    }

    #[test]
    fn branch_from_head_copies_the_tip() {
        let (_dir, store) = temp_store();
        store.set_head_to_branch("main").unwrap();
        store.update_branch("main", &oid(COMMIT_A)).unwrap();

        store.create_branch_from_head("feature").unwrap();
        assert_eq!(store.read_branch("feature").unwrap(), Some(oid(COMMIT_A)));
    }

    #[test]
    fn cannot_delete_checked_out_branch() {
        let (_dir, store) = temp_store();
        store.set_head_to_branch("main").unwrap();
        store.update_branch("main", &oid(COMMIT_A)).unwrap();

        assert!(matches!(
            store.delete_branch("main"),
            Err(RefError::CannotDeleteCurrentBranch(_))
        ));
    }

    #[test]
    fn delete_missing_branch_fails() {
        let (_dir, store) = temp_store();
        store.set_head_to_branch("main").unwrap();

        assert!(matches!(
            store.delete_branch("ghost"),
            Err(RefError::BranchNotFound(_))
        ));
    }

    #[test]
    fn delete_removes_branch_and_empty_dirs() {
        let (dir, store) = temp_store();
        store.set_head_to_branch("main").unwrap();
        store.update_branch("main", &oid(COMMIT_A)).unwrap();
        store.create_branch("feature/parser", &oid(COMMIT_A)).unwrap();

        store.delete_branch("feature/parser").unwrap();

        assert_eq!(store.read_branch("feature/parser").unwrap(), None);
        assert!(!dir.path().join("refs/heads/feature").exists());
        assert!(dir.path().join("refs/heads/main").is_file());
    }

    #[test]
    fn list_is_sorted_and_nested() {
        let (_dir, store) = temp_store();
        store.set_head_to_branch("main").unwrap();
        store.update_branch("main", &oid(COMMIT_A)).unwrap();
        store.create_branch("feature/parser", &oid(COMMIT_A)).unwrap();
        store.create_branch("dev", &oid(COMMIT_B)).unwrap();

        let branches = store.list_branches().unwrap();
        assert_eq!(branches, ["dev", "feature/parser", "main"]);
    }

    #[test]
    fn list_without_heads_dir_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.list_branches().unwrap().is_empty());
    }

    #[test]
    fn nested_name_cannot_cross_existing_branch() {
        let (_dir, store) = temp_store();
        store.create_branch("feature", &oid(COMMIT_A)).unwrap();

        assert!(matches!(
            store.create_branch("feature/parser", &oid(COMMIT_B)),
            Err(RefError::InvalidBranchName(_))
        ));
    }

    #[test]
    fn branch_cannot_shadow_existing_hierarchy() {
        let (_dir, store) = temp_store();
        store.create_branch("feature/parser", &oid(COMMIT_A)).unwrap();

        assert!(matches!(
            store.create_branch("feature", &oid(COMMIT_B)),
            Err(RefError::InvalidBranchName(_))
        ));
    }
}
