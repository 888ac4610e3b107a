use std::collections::{BTreeMap, BTreeSet};

use orion_hash::Hasher;
use orion_index::Index;

use crate::trees::tree_file_map;
use crate::{RepoError, Repository};

/// How a path differs across HEAD, the index, and the working tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// In the index but not in HEAD.
    NewStaged,
    /// In both HEAD and the index, with different contents.
    ModifiedStaged,
    /// In both the index and the working tree, with different contents.
    ModifiedUnstaged,
    /// Only in the working tree.
    Untracked,
    /// In the index but gone from the working tree.
    Deleted,
}

/// One reported path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub path: String,
    pub status: FileStatus,
}

/// Everything `status` has to say, sorted by path.
#[derive(Debug, Clone, Default)]
pub struct StatusReport {
    pub entries: Vec<StatusEntry>,
}

impl StatusReport {
    /// True when no path has anything to report.
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Repository {
    /// Reconcile HEAD, the index, and the working tree.
    ///
    /// Every working file is rehashed on each call; there is no stat
    /// cache. Each path gets at most one category, decided in a fixed
    /// order: a path that is both newly staged and modified again in the
    /// working tree reports only as newly staged. Paths identical across
    /// all three sources are omitted.
    pub fn status(&self) -> Result<StatusReport, RepoError> {
        let head = match self.refs().resolve_head()? {
            Some(oid) => {
                let commit = self.odb().read_commit(&oid)?;
                tree_file_map(self.odb(), &commit.tree)?
            }
            None => BTreeMap::new(),
        };

        let index = Index::load(self.index_path())?;

        let mut work = BTreeMap::new();
        for path in self.worktree().files()? {
            let data = self.worktree().read_file(&path)?;
            work.insert(path, Hasher::hash_object("blob", &data));
        }

        let mut paths = BTreeSet::new();
        paths.extend(head.keys().map(String::as_str));
        paths.extend(index.paths());
        paths.extend(work.keys().map(String::as_str));

        let mut entries = Vec::new();
        for path in paths {
            let in_head = head.get(path);
            let staged = index.get(path);
            let in_work = work.get(path);

            let status = if in_head.is_none() && staged.is_some() {
                Some(FileStatus::NewStaged)
            } else if in_head.is_some() && staged.is_some() && in_head != staged {
                Some(FileStatus::ModifiedStaged)
            } else if staged.is_some() && in_work.is_some() && staged != in_work {
                Some(FileStatus::ModifiedUnstaged)
            } else if in_head.is_none() && staged.is_none() && in_work.is_some() {
                Some(FileStatus::Untracked)
            } else if staged.is_some() && in_work.is_none() {
                Some(FileStatus::Deleted)
            } else {
                None
            };

            if let Some(status) = status {
                entries.push(StatusEntry {
                    path: path.to_string(),
                    status,
                });
            }
        }

        Ok(StatusReport { entries })
    }
}
