use orion_hash::ObjectId;
use orion_index::Index;
use orion_object::{Commit, Object};
use orion_ref::{Head, RefError};
use orion_utils::date::{Signature, Timestamp};

use crate::trees::write_tree_from_index;
use crate::{RepoError, Repository};

/// What a successful commit produced.
#[derive(Debug, Clone)]
pub struct CommitOutcome {
    /// Id of the new commit.
    pub oid: ObjectId,
    /// Branch the commit landed on, or `None` when HEAD is detached.
    pub branch: Option<String>,
    /// True when the commit has no parent.
    pub root_commit: bool,
    /// First line of the commit message.
    pub summary: String,
}

impl Repository {
    /// Record the staged snapshot as a new commit.
    ///
    /// Returns `Ok(None)` when the index is empty; nothing is written in
    /// that case. Otherwise builds the tree, wraps it in a commit whose
    /// parent is the current HEAD commit (if any), advances the current
    /// branch (or detached HEAD) to it, and clears the index.
    ///
    /// The author name comes from `author` if given, falling back to the
    /// `ORION_AUTHOR` environment variable; with neither set the commit
    /// fails with [`RepoError::MissingAuthor`].
    pub fn commit(
        &self,
        message: &str,
        author: Option<&str>,
    ) -> Result<Option<CommitOutcome>, RepoError> {
        let mut index = Index::load(self.index_path())?;
        if index.is_empty() {
            return Ok(None);
        }

        let tree = write_tree_from_index(&index, self.odb())?;
        let head = self.refs().read_head()?;
        let parents: Vec<ObjectId> = self.refs().resolve_head()?.into_iter().collect();

        let name = self.resolve_author(author)?;
        let signature = Signature::new(name, Timestamp::now());

        let mut message = message.trim_end().to_string();
        message.push('\n');
        let summary = message.lines().next().unwrap_or("").to_string();

        let root_commit = parents.is_empty();
        let commit = Commit {
            tree,
            parents,
            author: signature.clone(),
            committer: signature,
            message,
        };
        let oid = self.odb().write(&Object::Commit(commit))?;

        match &head {
            Head::Branch(branch) => self.refs().update_branch(branch, &oid)?,
            Head::Detached(_) => self.refs().set_head_detached(&oid)?,
        }

        index.clear();
        index.save(self.index_path())?;

        Ok(Some(CommitOutcome {
            oid,
            branch: head.branch_name().map(String::from),
            root_commit,
            summary,
        }))
    }

    /// Walk history from HEAD along first parents, newest first.
    ///
    /// Stops after `limit` commits when given, or at the root commit.
    /// Fails with `NoCommitsYet` on an unborn branch.
    pub fn log(&self, limit: Option<usize>) -> Result<Vec<(ObjectId, Commit)>, RepoError> {
        let head = self.refs().resolve_head()?.ok_or(RefError::NoCommitsYet)?;

        let mut commits = Vec::new();
        let mut cursor = Some(head);
        while let Some(oid) = cursor {
            if limit.is_some_and(|max| commits.len() >= max) {
                break;
            }
            let commit = self.odb().read_commit(&oid)?;
            cursor = commit.first_parent().copied();
            commits.push((oid, commit));
        }
        Ok(commits)
    }

    /// Author name from the explicit override or the environment.
    ///
    /// Line breaks are removed since the signature is a single header
    /// line in the commit text.
    fn resolve_author(&self, explicit: Option<&str>) -> Result<String, RepoError> {
        let raw = match explicit {
            Some(name) => name.to_string(),
            None => self.env().author.clone().ok_or(RepoError::MissingAuthor)?,
        };
        let name: String = raw.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(RepoError::MissingAuthor);
        }
        Ok(name)
    }
}
