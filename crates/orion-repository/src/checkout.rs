use orion_hash::ObjectId;

use crate::trees::tree_file_map;
use crate::{RepoError, Repository};

/// Where HEAD ended up after a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// On the named branch.
    Branch(String),
    /// Detached at the given commit.
    Detached(ObjectId),
}

impl Repository {
    /// Switch the working tree to another branch or commit.
    ///
    /// `target` is tried as a branch name first; anything else must parse
    /// as a full 40-character commit hash and detaches HEAD. The files of
    /// the current HEAD commit are removed from the working tree (missing
    /// ones tolerated) and the target commit's tree is restored
    /// byte-for-byte. HEAD is rewritten only after the working tree has
    /// been replaced.
    ///
    /// The index is left untouched and no dirty-tree check is made, so
    /// uncommitted modifications to tracked files are overwritten.
    pub fn checkout(&self, target: &str) -> Result<CheckoutOutcome, RepoError> {
        let (outcome, commit_oid) = match self.refs().read_branch(target)? {
            Some(oid) => (CheckoutOutcome::Branch(target.to_string()), oid),
            None => {
                let oid = ObjectId::from_hex(target)?;
                (CheckoutOutcome::Detached(oid), oid)
            }
        };

        // Read the target before touching the working tree, so a missing
        // commit leaves everything as it was.
        let commit = self.odb().read_commit(&commit_oid)?;

        if let Some(old_head) = self.refs().resolve_head()? {
            let old_commit = self.odb().read_commit(&old_head)?;
            for path in tree_file_map(self.odb(), &old_commit.tree)?.keys() {
                self.worktree().remove_file(path);
            }
        }

        self.restore_tree(&commit.tree, "")?;

        match &outcome {
            CheckoutOutcome::Branch(name) => self.refs().set_head_to_branch(name)?,
            CheckoutOutcome::Detached(oid) => self.refs().set_head_detached(oid)?,
        }

        Ok(outcome)
    }

    fn restore_tree(&self, tree_oid: &ObjectId, prefix: &str) -> Result<(), RepoError> {
        let tree = self.odb().read_tree(tree_oid)?;
        for entry in tree.iter() {
            let path = if prefix.is_empty() {
                entry.name.clone()
            } else {
                format!("{prefix}/{}", entry.name)
            };
            if entry.mode.is_dir() {
                self.worktree().create_dir(&path)?;
                self.restore_tree(&entry.oid, &path)?;
            } else {
                let blob = self.odb().read_blob(&entry.oid)?;
                self.worktree().write_file(&path, &blob.data)?;
            }
        }
        Ok(())
    }
}
