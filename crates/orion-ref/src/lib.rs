//! Branch references and HEAD for orion.
//!
//! Refs are the mutable layer over the immutable object store: a branch
//! is a named pointer to a commit, and HEAD selects the current branch
//! (or pins a commit directly when detached). All writes go through lock
//! files so concurrent invocations cannot interleave partial updates.

use orion_hash::ObjectId;

mod error;
mod name;
mod store;

pub use error::RefError;
pub use name::validate_branch_name;
pub use store::RefStore;

/// Where HEAD points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// On a branch. The branch may not have any commits yet.
    Branch(String),
    /// Detached, pinned to an exact commit.
    Detached(ObjectId),
}

impl Head {
    /// The branch name, unless detached.
    pub fn branch_name(&self) -> Option<&str> {
        match self {
            Head::Branch(name) => Some(name),
            Head::Detached(_) => None,
        }
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, Head::Detached(_))
    }
}
