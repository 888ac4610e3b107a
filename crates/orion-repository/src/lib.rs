//! Repository discovery, initialization, and central access for all orion
//! subsystems.
//!
//! [`Repository`] ties the object database, the reference store, the staging
//! index, and the working tree together, and carries the versioning
//! operations built on top of them: staging, committing, history walking,
//! checkout, and status.

mod checkout;
mod commit;
mod discover;
mod env;
mod error;
mod init;
mod stage;
mod status;
mod trees;
mod worktree;

pub use checkout::CheckoutOutcome;
pub use commit::CommitOutcome;
pub use error::RepoError;
pub use status::{FileStatus, StatusEntry, StatusReport};
pub use worktree::Worktree;

use std::path::{Path, PathBuf};

use orion_hash::ObjectId;
use orion_odb::ObjectDatabase;
use orion_ref::RefStore;

use crate::env::EnvOverrides;

/// Name of the control directory.
pub const ORION_DIR: &str = ".orion";

/// Branch a fresh repository starts on.
pub const DEFAULT_BRANCH: &str = "main";

/// The central repository struct tying all subsystems together.
pub struct Repository {
    /// Working tree root (canonicalized).
    root: PathBuf,
    /// Path to the .orion directory.
    orion_dir: PathBuf,
    /// Object database.
    odb: ObjectDatabase,
    /// Reference store.
    refs: RefStore,
    /// Working tree access.
    worktree: Worktree,
    /// Path to the index file.
    index_path: PathBuf,
    /// Environment overrides, read once at open.
    env: EnvOverrides,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Open an existing repository whose working tree root is `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        let path = path.as_ref();
        let root = path
            .canonicalize()
            .map_err(|_| RepoError::NotFound(path.to_path_buf()))?;
        if !root.join(ORION_DIR).is_dir() {
            return Err(RepoError::NotFound(path.to_path_buf()));
        }
        Ok(Self::from_root(root))
    }

    /// Discover a repository starting from the given directory, walking up.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self, RepoError> {
        let root = discover::discover_root(start.as_ref())?;
        Ok(Self::from_root(root))
    }

    /// Initialize a repository at the given path and open it.
    ///
    /// Initializing where a repository already exists is a no-op that
    /// opens the existing one.
    pub fn init(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        init::init_repository(path.as_ref())?;
        Self::open(path)
    }

    fn from_root(root: PathBuf) -> Self {
        let orion_dir = root.join(ORION_DIR);
        let odb = ObjectDatabase::new(orion_dir.join("objects"));
        let refs = RefStore::new(&orion_dir);
        let worktree = Worktree::new(&root);
        let index_path = orion_dir.join("index");
        let env = EnvOverrides::from_env();
        Repository {
            root,
            orion_dir,
            odb,
            refs,
            worktree,
            index_path,
            env,
        }
    }

    // --- Path accessors ---

    /// Working tree root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the .orion directory.
    pub fn orion_dir(&self) -> &Path {
        &self.orion_dir
    }

    /// Path to the index file.
    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    // --- Subsystem accessors ---

    /// Access the object database.
    pub fn odb(&self) -> &ObjectDatabase {
        &self.odb
    }

    /// Access the reference store.
    pub fn refs(&self) -> &RefStore {
        &self.refs
    }

    /// Access the working tree.
    pub fn worktree(&self) -> &Worktree {
        &self.worktree
    }

    fn env(&self) -> &EnvOverrides {
        &self.env
    }

    // --- Convenience methods ---

    /// Resolve HEAD to a commit id, unless no commit exists yet.
    pub fn head_oid(&self) -> Result<Option<ObjectId>, RepoError> {
        Ok(self.refs.resolve_head()?)
    }

    /// The current branch name (None when HEAD is detached).
    pub fn current_branch(&self) -> Result<Option<String>, RepoError> {
        Ok(self.refs.current_branch()?)
    }

    /// True when HEAD points at a branch that has no commits yet.
    pub fn is_unborn(&self) -> Result<bool, RepoError> {
        Ok(self.head_oid()?.is_none())
    }
}
