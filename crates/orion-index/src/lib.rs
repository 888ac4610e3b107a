//! Index (staging area) for orion.
//!
//! The index is a flat map from working-tree path to staged blob id. It
//! sits between the working tree and the object store: `add` records what
//! the next commit will contain, and commit turns the recorded map into a
//! tree snapshot.
//!
//! On disk the index is a single JSON document, rewritten wholesale on
//! every mutation and guarded by a lock file during the rewrite:
//!
//! ```json
//! {
//!   "src/main.rs": "3b18e512dba79e4c8300dd08aeb37f8e728b8dad"
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use orion_hash::ObjectId;
use orion_utils::lockfile::LockFile;
use orion_utils::LockError;
use serde::{Deserialize, Serialize};

/// On-disk form of the index: path strings to hex ids.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct Snapshot(BTreeMap<String, String>);

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error(transparent)]
    Lock(#[from] LockError),

    #[error("failed to encode index")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The staging area.
///
/// Paths are stored relative to the repository root, with `/` separators,
/// and iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    entries: BTreeMap<String, ObjectId>,
}

impl Index {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the index from a file.
    ///
    /// A missing or undecodable file loads as an empty index. The index
    /// is a rebuildable cache of intent, so a damaged one degrades to
    /// "nothing staged" instead of wedging every command that touches it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let data = match fs::read(path.as_ref()) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::new()),
            Err(err) => return Err(err.into()),
        };

        let snapshot: Snapshot = match serde_json::from_slice(&data) {
            Ok(snapshot) => snapshot,
            Err(_) => return Ok(Self::new()),
        };

        let mut entries = BTreeMap::new();
        for (path, hex) in snapshot.0 {
            match hex.parse::<ObjectId>() {
                Ok(oid) => {
                    entries.insert(path, oid);
                }
                Err(_) => return Ok(Self::new()),
            }
        }

        Ok(Self { entries })
    }

    /// Write the index to a file, atomically via a lock file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), IndexError> {
        let snapshot = Snapshot(
            self.entries
                .iter()
                .map(|(path, oid)| (path.clone(), oid.to_hex()))
                .collect(),
        );

        let mut json = serde_json::to_vec_pretty(&snapshot)?;
        json.push(b'\n');

        let mut lock = LockFile::acquire(path.as_ref())?;
        lock.write_all(&json)?;
        lock.commit()?;
        Ok(())
    }

    /// Stage a blob id for a path, replacing any previous entry.
    pub fn add(&mut self, path: impl Into<String>, oid: ObjectId) {
        self.entries.insert(path.into(), oid);
    }

    /// Remove a path from the index. Returns true if it was staged.
    pub fn remove(&mut self, path: &str) -> bool {
        self.entries.remove(path).is_some()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The staged id for a path, if any.
    pub fn get(&self, path: &str) -> Option<&ObjectId> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Iterate over entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectId)> {
        self.entries.iter().map(|(path, oid)| (path.as_str(), oid))
    }

    /// Iterate over staged paths in order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
