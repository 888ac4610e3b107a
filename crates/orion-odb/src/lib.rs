//! Loose object storage.
//!
//! Every object lives in its own zlib-compressed file under the store
//! directory, fanned out by the first two hex digits of its id:
//!
//! ```text
//! objects/3b/18e512dba79e4c8300dd08aeb37f8e728b8dad
//! ```
//!
//! Writes are idempotent. An object that already exists on disk is never
//! rewritten, so storing the same content twice is a cheap no-op.

use std::path::{Path, PathBuf};

use flate2::Compression;
use orion_hash::ObjectId;
use orion_object::{ObjectError, ObjectType};

mod read;
mod write;

/// A content-addressed store of loose objects.
pub struct ObjectDatabase {
    objects_dir: PathBuf,
    compression_level: Compression,
}

impl ObjectDatabase {
    /// Creates a store rooted at `objects_dir`.
    ///
    /// The directory does not have to exist yet. It is created lazily on
    /// the first write.
    pub fn new(objects_dir: impl Into<PathBuf>) -> Self {
        ObjectDatabase {
            objects_dir: objects_dir.into(),
            compression_level: Compression::default(),
        }
    }

    /// Creates a store with an explicit zlib compression level.
    pub fn with_compression(objects_dir: impl Into<PathBuf>, level: u32) -> Self {
        ObjectDatabase {
            objects_dir: objects_dir.into(),
            compression_level: Compression::new(level),
        }
    }

    /// The directory holding the fan-out subdirectories.
    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    /// Absolute path an object with this id is (or would be) stored at.
    pub fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.objects_dir.join(oid.loose_path())
    }
}

/// Errors from reading or writing loose objects.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    #[error("object {oid} is a {actual}, expected {expected}")]
    TypeMismatch {
        oid: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },

    #[error("failed to decompress object {oid}")]
    Decompress {
        oid: ObjectId,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Object(#[from] ObjectError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
