use std::fs;
use std::io::{self, ErrorKind, Read};

use flate2::read::ZlibDecoder;
use orion_hash::ObjectId;
use orion_object::{Blob, Commit, Object, ObjectType, Tree};

use crate::{ObjectDatabase, Result, StoreError};

impl ObjectDatabase {
    /// Whether an object with this id exists in the store.
    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.object_path(oid).is_file()
    }

    /// Reads and parses the object with this id.
    ///
    /// A missing object is an error here, not an absence to tolerate.
    /// Ids only enter the system by storing content, so a dangling one
    /// means the store has been damaged.
    pub fn read(&self, oid: &ObjectId) -> Result<Object> {
        let path = self.object_path(oid);
        let compressed = match fs::read(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(*oid));
            }
            Err(err) => return Err(err.into()),
        };

        let raw = decompress_all(&compressed).map_err(|source| StoreError::Decompress {
            oid: *oid,
            source,
        })?;

        Ok(Object::parse(&raw)?)
    }

    /// Reads an object that must be a blob.
    pub fn read_blob(&self, oid: &ObjectId) -> Result<Blob> {
        match self.read(oid)? {
            Object::Blob(blob) => Ok(blob),
            other => Err(type_mismatch(oid, ObjectType::Blob, &other)),
        }
    }

    /// Reads an object that must be a tree.
    pub fn read_tree(&self, oid: &ObjectId) -> Result<Tree> {
        match self.read(oid)? {
            Object::Tree(tree) => Ok(tree),
            other => Err(type_mismatch(oid, ObjectType::Tree, &other)),
        }
    }

    /// Reads an object that must be a commit.
    pub fn read_commit(&self, oid: &ObjectId) -> Result<Commit> {
        match self.read(oid)? {
            Object::Commit(commit) => Ok(commit),
            other => Err(type_mismatch(oid, ObjectType::Commit, &other)),
        }
    }
}

fn type_mismatch(oid: &ObjectId, expected: ObjectType, got: &Object) -> StoreError {
    StoreError::TypeMismatch {
        oid: *oid,
        expected,
        actual: got.object_type(),
    }
}

fn decompress_all(bytes: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(bytes);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}
