//! Object identity for the orion version control engine.
//!
//! Provides the core `ObjectId` type (a 160-bit content digest), hex
//! encoding/decoding, and the object hashing convention
//! (`"<type> <len>\0" + content`).

mod error;
pub mod hasher;
pub mod hex;
mod oid;

pub use error::HashError;
pub use hasher::Hasher;
pub use oid::ObjectId;
