use std::cmp::Ordering;

use orion_hash::ObjectId;

use crate::ObjectError;

/// Mode tag for tree entries. The format tracks only the file/directory
/// distinction, nothing finer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryMode {
    /// Regular file ("100644")
    File,
    /// Subdirectory ("40000")
    Dir,
}

impl EntryMode {
    /// Parse from the ASCII mode tag.
    pub fn from_bytes(s: &[u8]) -> Result<Self, ObjectError> {
        match s {
            b"100644" => Ok(Self::File),
            b"40000" => Ok(Self::Dir),
            _ => Err(ObjectError::InvalidObjectFormat(format!(
                "unsupported entry mode '{}'",
                String::from_utf8_lossy(s)
            ))),
        }
    }

    /// The canonical mode tag (no leading zeros).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "100644",
            Self::Dir => "40000",
        }
    }

    /// Is this a subdirectory entry?
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Dir)
    }

    /// Is this a file entry?
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }
}

/// A single entry in a tree object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: String,
    pub oid: ObjectId,
}

impl TreeEntry {
    /// Entry for a regular file.
    pub fn file(name: impl Into<String>, oid: ObjectId) -> Self {
        TreeEntry {
            mode: EntryMode::File,
            name: name.into(),
            oid,
        }
    }

    /// Entry for a subdirectory.
    pub fn dir(name: impl Into<String>, oid: ObjectId) -> Self {
        TreeEntry {
            mode: EntryMode::Dir,
            name: name.into(),
            oid,
        }
    }
}

impl PartialOrd for TreeEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TreeEntry {
    /// Entries order by plain name bytes. The ordering is part of the
    /// canonical encoding and therefore part of the tree's hash.
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.as_bytes().cmp(other.name.as_bytes())
    }
}

/// A tree object: a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse tree content from the binary format.
    ///
    /// Each entry is: `<mode-ascii> <name>\0<20 raw digest bytes>`
    pub fn parse(content: &[u8]) -> Result<Self, ObjectError> {
        let mut entries = Vec::new();
        let mut pos = 0;

        while pos < content.len() {
            // Mode (ASCII until space).
            let space_pos = content[pos..]
                .iter()
                .position(|&b| b == b' ')
                .ok_or_else(|| {
                    ObjectError::InvalidObjectFormat(format!(
                        "tree entry at offset {pos}: missing space after mode"
                    ))
                })?
                + pos;
            let mode = EntryMode::from_bytes(&content[pos..space_pos])?;

            // Name (until null byte).
            let name_start = space_pos + 1;
            let null_pos = content[name_start..]
                .iter()
                .position(|&b| b == 0)
                .ok_or_else(|| {
                    ObjectError::InvalidObjectFormat(format!(
                        "tree entry at offset {pos}: missing null after name"
                    ))
                })?
                + name_start;
            let name = std::str::from_utf8(&content[name_start..null_pos])
                .map_err(|_| {
                    ObjectError::InvalidObjectFormat(format!(
                        "tree entry at offset {pos}: name is not UTF-8"
                    ))
                })?
                .to_string();

            // Digest (raw bytes after null).
            let oid_start = null_pos + 1;
            let oid_end = oid_start + ObjectId::RAW_LEN;
            if oid_end > content.len() {
                return Err(ObjectError::InvalidObjectFormat(format!(
                    "tree entry at offset {pos}: truncated digest"
                )));
            }
            let oid = ObjectId::from_bytes(&content[oid_start..oid_end]).map_err(|e| {
                ObjectError::InvalidObjectFormat(format!(
                    "tree entry at offset {pos}: {e}"
                ))
            })?;

            entries.push(TreeEntry { mode, name, oid });
            pos = oid_end;
        }

        Ok(Self { entries })
    }

    /// Serialize tree content to the binary format.
    ///
    /// Entries are written in canonical sorted order regardless of the
    /// order they were inserted.
    pub fn serialize_content(&self) -> Vec<u8> {
        let mut sorted = self.entries.clone();
        sorted.sort();

        let mut out = Vec::new();
        for entry in &sorted {
            out.extend_from_slice(entry.mode.as_str().as_bytes());
            out.push(b' ');
            out.extend_from_slice(entry.name.as_bytes());
            out.push(0);
            out.extend_from_slice(entry.oid.as_bytes());
        }
        out
    }

    /// Sort entries in canonical order.
    pub fn sort(&mut self) {
        self.entries.sort();
    }

    /// Lookup an entry by name.
    pub fn find(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Iterate entries.
    pub fn iter(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}
