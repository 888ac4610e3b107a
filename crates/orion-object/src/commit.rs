use orion_hash::ObjectId;
use orion_utils::date::Signature;

use crate::ObjectError;

/// A commit object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Id of the root tree.
    pub tree: ObjectId,
    /// Parent commit ids (empty for a root commit). Order is preserved;
    /// the first parent is the primary lineage.
    pub parents: Vec<ObjectId>,
    /// Author identity and timestamp.
    pub author: Signature,
    /// Committer identity and timestamp.
    pub committer: Signature,
    /// Commit message (everything after the blank line separator).
    pub message: String,
}

impl Commit {
    /// Parse commit content from raw bytes (no object header).
    ///
    /// Headers are one per line until a blank line; the remainder is the
    /// message, preserved verbatim (it may itself contain blank lines).
    pub fn parse(content: &[u8]) -> Result<Self, ObjectError> {
        let text = std::str::from_utf8(content).map_err(|_| {
            ObjectError::InvalidObjectFormat("commit content is not UTF-8".into())
        })?;

        let mut tree: Option<ObjectId> = None;
        let mut parents = Vec::new();
        let mut author: Option<Signature> = None;
        let mut committer: Option<Signature> = None;

        let mut rest = text;
        loop {
            if rest.is_empty() {
                // Headers ran to the end; no message (tolerated).
                break;
            }
            let (line, tail) = match rest.split_once('\n') {
                Some(split) => split,
                None => (rest, ""),
            };
            rest = tail;

            if line.is_empty() {
                // Blank separator; the rest is the message.
                break;
            }

            let (key, value) = line.split_once(' ').ok_or_else(|| {
                ObjectError::InvalidObjectFormat(format!(
                    "malformed commit header '{line}'"
                ))
            })?;
            match key {
                "tree" => tree = Some(parse_oid(value, "tree")?),
                "parent" => parents.push(parse_oid(value, "parent")?),
                "author" => author = Some(parse_signature(value)?),
                "committer" => committer = Some(parse_signature(value)?),
                _ => {
                    return Err(ObjectError::InvalidObjectFormat(format!(
                        "unknown commit header '{key}'"
                    )))
                }
            }
        }

        let tree = tree.ok_or_else(|| {
            ObjectError::InvalidObjectFormat("missing 'tree' header".into())
        })?;
        let author = author.ok_or_else(|| {
            ObjectError::InvalidObjectFormat("missing 'author' header".into())
        })?;
        let committer = committer.ok_or_else(|| {
            ObjectError::InvalidObjectFormat("missing 'committer' header".into())
        })?;

        Ok(Self {
            tree,
            parents,
            author,
            committer,
            message: rest.to_string(),
        })
    }

    /// Serialize commit content to bytes (no object header).
    pub fn serialize_content(&self) -> Vec<u8> {
        let mut out = String::new();

        out.push_str("tree ");
        out.push_str(&self.tree.to_hex());
        out.push('\n');

        for parent in &self.parents {
            out.push_str("parent ");
            out.push_str(&parent.to_hex());
            out.push('\n');
        }

        out.push_str("author ");
        out.push_str(&self.author.to_wire());
        out.push('\n');

        out.push_str("committer ");
        out.push_str(&self.committer.to_wire());
        out.push('\n');

        out.push('\n');
        out.push_str(&self.message);

        out.into_bytes()
    }

    /// Get the first parent (or None for a root commit).
    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    /// Is this a root commit? (no parents)
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Get just the summary (first line) of the message.
    pub fn summary(&self) -> &str {
        match self.message.split_once('\n') {
            Some((first, _)) => first,
            None => &self.message,
        }
    }
}

fn parse_oid(value: &str, field: &str) -> Result<ObjectId, ObjectError> {
    ObjectId::from_hex(value).map_err(|e| {
        ObjectError::InvalidObjectFormat(format!("bad '{field}' hash: {e}"))
    })
}

fn parse_signature(value: &str) -> Result<Signature, ObjectError> {
    Signature::parse(value)
        .map_err(|e| ObjectError::InvalidObjectFormat(format!("bad signature: {e}")))
}
