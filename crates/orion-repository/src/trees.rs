use std::collections::BTreeMap;

use orion_hash::ObjectId;
use orion_index::Index;
use orion_object::{Object, Tree, TreeEntry};
use orion_odb::ObjectDatabase;

use crate::RepoError;

/// Create a tree hierarchy from the current index state.
///
/// Every directory level becomes its own tree object in the store, built
/// bottom-up so parents embed the ids of already-written children. An
/// empty index produces the empty tree.
pub(crate) fn write_tree_from_index(
    index: &Index,
    odb: &ObjectDatabase,
) -> Result<ObjectId, RepoError> {
    let entries: Vec<(&str, ObjectId)> = index.iter().map(|(path, oid)| (path, *oid)).collect();
    build_tree(&entries, "", odb)
}

/// Recursively build tree objects from sorted index entries.
fn build_tree(
    entries: &[(&str, ObjectId)],
    prefix: &str,
    odb: &ObjectDatabase,
) -> Result<ObjectId, RepoError> {
    let mut tree = Tree::new();
    let mut i = 0;

    while i < entries.len() {
        let rest = &entries[i].0[prefix.len()..];

        if let Some(slash) = rest.find('/') {
            let dir_name = &rest[..slash];

            // The same name staged as both a plain file and a directory
            // cannot be represented in one tree.
            if tree
                .entries
                .iter()
                .any(|e| e.name == dir_name && e.mode.is_file())
            {
                return Err(RepoError::ConflictingPath(format!("{prefix}{dir_name}")));
            }

            // Entries below this directory are contiguous in sorted order.
            let end = entries[i..]
                .iter()
                .position(|(path, _)| {
                    let rest = &path[prefix.len()..];
                    !(rest.starts_with(dir_name) && rest[dir_name.len()..].starts_with('/'))
                })
                .map(|pos| i + pos)
                .unwrap_or(entries.len());

            let child_prefix = format!("{prefix}{dir_name}/");
            let child_oid = build_tree(&entries[i..end], &child_prefix, odb)?;
            tree.entries.push(TreeEntry::dir(dir_name, child_oid));
            i = end;
        } else {
            tree.entries.push(TreeEntry::file(rest, entries[i].1));
            i += 1;
        }
    }

    Ok(odb.write(&Object::Tree(tree))?)
}

/// Flatten a stored tree into a full path → blob id map.
pub(crate) fn tree_file_map(
    odb: &ObjectDatabase,
    tree_oid: &ObjectId,
) -> Result<BTreeMap<String, ObjectId>, RepoError> {
    let mut map = BTreeMap::new();
    collect_tree_files(odb, tree_oid, "", &mut map)?;
    Ok(map)
}

fn collect_tree_files(
    odb: &ObjectDatabase,
    tree_oid: &ObjectId,
    prefix: &str,
    map: &mut BTreeMap<String, ObjectId>,
) -> Result<(), RepoError> {
    let tree = odb.read_tree(tree_oid)?;
    for entry in tree.iter() {
        let path = if prefix.is_empty() {
            entry.name.clone()
        } else {
            format!("{prefix}/{}", entry.name)
        };
        if entry.mode.is_dir() {
            collect_tree_files(odb, &entry.oid, &path, map)?;
        } else {
            map.insert(path, entry.oid);
        }
    }
    Ok(())
}
