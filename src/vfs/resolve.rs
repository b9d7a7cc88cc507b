//! Path resolution: turns a textual path plus a starting directory into a node.

use tracing::trace;

use crate::core::{Result, utils::SEPARATOR};
use crate::error::FsError;

use super::store::{NodeId, NodeStore};

/// Resolves `path` against `cwd`.
///
/// * A leading `/` starts at the root, anything else at `cwd`.
/// * Empty segments and `.` are skipped, so `//`, trailing `/` and `./x` work.
/// * `..` goes to the parent; at the root it stays at the root.
/// * Any other segment must name an existing child, otherwise the whole
///   resolution fails with `NotFound`. Files have no children, so a file can
///   only be the last segment.
/// * The empty path resolves to `cwd`.
pub fn resolve(store: &NodeStore, path: &str, cwd: NodeId) -> Result<NodeId> {
    let mut current = if path.starts_with(SEPARATOR) {
        store.root()
    } else {
        cwd
    };

    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => current = store.parent(current),
            name => {
                current = store
                    .lookup(current, name)
                    .ok_or_else(|| FsError::NotFound(path.to_string()))?;
            }
        }
        trace!(path, segment, node = current.index(), "resolve step");
    }

    Ok(current)
}

/// Resolves `path` and requires the result to be a directory.
pub fn resolve_dir(store: &NodeStore, path: &str, cwd: NodeId) -> Result<NodeId> {
    let id = resolve(store, path, cwd)?;
    if !store.node(id).is_dir() {
        return Err(FsError::NotADirectory(path.to_string()));
    }
    Ok(id)
}

/// Resolves `path` and requires the result to be a file.
pub fn resolve_file(store: &NodeStore, path: &str, cwd: NodeId) -> Result<NodeId> {
    let id = resolve(store, path, cwd)?;
    if !store.node(id).is_file() {
        return Err(FsError::NotAFile(path.to_string()));
    }
    Ok(id)
}
