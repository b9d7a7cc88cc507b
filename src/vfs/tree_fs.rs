//! This module provides the in-memory file system used by the terminal: a tree of nodes kept in
//! an arena, a current working directory, and every mutation the command layer needs.

use tracing::debug;

use crate::core::{FsBackend, Result, utils};
use crate::error::FsError;

use super::archive;
use super::entry::Entry;
use super::resolve::{resolve, resolve_dir, resolve_file};
use super::store::{NodeId, NodeStore};

/// A virtual file system that keeps the whole directory tree in memory.
///
/// ### Internal state
///
/// * `store` — The arena that owns every node. Directories map child names to `NodeId`s and every
///   node holds the id of the directory that owns it, so upward traversal (`..`, `pwd`) never
///   needs an owning reference.
///
/// * `cwd` — Id of the current working directory.
///   - Relative paths are resolved from here.
///   - Default value: the root.
///   - Changed via `cd()`.
///
/// ### Invariants
///
/// 1. **Root existence**: the root is a directory and is never removed.
/// 2. **Tree ownership**: each non-root node is listed in exactly one directory, and its parent
///    id names that directory.
/// 3. **Uniqueness**: sibling names are unique.
/// 4. **Live cwd**: `cwd` always names a live directory. Removing it, or any of its ancestors, is
///    refused with `Busy`.
///
/// ### Thread Safety
///
/// Not thread-safe. Wrap it in a `Mutex` if several threads need it.
///
/// ### Example
///
/// ```
/// use vfs_term::{FsBackend, TreeFS};
///
/// let mut fs = TreeFS::new();
/// fs.mkdir("/docs").unwrap();
/// fs.mkfile("/docs/note.txt", Some(b"Hello")).unwrap();
/// assert!(fs.exists("/docs/note.txt"));
///
/// fs.rm("/docs/note.txt").unwrap();
/// fs.rmdir("/docs").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct TreeFS {
    store: NodeStore,
    cwd: NodeId,
}

impl Default for TreeFS {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeFS {
    /// Creates an empty file system. The current directory is the root.
    pub fn new() -> Self {
        let store = NodeStore::new();
        let cwd = store.root();
        Self { store, cwd }
    }

    /// Read access to the underlying node arena.
    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn cwd_id(&self) -> NodeId {
        self.cwd
    }

    /// Resolves `path` from the current directory.
    pub fn resolve(&self, path: &str) -> Result<NodeId> {
        resolve(&self.store, path, self.cwd)
    }

    /// Imports the record archive `text` into the directory at `dir`.
    /// Returns the number of files written.
    pub fn import(&mut self, text: &str, dir: &str) -> Result<usize> {
        let dir = resolve_dir(&self.store, dir, self.cwd)?;
        let count = archive::import(&mut self.store, text, dir)?;
        debug!(dir = %self.store.path_of(dir), count, "archive imported");
        Ok(count)
    }

    /// Resolves the parent part of `path` to a directory and returns it with the leaf name.
    fn parent_and_name<'a>(&self, path: &'a str) -> Result<(NodeId, &'a str)> {
        let (parent, name) = utils::split_parent(path)?;
        let dir = resolve_dir(&self.store, parent, self.cwd)?;
        Ok((dir, name))
    }

    /// Destination of a copy or move: the target directory and name. An existing directory at
    /// the destination is refused.
    fn file_destination<'a>(&self, dst: &'a str) -> Result<(NodeId, &'a str)> {
        let (dir, name) = self.parent_and_name(dst)?;
        if let Some(existing) = self.store.lookup(dir, name) {
            if self.store.node(existing).is_dir() {
                return Err(FsError::NotAFile(dst.to_string()));
            }
        }
        Ok((dir, name))
    }

    fn collect_tree(&self, dir: NodeId, out: &mut Vec<String>) {
        if let Some(children) = self.store.node(dir).children() {
            for &child in children.values() {
                out.push(self.store.path_of(child));
                self.collect_tree(child, out);
            }
        }
    }
}

impl FsBackend for TreeFS {
    /// Returns the absolute path of the current working directory, `/` for the root.
    fn cwd(&self) -> String {
        self.store.path_of(self.cwd)
    }

    /// Changes the current working directory.
    /// * `path` can be in relative or absolute form, but it must name an existing directory.
    fn cd(&mut self, path: &str) -> Result<()> {
        self.cwd = resolve_dir(&self.store, path, self.cwd)?;
        debug!(cwd = %self.cwd(), "changed directory");
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok()
    }

    fn is_dir(&self, path: &str) -> Result<bool> {
        Ok(self.store.node(self.resolve(path)?).is_dir())
    }

    fn is_file(&self, path: &str) -> Result<bool> {
        Ok(self.store.node(self.resolve(path)?).is_file())
    }

    /// Returns the names of the immediate children of a directory.
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Child names. Callers must not rely on their order.
    /// * `Err(FsError)` - `NotFound` if `path` does not resolve, `NotADirectory` if it is a file.
    fn ls(&self, path: &str) -> Result<Vec<String>> {
        let id = self.resolve(path)?;
        self.store
            .child_names(id)
            .ok_or_else(|| FsError::NotADirectory(path.to_string()))
    }

    /// Returns the absolute paths of everything below a directory, depth first. The directory
    /// itself is not included.
    fn tree(&self, path: &str) -> Result<Vec<String>> {
        let dir = resolve_dir(&self.store, path, self.cwd)?;
        let mut out = Vec::new();
        self.collect_tree(dir, &mut out);
        Ok(out)
    }

    /// Creates an empty directory. The parent must already exist and the name must be free.
    fn mkdir(&mut self, path: &str) -> Result<()> {
        if utils::is_virtual_root(path) {
            return Err(FsError::AlreadyExists(path.to_string()));
        }
        let (dir, name) = self.parent_and_name(path)?;
        if self.store.lookup(dir, name).is_some() {
            return Err(FsError::AlreadyExists(path.to_string()));
        }
        let id = self.store.insert(dir, Entry::new_dir(name))?;
        debug!(path = %self.store.path_of(id), "directory created");
        Ok(())
    }

    /// Removes an empty directory.
    ///
    /// Fails with `NonEmpty` if it still has entries and with `Busy` if it is the current
    /// directory or one of its ancestors (the root included).
    fn rmdir(&mut self, path: &str) -> Result<()> {
        let id = resolve_dir(&self.store, path, self.cwd)?;
        if self.store.is_ancestor(id, self.cwd) {
            return Err(FsError::Busy(path.to_string()));
        }
        if self.store.child_names(id).is_some_and(|names| !names.is_empty()) {
            return Err(FsError::NonEmpty(path.to_string()));
        }
        let abs = self.store.path_of(id);
        self.store.remove(id);
        debug!(path = %abs, "directory removed");
        Ok(())
    }

    /// Creates a file in an existing directory.
    ///
    /// An existing file at `path` is overwritten: its content becomes `content`, or empty when
    /// none is given. An existing directory at `path` is an error.
    fn mkfile(&mut self, path: &str, content: Option<&[u8]>) -> Result<()> {
        let (dir, name) = self.parent_and_name(path)?;
        if let Some(existing) = self.store.lookup(dir, name) {
            let entry = self.store.node_mut(existing);
            if entry.is_dir() {
                return Err(FsError::NotAFile(path.to_string()));
            }
            entry.set_content(content.unwrap_or_default());
            debug!(path = %self.store.path_of(existing), "file overwritten");
            return Ok(());
        }
        let id = self.store.insert(dir, Entry::new_file(name, content))?;
        debug!(path = %self.store.path_of(id), "file created");
        Ok(())
    }

    /// Removes a file. Directories are refused with `NotAFile`, use `rmdir()` for them.
    fn rm(&mut self, path: &str) -> Result<()> {
        let (dir, name) = self.parent_and_name(path)?;
        let id = self
            .store
            .lookup(dir, name)
            .ok_or_else(|| FsError::NotFound(path.to_string()))?;
        if self.store.node(id).is_dir() {
            return Err(FsError::NotAFile(path.to_string()));
        }
        let abs = self.store.path_of(id);
        self.store.remove(id);
        debug!(path = %abs, "file removed");
        Ok(())
    }

    /// Reads the entire contents of a file.
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - File content, empty for empty files.
    /// * `Err(FsError)` - `NotFound` if the path does not resolve, `NotAFile` for a directory.
    fn read(&self, path: &str) -> Result<Vec<u8>> {
        let id = resolve_file(&self.store, path, self.cwd)?;
        Ok(self.store.node(id).content().map(<[u8]>::to_vec).unwrap_or_default())
    }

    /// Replaces the content of an existing file.
    fn write(&mut self, path: &str, content: &[u8]) -> Result<()> {
        let id = resolve_file(&self.store, path, self.cwd)?;
        self.store.node_mut(id).set_content(content);
        debug!(path = %self.store.path_of(id), bytes = content.len(), "file written");
        Ok(())
    }

    /// Appends bytes to an existing file.
    fn append(&mut self, path: &str, content: &[u8]) -> Result<()> {
        let id = resolve_file(&self.store, path, self.cwd)?;
        self.store.node_mut(id).append_content(content);
        debug!(path = %self.store.path_of(id), bytes = content.len(), "file appended");
        Ok(())
    }

    /// Copies file `src` to `dst`. The copy owns its own content.
    /// An existing file at `dst` is replaced.
    fn cp(&mut self, src: &str, dst: &str) -> Result<()> {
        let src_id = resolve_file(&self.store, src, self.cwd)?;
        let (dir, name) = self.file_destination(dst)?;
        if self.store.lookup(dir, name) == Some(src_id) {
            return Ok(());
        }
        let content = self.store.node(src_id).content().map(<[u8]>::to_vec);
        let id = self.store.insert(dir, Entry::new_file(name, content.as_deref()))?;
        debug!(from = %self.store.path_of(src_id), to = %self.store.path_of(id), "file copied");
        Ok(())
    }

    /// Moves file `src` to `dst`, renaming it in place. The node keeps its identity and content.
    /// An existing file at `dst` is replaced.
    fn mv(&mut self, src: &str, dst: &str) -> Result<()> {
        let src_id = resolve_file(&self.store, src, self.cwd)?;
        let (dir, name) = self.file_destination(dst)?;
        let from = self.store.path_of(src_id);
        self.store.relink(src_id, dir, name)?;
        debug!(from = %from, to = %self.store.path_of(src_id), "file moved");
        Ok(())
    }

    /// Reads the record archive stored in file `archive` and writes its records as files into
    /// the current working directory.
    fn extract(&mut self, path: &str) -> Result<usize> {
        let id = resolve_file(&self.store, path, self.cwd)?;
        let text = String::from_utf8_lossy(self.store.node(id).content().unwrap_or_default())
            .into_owned();
        let count = archive::import(&mut self.store, &text, self.cwd)?;
        debug!(archive = path, count, "archive extracted");
        Ok(count)
    }
}
