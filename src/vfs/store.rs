//! Arena that owns every node of the tree.
//!
//! Nodes live in a `Vec` of slots and refer to each other by `NodeId`. A
//! directory maps child names to ids; every node keeps the id of the
//! directory that owns it. Removing a node frees its slot (and the slots of
//! its whole subtree) for reuse.

use crate::core::Result;
use crate::error::FsError;

use super::entry::Entry;

/// Index of a node in the arena.
///
/// Cheap to copy. An id is valid until the node it names is removed; using a
/// stale id is a bug and panics.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct NodeStore {
    slots: Vec<Option<Entry>>,
    free: Vec<usize>,
    root: NodeId,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    /// Creates a store holding only the root directory.
    pub fn new() -> Self {
        Self {
            slots: vec![Some(Entry::new_dir(""))],
            free: Vec::new(),
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Always false: the root is never removed.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    /// # Panics
    ///
    /// Panics if `id` is stale.
    pub fn node(&self, id: NodeId) -> &Entry {
        match self.slots.get(id.0) {
            Some(Some(entry)) => entry,
            _ => panic!("stale node id {}", id.0),
        }
    }

    /// # Panics
    ///
    /// Panics if `id` is stale.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Entry {
        match self.slots.get_mut(id.0) {
            Some(Some(entry)) => entry,
            _ => panic!("stale node id {}", id.0),
        }
    }

    /// Parent of `id`; the root is its own parent.
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.node(id).parent().unwrap_or(self.root)
    }

    /// Looks up child `name` of directory `dir`. Files have no children.
    pub fn lookup(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.node(dir)
            .children()
            .and_then(|children| children.get(name).copied())
    }

    /// Names of the children of `dir`, `None` if `dir` is a file.
    pub fn child_names(&self, dir: NodeId) -> Option<Vec<String>> {
        self.node(dir)
            .children()
            .map(|children| children.keys().cloned().collect())
    }

    /// Absolute path of `id`, `/` for the root.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = id;
        while let Some(parent) = self.node(current).parent() {
            names.push(self.node(current).name());
            current = parent;
        }
        if names.is_empty() {
            return "/".to_string();
        }
        names.iter().rev().fold(String::new(), |mut path, name| {
            path.push('/');
            path.push_str(name);
            path
        })
    }

    /// True if `ancestor` is `id` itself or lies on the way from `id` to the root.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.node(node).parent();
        }
        false
    }

    /// Inserts `entry` into directory `dir` under the entry's own name.
    /// A same-named child is replaced and its subtree freed.
    pub fn insert(&mut self, dir: NodeId, mut entry: Entry) -> Result<NodeId> {
        if !self.node(dir).is_dir() {
            return Err(FsError::NotADirectory(self.path_of(dir)));
        }
        let name = entry.name().to_string();
        if let Some(old) = self.lookup(dir, &name) {
            self.remove(old);
        }
        entry.set_parent(dir);
        let id = self.alloc(entry);
        if let Some(children) = self.node_mut(dir).children_mut() {
            children.insert(name, id);
        }
        Ok(id)
    }

    /// Unlinks `id` from its parent and frees it with its whole subtree.
    /// Returns the removed entry; the root cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> Option<Entry> {
        let parent = self.node(id).parent()?;
        let name = self.node(id).name().to_string();
        if let Some(children) = self.node_mut(parent).children_mut() {
            children.remove(&name);
        }
        self.release(id)
    }

    /// Moves `id` into directory `new_dir` under `new_name`, replacing any
    /// same-named entry there. The owning maps and the back-reference are
    /// updated together.
    pub fn relink(&mut self, id: NodeId, new_dir: NodeId, new_name: &str) -> Result<()> {
        if !self.node(new_dir).is_dir() {
            return Err(FsError::NotADirectory(self.path_of(new_dir)));
        }
        if self.is_ancestor(id, new_dir) {
            return Err(FsError::invalid(format!(
                "cannot move '{}' into itself",
                self.path_of(id)
            )));
        }
        let Some(old_dir) = self.node(id).parent() else {
            return Err(FsError::Busy("/".to_string()));
        };
        if old_dir == new_dir && self.node(id).name() == new_name {
            return Ok(());
        }
        if let Some(existing) = self.lookup(new_dir, new_name) {
            if self.is_ancestor(existing, id) {
                return Err(FsError::Busy(self.path_of(existing)));
            }
            self.remove(existing);
        }

        let old_name = self.node(id).name().to_string();
        if let Some(children) = self.node_mut(old_dir).children_mut() {
            children.remove(&old_name);
        }
        let entry = self.node_mut(id);
        entry.set_name(new_name);
        entry.set_parent(new_dir);
        if let Some(children) = self.node_mut(new_dir).children_mut() {
            children.insert(new_name.to_string(), id);
        }
        Ok(())
    }

    fn alloc(&mut self, entry: Entry) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(entry);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(entry));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Option<Entry> {
        let entry = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        if let Some(children) = entry.children() {
            for &child in children.values() {
                self.release(child);
            }
        }
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_store() -> (NodeStore, NodeId, NodeId) {
        let mut store = NodeStore::new();
        let root = store.root();
        let home = store.insert(root, Entry::new_dir("home")).unwrap();
        let file = store
            .insert(home, Entry::new_file("a.txt", Some(b"A")))
            .unwrap();
        (store, home, file)
    }

    #[test]
    fn test_new_store_has_root() {
        let store = NodeStore::new();
        assert_eq!(store.len(), 1);
        assert!(store.node(store.root()).is_dir());
        assert_eq!(store.parent(store.root()), store.root());
        assert_eq!(store.path_of(store.root()), "/");
    }

    #[test]
    fn test_insert_sets_back_reference() {
        let (store, home, file) = setup_store();
        assert_eq!(store.parent(file), home);
        assert_eq!(store.lookup(home, "a.txt"), Some(file));
        assert_eq!(store.path_of(file), "/home/a.txt");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_insert_into_file_fails() {
        let (mut store, _, file) = setup_store();
        let result = store.insert(file, Entry::new_dir("x"));
        assert_eq!(result, Err(FsError::NotADirectory("/home/a.txt".into())));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_insert_replaces_same_name() {
        let (mut store, home, file) = setup_store();
        let new = store
            .insert(home, Entry::new_file("a.txt", Some(b"B")))
            .unwrap();
        assert!(!store.contains(file) || new == file);
        assert_eq!(store.node(new).content(), Some(&b"B"[..]));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_remove_frees_subtree() {
        let (mut store, home, file) = setup_store();
        let removed = store.remove(home).unwrap();
        assert_eq!(removed.name(), "home");
        assert!(!store.contains(home));
        assert!(!store.contains(file));
        assert_eq!(store.len(), 1);
        assert_eq!(store.child_names(store.root()), Some(vec![]));
    }

    #[test]
    fn test_remove_root_is_refused() {
        let mut store = NodeStore::new();
        assert!(store.remove(store.root()).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_slots_are_reused() {
        let (mut store, home, file) = setup_store();
        store.remove(file);
        let again = store.insert(home, Entry::new_file("b.txt", None)).unwrap();
        assert_eq!(again.index(), file.index());
    }

    #[test]
    fn test_relink_renames_and_reparents() {
        let (mut store, home, file) = setup_store();
        let root = store.root();
        store.relink(file, root, "b.txt").unwrap();

        assert_eq!(store.lookup(home, "a.txt"), None);
        assert_eq!(store.lookup(root, "b.txt"), Some(file));
        assert_eq!(store.parent(file), root);
        assert_eq!(store.node(file).name(), "b.txt");
        assert_eq!(store.node(file).content(), Some(&b"A"[..]));
    }

    #[test]
    fn test_relink_into_own_subtree_fails() {
        let (mut store, home, _) = setup_store();
        let inner = store.insert(home, Entry::new_dir("inner")).unwrap();
        assert!(store.relink(home, inner, "home").is_err());
        assert_eq!(store.parent(inner), home);
    }

    #[test]
    fn test_is_ancestor() {
        let (store, home, file) = setup_store();
        assert!(store.is_ancestor(store.root(), file));
        assert!(store.is_ancestor(home, file));
        assert!(store.is_ancestor(file, file));
        assert!(!store.is_ancestor(file, home));
    }
}
