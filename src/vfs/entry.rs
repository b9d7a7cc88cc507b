use std::collections::BTreeMap;

use super::store::NodeId;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryType {
    File,
    Directory,
}

/// Payload of a node. A file never has children and a directory never has
/// content, so the two are kept in one enum.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    File(Vec<u8>),
    Directory(BTreeMap<String, NodeId>),
}

/// A single file or directory stored in the node arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    name: String,
    parent: Option<NodeId>, // None only for the root
    body: Body,
}

impl Entry {
    pub fn new_file(name: impl Into<String>, content: Option<&[u8]>) -> Entry {
        Entry {
            name: name.into(),
            parent: None,
            body: Body::File(content.map(<[u8]>::to_vec).unwrap_or_default()),
        }
    }

    pub fn new_dir(name: impl Into<String>) -> Entry {
        Entry {
            name: name.into(),
            parent: None,
            body: Body::Directory(BTreeMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: NodeId) {
        self.parent = Some(parent);
    }

    pub fn entry_type(&self) -> EntryType {
        match self.body {
            Body::File(_) => EntryType::File,
            Body::Directory(_) => EntryType::Directory,
        }
    }

    pub fn is_file(&self) -> bool {
        self.entry_type() == EntryType::File
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type() == EntryType::Directory
    }

    /// File content, `None` for directories.
    pub fn content(&self) -> Option<&[u8]> {
        match &self.body {
            Body::File(data) => Some(data),
            Body::Directory(_) => None,
        }
    }

    /// Replaces file content. Returns false for directories.
    pub(crate) fn set_content(&mut self, content: &[u8]) -> bool {
        match &mut self.body {
            Body::File(data) => {
                *data = content.to_vec();
                true
            }
            Body::Directory(_) => false,
        }
    }

    pub(crate) fn append_content(&mut self, content: &[u8]) -> bool {
        match &mut self.body {
            Body::File(data) => {
                data.extend_from_slice(content);
                true
            }
            Body::Directory(_) => false,
        }
    }

    /// Child map, `None` for files.
    pub fn children(&self) -> Option<&BTreeMap<String, NodeId>> {
        match &self.body {
            Body::Directory(children) => Some(children),
            Body::File(_) => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut BTreeMap<String, NodeId>> {
        match &mut self.body {
            Body::Directory(children) => Some(children),
            Body::File(_) => None,
        }
    }
}
