//! An in-memory hierarchical file system driven by a line-oriented command interpreter.
//!
//! ### Overview
//!
//! `vfs-term` keeps a whole directory tree in memory and exposes it through the small command set
//! of a toy terminal: `ls`, `pwd`, `cd`, `mkdir`, `rmdir`, `touch`, `rm`, `cat`, `cp`, `mv`,
//! `tar -xvf` and `unzip`.
//!
//! **Key ideas**:
//! - **Arena tree**: nodes live in a [`NodeStore`] and refer to each other by [`NodeId`]; a
//!   node's parent is a plain id, never an owning reference.
//! - **Plain results**: every operation returns a value or a typed [`FsError`]; nothing in the
//!   core writes output. Rendering is left to the caller (see [`shell::Outcome`]).
//! - **Explicit context**: the tree and the current directory live in one [`TreeFS`] value, so
//!   independent sandboxes can coexist.
//! - **Toy archives**: `tar`/`unzip` read a file of `name:content` lines, not real archive
//!   formats.

mod core;
mod error;
pub mod shell;
mod vfs;

pub use crate::core::{FsBackend, Result, utils};
pub use crate::error::{ErrorKind, FsError};
pub use crate::vfs::{
    Body, Entry, EntryType, NodeId, NodeStore, RECORD_SEPARATOR, Record, TreeFS, import,
    parse_records, resolve, resolve_dir, resolve_file,
};
