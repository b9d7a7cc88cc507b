mod archive;
mod entry;
mod resolve;
mod store;
mod tree_fs;

pub use archive::{Record, RECORD_SEPARATOR, import, parse_records};
pub use entry::{Body, Entry, EntryType};
pub use resolve::{resolve, resolve_dir, resolve_file};
pub use store::{NodeId, NodeStore};
pub use tree_fs::TreeFS;
