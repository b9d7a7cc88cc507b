//! Record archive: a plain-text stand-in for tar/zip payloads.
//!
//! One record per line, `name:content`. There is no escaping, so a line that
//! does not split into exactly two parts on `:` is ignored.

use tracing::debug;

use crate::core::{Result, utils};

use super::entry::Entry;
use super::store::{NodeId, NodeStore};

pub const RECORD_SEPARATOR: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub name: &'a str,
    pub content: &'a str,
}

/// Iterates over the well-formed records of `text`.
pub fn parse_records(text: &str) -> impl Iterator<Item = Record<'_>> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let mut parts = line.split(RECORD_SEPARATOR);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(name), Some(content), None) => Some(Record { name, content }),
                _ => {
                    debug!(line, "skipping malformed archive record");
                    None
                }
            }
        })
}

/// Writes every record of `text` as a file into directory `dir`, replacing
/// same-named files. Returns the number of files written.
///
/// Records whose name is not a plain entry name, or that would replace a
/// directory, are skipped.
pub fn import(store: &mut NodeStore, text: &str, dir: NodeId) -> Result<usize> {
    let mut count = 0;
    for record in parse_records(text) {
        if !utils::is_valid_name(record.name) {
            debug!(name = record.name, "skipping record with invalid name");
            continue;
        }
        if let Some(existing) = store.lookup(dir, record.name) {
            if store.node(existing).is_dir() {
                debug!(name = record.name, "skipping record that shadows a directory");
                continue;
            }
        }
        store.insert(
            dir,
            Entry::new_file(record.name, Some(record.content.as_bytes())),
        )?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(store: &NodeStore, dir: NodeId, name: &str) -> Option<Vec<u8>> {
        let id = store.lookup(dir, name)?;
        store.node(id).content().map(<[u8]>::to_vec)
    }

    #[test]
    fn test_parse_records() {
        let records: Vec<_> = parse_records("x.txt:hello\ny.txt:world\n").collect();
        assert_eq!(
            records,
            vec![
                Record { name: "x.txt", content: "hello" },
                Record { name: "y.txt", content: "world" },
            ]
        );
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let records: Vec<_> = parse_records("badline\n\nok.txt:fine\na:b:c\r\n").collect();
        assert_eq!(records, vec![Record { name: "ok.txt", content: "fine" }]);
    }

    #[test]
    fn test_parse_keeps_empty_content() {
        let records: Vec<_> = parse_records("empty.txt:\r\n").collect();
        assert_eq!(records, vec![Record { name: "empty.txt", content: "" }]);
    }

    #[test]
    fn test_import_creates_files() -> Result<()> {
        let mut store = NodeStore::new();
        let root = store.root();
        let count = import(&mut store, "x.txt:hello\ny.txt:world\n", root)?;

        assert_eq!(count, 2);
        assert_eq!(
            store.child_names(root),
            Some(vec!["x.txt".to_string(), "y.txt".to_string()])
        );
        assert_eq!(contents(&store, root, "x.txt"), Some(b"hello".to_vec()));
        assert_eq!(contents(&store, root, "y.txt"), Some(b"world".to_vec()));
        Ok(())
    }

    #[test]
    fn test_import_bad_line_does_not_abort() -> Result<()> {
        let mut store = NodeStore::new();
        let root = store.root();
        let count = import(&mut store, "badline\nok.txt:fine\n", root)?;

        assert_eq!(count, 1);
        assert_eq!(store.child_names(root), Some(vec!["ok.txt".to_string()]));
        assert_eq!(store.len(), 2);
        Ok(())
    }

    #[test]
    fn test_import_overwrites_files_but_not_dirs() -> Result<()> {
        let mut store = NodeStore::new();
        let root = store.root();
        store.insert(root, Entry::new_file("a.txt", Some(b"old")))?;
        store.insert(root, Entry::new_dir("docs"))?;

        let count = import(&mut store, "a.txt:new\ndocs:oops\n..:x\n", root)?;

        assert_eq!(count, 1);
        assert_eq!(contents(&store, root, "a.txt"), Some(b"new".to_vec()));
        let docs = store.lookup(root, "docs").unwrap();
        assert!(store.node(docs).is_dir());
        Ok(())
    }
}
