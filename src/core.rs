use crate::error::FsError;

pub type Result<T> = std::result::Result<T, FsError>;

/// Operations every file-system backend exposes to the command layer.
///
/// Paths are plain strings: absolute when they start with `/`, otherwise
/// relative to the current working directory.
pub trait FsBackend {
    /// Absolute path of the current working directory.
    fn cwd(&self) -> String;
    fn cd(&mut self, path: &str) -> Result<()>;
    fn exists(&self, path: &str) -> bool;
    fn is_dir(&self, path: &str) -> Result<bool>;
    fn is_file(&self, path: &str) -> Result<bool>;
    fn ls(&self, path: &str) -> Result<Vec<String>>;
    fn tree(&self, path: &str) -> Result<Vec<String>>;
    fn mkdir(&mut self, path: &str) -> Result<()>;
    fn rmdir(&mut self, path: &str) -> Result<()>;
    fn mkfile(&mut self, path: &str, content: Option<&[u8]>) -> Result<()>;
    fn rm(&mut self, path: &str) -> Result<()>;
    fn read(&self, path: &str) -> Result<Vec<u8>>;
    fn write(&mut self, path: &str, content: &[u8]) -> Result<()>;
    fn append(&mut self, path: &str, content: &[u8]) -> Result<()>;
    fn cp(&mut self, src: &str, dst: &str) -> Result<()>;
    fn mv(&mut self, src: &str, dst: &str) -> Result<()>;
    /// Unpacks the record archive stored in file `archive` into the current
    /// working directory. Returns the number of files written.
    fn extract(&mut self, archive: &str) -> Result<usize>;
}

pub mod utils {
    use super::Result;
    use crate::error::FsError;

    pub const SEPARATOR: char = '/';

    /// Returns true if `path` denotes the virtual root (`/`, `//`, ...).
    pub fn is_virtual_root(path: &str) -> bool {
        !path.is_empty() && path.chars().all(|c| c == SEPARATOR)
    }

    /// Splits `path` into the path of its parent directory and its last
    /// segment. Trailing separators are ignored.
    ///
    /// * `"a/b/c"` -> `("a/b", "c")`
    /// * `"/c"` -> `("/", "c")`
    /// * `"c"` -> `("", "c")` (the parent is the current directory)
    pub fn split_parent(path: &str) -> Result<(&str, &str)> {
        let trimmed = path.trim_end_matches(SEPARATOR);
        let (parent, name) = match trimmed.rfind(SEPARATOR) {
            Some(0) => ("/", &trimmed[1..]),
            Some(pos) => (&trimmed[..pos], &trimmed[pos + 1..]),
            None => ("", trimmed),
        };
        if !is_valid_name(name) {
            return Err(FsError::invalid(format!("invalid path: '{path}'")));
        }
        Ok((parent, name))
    }

    /// A name usable as a directory entry.
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && name != "." && name != ".." && !name.contains(SEPARATOR)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_split_parent() -> Result<()> {
            assert_eq!(split_parent("a/b/c")?, ("a/b", "c"));
            assert_eq!(split_parent("/c")?, ("/", "c"));
            assert_eq!(split_parent("c")?, ("", "c"));
            assert_eq!(split_parent("/a/b/")?, ("/a", "b"));
            assert_eq!(split_parent("../x")?, ("..", "x"));
            Ok(())
        }

        #[test]
        fn test_split_parent_rejects_bad_leaf() {
            assert!(split_parent("").is_err());
            assert!(split_parent("/").is_err());
            assert!(split_parent("a/..").is_err());
            assert!(split_parent("./.").is_err());
        }

        #[test]
        fn test_is_virtual_root() {
            assert!(is_virtual_root("/"));
            assert!(is_virtual_root("///"));
            assert!(!is_virtual_root(""));
            assert!(!is_virtual_root("/a"));
        }
    }
}
