use thiserror::Error;

/// Errors produced by file-system operations and command parsing.
///
/// Every variant carries the path or argument text that caused it, so the
/// display layer can report it without any further context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("{0}: no such file or directory")]
    NotFound(String),
    #[error("{0}: not a directory")]
    NotADirectory(String),
    #[error("{0}: is a directory")]
    NotAFile(String),
    #[error("{0}: directory not empty")]
    NonEmpty(String),
    #[error("{0}: already exists")]
    AlreadyExists(String),
    #[error("{0}: directory is in use")]
    Busy(String),
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

/// Discriminant of [`FsError`] without its payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    NotADirectory,
    NotAFile,
    NonEmpty,
    AlreadyExists,
    Busy,
    InvalidArguments,
    UnknownCommand,
}

impl FsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FsError::NotFound(_) => ErrorKind::NotFound,
            FsError::NotADirectory(_) => ErrorKind::NotADirectory,
            FsError::NotAFile(_) => ErrorKind::NotAFile,
            FsError::NonEmpty(_) => ErrorKind::NonEmpty,
            FsError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            FsError::Busy(_) => ErrorKind::Busy,
            FsError::InvalidArguments(_) => ErrorKind::InvalidArguments,
            FsError::UnknownCommand(_) => ErrorKind::UnknownCommand,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        FsError::InvalidArguments(msg.into())
    }
}
