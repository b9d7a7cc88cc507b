use std::fmt;

/// Acknowledgement of a mutation that produced no other value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Ack {
    DirectoryChanged,
    DirectoryCreated,
    DirectoryRemoved,
    FileCreated,
    FileRemoved,
    FileCopied,
    FileMoved,
}

impl Ack {
    pub fn message(self) -> &'static str {
        match self {
            Ack::DirectoryChanged => "Directory changed",
            Ack::DirectoryCreated => "Directory created",
            Ack::DirectoryRemoved => "Directory removed",
            Ack::FileCreated => "File created",
            Ack::FileRemoved => "File removed",
            Ack::FileCopied => "File copied",
            Ack::FileMoved => "File moved",
        }
    }
}

/// Result of a successfully executed command, handed to the display layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Child names of a directory, in no guaranteed order.
    Listing(Vec<String>),
    Content(Vec<u8>),
    Path(String),
    /// Number of files written by an archive command.
    Extracted(usize),
    Done(Ack),
    /// The display surface should be reset.
    Clear,
    /// The interpreter should stop.
    Exit,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Listing(names) => f.write_str(&names.join("\n")),
            Outcome::Content(data) => f.write_str(&String::from_utf8_lossy(data)),
            Outcome::Path(path) => f.write_str(path),
            Outcome::Extracted(count) => write!(f, "Files extracted: {count}"),
            Outcome::Done(ack) => f.write_str(ack.message()),
            Outcome::Clear | Outcome::Exit => Ok(()),
        }
    }
}
