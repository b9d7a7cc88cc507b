//! Command dispatch: parses input lines and routes each command to a [`FsBackend`] operation.
//!
//! Nothing here renders output. Every command yields an [`Outcome`] or an [`FsError`] and the
//! caller decides how to show it.

mod command;
mod outcome;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::core::{FsBackend, Result};
use crate::error::FsError;

pub use command::{Command, CommandKind};
pub use outcome::{Ack, Outcome};

pub struct Shell<B: FsBackend> {
    backend: B,
}

impl<B: FsBackend> Shell<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_inner(self) -> B {
        self.backend
    }

    /// Runs one command against the backend.
    #[tracing::instrument(level = "debug", skip(self, command), fields(command = %command.kind()), err)]
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        let fs = &mut self.backend;
        let outcome = match command {
            Command::Ls(path) => Outcome::Listing(fs.ls(&path)?),
            Command::Pwd => Outcome::Path(fs.cwd()),
            Command::Cd(path) => {
                fs.cd(&path)?;
                Outcome::Done(Ack::DirectoryChanged)
            }
            Command::Mkdir(path) => {
                fs.mkdir(&path)?;
                Outcome::Done(Ack::DirectoryCreated)
            }
            Command::Rmdir(path) => {
                fs.rmdir(&path)?;
                Outcome::Done(Ack::DirectoryRemoved)
            }
            Command::Touch(path) => {
                fs.mkfile(&path, None)?;
                Outcome::Done(Ack::FileCreated)
            }
            Command::Rm(path) => {
                fs.rm(&path)?;
                Outcome::Done(Ack::FileRemoved)
            }
            Command::Cat(path) => Outcome::Content(fs.read(&path)?),
            Command::Cp { src, dst } => {
                fs.cp(&src, &dst)?;
                Outcome::Done(Ack::FileCopied)
            }
            Command::Mv { src, dst } => {
                fs.mv(&src, &dst)?;
                Outcome::Done(Ack::FileMoved)
            }
            Command::Tar(path) | Command::Unzip(path) => Outcome::Extracted(fs.extract(&path)?),
            Command::Clear => Outcome::Clear,
            Command::Exit => Outcome::Exit,
        };
        Ok(outcome)
    }

    /// Parses and runs one input line. Returns `None` for a blank line.
    pub fn execute_line(&mut self, line: &str) -> Option<Result<Outcome>> {
        match Command::parse(line) {
            Ok(Some(command)) => Some(self.execute(command)),
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        }
    }

    /// Runs every line of `reader` as a command until the input ends or `exit` is reached.
    /// `on_result` is called with each non-blank line and its result. Errors do not stop the run.
    ///
    /// Returns the number of commands executed.
    pub fn run_reader<R, F>(&mut self, reader: R, mut on_result: F) -> std::io::Result<usize>
    where
        R: BufRead,
        F: FnMut(&str, &std::result::Result<Outcome, FsError>),
    {
        let mut executed = 0;
        for line in reader.lines() {
            let line = line?;
            let Some(result) = self.execute_line(&line) else {
                continue;
            };
            executed += 1;
            on_result(&line, &result);
            if matches!(result, Ok(Outcome::Exit)) {
                info!(executed, "exit requested");
                break;
            }
        }
        Ok(executed)
    }

    /// Runs a host file of commands through [`Shell::run_reader`].
    pub fn run_script<P, F>(&mut self, path: P, on_result: F) -> std::io::Result<usize>
    where
        P: AsRef<Path>,
        F: FnMut(&str, &std::result::Result<Outcome, FsError>),
    {
        let file = File::open(path.as_ref())?;
        info!(path = %path.as_ref().display(), "running script");
        self.run_reader(BufReader::new(file), on_result)
    }
}
