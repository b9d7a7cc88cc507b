//! vfs-term CLI entry point.
//!
//! Usage:
//!   vfs-term                  # Interactive terminal
//!   vfs-term -c <command>     # Execute one command and exit
//!   vfs-term script.txt       # Run a file of commands

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use vfs_term::shell::{Outcome, Shell};
use vfs_term::{FsError, TreeFS};

#[derive(Parser, Debug)]
#[command(version, about = "In-memory file system terminal")]
struct Args {
    /// File of commands to run, one per line.
    script: Option<PathBuf>,

    /// Execute a single command and exit.
    #[arg(short = 'c', long = "command", conflicts_with = "script")]
    command: Option<String>,

    /// Prompt shown in interactive mode.
    #[arg(long, default_value = ">> ")]
    prompt: String,

    /// Do not print the banner.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    // Logs go to stderr and respect RUST_LOG.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match run(Args::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let mut shell = Shell::new(TreeFS::new());

    if let Some(command) = args.command {
        return Ok(match shell.execute_line(&command) {
            Some(result) if render(&result) => ExitCode::SUCCESS,
            Some(_) => ExitCode::FAILURE,
            None => ExitCode::SUCCESS,
        });
    }

    if let Some(path) = args.script {
        shell
            .run_script(&path, |_, result| {
                render(result);
            })
            .with_context(|| format!("failed to run script {}", path.display()))?;
        return Ok(ExitCode::SUCCESS);
    }

    if !args.quiet {
        println!("Virtual File System Terminal");
        println!("Type 'exit' to quit.\n");
    }
    interactive(&mut shell, &args.prompt)?;
    Ok(ExitCode::SUCCESS)
}

fn interactive(shell: &mut Shell<TreeFS>, prompt: &str) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{prompt}");
        io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line.context("failed to read from stdin")?;
        let Some(result) = shell.execute_line(&line) else {
            continue;
        };
        render(&result);
        if matches!(result, Ok(Outcome::Exit)) {
            return Ok(());
        }
    }
}

/// Prints one command result. Returns false for errors.
fn render(result: &std::result::Result<Outcome, FsError>) -> bool {
    match result {
        Ok(Outcome::Clear) => {
            print!("\x1B[2J\x1B[1;1H");
            true
        }
        Ok(Outcome::Exit) => true,
        Ok(Outcome::Listing(names)) if names.is_empty() => true,
        Ok(outcome) => {
            println!("{outcome}");
            true
        }
        Err(err) => {
            eprintln!("{err}");
            false
        }
    }
}
