use std::fmt;
use std::str::FromStr;

use crate::core::Result;
use crate::error::FsError;

/// The closed set of command keywords.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Ls,
    Pwd,
    Cd,
    Mkdir,
    Rmdir,
    Touch,
    Rm,
    Cat,
    Cp,
    Mv,
    Tar,
    Unzip,
    Clear,
    Exit,
}

impl CommandKind {
    pub const ALL: [CommandKind; 14] = [
        CommandKind::Ls,
        CommandKind::Pwd,
        CommandKind::Cd,
        CommandKind::Mkdir,
        CommandKind::Rmdir,
        CommandKind::Touch,
        CommandKind::Rm,
        CommandKind::Cat,
        CommandKind::Cp,
        CommandKind::Mv,
        CommandKind::Tar,
        CommandKind::Unzip,
        CommandKind::Clear,
        CommandKind::Exit,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            CommandKind::Ls => "ls",
            CommandKind::Pwd => "pwd",
            CommandKind::Cd => "cd",
            CommandKind::Mkdir => "mkdir",
            CommandKind::Rmdir => "rmdir",
            CommandKind::Touch => "touch",
            CommandKind::Rm => "rm",
            CommandKind::Cat => "cat",
            CommandKind::Cp => "cp",
            CommandKind::Mv => "mv",
            CommandKind::Tar => "tar",
            CommandKind::Unzip => "unzip",
            CommandKind::Clear => "clear",
            CommandKind::Exit => "exit",
        }
    }

    /// One-line usage text.
    pub fn usage(self) -> &'static str {
        match self {
            CommandKind::Ls => "ls [path]",
            CommandKind::Pwd => "pwd",
            CommandKind::Cd => "cd <path>",
            CommandKind::Mkdir => "mkdir <path>",
            CommandKind::Rmdir => "rmdir <path>",
            CommandKind::Touch => "touch <path>",
            CommandKind::Rm => "rm <path>",
            CommandKind::Cat => "cat <path>",
            CommandKind::Cp => "cp <src> <dst>",
            CommandKind::Mv => "mv <src> <dst>",
            CommandKind::Tar => "tar -xvf <path>",
            CommandKind::Unzip => "unzip <path>",
            CommandKind::Clear => "clear",
            CommandKind::Exit => "exit",
        }
    }
}

impl FromStr for CommandKind {
    type Err = FsError;

    fn from_str(keyword: &str) -> Result<Self> {
        CommandKind::ALL
            .into_iter()
            .find(|kind| kind.keyword() == keyword)
            .ok_or_else(|| FsError::UnknownCommand(keyword.to_string()))
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// An empty path lists the current directory.
    Ls(String),
    Pwd,
    Cd(String),
    Mkdir(String),
    Rmdir(String),
    Touch(String),
    Rm(String),
    Cat(String),
    Cp { src: String, dst: String },
    Mv { src: String, dst: String },
    Tar(String),
    Unzip(String),
    Clear,
    Exit,
}

/// Flag accepted by `tar`.
const TAR_EXTRACT_FLAG: &str = "-xvf";

impl Command {
    /// Parses one input line. The keyword is everything up to the first whitespace, the rest holds
    /// whitespace-separated arguments. Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let kind: CommandKind = keyword.parse()?;
        let args: Vec<&str> = rest.split_whitespace().collect();
        let usage = || FsError::invalid(format!("usage: {}", kind.usage()));

        let command = match (kind, args.as_slice()) {
            (CommandKind::Ls, []) => Command::Ls(String::new()),
            (CommandKind::Ls, [path]) => Command::Ls(path.to_string()),
            (CommandKind::Pwd, _) => Command::Pwd,
            (CommandKind::Cd, [path]) => Command::Cd(path.to_string()),
            (CommandKind::Mkdir, [path]) => Command::Mkdir(path.to_string()),
            (CommandKind::Rmdir, [path]) => Command::Rmdir(path.to_string()),
            (CommandKind::Touch, [path]) => Command::Touch(path.to_string()),
            (CommandKind::Rm, [path]) => Command::Rm(path.to_string()),
            (CommandKind::Cat, [path]) => Command::Cat(path.to_string()),
            (CommandKind::Cp, [src, dst]) => Command::Cp {
                src: src.to_string(),
                dst: dst.to_string(),
            },
            (CommandKind::Mv, [src, dst]) => Command::Mv {
                src: src.to_string(),
                dst: dst.to_string(),
            },
            (CommandKind::Tar, [flag, path]) if *flag == TAR_EXTRACT_FLAG => {
                Command::Tar(path.to_string())
            }
            (CommandKind::Unzip, [path]) => Command::Unzip(path.to_string()),
            (CommandKind::Clear, _) => Command::Clear,
            (CommandKind::Exit, _) => Command::Exit,
            _ => return Err(usage()),
        };
        Ok(Some(command))
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Ls(_) => CommandKind::Ls,
            Command::Pwd => CommandKind::Pwd,
            Command::Cd(_) => CommandKind::Cd,
            Command::Mkdir(_) => CommandKind::Mkdir,
            Command::Rmdir(_) => CommandKind::Rmdir,
            Command::Touch(_) => CommandKind::Touch,
            Command::Rm(_) => CommandKind::Rm,
            Command::Cat(_) => CommandKind::Cat,
            Command::Cp { .. } => CommandKind::Cp,
            Command::Mv { .. } => CommandKind::Mv,
            Command::Tar(_) => CommandKind::Tar,
            Command::Unzip(_) => CommandKind::Unzip,
            Command::Clear => CommandKind::Clear,
            Command::Exit => CommandKind::Exit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    fn parse_err(line: &str) -> ErrorKind {
        Command::parse(line).unwrap_err().kind()
    }

    #[test]
    fn test_keywords_round_trip() {
        for kind in CommandKind::ALL {
            assert_eq!(kind.keyword().parse::<CommandKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse(""), Ok(None));
        assert_eq!(Command::parse("   "), Ok(None));
    }

    #[test]
    fn test_unknown_command() {
        let err = Command::parse("format c:").unwrap_err();
        assert_eq!(err, FsError::UnknownCommand("format".into()));
    }

    #[test]
    fn test_single_path_commands() {
        assert_eq!(parse("ls"), Command::Ls(String::new()));
        assert_eq!(parse("ls /home"), Command::Ls("/home".into()));
        assert_eq!(parse("cd .."), Command::Cd("..".into()));
        assert_eq!(parse("mkdir a/b"), Command::Mkdir("a/b".into()));
        assert_eq!(parse("rmdir a"), Command::Rmdir("a".into()));
        assert_eq!(parse("touch f.txt"), Command::Touch("f.txt".into()));
        assert_eq!(parse("rm f.txt"), Command::Rm("f.txt".into()));
        assert_eq!(parse("cat  f.txt "), Command::Cat("f.txt".into()));
    }

    #[test]
    fn test_missing_or_extra_paths() {
        assert_eq!(parse_err("mkdir"), ErrorKind::InvalidArguments);
        assert_eq!(parse_err("cat a b"), ErrorKind::InvalidArguments);
        assert_eq!(parse_err("ls a b"), ErrorKind::InvalidArguments);
    }

    #[test]
    fn test_cp_mv_need_two_paths() {
        assert_eq!(
            parse("cp a.txt /tmp/b.txt"),
            Command::Cp { src: "a.txt".into(), dst: "/tmp/b.txt".into() }
        );
        assert_eq!(
            parse("mv a b"),
            Command::Mv { src: "a".into(), dst: "b".into() }
        );
        assert_eq!(parse_err("cp a"), ErrorKind::InvalidArguments);
        assert_eq!(parse_err("mv a b c"), ErrorKind::InvalidArguments);
    }

    #[test]
    fn test_archive_commands() {
        assert_eq!(parse("tar -xvf pack.tar"), Command::Tar("pack.tar".into()));
        assert_eq!(parse_err("tar pack.tar"), ErrorKind::InvalidArguments);
        assert_eq!(parse_err("tar -czf pack.tar"), ErrorKind::InvalidArguments);
        assert_eq!(parse_err("tar -xvf"), ErrorKind::InvalidArguments);

        assert_eq!(parse("unzip pack.zip"), Command::Unzip("pack.zip".into()));
        assert_eq!(parse_err("unzip"), ErrorKind::InvalidArguments);
        assert_eq!(parse_err("unzip a.zip b.zip"), ErrorKind::InvalidArguments);
    }

    #[test]
    fn test_no_argument_commands() {
        assert_eq!(parse("pwd"), Command::Pwd);
        assert_eq!(parse("clear"), Command::Clear);
        assert_eq!(parse("exit"), Command::Exit);
        assert_eq!(parse("exit").kind(), CommandKind::Exit);
    }

    #[test]
    fn test_tab_separated_arguments() {
        assert_eq!(parse("cat\tfile.txt"), Command::Cat("file.txt".into()));
        assert_eq!(
            parse("cp\ta.txt \t b.txt"),
            Command::Cp { src: "a.txt".into(), dst: "b.txt".into() }
        );
        assert_eq!(parse("tar\t-xvf\tpack"), Command::Tar("pack".into()));
        assert_eq!(parse_err("frob\tx"), ErrorKind::UnknownCommand);
    }

    #[test]
    fn test_usage_in_error() {
        let err = Command::parse("cp onlyone").unwrap_err();
        assert_eq!(err.to_string(), "invalid arguments: usage: cp <src> <dst>");
    }
}
