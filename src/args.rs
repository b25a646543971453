//! Code to parse the command line using `clap`, and definitions of the parsed
//! result

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

use crate::io::Limit;

/// Returns the parsed command line: the `Args` return value's `config` field
/// holds process-wide settings, and the `command` field says what to do.
#[must_use]
pub fn parsed() -> Args {
    into_args(CliArgs::parse())
}

/// Parses `args` (including the program name) instead of the real command
/// line.
pub fn parse_from<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    CliArgs::try_parse_from(args).map(into_args)
}

/// The parsed command line
#[derive(Debug)]
pub struct Args {
    /// Settings that apply to the whole run
    pub config: Config,
    /// The operation requested
    pub command: Command,
}

/// Settings decided once, at process start, and handed to whoever needs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The most verbose log level to emit
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Config { log_level: LevelFilter::Error }
    }
}

/// What to do, and to which file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append the lines of standard input that `file` doesn't already contain
    Add {
        /// The list file
        file: PathBuf,
    },
    /// Remove the lines of standard input from `file`
    Remove {
        /// The list file
        file: PathBuf,
        /// Delete `file` if no lines are left
        delete_if_empty: bool,
    },
    /// Create `file` with the lines of standard input, or check that it
    /// already holds exactly those lines
    Expect {
        /// The list file
        file: PathBuf,
        /// An existing file with no lines is filled rather than rejected
        allow_empty: bool,
    },
    /// Replace the contents of `file` with the lines of standard input
    Set {
        /// The list file
        file: PathBuf,
    },
    /// Print the lines of `file`
    Show {
        /// The list file
        file: PathBuf,
        /// How many lines to print
        limit: Limit,
    },
}

fn into_args(parsed: CliArgs) -> Args {
    let config = Config { log_level: parsed.log_level.into() };
    let command = match parsed.command {
        CliCommand::Add { file } => Command::Add { file },
        CliCommand::Remove { file, keep_empty } => Command::Remove { file, delete_if_empty: !keep_empty },
        CliCommand::Expect { file, allow_empty } => Command::Expect { file, allow_empty },
        CliCommand::Set { file } => Command::Set { file },
        CliCommand::Show { file, limit } => {
            Command::Show { file, limit: limit.map_or(Limit::Unlimited, Limit::from) }
        }
    };
    Args { config, command }
}

#[derive(Debug, Parser)]
#[command(name = "linetool", version)]
/// A tool to work with line-oriented text files. Each file is treated as a set
/// of lines; blank lines are ignored.
struct CliArgs {
    #[command(subcommand)]
    command: CliCommand,
    #[arg(long, global = true, value_enum, env = "LINETOOL_LOG", default_value_t = LogLevel::Error)]
    /// How much to log to standard error
    log_level: LogLevel,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Read lines from stdin and append new ones to a file
    ///
    /// Example:
    ///
    ///     $ echo hello | linetool add /tmp/myfile
    ///     $ echo world | linetool add /tmp/myfile
    ///     $ echo hello | linetool add /tmp/myfile
    ///     $ cat /tmp/myfile
    ///     hello
    ///     world
    #[command(verbatim_doc_comment)]
    Add {
        /// The writable list file
        file: PathBuf,
    },
    /// Read lines from stdin and remove them from a file
    ///
    /// The file is deleted if no lines are left, unless --keep-empty is given.
    Remove {
        /// The writable list file
        file: PathBuf,
        /// Leave an empty file behind instead of deleting it
        #[arg(long)]
        keep_empty: bool,
    },
    /// Create a file holding the lines from stdin, or check that it holds
    /// exactly those lines, in that order
    Expect {
        /// The list file
        file: PathBuf,
        /// Fill the file if it exists but holds no lines
        #[arg(long)]
        allow_empty: bool,
    },
    /// Replace a file's contents with the lines from stdin
    Set {
        /// The writable list file
        file: PathBuf,
    },
    /// Print the lines of a file. A missing file has no lines.
    Show {
        /// The list file
        file: PathBuf,
        /// Print at most this many lines (negative means all of them)
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        limit: Option<isize>,
    },
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, ValueEnum)]
/// Log verbosity, from silent to everything
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }

    #[test]
    fn remove_deletes_empty_files_unless_told_otherwise() {
        let args = parse_from(["linetool", "remove", "list"]).unwrap();
        assert_eq!(args.command, Command::Remove { file: "list".into(), delete_if_empty: true });
        let args = parse_from(["linetool", "remove", "--keep-empty", "list"]).unwrap();
        assert_eq!(args.command, Command::Remove { file: "list".into(), delete_if_empty: false });
    }

    #[test]
    fn show_limits() {
        let args = parse_from(["linetool", "show", "-n", "2", "list"]).unwrap();
        assert_eq!(args.command, Command::Show { file: "list".into(), limit: Limit::AtMost(2) });
        let args = parse_from(["linetool", "show", "--limit", "-1", "list"]).unwrap();
        assert_eq!(args.command, Command::Show { file: "list".into(), limit: Limit::Unlimited });
        let args = parse_from(["linetool", "show", "list"]).unwrap();
        assert_eq!(args.command, Command::Show { file: "list".into(), limit: Limit::Unlimited });
    }

    #[test]
    fn log_level_is_configurable() {
        let args = parse_from(["linetool", "--log-level", "debug", "add", "list"]).unwrap();
        assert_eq!(args.config.log_level, LevelFilter::Debug);
        let args = parse_from(["linetool", "set", "list", "--log-level", "off"]).unwrap();
        assert_eq!(args.config.log_level, LevelFilter::Off);
    }

    #[test]
    fn a_file_argument_is_required() {
        assert!(parse_from(["linetool", "add"]).is_err());
        assert!(parse_from(["linetool", "add", "a", "b"]).is_err());
        assert!(parse_from(["linetool"]).is_err());
    }
}
