//! The library's error type. Every failure that touches a file carries the
//! file's path and the step that failed, so the message can be shown to a user
//! as is.
use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::{Line, Lines};

/// Errors returned by the reading and writing functions.
///
/// A missing file is never an error for the read-oriented operations; it reads
/// as an empty sequence of lines.
#[derive(Error, Debug)]
pub enum Error {
    /// An I/O failure on a named file.
    #[error("error {op} {}: {source}", .path.display())]
    Io {
        /// The step that failed
        op: FileOp,
        /// The file we were working on
        path: PathBuf,
        /// The underlying failure
        #[source]
        source: io::Error,
    },

    /// An I/O failure while reading lines from an unnamed stream.
    #[error("error reading lines: {0}")]
    Read(#[source] io::Error),

    /// The single write wrote fewer bytes than we handed it.
    #[error("error writing to {}: short write (wrote {written}/{expected})", .path.display())]
    ShortWrite {
        /// The file being written
        path: PathBuf,
        /// Bytes actually written
        written: usize,
        /// Bytes we meant to write
        expected: usize,
    },

    /// The file exists but doesn't hold the lines it was expected to hold.
    #[error(
        "expected {} to contain {expected:?} if it existed, but it contained {actual:?}",
        .path.display()
    )]
    Mismatch {
        /// The file being checked
        path: PathBuf,
        /// What we wanted to find
        expected: Lines,
        /// What we found
        actual: Lines,
    },

    /// A line that can't be stored as a single non-blank record.
    #[error("can't write line {line:?}: {problem}")]
    UnwritableLine {
        /// The offending line
        line: Line,
        /// What's wrong with it
        problem: BadLine,
    },
}

impl Error {
    /// Wrap an `io::Error` with the path and the step that failed
    pub(crate) fn io(op: FileOp, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io { op, path: path.into(), source }
    }
}

/// The step of a file operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    /// Opening (or creating) the file
    Open,
    /// Reading lines from the file
    Read,
    /// Writing to the file
    Write,
    /// Flushing and closing the file after a write
    Close,
    /// Deleting the file
    Delete,
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            FileOp::Open => "opening",
            FileOp::Read => "reading lines from",
            FileOp::Write => "writing to",
            FileOp::Close => "closing",
            FileOp::Delete => "deleting",
        };
        f.write_str(verb)
    }
}

/// Why a line can't be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadLine {
    /// Empty, or nothing but whitespace
    Blank,
    /// Contains a `\n`, so it would turn into two records
    EmbeddedNewline,
    /// Ends in `\r`, which would read back as part of a `\r\n` terminator
    TrailingCarriageReturn,
}

impl fmt::Display for BadLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadLine::Blank => f.write_str("blank lines are never stored"),
            BadLine::EmbeddedNewline => f.write_str("it contains a newline"),
            BadLine::TrailingCarriageReturn => f.write_str("it ends in a carriage return"),
        }
    }
}

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, Error>;
