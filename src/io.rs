//! Reading lines: from any buffered reader, or from a named file that may not
//! exist yet.
use bstr::io::BufReadExt;
use bstr::ByteSlice;
use log::trace;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::error::{Error, FileOp, Result};
use crate::{Line, Lines};

/// How many lines to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Limit {
    /// Read every line
    #[default]
    Unlimited,
    /// Stop after this many (non-blank) lines
    AtMost(usize),
}

impl Limit {
    /// Is `count` lines enough?
    #[must_use]
    pub fn reached(self, count: usize) -> bool {
        match self {
            Limit::Unlimited => false,
            Limit::AtMost(n) => count >= n,
        }
    }
}

/// A negative count means no limit at all.
impl From<isize> for Limit {
    fn from(n: isize) -> Self {
        usize::try_from(n).map_or(Limit::Unlimited, Limit::AtMost)
    }
}

impl From<Option<usize>> for Limit {
    fn from(n: Option<usize>) -> Self {
        n.map_or(Limit::Unlimited, Limit::AtMost)
    }
}

/// Calls `on_line` for each non-blank line of `reader`, with the line
/// terminator (`\n` or `\r\n`) stripped. Lines that are empty after trimming
/// whitespace are skipped. Reading stops when `on_line` returns `Ok(false)`
/// or an error.
pub fn for_each_line<R, F>(mut reader: R, mut on_line: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&[u8]) -> Result<bool>,
{
    // `for_byte_line` wants an `io::Result` back, so a failure from `on_line`
    // is parked here and reading stops.
    let mut failed = None;
    reader
        .for_byte_line(|line| {
            if line.trim().is_empty() {
                return Ok(true);
            }
            match on_line(line) {
                Ok(more) => Ok(more),
                Err(e) => {
                    failed = Some(e);
                    Ok(false)
                }
            }
        })
        .map_err(Error::Read)?;
    match failed {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Reads up to `limit` non-blank lines from `reader`.
pub fn read_lines<R: BufRead>(reader: R, limit: impl Into<Limit>) -> Result<Lines> {
    let limit = limit.into();
    let mut lines = Lines::new();
    if limit.reached(0) {
        return Ok(lines);
    }
    for_each_line(reader, |line| {
        lines.push(Line::from(line));
        Ok(!limit.reached(lines.len()))
    })?;
    Ok(lines)
}

/// What we found when we went looking for a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContents {
    /// The file exists, and these are its (first few) lines
    Found(Lines),
    /// There's no such file
    NotFound,
}

impl FileContents {
    /// Does the file exist?
    #[must_use]
    pub fn exists(&self) -> bool {
        matches!(self, FileContents::Found(_))
    }

    /// The lines of the file, treating a missing file as an empty one
    #[must_use]
    pub fn into_lines(self) -> Lines {
        match self {
            FileContents::Found(lines) => lines,
            FileContents::NotFound => Lines::new(),
        }
    }
}

/// Reads up to `limit` lines from the file at `path`, or reports that there is
/// no such file. Any other failure is an error naming the path.
pub fn read_file_contents(path: impl AsRef<Path>, limit: impl Into<Limit>) -> Result<FileContents> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            trace!("{} does not exist, reading it as empty", path.display());
            return Ok(FileContents::NotFound);
        }
        Err(e) => return Err(Error::io(FileOp::Open, path, e)),
    };
    let lines = read_lines(BufReader::new(file), limit).map_err(|e| match e {
        Error::Read(source) => Error::io(FileOp::Read, path, source),
        other => other,
    })?;
    trace!("read {} lines from {}", lines.len(), path.display());
    Ok(FileContents::Found(lines))
}

/// Reads up to `limit` lines from the file at `path`. A file that doesn't
/// exist reads as empty.
pub fn read_file(path: impl AsRef<Path>, limit: impl Into<Limit>) -> Result<Lines> {
    read_file_contents(path, limit).map(FileContents::into_lines)
}
