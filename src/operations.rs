//! Houses the functions that change files: `append_to_file`,
//! `add_new_to_file`, `overwrite_file`, `create_or_expect`, and
//! `remove_from_file`.
//!
//! Each of them reads the whole file (if it needs to), decides what the file
//! should look like, and then makes at most one write. None of them lock the
//! file, and `overwrite_file` rewrites in place, so a crash in the middle of
//! that write can leave a partial file behind.
use bstr::ByteSlice;
use log::debug;
use memchr::{memchr, memrchr};
use std::{
    fs::{self, File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::Path,
};

use crate::error::{BadLine, Error, FileOp, Result};
use crate::io::{read_file, read_file_contents, FileContents, Limit};
use crate::set::difference;
use crate::Line;

/// Renders `lines` as the bytes of a file: each line followed by `\n`.
/// Blank lines, lines containing a newline, and lines ending in `\r` wouldn't
/// read back as the same single record, so they're refused.
pub fn render(lines: &[Line]) -> Result<Vec<u8>> {
    let mut data = Vec::with_capacity(lines.iter().map(|line| line.len() + 1).sum());
    for line in lines {
        if line.trim().is_empty() {
            return Err(Error::UnwritableLine { line: line.clone(), problem: BadLine::Blank });
        }
        if memchr(b'\n', line).is_some() {
            return Err(Error::UnwritableLine {
                line: line.clone(),
                problem: BadLine::EmbeddedNewline,
            });
        }
        if line.last() == Some(&b'\r') {
            return Err(Error::UnwritableLine {
                line: line.clone(),
                problem: BadLine::TrailingCarriageReturn,
            });
        }
        data.extend_from_slice(line);
        data.push(b'\n');
    }
    Ok(data)
}

/// Writes `data` with a single `write` call. Anything less than the whole of
/// `data` is a `ShortWrite`.
fn write_once(file: &mut File, path: &Path, data: &[u8]) -> Result<()> {
    let written = file.write(data).map_err(|e| Error::io(FileOp::Write, path, e))?;
    if written < data.len() {
        return Err(Error::ShortWrite { path: path.to_owned(), written, expected: data.len() });
    }
    Ok(())
}

/// Flushes `file` to disk and closes it. Dropping a `File` throws away any
/// error from `close`, so `sync_all` is where a late write failure shows up.
fn close(file: File, path: &Path) -> Result<()> {
    file.sync_all().map_err(|e| Error::io(FileOp::Close, path, e))?;
    drop(file);
    Ok(())
}

/// What follows the file's last `\n`
#[derive(Debug, PartialEq, Eq)]
enum Tail {
    /// Nothing: the file is empty or ends with `\n`
    Terminated,
    /// Only whitespace, this many bytes of it
    Blank(u64),
    /// A real line missing its `\n`
    Unterminated,
}

fn tail_of(file: &mut File) -> io::Result<Tail> {
    let mut data = Vec::new();
    file.seek(SeekFrom::Start(0))?;
    file.read_to_end(&mut data)?;
    let start = memrchr(b'\n', &data).map_or(0, |n| n + 1);
    let tail = &data[start..];
    Ok(if tail.is_empty() {
        Tail::Terminated
    } else if tail.trim().is_empty() {
        Tail::Blank(tail.len() as u64)
    } else {
        Tail::Unterminated
    })
}

/// Appends `lines` to the file at `path`, creating the file if necessary. If
/// the file's last line is unterminated, it's terminated first so the new
/// lines don't get glued onto it; if that last line is only whitespace, it's
/// cut off instead, since blank lines are never stored.
pub fn append_to_file(path: impl AsRef<Path>, lines: &[Line]) -> Result<()> {
    let path = path.as_ref();
    let mut data = render(lines)?;
    let mut file = OpenOptions::new()
        .read(true)
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(FileOp::Open, path, e))?;
    match tail_of(&mut file).map_err(|e| Error::io(FileOp::Read, path, e))? {
        Tail::Terminated => {}
        Tail::Unterminated => data.insert(0, b'\n'),
        Tail::Blank(len) => {
            let size = file.metadata().map_err(|e| Error::io(FileOp::Read, path, e))?.len();
            file.set_len(size - len).map_err(|e| Error::io(FileOp::Write, path, e))?;
        }
    }
    write_once(&mut file, path, &data)?;
    close(file, path)?;
    debug!("appended {} lines to {}", lines.len(), path.display());
    Ok(())
}

/// Appends to the file at `path` those of `maybe_new` that it doesn't already
/// contain. If there are none, the file is left alone (and not created).
pub fn add_new_to_file(path: impl AsRef<Path>, maybe_new: &[Line]) -> Result<()> {
    let path = path.as_ref();
    let existing = read_file(path, Limit::Unlimited)?;
    let new_lines = difference(maybe_new, &existing);
    if new_lines.is_empty() {
        debug!("nothing new for {}", path.display());
        return Ok(());
    }
    append_to_file(path, &new_lines)
}

/// Replaces the contents of the file at `path` with `lines`, creating the file
/// if necessary.
pub fn overwrite_file(path: impl AsRef<Path>, lines: &[Line]) -> Result<()> {
    let path = path.as_ref();
    let data = render(lines)?;
    let mut file = File::create(path).map_err(|e| Error::io(FileOp::Open, path, e))?;
    write_once(&mut file, path, &data)?;
    close(file, path)?;
    debug!("wrote {} lines to {}", lines.len(), path.display());
    Ok(())
}

/// Insists that the file at `path` holds exactly `expected`, in order.
///
/// * If there's no such file, it's created with `expected` as its contents.
/// * If the file holds `expected`, nothing happens, so it's safe to call this
///   again and again.
/// * If the file holds no lines at all and `allow_empty` is true, it's
///   overwritten with `expected`.
/// * Otherwise the result is an `Error::Mismatch` showing both versions.
pub fn create_or_expect(path: impl AsRef<Path>, expected: &[Line], allow_empty: bool) -> Result<()> {
    let path = path.as_ref();
    match read_file_contents(path, Limit::Unlimited)? {
        FileContents::NotFound => {
            debug!("creating {}", path.display());
            overwrite_file(path, expected)
        }
        FileContents::Found(actual) if actual == expected => Ok(()),
        FileContents::Found(actual) if actual.is_empty() && allow_empty => {
            debug!("filling empty {}", path.display());
            overwrite_file(path, expected)
        }
        FileContents::Found(actual) => Err(Error::Mismatch {
            path: path.to_owned(),
            expected: expected.to_vec(),
            actual,
        }),
    }
}

/// Removes every occurrence of each of `to_remove` from the file at `path`.
/// If nothing is left and `delete_if_empty` is true, the file is deleted;
/// otherwise what's left is written back, even if that's nothing.
///
/// Removing nothing, or removing lines the file doesn't contain, skips the
/// rewrite, so the file's bytes are left as they were: blank lines and a
/// missing final `\n` stay. Only its lines are guaranteed, not its bytes.
pub fn remove_from_file(path: impl AsRef<Path>, to_remove: &[Line], delete_if_empty: bool) -> Result<()> {
    if to_remove.is_empty() {
        return Ok(());
    }
    let path = path.as_ref();
    let contents = read_file_contents(path, Limit::Unlimited)?;
    let exists = contents.exists();
    let existing = contents.into_lines();
    let remaining = difference(&existing, to_remove);

    if remaining.is_empty() && delete_if_empty {
        if !exists {
            debug!("{} is already gone", path.display());
            return Ok(());
        }
        return match fs::remove_file(path) {
            Ok(()) => {
                debug!("deleted {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(FileOp::Delete, path, e)),
        };
    }

    if exists && remaining.len() == existing.len() {
        debug!("none of the lines to remove are in {}", path.display());
        return Ok(());
    }
    overwrite_file(path, &remaining)
}
