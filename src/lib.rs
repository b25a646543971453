//! `linetool` treats small line-oriented text files as sets of lines. The `io`
//! module reads lines, the `set` module computes differences between line
//! sequences, and the `operations` module writes files back: appending only the
//! lines that are new, removing lines, overwriting, or insisting that a file
//! holds exactly the lines we expect.
//!
//! Current Limitations:
//! * A "line" is zero or more non-newline bytes followed by `\n` (or `\r\n`).
//!   Blank lines are skipped when reading and refused when writing.
//! * Every file is read into memory in its entirety, so this is meant for small
//!   bookkeeping files, not for logs.
//! * There is no locking. Two processes writing the same file race.

#![cfg_attr(debug_assertions, allow(dead_code, unused_imports))]
#![deny(unused_must_use)]
#![deny(clippy::all)]
#![allow(clippy::needless_return)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![deny(missing_docs)]

use bstr::BString;

pub mod args;
pub mod error;
pub mod io;
pub mod logging;
pub mod operations;
pub mod set;

pub use crate::error::{BadLine, Error, FileOp, Result};
pub use crate::io::{read_file, read_lines, FileContents, Limit};
pub use crate::operations::{
    add_new_to_file, append_to_file, create_or_expect, overwrite_file, remove_from_file,
};
pub use crate::set::difference;

/// A single record: the bytes of one physical line, without its terminator.
pub type Line = BString;

/// An ordered sequence of lines. Duplicates are allowed.
pub type Lines = Vec<Line>;
