// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! JSON output files.
//!
//! Everything is written with two-space indentation, non-ASCII text left
//! unescaped, and no trailing newline.

use serde::Serialize;
use snafu::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Error type for writing output.
#[derive(Debug, Snafu)]
pub enum WriteError {
    /// The output directory could not be created.
    #[snafu(display("failed to create output directory {}: {source}", path.display()))]
    CreateDir {
        /// The directory being created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The output file could not be opened for writing.
    #[snafu(display("failed to create {}: {source}", path.display()))]
    CreateFile {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Serialization or the write itself failed.
    #[snafu(display("failed to write {}: {source}", path.display()))]
    Serialize {
        /// The file being written.
        path: PathBuf,
        /// The underlying serializer error.
        source: serde_json::Error,
    },

    /// Buffered output could not be flushed.
    #[snafu(display("failed to flush {}: {source}", path.display()))]
    Flush {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Renders `value` as pretty JSON.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if `value` cannot be serialized.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Writes `value` to `path` as pretty JSON, replacing any existing file.
///
/// # Errors
///
/// Returns a [`WriteError`] naming `path` if the file cannot be created,
/// serialized into, or flushed.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), WriteError> {
    let file = File::create(path).context(CreateFileSnafu { path })?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, value).context(SerializeSnafu { path })?;
    out.flush().context(FlushSnafu { path })
}

/// Creates `dir` and any missing parents. An existing directory is reused.
///
/// # Errors
///
/// Returns [`WriteError::CreateDir`] if the directory cannot be created.
pub fn ensure_dir(dir: &Path) -> Result<(), WriteError> {
    std::fs::create_dir_all(dir).context(CreateDirSnafu { path: dir })
}
