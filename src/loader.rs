// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Reading an export from disk.
//!
//! Loading is all-or-nothing: either the whole [`ExportDocument`] is parsed
//! or an error is returned before anything is written.

use crate::export::ExportDocument;
use snafu::prelude::*;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Error type for loading an export.
#[derive(Debug, Snafu)]
pub enum LoadError {
    /// The input path does not exist.
    #[snafu(display("file not found -> {}", path.display()))]
    FileNotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[snafu(display("failed to read {}: {source}", path.display()))]
    ReadFile {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The content is not JSON, or not shaped like an export.
    #[snafu(display("invalid JSON format in {}: {source}", path.display()))]
    MalformedInput {
        /// The path that was requested.
        path: PathBuf,
        /// The parser error, including line and column.
        source: serde_json::Error,
    },
}

/// Parses export JSON that is already in memory.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if the text is not valid JSON or the root is
/// not an object with an array of conversations.
///
/// # Example
///
/// ```
/// use grok_export::loader::parse_export;
///
/// let doc = parse_export(r#"{ "conversations": [] }"#).unwrap();
/// assert!(doc.conversations.is_empty());
/// ```
pub fn parse_export(json_str: &str) -> Result<ExportDocument, serde_json::Error> {
    serde_json::from_str(json_str)
}

/// Reads and parses the export at `path`.
///
/// # Errors
///
/// Returns [`LoadError::FileNotFound`] if the file is missing,
/// [`LoadError::ReadFile`] for other I/O failures, and
/// [`LoadError::MalformedInput`] if the content cannot be parsed.
pub fn load_export(path: &Path) -> Result<ExportDocument, LoadError> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return FileNotFoundSnafu { path }.fail();
        }
        Err(e) => return Err(e).context(ReadFileSnafu { path }),
    };

    parse_export(&json).context(MalformedInputSnafu { path })
}
