// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Split and convert Grok chat exports.
//!
//! This crate reads the JSON export produced by the Grok backend
//! (e.g. `prod-grok-backend.json`) and rewrites it in one of two layouts.
//!
//! # Overview
//!
//! 1. [`loader`] parses the export into an [`export::ExportDocument`]
//! 2. [`splitter`] writes one file per conversation plus `INDEX.json`, or
//!    [`converter`] builds a single ChatGPT-style document
//! 3. [`writer`] serializes the result as indented JSON
//!
//! # Example
//!
//! ```no_run
//! use grok_export::{converter, loader, splitter};
//! use std::path::Path;
//!
//! let doc = loader::load_export(Path::new("prod-grok-backend.json")).unwrap();
//!
//! let index = splitter::split_export(&doc, Path::new("conversations")).unwrap();
//! println!("{} conversations split", index.len());
//!
//! converter::write_converted(&doc, Path::new("converted.json")).unwrap();
//! ```
//!
//! # Modules
//!
//! - [`export`]: input types and tolerant field access
//! - [`loader`]: reading the export from disk
//! - [`splitter`]: per-conversation files and the index
//! - [`converter`]: ChatGPT-style conversation trees
//! - [`writer`]: JSON output
//! - [`cli`]: argument parsing shared by the binaries

#![deny(missing_docs)]

pub mod cli;
pub mod converter;
pub mod export;
pub mod loader;
pub mod splitter;
pub mod writer;
