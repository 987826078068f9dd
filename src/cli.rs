// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Argument handling shared by `grok-split` and `grok-convert`.
//!
//! Both tools take `<INPUT> [OUTPUT]`; only the meaning of the output and
//! its default differ, which is captured in a [`Tool`].

use lexopt::prelude::*;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Static description of one of the command-line tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    /// Binary name.
    pub name: &'static str,
    /// One-line summary for the help text.
    pub about: &'static str,
    /// Placeholder for the output argument (e.g. `OUTPUT_DIR`).
    pub output_arg: &'static str,
    /// Help text for the output argument.
    pub output_help: &'static str,
    /// File or directory name used next to the input when no output is given.
    pub default_output: &'static str,
}

/// The splitter: one file per conversation plus `INDEX.json`.
pub const SPLIT: Tool = Tool {
    name: "grok-split",
    about: "Split a Grok export into one JSON file per conversation with an INDEX.json summary",
    output_arg: "OUTPUT_DIR",
    output_help: "Output directory (default: grok_conversations_exported next to the input)",
    default_output: "grok_conversations_exported",
};

/// The converter: a single ChatGPT-style document.
pub const CONVERT: Tool = Tool {
    name: "grok-convert",
    about: "Convert a Grok export into a ChatGPT-compatible JSON file for archive viewers",
    output_arg: "OUTPUT_FILE",
    output_help: "Output file (default: grok_converted_for_llmexplorer.json next to the input)",
    default_output: "grok_converted_for_llmexplorer.json",
};

impl Tool {
    /// Where output goes when the user gives none: a sibling of the input.
    #[must_use]
    pub fn default_output_for(&self, input: &Path) -> PathBuf {
        input.with_file_name(self.default_output)
    }

    /// Builds the help text.
    #[must_use]
    pub fn help(&self) -> String {
        format!(
            "\
{name} {version}
{about}

Usage: {name} [OPTIONS] <INPUT> [{output_arg}]

Arguments:
  <INPUT>         Grok export JSON (e.g. prod-grok-backend.json)
  [{output_arg}]  {output_help}

Options:
  -q, --quiet     Suppress progress messages
  -h, --help      Print help
  -V, --version   Print version",
            name = self.name,
            version = env!("CARGO_PKG_VERSION"),
            about = self.about,
            output_arg = self.output_arg,
            output_help = self.output_help,
        )
    }

    /// Builds the version line.
    #[must_use]
    pub fn version(&self) -> String {
        format!("{} {}", self.name, env!("CARGO_PKG_VERSION"))
    }
}

/// Arguments for an actual run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    /// The export to read.
    pub input: PathBuf,
    /// Output directory or file, already defaulted.
    pub output: PathBuf,
    /// Suppress progress on stderr.
    pub quiet: bool,
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Process an export.
    Run(Cli),
    /// Print help and exit successfully.
    Help,
    /// Print the version and exit successfully.
    Version,
}

/// Parses `args` (without the program name) for `tool`.
///
/// No arguments at all is treated as a request for help.
///
/// # Errors
///
/// Returns a [`lexopt::Error`] for unknown options or more than two
/// positional arguments.
pub fn parse_args<I>(tool: &Tool, args: I) -> Result<Command, lexopt::Error>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut parser = lexopt::Parser::from_args(args);
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut quiet = false;

    while let Some(arg) = parser.next()? {
        match arg {
            Short('q') | Long("quiet") => quiet = true,
            Short('h') | Long("help") => return Ok(Command::Help),
            Short('V') | Long("version") => return Ok(Command::Version),
            Value(val) if input.is_none() => input = Some(val.into()),
            Value(val) if output.is_none() => output = Some(val.into()),
            _ => return Err(arg.unexpected()),
        }
    }

    let Some(input) = input else {
        return Ok(Command::Help);
    };
    let output = output.unwrap_or_else(|| tool.default_output_for(&input));

    Ok(Command::Run(Cli {
        input,
        output,
        quiet,
    }))
}
