// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Command-line interface for splitting a Grok export.
//!
//! Writes one JSON file per conversation plus an `INDEX.json` manifest.

use grok_export::cli::{self, Command, SPLIT};
use grok_export::{loader, splitter, writer};
use snafu::prelude::*;
use std::process::ExitCode;

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to parse arguments: {source}"))]
    ParseArgs { source: lexopt::Error },

    #[snafu(display("{source}"))]
    Load { source: loader::LoadError },

    #[snafu(display("{source}"))]
    Write { source: writer::WriteError },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Error> {
    let args = match cli::parse_args(&SPLIT, std::env::args_os().skip(1)).context(ParseArgsSnafu)? {
        Command::Run(args) => args,
        Command::Help => {
            println!("{}", SPLIT.help());
            return Ok(());
        }
        Command::Version => {
            println!("{}", SPLIT.version());
            return Ok(());
        }
    };

    if !args.quiet {
        eprintln!("Loading {}", args.input.display());
    }
    let doc = loader::load_export(&args.input).context(LoadSnafu)?;

    let index = splitter::split_export(&doc, &args.output).context(WriteSnafu)?;

    if !args.quiet {
        eprintln!(
            "Wrote {} conversations to {} (index: {})",
            index.len(),
            args.output.display(),
            splitter::INDEX_FILE
        );
    }
    Ok(())
}
