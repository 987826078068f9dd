// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Command-line interface for converting a Grok export.
//!
//! Produces a single ChatGPT-style JSON document that archive viewers can
//! import.

use grok_export::cli::{self, CONVERT, Command};
use grok_export::{converter, loader, writer};
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
    let args = match cli::parse_args(&CONVERT, std::env::args_os().skip(1)).context(ParseArgsSnafu)? {
        Command::Run(args) => args,
        Command::Help => {
            println!("{}", CONVERT.help());
            return Ok(());
        }
        Command::Version => {
            println!("{}", CONVERT.version());
            return Ok(());
        }
    };

    if !args.quiet {
        eprintln!("Loading {}", args.input.display());
    }
    let doc = loader::load_export(&args.input).context(LoadSnafu)?;

    let converted = converter::write_converted(&doc, &args.output).context(WriteSnafu)?;

    if !args.quiet {
        eprintln!(
            "Wrote {} ({} conversations)",
            args.output.display(),
            converted.conversations.len()
        );
    }
    Ok(())
}
