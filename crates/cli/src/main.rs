// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! exa - OEDA configuration tooling

mod commands;
mod config;
mod error;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{oedacli, xmlgen};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "exa",
    version,
    about = "Compile cluster payloads and drive the OEDA command line tool"
)]
struct Cli {
    /// Config file (defaults to ./exa.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON payload into callback records
    Xmlgen(xmlgen::XmlgenArgs),
    /// Drive the OEDA command line tool
    Oedacli(oedacli::OedacliArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match logging::setup(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprint!("{}", error::render(&e));
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprint!("{}", error::render(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Xmlgen(args) => xmlgen::xmlgen(args, &config),
        Commands::Oedacli(args) => oedacli::oedacli(args, &config),
    }
}
