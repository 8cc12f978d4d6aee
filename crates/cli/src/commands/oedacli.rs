// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `exa oedacli` - Drive the OEDA command line tool

use crate::config::Config;
use crate::error::ExaError;
use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use exa_oedacli::{OedaCli, DEFAULT_LOG_FILE};
use std::path::{Path, PathBuf};

const DEFAULT_LOG_DIR: &str = "log/oedacli";

#[derive(Args)]
pub struct OedacliArgs {
    /// The oedacli launch script (overrides the config file)
    #[arg(long, global = true)]
    pub binary: Option<PathBuf>,

    /// Directory for the audit log and command transcripts
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: OedacliCommand,
}

#[derive(Subcommand)]
pub enum OedacliCommand {
    /// Run a script of commands against an XML configuration
    Run {
        /// Configuration to load
        #[arg(long)]
        xml: PathBuf,
        /// Where to save the resulting configuration
        #[arg(long)]
        save: Option<PathBuf>,
        /// Merge then deploy instead of force-merging
        #[arg(long)]
        deploy: bool,
        /// Do not stage each command with SAVE ACTION
        #[arg(long)]
        no_auto_save: bool,
        /// Add a single merge trailer at the end instead of one per command
        #[arg(long)]
        no_auto_merge: bool,
        /// One command per line; blank lines and `#` comments are skipped
        script: PathBuf,
    },
    /// List every entity in an XML configuration as JSON
    Inventory {
        #[arg(long)]
        xml: PathBuf,
    },
    /// Show the commands the tool advertises
    Commands {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

fn driver(args: &OedacliArgs, config: &Config) -> Result<OedaCli> {
    let binary = args
        .binary
        .clone()
        .or_else(|| config.oedacli.path.clone())
        .ok_or_else(|| ExaError::missing_setting("oedacli", "path", "--binary"))?;
    let log_dir = args
        .log_dir
        .clone()
        .or_else(|| config.oedacli.log_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
    let log_file = config.oedacli.log_file.as_deref().unwrap_or(DEFAULT_LOG_FILE);

    let settings = config.oedacli.driver.resolve()?;
    Ok(OedaCli::new(Some(binary), &log_dir, settings)?.with_log_file(log_file))
}

/// Script lines worth sending: trimmed, without blanks and comments
pub fn script_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

fn read_script(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read script {}", path.display()))
}

pub fn oedacli(args: OedacliArgs, config: &Config) -> Result<()> {
    let mut cli = driver(&args, config)?;

    match args.command {
        OedacliCommand::Run {
            xml,
            save,
            deploy,
            no_auto_save,
            no_auto_merge,
            script,
        } => {
            let content = read_script(&script)?;
            cli.set_deploy(deploy);
            cli.set_auto_save(!no_auto_save);
            cli.set_auto_merge(!no_auto_merge);
            for line in script_lines(&content) {
                cli.append_command(line, &[], &[], false);
            }

            let transcript = cli.run(Some(&xml), save.as_deref())?;
            println!("{transcript}");
        }

        OedacliCommand::Inventory { xml } => {
            let inventory = cli.inventory(Some(&xml))?;
            output::print_json(&inventory)?;
        }

        OedacliCommand::Commands { format } => {
            output::print_list(cli.possible_commands(), format)?;
        }
    }

    Ok(())
}
