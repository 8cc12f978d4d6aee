// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `exa xmlgen` - Compile a JSON payload into callback records

use crate::config::Config;
use crate::error::ExaError;
use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use exa_xmlgen::{Catalog, CallbackGenerator, DEFAULT_SAVE_DIR};
use std::path::PathBuf;

#[derive(Args)]
pub struct XmlgenArgs {
    /// Catalog of templates, grammar and preprocessors (default_values.json)
    #[arg(long)]
    pub defaults: Option<PathBuf>,

    /// Payload to compile
    #[arg(long)]
    pub payload: PathBuf,

    /// Run id used to name the debug snapshots (random if omitted)
    #[arg(long)]
    pub uuid: Option<String>,

    /// Directory for the debug snapshots
    #[arg(long)]
    pub save_dir: Option<PathBuf>,
}

pub fn xmlgen(args: XmlgenArgs, config: &Config) -> Result<()> {
    let defaults = args
        .defaults
        .or_else(|| config.xmlgen.defaults.clone())
        .ok_or_else(|| ExaError::missing_setting("xmlgen", "defaults", "--defaults"))?;
    let catalog = Catalog::from_path(&defaults)?;

    let content = std::fs::read_to_string(&args.payload)
        .with_context(|| format!("failed to read payload {}", args.payload.display()))?;
    let payload = serde_json::from_str(&content)
        .with_context(|| format!("invalid payload {}", args.payload.display()))?;

    let run_id = args.uuid.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let save_dir = args
        .save_dir
        .or_else(|| config.xmlgen.save_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_DIR));

    let mut generator = CallbackGenerator::new(run_id, catalog, payload).with_save_dir(save_dir);
    generator.execute()?;
    tracing::info!(
        run_id = generator.run_id(),
        records = generator.callback_info().len(),
        environment = %generator.environment(),
        "payload compiled"
    );
    output::print_json(generator.callback_info())
}
