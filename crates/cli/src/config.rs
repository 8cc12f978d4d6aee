// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `exa.toml` loading

use anyhow::{Context, Result};
use exa_oedacli::DriverSettings;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory and the user config dir
pub const CONFIG_FILE: &str = "exa.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub oedacli: OedacliSection,
    pub xmlgen: XmlgenSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OedacliSection {
    /// The `oedacli` launch script
    pub path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_file: Option<String>,
    #[serde(flatten)]
    pub driver: DriverSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct XmlgenSection {
    /// The `default_values.json` catalog
    pub defaults: Option<PathBuf>,
    pub save_dir: Option<PathBuf>,
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `explicit` if given, otherwise the first `exa.toml` found in
    /// the working directory or the user config dir, otherwise defaults.
    /// Relative paths inside a file are taken relative to that file.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => discover(),
        };
        let Some(path) = path else {
            tracing::debug!("no config file found, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config =
            Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        tracing::debug!(config = %path.display(), "loaded config");
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        let fields = [
            &mut self.oedacli.path,
            &mut self.oedacli.log_dir,
            &mut self.xmlgen.defaults,
            &mut self.xmlgen.save_dir,
        ];
        for field in fields {
            if let Some(path) = field.as_mut() {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        }
    }
}

fn discover() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE);
    let user = dirs::config_dir().map(|dir| dir.join("exa").join(CONFIG_FILE));
    std::iter::once(local)
        .chain(user)
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
