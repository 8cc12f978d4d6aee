// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Driver configuration

use crate::OedaError;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_JAVA_HEAP: &str = "4096m";
pub(crate) const DEFAULT_JAVA_STACK: &str = "6m";

/// Resolved driver configuration
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Extra arguments appended after `-l -j`
    pub extra_args: Vec<String>,
    /// Removed from each lowercased output line before failure detection
    pub ignorable_patterns: Vec<Regex>,
    /// Java debugger mode
    pub jdb_enabled: bool,
    /// Pass `--enablersa` to the tool
    pub rsa_enabled: bool,
    pub java_heap: String,
    pub java_stack: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            extra_args: Vec::new(),
            ignorable_patterns: Vec::new(),
            jdb_enabled: false,
            rsa_enabled: false,
            java_heap: DEFAULT_JAVA_HEAP.to_string(),
            java_stack: DEFAULT_JAVA_STACK.to_string(),
        }
    }
}

/// A boolean that may be spelled as a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    fn enabled(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Text(s) => s.eq_ignore_ascii_case("true"),
        }
    }
}

impl Default for Flag {
    fn default() -> Self {
        Flag::Bool(false)
    }
}

/// Driver settings as they appear in a config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverSettings {
    /// Whitespace separated extra arguments
    pub extra_args: String,
    pub ignorable_messages: Vec<String>,
    use_jdb: Flag,
    /// `RSA` turns on `--enablersa`
    pub key_algorithm: Option<String>,
    pub java_heap: Option<String>,
    pub java_stack: Option<String>,
}

impl DriverSettings {
    pub fn use_jdb(&self) -> bool {
        self.use_jdb.enabled()
    }

    pub fn set_use_jdb(&mut self, enabled: bool) {
        self.use_jdb = Flag::Bool(enabled);
    }

    /// Compile the ignorable patterns and fill in defaults
    pub fn resolve(&self) -> Result<DriverConfig, OedaError> {
        let ignorable_patterns = self
            .ignorable_messages
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| OedaError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DriverConfig {
            extra_args: self.extra_args.split_whitespace().map(str::to_string).collect(),
            ignorable_patterns,
            jdb_enabled: self.use_jdb(),
            rsa_enabled: self
                .key_algorithm
                .as_deref()
                .is_some_and(|alg| alg.eq_ignore_ascii_case("RSA")),
            java_heap: self.java_heap.clone().unwrap_or_else(|| DEFAULT_JAVA_HEAP.to_string()),
            java_stack: self.java_stack.clone().unwrap_or_else(|| DEFAULT_JAVA_STACK.to_string()),
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
