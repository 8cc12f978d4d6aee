// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.

use exa_oedacli::OedaError;
use exa_xmlgen::GeneratorError;
use std::fmt;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct ExaError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl ExaError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// A required setting came neither from a flag nor from the config file
    pub fn missing_setting(section: &str, key: &str, flag: &str) -> Self {
        ExaError::new(format!("no value for {section}.{key}"))
            .with_suggestion(format!("Pass {flag} on the command line"))
            .with_suggestion(format!("Set `{key}` under [{section}] in exa.toml"))
    }
}

impl fmt::Display for ExaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for ExaError {}

impl From<&OedaError> for ExaError {
    fn from(err: &OedaError) -> Self {
        let (major, minor) = err.code();
        let base = ExaError::new(err.to_string()).with_context(format!("code {major:#06X}/{minor:#06X}"));
        match err {
            OedaError::InvalidPath(_) | OedaError::NoBinary => base
                .with_suggestion("Check `path` under [oedacli] in exa.toml")
                .with_suggestion("Run the tool by hand with `-e help` to confirm it starts"),
            OedaError::CommandFailed { command, .. } => base
                .with_context(format!("Failing command: {command}"))
                .with_suggestion("Add known-benign messages to `ignorable_messages`")
                .with_suggestion("Set `use_jdb = true` to attach a debugger on the next run"),
            OedaError::ProcessStopped { .. } => {
                base.with_suggestion("Check the Java heap and stack settings under [oedacli]")
            }
            _ => base,
        }
    }
}

impl From<&GeneratorError> for ExaError {
    fn from(err: &GeneratorError) -> Self {
        let base = ExaError::new(err.to_string());
        match err {
            GeneratorError::UnknownCallback(_) | GeneratorError::UnknownCodeCallback(_) => base
                .with_context("The structure grammar names a callback the catalog does not define")
                .with_suggestion("Add the template to `callbacks` in the defaults file"),
            _ => base,
        }
    }
}

/// Render any command error, adding hints for the library errors we know
pub fn render(err: &anyhow::Error) -> String {
    if let Some(e) = err.downcast_ref::<ExaError>() {
        return e.to_string();
    }
    if let Some(e) = err.downcast_ref::<OedaError>() {
        return ExaError::from(e).to_string();
    }
    if let Some(e) = err.downcast_ref::<GeneratorError>() {
        return ExaError::from(e).to_string();
    }
    format!("error: {err:#}\n")
}
