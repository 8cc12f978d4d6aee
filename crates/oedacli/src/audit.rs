// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-driver audit log

use crate::OedaError;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuditLevel::Debug => "Debug",
            AuditLevel::Info => "Info",
            AuditLevel::Warn => "Warn",
            AuditLevel::Error => "Error",
        })
    }
}

/// Append-only text log of everything sent to and read from the tool
///
/// Lines look like `2026-01-02 03:04:05 * oedacli * Info * message`.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self, level: AuditLevel, message: &str) -> Result<(), OedaError> {
        let line = format_line(&chrono::Utc::now(), level, message);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(OedaError::io(&self.path))?;
        file.write_all(line.as_bytes()).map_err(OedaError::io(&self.path))
    }

    /// Record, falling back to a tracing warning if the file is unwritable
    pub(crate) fn note(&self, level: AuditLevel, message: &str) {
        if let Err(e) = self.record(level, message) {
            tracing::warn!(error = %e, "failed to write audit log");
        }
    }
}

fn format_line<Tz: chrono::TimeZone>(
    now: &chrono::DateTime<Tz>,
    level: AuditLevel,
    message: &str,
) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("{} * oedacli * {} * {}\n", now.format("%Y-%m-%d %H:%M:%S"), level, message)
}
