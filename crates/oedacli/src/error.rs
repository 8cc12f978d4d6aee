// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Driver errors

use crate::HookError;
use std::path::PathBuf;
use thiserror::Error;

/// Numeric code carried by every driver failure
pub const OEDA_ERROR_CODE: u32 = 0x0EDA;

/// Errors from the OEDA driver
///
/// None of these are retried here: the tool's state does not survive
/// the process, so a caller that wants to retry starts a new run.
#[derive(Debug, Error)]
pub enum OedaError {
    #[error("Invalid path to oedacli: {}", .0.display())]
    InvalidPath(PathBuf),
    #[error("no oedacli binary configured")]
    NoBinary,
    #[error("no XML configuration to load")]
    NoXml,
    #[error("OEDACLI process suddenly stopped. Please review the log: {}", log.display())]
    ProcessStopped { log: PathBuf },
    #[error("Oedacli Error found on script execution. Please review the log: {}", log.display())]
    CommandFailed { command: String, log: PathBuf },
    #[error("callback failed on '{command}': {source}")]
    Hook {
        command: String,
        #[source]
        source: HookError,
    },
    #[error("invalid ignorable message pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("unexpected output for LIST {entity}: {reason}")]
    Inventory { entity: String, reason: String },
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OedaError {
    /// The fixed code pair reported for driver failures
    pub fn code(&self) -> (u32, u32) {
        (OEDA_ERROR_CODE, OEDA_ERROR_CODE)
    }

    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| OedaError::Io { path, source }
    }
}
