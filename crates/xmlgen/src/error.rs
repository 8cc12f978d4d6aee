// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised while loading a catalog or compiling a payload

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the callback compiler
///
/// All of these point at an authoring problem in the catalog or an
/// unreadable input, so callers should abort rather than retry.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("invalid callback: {0}")]
    UnknownCallback(String),
    #[error("invalid code callback: {0}")]
    UnknownCodeCallback(String),
    #[error("invalid range '{range}' for callback {callback}")]
    InvalidRange { callback: String, range: String },
    #[error("malformed structure at '{path}': {reason}")]
    MalformedStructure { path: String, reason: String },
    #[error("malformed template {name}: {source}")]
    MalformedTemplate {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
