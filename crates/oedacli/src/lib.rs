// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! OEDA CLI driver
//!
//! Drives one interactive `oedacli` process per execution: loads an XML
//! cluster configuration, feeds it a script of commands, detects each
//! command's completion by counting `oedacli>` prompts in the shared
//! output file, and classifies the output as success or failure.

mod audit;
mod classify;
mod config;
mod driver;
mod error;
mod hooks;
mod inventory;
mod launcher;
mod script;
mod session;
mod transcript;

pub use audit::{AuditLevel, AuditLog};
pub use classify::FailureClassifier;
pub use config::{DriverConfig, DriverSettings};
pub use driver::{OedaCli, DEFAULT_LOG_FILE};
pub use error::{OedaError, OEDA_ERROR_CODE};
pub use hooks::{CallbackMoment, HookError};
pub use inventory::{inventory_script, parse_inventory, Inventory, INVENTORY_ENTITIES};
pub use launcher::{java_options, parse_help, rewrite_java_options, JDB_PORT};
pub use script::OedaScript;
pub use transcript::{TranscriptTail, PROMPT_MARKER};
