// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! JSON payload to callback compiler
//!
//! Walks a provisioning payload, matches tree positions against the
//! structure grammar of a [`Catalog`], and expands every match into a
//! resolved [`CallbackRecord`]. Relation records are folded into their
//! targets before the list is handed back.

mod catalog;
mod error;
mod generator;
mod preprocess;
mod record;
mod relations;
mod structure;
mod substitute;
mod template;
mod tree;

pub use catalog::Catalog;
pub use error::GeneratorError;
pub use generator::{CallbackGenerator, Environment, DEFAULT_SAVE_DIR};
pub use preprocess::apply_defaults;
pub use record::{CallbackRecord, RecordKind, TOMBSTONE};
pub use relations::process_relations;
pub use structure::{CallbackRef, StructureNode};
pub use substitute::replace_value;
pub use template::{CallbackTemplate, CodeAction, TemplateValue};
