// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structure grammar: which callbacks apply at which payload path

use crate::GeneratorError;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Key holding the callback list of a grammar node
const CALLBACKS_KEY: &str = "callbacks";

/// One entry in a grammar node's callback list
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackRef {
    /// Run the named template once against the current node
    Named(String),
    /// Run the named template once per integer in `start..end`
    ///
    /// Each run sees a copy of the current node with `extra` merged in and
    /// `idx`/`idx1` set to the loop counter.
    Range {
        callback: String,
        start: i64,
        end: i64,
        extra: Map<String, Value>,
    },
}

impl CallbackRef {
    fn from_value(path: &str, value: &Value) -> Result<Self, GeneratorError> {
        match value {
            Value::String(name) => Ok(Self::Named(name.clone())),
            Value::Object(entry) => {
                let callback = entry
                    .get("cb")
                    .and_then(Value::as_str)
                    .ok_or_else(|| GeneratorError::MalformedStructure {
                        path: path.to_string(),
                        reason: "range entry without 'cb'".to_string(),
                    })?
                    .to_string();
                let range = entry.get("range").and_then(Value::as_str).unwrap_or("");
                let (start, end) =
                    parse_range(range).ok_or_else(|| GeneratorError::InvalidRange {
                        callback: callback.clone(),
                        range: range.to_string(),
                    })?;
                let extra = entry
                    .get("extra")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();

                Ok(Self::Range {
                    callback,
                    start,
                    end,
                    extra,
                })
            }
            other => Err(GeneratorError::MalformedStructure {
                path: path.to_string(),
                reason: format!("unexpected callback entry {}", other),
            }),
        }
    }
}

fn parse_range(range: &str) -> Option<(i64, i64)> {
    let (start, end) = range.split_once(',')?;
    Some((start.trim().parse().ok()?, end.trim().parse().ok()?))
}

/// A node of the structure grammar
///
/// Children are keyed by the exact payload key; list nodes do not add a
/// path segment, so every element of a list is looked up under the list's
/// own path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureNode {
    pub callbacks: Vec<CallbackRef>,
    pub children: IndexMap<String, StructureNode>,
}

impl StructureNode {
    pub fn from_value(value: &Value) -> Result<Self, GeneratorError> {
        Self::parse("", value)
    }

    fn parse(path: &str, value: &Value) -> Result<Self, GeneratorError> {
        let table = value
            .as_object()
            .ok_or_else(|| GeneratorError::MalformedStructure {
                path: path.to_string(),
                reason: "grammar node must be an object".to_string(),
            })?;

        let mut node = StructureNode::default();
        for (key, child) in table {
            if key == CALLBACKS_KEY {
                let entries =
                    child
                        .as_array()
                        .ok_or_else(|| GeneratorError::MalformedStructure {
                            path: path.to_string(),
                            reason: "'callbacks' must be a list".to_string(),
                        })?;
                for entry in entries {
                    node.callbacks.push(CallbackRef::from_value(path, entry)?);
                }
            } else if child.is_object() {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                node.children
                    .insert(key.clone(), Self::parse(&child_path, child)?);
            }
        }

        Ok(node)
    }

    /// Callbacks registered at `path`, or nothing if any segment misses
    pub fn find_callbacks<S: AsRef<str>>(&self, path: &[S]) -> &[CallbackRef] {
        let mut current = self;
        for step in path {
            match current.children.get(step.as_ref()) {
                Some(next) => current = next,
                None => return &[],
            }
        }
        &current.callbacks
    }
}

#[cfg(test)]
#[path = "structure_tests.rs"]
mod tests;
