// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Callback templates loaded from the catalog

use crate::GeneratorError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Environment key whose values apply regardless of the detected environment
pub const ALL_ENVIRONMENTS: &str = "all";

/// A template field: either one template string or a list of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateValue {
    Text(String),
    List(Vec<String>),
}

/// Field templates partitioned by environment (`all`, `xen`, `kvm`, ...)
pub type EnvValues = IndexMap<String, IndexMap<String, TemplateValue>>;

/// Built-in behaviour of a `code_callback`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeAction {
    /// Split `fqdn` into `host` and `domain` at the first dot
    DetectDomain,
    /// Switch the environment mode from the node's `ostype`
    ChangeEnv,
}

impl CodeAction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "detect_domain" => Some(Self::DetectDomain),
            "change_env" => Some(Self::ChangeEnv),
            _ => None,
        }
    }
}

/// A named, immutable callback definition
#[derive(Debug, Clone, PartialEq)]
pub enum CallbackTemplate {
    /// Produces one record describing an XML change
    Xml {
        /// Target XML entity, copied into every record
        target: Option<String>,
        values: EnvValues,
    },
    /// Produces a transient record that grafts values onto another record
    Relation {
        relation: IndexMap<String, TemplateValue>,
    },
    /// Runs a fixed piece of logic against the current node
    Code(CodeAction),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawTemplate {
    XmlCallback {
        #[serde(default)]
        xml_callback: Option<String>,
        #[serde(default)]
        default_values: EnvValues,
    },
    RelationCallback {
        relation: IndexMap<String, TemplateValue>,
    },
    CodeCallback {
        #[serde(default)]
        name: Option<String>,
    },
}

impl CallbackTemplate {
    /// Parse the catalog entry stored under `name`
    pub fn from_value(name: &str, value: Value) -> Result<Self, GeneratorError> {
        let raw: RawTemplate =
            serde_json::from_value(value).map_err(|source| GeneratorError::MalformedTemplate {
                name: name.to_string(),
                source,
            })?;

        let template = match raw {
            RawTemplate::XmlCallback {
                xml_callback,
                default_values,
            } => Self::Xml {
                target: xml_callback,
                values: default_values,
            },
            RawTemplate::RelationCallback { relation } => Self::Relation { relation },
            RawTemplate::CodeCallback { name: action } => {
                let action = action.as_deref().unwrap_or(name);
                let action = CodeAction::from_name(action)
                    .ok_or_else(|| GeneratorError::UnknownCodeCallback(action.to_string()))?;
                Self::Code(action)
            }
        };

        Ok(template)
    }

    /// Field templates for an xml template in the given environment
    ///
    /// Starts from the `all` values and lets the environment's own values
    /// override or extend them. Other kinds have no environment split.
    pub fn values_for(&self, environment: &str) -> IndexMap<String, TemplateValue> {
        match self {
            Self::Xml { values, .. } => {
                let mut merged = values.get(ALL_ENVIRONMENTS).cloned().unwrap_or_default();
                if environment != ALL_ENVIRONMENTS {
                    if let Some(overrides) = values.get(environment) {
                        for (key, value) in overrides {
                            merged.insert(key.clone(), value.clone());
                        }
                    }
                }
                merged
            }
            Self::Relation { relation } => relation.clone(),
            Self::Code(_) => IndexMap::new(),
        }
    }
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
