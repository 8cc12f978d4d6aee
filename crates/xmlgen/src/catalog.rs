// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Catalog of templates, grammar and default tables (`default_values.json`)

use crate::{CallbackTemplate, GeneratorError, StructureNode};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Everything the generator needs besides the payload
///
/// Loaded once and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub templates: IndexMap<String, CallbackTemplate>,
    pub structure: StructureNode,
    pub preprocessor: Map<String, Value>,
    pub preprocessor_clusterless: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawCatalog {
    #[serde(default)]
    callbacks: Map<String, Value>,
    #[serde(default)]
    structure: Option<Value>,
    #[serde(default)]
    preprocessor: Map<String, Value>,
    #[serde(default)]
    preprocessor_clusterless: Map<String, Value>,
}

impl Catalog {
    /// Load a catalog file
    pub fn from_path(path: &Path) -> Result<Self, GeneratorError> {
        let content = std::fs::read_to_string(path).map_err(|source| GeneratorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Parse a catalog from its JSON text
    pub fn from_json_str(content: &str) -> Result<Self, GeneratorError> {
        let raw: RawCatalog = serde_json::from_str(content)?;

        let mut templates = IndexMap::with_capacity(raw.callbacks.len());
        for (name, value) in raw.callbacks {
            let template = CallbackTemplate::from_value(&name, value)?;
            templates.insert(name, template);
        }

        let structure = match raw.structure {
            Some(value) => StructureNode::from_value(&value)?,
            None => StructureNode::default(),
        };

        Ok(Self {
            templates,
            structure,
            preprocessor: raw.preprocessor,
            preprocessor_clusterless: raw.preprocessor_clusterless,
        })
    }

    pub fn template(&self, name: &str) -> Result<&CallbackTemplate, GeneratorError> {
        self.templates
            .get(name)
            .ok_or_else(|| GeneratorError::UnknownCallback(name.to_string()))
    }

    /// Default table to inject: the clusterless one for clusterless payloads
    pub fn defaults_for(&self, clusterless: bool) -> &Map<String, Value> {
        if clusterless {
            &self.preprocessor_clusterless
        } else {
            &self.preprocessor
        }
    }
}

pub(crate) fn is_clusterless(payload: &Value) -> bool {
    match payload.get("clusterless") {
        Some(Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
        Some(Value::Bool(flag)) => *flag,
        _ => false,
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
