// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Callback generator: the full payload-to-records pipeline

use crate::catalog::is_clusterless;
use crate::record::{CallbackRecord, RecordKind};
use crate::structure::CallbackRef;
use crate::substitute::replace_value;
use crate::template::{CallbackTemplate, CodeAction, TemplateValue};
use crate::tree::{ancestors_of, node_at, node_at_mut, Step};
use crate::{apply_defaults, process_relations, Catalog, GeneratorError};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Where debug snapshots go unless configured otherwise
pub const DEFAULT_SAVE_DIR: &str = "log/xmlgen";

/// Environment mode selecting template overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Undefined,
    Xen,
    Kvm,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Undefined => "undefined",
            Environment::Xen => "xen",
            Environment::Kvm => "kvm",
        }
    }

    /// Environment implied by a node's `ostype`
    pub fn from_ostype(ostype: &str) -> Option<Self> {
        match ostype {
            "xen" | "ib" | "xen/ib" | "ib/xen" => Some(Environment::Xen),
            "kvm" | "roce" => Some(Environment::Kvm),
            _ => None,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiles one payload into an ordered list of callback records
///
/// Not meant to be shared between threads: a run mutates the payload
/// (defaults, `idx`/`idx1`, code callbacks) and the record list in place.
pub struct CallbackGenerator {
    run_id: String,
    catalog: Catalog,
    payload: Value,
    clusterless: bool,
    save_dir: PathBuf,
    environment: Environment,
    callback_info: Vec<CallbackRecord>,
}

impl CallbackGenerator {
    /// Create a generator for `payload`, keyed by `run_id` in its snapshots
    pub fn new(run_id: impl Into<String>, catalog: Catalog, payload: Value) -> Self {
        let clusterless = is_clusterless(&payload);
        Self {
            run_id: run_id.into(),
            catalog,
            payload,
            clusterless,
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            environment: Environment::Undefined,
            callback_info: Vec::new(),
        }
    }

    pub fn with_save_dir(mut self, save_dir: impl Into<PathBuf>) -> Self {
        self.save_dir = save_dir.into();
        self
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn is_clusterless(&self) -> bool {
        self.clusterless
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    pub fn callback_info(&self) -> &[CallbackRecord] {
        &self.callback_info
    }

    pub fn into_callback_info(self) -> Vec<CallbackRecord> {
        self.callback_info
    }

    pub fn init_callback_info(&mut self) {
        self.callback_info.clear();
    }

    /// Run the pipeline: defaults, matching, relations
    ///
    /// Writes a snapshot after each stage. The resulting records are read
    /// with [`callback_info`](Self::callback_info); records tombstoned by a
    /// `self:` embed are not part of it.
    pub fn execute(&mut self) -> Result<(), GeneratorError> {
        let span = tracing::info_span!("xmlgen.execute", run_id = %self.run_id);
        let _guard = span.enter();

        self.init_callback_info();
        self.environment = Environment::Undefined;

        let table = self.catalog.defaults_for(self.clusterless);
        apply_defaults(&mut self.payload, table);
        self.save_snapshot("p1-0-DeepUpdate.json", &self.payload)?;

        let mut walk = Walk {
            catalog: &self.catalog,
            environment: Environment::Undefined,
            records: Vec::new(),
        };
        walk.visit(&mut self.payload, &mut Vec::new(), &mut Vec::new())?;
        self.environment = walk.environment;
        self.callback_info = walk.records;
        tracing::info!(
            records = self.callback_info.len(),
            environment = %self.environment,
            "payload processed"
        );
        self.save_snapshot("p1-1-CreatePayload_callbackinfo.json", &self.callback_info)?;

        process_relations(&mut self.callback_info);
        self.save_snapshot("p1-2-ProcessRelations_callbackinfo.json", &self.callback_info)?;

        let before = self.callback_info.len();
        self.callback_info.retain(|record| !record.is_tombstoned());
        tracing::info!(
            records = self.callback_info.len(),
            embedded = before - self.callback_info.len(),
            "relations processed"
        );

        Ok(())
    }

    fn save_snapshot<T: Serialize>(&self, tag: &str, content: &T) -> Result<(), GeneratorError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| GeneratorError::Io { path, source }
        };

        std::fs::create_dir_all(&self.save_dir).map_err(io_err(&self.save_dir))?;

        let path = self.save_dir.join(format!("{}_{}", self.run_id, tag));
        let sorted = sort_keys(serde_json::to_value(content)?);
        let text = serde_json::to_string_pretty(&sorted)?;
        std::fs::write(&path, text).map_err(io_err(&path))?;

        tracing::debug!(path = %path.display(), "snapshot saved");
        Ok(())
    }
}

/// Rebuild every object with its keys in sorted order
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(object) => {
            let mut entries: Vec<(String, Value)> = object.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

fn set_index(node: &mut Map<String, Value>, idx: i64) {
    node.insert("idx".to_string(), Value::String(idx.to_string()));
    node.insert("idx1".to_string(), Value::String((idx + 1).to_string()));
}

/// State of one matching pass
struct Walk<'a> {
    catalog: &'a Catalog,
    environment: Environment,
    records: Vec<CallbackRecord>,
}

impl<'a> Walk<'a> {
    /// Pre-order walk: an object's callbacks run before its children
    fn visit(
        &mut self,
        payload: &mut Value,
        cursor: &mut Vec<Step>,
        path: &mut Vec<String>,
    ) -> Result<(), GeneratorError> {
        match node_at(payload, cursor) {
            Some(Value::Object(_)) => {
                let catalog = self.catalog;
                for entry in catalog.structure.find_callbacks(path.as_slice()) {
                    self.execute_callback(entry, payload, cursor)?;
                }

                let keys: Vec<String> = match node_at(payload, cursor) {
                    Some(Value::Object(object)) => object.keys().cloned().collect(),
                    _ => Vec::new(),
                };
                for key in keys {
                    cursor.push(Step::Key(key.clone()));
                    path.push(key);
                    self.visit(payload, cursor, path)?;
                    path.pop();
                    cursor.pop();
                }
            }
            Some(Value::Array(items)) => {
                let len = items.len();
                for idx in 0..len {
                    cursor.push(Step::Index(idx));
                    if let Some(Value::Object(element)) = node_at_mut(payload, cursor) {
                        set_index(element, idx as i64);
                    }
                    self.visit(payload, cursor, path)?;
                    cursor.pop();
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn template(&self, name: &str) -> Result<&'a CallbackTemplate, GeneratorError> {
        let catalog = self.catalog;
        catalog.template(name)
    }

    fn execute_callback(
        &mut self,
        entry: &CallbackRef,
        payload: &mut Value,
        cursor: &[Step],
    ) -> Result<(), GeneratorError> {
        match entry {
            CallbackRef::Named(name) => {
                let template = self.template(name)?;
                if let CallbackTemplate::Code(action) = template {
                    if let Some(node) = node_at_mut(payload, cursor) {
                        self.run_code(*action, node);
                    }
                    return Ok(());
                }

                let ancestors = ancestors_of(payload, cursor);
                if let Some(node) = node_at(payload, cursor) {
                    self.emit(name, template, node, &ancestors);
                }
            }
            CallbackRef::Range {
                callback,
                start,
                end,
                extra,
            } => {
                let template = self.template(callback)?;
                let ancestors = ancestors_of(payload, cursor);
                let Some(base) = node_at(payload, cursor) else {
                    return Ok(());
                };

                for idx in *start..*end {
                    let mut node = base.clone();
                    if let Value::Object(object) = &mut node {
                        for (key, value) in extra {
                            object.insert(key.clone(), value.clone());
                        }
                        set_index(object, idx);
                    }

                    match template {
                        CallbackTemplate::Code(action) => self.run_code(*action, &mut node),
                        _ => self.emit(callback, template, &node, &ancestors),
                    }
                }
            }
        }

        Ok(())
    }

    fn run_code(&mut self, action: CodeAction, node: &mut Value) {
        let Value::Object(node) = node else {
            return;
        };

        match action {
            CodeAction::DetectDomain => {
                let Some(fqdn) = node.get("fqdn").and_then(Value::as_str) else {
                    return;
                };
                let (host, domain) = fqdn.split_once('.').unwrap_or((fqdn, ""));
                let (host, domain) = (host.to_string(), domain.to_string());
                node.insert("host".to_string(), Value::String(host));
                node.insert("domain".to_string(), Value::String(domain));
            }
            CodeAction::ChangeEnv => {
                let Some(ostype) = node.get("ostype").and_then(Value::as_str) else {
                    return;
                };
                if let Some(environment) = Environment::from_ostype(ostype) {
                    tracing::debug!(ostype, %environment, "environment changed");
                    self.environment = environment;
                }
            }
        }
    }

    fn emit(&mut self, name: &str, template: &CallbackTemplate, node: &Value, ancestors: &[&Value]) {
        let (kind, target) = match template {
            CallbackTemplate::Xml { target, .. } => (RecordKind::XmlCallback, target.clone()),
            CallbackTemplate::Relation { .. } => (RecordKind::RelationCallback, None),
            CallbackTemplate::Code(_) => return,
        };

        let mut values = Map::new();
        for (key, value) in template.values_for(self.environment.as_str()) {
            let resolved = match value {
                TemplateValue::Text(text) => Value::String(replace_value(&text, node, ancestors)),
                TemplateValue::List(items) => Value::Array(
                    items
                        .iter()
                        .map(|item| Value::String(replace_value(item, node, ancestors)))
                        .collect(),
                ),
            };
            values.insert(key, resolved);
        }

        self.records.push(CallbackRecord {
            name: name.to_string(),
            kind,
            xml_callback: target,
            values,
        });
    }
}

#[cfg(test)]
#[path = "generator_tests.rs"]
mod tests;
