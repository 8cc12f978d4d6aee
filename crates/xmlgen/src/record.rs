// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolved callback records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker written into `xml_callback` once a record was embedded elsewhere
pub const TOMBSTONE: &str = "deleted";

/// Kind of a resolved record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    XmlCallback,
    /// Transient: folded into its target and removed by relation processing
    RelationCallback,
}

/// One application of a template to one payload node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml_callback: Option<String>,
    /// Resolved fields: strings, lists of strings, or embedded value maps
    pub values: Map<String, Value>,
}

impl CallbackRecord {
    pub fn is_xml(&self) -> bool {
        self.kind == RecordKind::XmlCallback
    }

    pub fn is_tombstoned(&self) -> bool {
        self.xml_callback.as_deref() == Some(TOMBSTONE)
    }

    /// String value of a resolved field
    pub fn value_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Whether this record answers to `(name, id)` as a relation target
    pub fn matches(&self, name: &str, id: &str) -> bool {
        self.is_xml()
            && self.value_str("id") == Some(id)
            && (self.xml_callback.as_deref() == Some(name) || self.name == name)
    }
}
