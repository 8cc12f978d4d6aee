// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Default-value injection ahead of callback matching

use serde_json::{Map, Value};

/// Inject missing keys from the patch `table` into every object of `payload`
///
/// Children are patched before their parent. An object at path `a.b` takes
/// every key of `table["a"]["b"]` it does not already have; list elements
/// share the path of their list. Existing values are never overwritten.
pub fn apply_defaults(payload: &mut Value, table: &Map<String, Value>) {
    let mut path = Vec::new();
    patch(payload, table, &mut path);
}

fn patch(node: &mut Value, table: &Map<String, Value>, path: &mut Vec<String>) {
    match node {
        Value::Object(object) => {
            for (key, child) in object.iter_mut() {
                path.push(key.clone());
                patch(child, table, path);
                path.pop();
            }

            if let Some(defaults) = lookup(table, path) {
                for (key, value) in defaults {
                    if !object.contains_key(key) {
                        object.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                patch(item, table, path);
            }
        }
        _ => {}
    }
}

fn lookup<'t>(table: &'t Map<String, Value>, path: &[String]) -> Option<&'t Map<String, Value>> {
    path.iter()
        .try_fold(table, |current, step| current.get(step)?.as_object())
}
