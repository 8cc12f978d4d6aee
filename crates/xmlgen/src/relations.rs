// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Relation wiring between callback records

use crate::record::{CallbackRecord, TOMBSTONE};
use serde_json::Value;

/// Prefix of list elements that embed another record's values
const SELF_PREFIX: &str = "self:";

/// Progress of a record's own `self:` resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Pending,
    InProgress,
    Done,
}

/// Fold relation records into their targets, then resolve `self:` embeds
///
/// Every `relation_callback` record is removed. Its `insert_values` are
/// appended to (lists) or written over (scalars) the `insert_key` field of
/// the first xml record matching `callback_name`/`callback_id`; a relation
/// without a target is logged and dropped.
///
/// Then every list element `self:<name>:<id>` in the remaining records is
/// replaced by the full values map of the record it names, and that record
/// is tombstoned with `xml_callback = "deleted"`. A target's own embeds are
/// resolved before it is copied, so nested references survive in any order. Tombstoned records stay
/// in the list; the generator filters them out of its final output.
pub fn process_relations(records: &mut Vec<CallbackRecord>) {
    let (relations, mut xml): (Vec<_>, Vec<_>) =
        std::mem::take(records).into_iter().partition(|r| !r.is_xml());

    for relation in &relations {
        apply_relation(relation, &mut xml);
    }

    let mut state = vec![Resolution::Pending; xml.len()];
    for idx in 0..xml.len() {
        embed_self_references(idx, &mut xml, &mut state);
    }

    *records = xml;
}

fn find_target(records: &[CallbackRecord], name: &str, id: &str) -> Option<usize> {
    records.iter().position(|r| r.matches(name, id))
}

fn apply_relation(relation: &CallbackRecord, records: &mut [CallbackRecord]) {
    let values = &relation.values;
    let field = |key: &str| values.get(key).and_then(Value::as_str);

    let (Some(id), Some(name), Some(key), Some(insert)) = (
        field("callback_id"),
        field("callback_name"),
        field("insert_key"),
        values.get("insert_values"),
    ) else {
        tracing::warn!(relation = %relation.name, "incomplete relation callback, dropping");
        return;
    };

    let Some(target) = find_target(records, name, id) else {
        tracing::warn!(
            relation = %relation.name,
            callback_name = name,
            callback_id = id,
            "relation target not found, dropping"
        );
        return;
    };

    let target_values = &mut records[target].values;
    match (target_values.get_mut(key), insert) {
        (Some(Value::Array(existing)), Value::Array(extra)) => {
            existing.extend(extra.iter().cloned());
        }
        _ => {
            target_values.insert(key.to_string(), insert.clone());
        }
    }
}

fn embed_self_references(idx: usize, records: &mut [CallbackRecord], state: &mut [Resolution]) {
    if state[idx] != Resolution::Pending {
        return;
    }
    state[idx] = Resolution::InProgress;

    let keys: Vec<String> = records[idx]
        .values
        .iter()
        .filter(|(_, v)| v.is_array())
        .map(|(k, _)| k.clone())
        .collect();

    for key in keys {
        let Some(Value::Array(elements)) = records[idx].values.get(&key).cloned() else {
            continue;
        };

        let mut resolved = Vec::with_capacity(elements.len());
        for element in elements {
            let Some(reference) = element.as_str().and_then(|s| s.strip_prefix(SELF_PREFIX))
            else {
                resolved.push(element);
                continue;
            };

            let mut parts = reference.split(':');
            let (Some(name), Some(id)) = (parts.next(), parts.next()) else {
                tracing::warn!(element = %element, "malformed self reference, dropping");
                continue;
            };

            let Some(target) = find_target(records, name, id) else {
                tracing::warn!(callback_name = name, callback_id = id, "self reference not found, dropping");
                continue;
            };

            if state[target] == Resolution::InProgress {
                tracing::warn!(callback_name = name, callback_id = id, "cyclic self reference, embedding unresolved");
            } else {
                embed_self_references(target, records, state);
            }
            resolved.push(Value::Object(records[target].values.clone()));
            records[target].xml_callback = Some(TOMBSTONE.to_string());
        }

        records[idx].values.insert(key, Value::Array(resolved));
    }

    state[idx] = Resolution::Done;
}

#[cfg(test)]
#[path = "relations_tests.rs"]
mod tests;
