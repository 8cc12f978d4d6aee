// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use yare::parameterized;

fn grammar() -> StructureNode {
    StructureNode::from_value(&json!({
        "callbacks": ["root_cb"],
        "customer_network": {
            "callbacks": ["change_env"],
            "nodes": {
                "callbacks": [
                    "detect_domain",
                    {"cb": "add_vip", "range": "0,2", "extra": {"kind": "vip"}}
                ]
            }
        }
    }))
    .unwrap()
}

#[test]
fn root_callbacks_use_empty_path() {
    let empty: [&str; 0] = [];
    assert_eq!(
        grammar().find_callbacks(&empty),
        &[CallbackRef::Named("root_cb".to_string())]
    );
}

#[test]
fn nested_path_resolves_named_and_range_entries() {
    let grammar = grammar();
    let callbacks = grammar.find_callbacks(&["customer_network", "nodes"]);
    assert_eq!(callbacks.len(), 2);
    assert_eq!(callbacks[0], CallbackRef::Named("detect_domain".to_string()));

    let CallbackRef::Range {
        callback,
        start,
        end,
        extra,
    } = &callbacks[1]
    else {
        panic!("expected range entry, got {:?}", callbacks[1]);
    };
    assert_eq!(callback, "add_vip");
    assert_eq!((*start, *end), (0, 2));
    assert_eq!(extra.get("kind"), Some(&json!("vip")));
}

#[parameterized(
    unknown_child = { &["customer_network", "vms"] },
    unknown_root = { &["nodes"] },
    too_deep = { &["customer_network", "nodes", "extra"] },
)]
fn path_misses_yield_no_callbacks(path: &[&str]) {
    assert!(grammar().find_callbacks(path).is_empty());
}

#[parameterized(
    missing_comma = { "3" },
    not_a_number = { "a,b" },
    empty = { "" },
)]
fn invalid_ranges_are_rejected(range: &str) {
    let err = StructureNode::from_value(&json!({
        "x": {"callbacks": [{"cb": "c", "range": range}]}
    }))
    .unwrap_err();
    assert!(matches!(err, GeneratorError::InvalidRange { .. }));
}

#[test]
fn callbacks_must_be_a_list() {
    let err = StructureNode::from_value(&json!({"x": {"callbacks": "c"}})).unwrap_err();
    assert!(matches!(err, GeneratorError::MalformedStructure { ref path, .. } if path == "x"));
}
