// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cursor addressing into a JSON payload
//!
//! The walks keep a cursor of steps from the root instead of holding
//! references, so a node can be mutated in place while its ancestors are
//! borrowed again afterwards for substitution.

use serde_json::Value;

/// One step from a node to a child
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    Key(String),
    Index(usize),
}

pub(crate) fn node_at<'v>(root: &'v Value, cursor: &[Step]) -> Option<&'v Value> {
    cursor.iter().try_fold(root, |node, step| match step {
        Step::Key(key) => node.get(key.as_str()),
        Step::Index(idx) => node.get(*idx),
    })
}

pub(crate) fn node_at_mut<'v>(root: &'v mut Value, cursor: &[Step]) -> Option<&'v mut Value> {
    cursor.iter().try_fold(root, |node, step| match step {
        Step::Key(key) => node.get_mut(key.as_str()),
        Step::Index(idx) => node.get_mut(*idx),
    })
}

/// The object nodes the walk descended through to reach `cursor`
///
/// Only keyed steps push their parent: list elements share the ancestor
/// chain of the list that holds them.
pub(crate) fn ancestors_of<'v>(root: &'v Value, cursor: &[Step]) -> Vec<&'v Value> {
    let mut ancestors = Vec::new();
    let mut node = root;
    for step in cursor {
        let next = match step {
            Step::Key(key) => {
                ancestors.push(node);
                node.get(key.as_str())
            }
            Step::Index(idx) => node.get(*idx),
        };
        match next {
            Some(next) => node = next,
            None => break,
        }
    }
    ancestors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ancestors_skip_list_levels() {
        let root = json!({"nodes": [{"vm": {"name": "a"}}]});
        let cursor = vec![
            Step::Key("nodes".to_string()),
            Step::Index(0),
            Step::Key("vm".to_string()),
        ];

        let ancestors = ancestors_of(&root, &cursor);
        assert_eq!(ancestors.len(), 2);
        assert_eq!(ancestors[0], &root);
        assert_eq!(ancestors[1], &json!({"vm": {"name": "a"}}));
        assert_eq!(node_at(&root, &cursor), Some(&json!({"name": "a"})));
    }

    #[test]
    fn node_at_mut_reaches_list_elements() {
        let mut root = json!({"nodes": [{"n": "a"}, {"n": "b"}]});
        let cursor = vec![Step::Key("nodes".to_string()), Step::Index(1)];
        if let Some(Value::Object(node)) = node_at_mut(&mut root, &cursor) {
            node.insert("idx".to_string(), json!("1"));
        }
        assert_eq!(root["nodes"][1]["idx"], json!("1"));
    }
}
