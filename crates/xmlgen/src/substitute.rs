// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path-relative variable substitution
//!
//! A template string may contain `<path>` tokens. Each path is a `/`
//! separated route starting at the current node:
//!
//! - `parent` moves one level up the ancestor stack
//! - `root` jumps to the first node of the walk
//! - anything else is a key of the current object, looked up verbatim
//!   first and otherwise as a regex anchored at the start of each sibling
//!   key, first match in insertion order
//!
//! Tokens that do not end on a string resolve to the empty string.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(.*?)>").expect("constant regex pattern is valid"));

/// Substitute every `<path>` token in `template`
///
/// Everything up to the last `:` is kept verbatim as a prefix (this is how
/// `self:<name>:<id>` references survive). After substitution a
/// `value|fallback` chain collapses to its first non-empty segment.
pub fn replace_value(template: &str, current: &Value, ancestors: &[&Value]) -> String {
    let (prefix, body) = match template.rfind(':') {
        Some(pos) => template.split_at(pos + 1),
        None => ("", template),
    };

    let replaced = TOKEN_PATTERN.replace_all(body, |caps: &regex::Captures| {
        resolve_path(&caps[1], current, ancestors)
    });

    let value = replaced
        .split('|')
        .find(|segment| !segment.is_empty())
        .unwrap_or(&replaced);

    format!("{}{}", prefix, value)
}

/// Resolve one `a/b/c` route to a string
pub(crate) fn resolve_path(route: &str, current: &Value, ancestors: &[&Value]) -> String {
    let mut stack: Vec<&Value> = ancestors.to_vec();
    let mut node = current;
    let mut resolved = String::new();

    for segment in route.split('/') {
        resolved.clear();

        match segment {
            "parent" => {
                let Some(parent) = stack.pop() else {
                    tracing::debug!(route, "'parent' above the root");
                    return String::new();
                };
                node = parent;
            }
            "root" => {
                node = ancestors.first().copied().unwrap_or(current);
                stack.clear();
            }
            key => {
                let Some(object) = node.as_object() else {
                    continue;
                };
                let child = match object.get(key) {
                    Some(child) => Some(child),
                    None => match_sibling(key, object),
                };
                if let Some(child) = child {
                    stack.push(node);
                    node = child;
                    if let Value::String(text) = node {
                        resolved.push_str(text);
                    }
                }
            }
        }
    }

    resolved
}

/// First key of `object` that the route segment matches as a regex
fn match_sibling<'v>(
    segment: &str,
    object: &'v serde_json::Map<String, Value>,
) -> Option<&'v Value> {
    let pattern = match Regex::new(&format!("^(?:{})", segment)) {
        Ok(pattern) => pattern,
        Err(e) => {
            tracing::debug!(segment, error = %e, "route segment is not a valid pattern");
            return None;
        }
    };

    object
        .iter()
        .find(|(key, _)| pattern.is_match(key))
        .map(|(_, value)| value)
}

#[cfg(test)]
#[path = "substitute_tests.rs"]
mod tests;
