// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Success/failure classification of command output

use regex::Regex;

/// Substrings that mark a command as failed after sanitizing
const FAILURE_MARKERS: [&str; 2] = ["fail", "error:"];

/// Decides whether a command's output reports a failure
///
/// Output is lowercased and split into lines; each ignorable pattern is
/// removed from every line before the markers are searched.
#[derive(Debug, Clone, Default)]
pub struct FailureClassifier {
    ignorable: Vec<Regex>,
}

impl FailureClassifier {
    pub fn new(ignorable: Vec<Regex>) -> Self {
        Self { ignorable }
    }

    pub fn sanitize(&self, output: &str) -> String {
        let lowered = output.to_lowercase();
        lowered
            .split('\n')
            .map(|line| {
                self.ignorable
                    .iter()
                    .fold(line.to_string(), |acc, re| re.replace_all(&acc, "").into_owned())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_failure(&self, output: &str) -> bool {
        let sanitized = self.sanitize(output);
        FAILURE_MARKERS.iter().any(|marker| sanitized.contains(marker))
    }
}
