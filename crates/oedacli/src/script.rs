// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pending OEDA command script

use std::path::Path;

/// Argument list for a command; `None` values are dropped
pub type Params<'a> = [(&'a str, Option<&'a str>)];

/// Ordered, mutable list of OEDA commands awaiting execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OedaScript {
    commands: Vec<String>,
    auto_save: bool,
    auto_merge: bool,
    deploy: bool,
}

impl Default for OedaScript {
    fn default() -> Self {
        Self::new(false)
    }
}

impl OedaScript {
    pub fn new(deploy: bool) -> Self {
        Self {
            commands: Vec::new(),
            auto_save: true,
            auto_merge: true,
            deploy,
        }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn set_commands(&mut self, commands: Vec<String>) {
        self.commands = commands;
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Remove and return every pending command
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.commands)
    }

    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    pub fn set_auto_save(&mut self, enabled: bool) {
        self.auto_save = enabled;
    }

    pub fn auto_merge(&self) -> bool {
        self.auto_merge
    }

    pub fn set_auto_merge(&mut self, enabled: bool) {
        self.auto_merge = enabled;
    }

    pub fn is_deploy(&self) -> bool {
        self.deploy
    }

    pub fn set_deploy(&mut self, deploy: bool) {
        self.deploy = deploy;
    }

    /// Append `<command> k="v" ... [WHERE k="v" ...]` plus any automatic
    /// save and merge commands. Returns the formatted command line.
    pub fn append_command(
        &mut self,
        command: &str,
        args: &Params<'_>,
        conditions: &Params<'_>,
        force: bool,
    ) -> String {
        let mut line = command.to_string();
        let args = format_params(args);
        if !args.is_empty() {
            line.push(' ');
            line.push_str(&args);
        }
        let conditions = format_params(conditions);
        if !conditions.is_empty() {
            line.push_str(" WHERE ");
            line.push_str(&conditions);
        }

        self.commands.push(line.clone());
        if self.auto_save {
            self.save_action(force);
        }
        if self.auto_merge {
            self.merge_actions_deploy();
        }
        line
    }

    /// Append a raw command line verbatim
    pub fn push_raw(&mut self, command: impl Into<String>) {
        self.commands.push(command.into());
    }

    /// Append a comment, prefixing every line with `# `
    pub fn comment(&mut self, text: &str) {
        self.commands.push(format!("# {}", text.replace('\n', "\n# ")));
    }

    /// Stage pending changes unless the script is empty or already ends
    /// with a save.
    pub fn save_action(&mut self, force: bool) {
        let Some(last) = self.commands.last() else {
            return;
        };
        if last.contains("SAVE ACTION") {
            return;
        }
        let action = if force { "SAVE ACTION FORCE" } else { "SAVE ACTION" };
        self.commands.push(action.to_string());
    }

    /// Transaction trailer: deploy mode merges then deploys, otherwise
    /// merges with force.
    pub fn merge_actions_deploy(&mut self) {
        if self.deploy {
            self.commands.push("MERGE ACTIONS".to_string());
            self.commands.push("DEPLOY ACTIONS".to_string());
        } else {
            self.commands.push("MERGE ACTIONS FORCE".to_string());
        }
    }

    /// Wrap the pending commands for a run: load first, trailer when
    /// auto-merge is off, save last when a destination is given.
    pub fn finalize(&mut self, load: &Path, save: Option<&Path>) {
        self.commands.insert(0, format!("LOAD FILE NAME={}", load.display()));
        if !self.auto_merge {
            self.merge_actions_deploy();
        }
        if let Some(save) = save {
            self.commands.push(format!("SAVE FILE NAME={}", save.display()));
        }
    }
}

/// `k1="v1" k2="v2"` in argument order, skipping `None` values
pub fn format_params(params: &Params<'_>) -> String {
    params
        .iter()
        .filter_map(|(key, value)| value.map(|v| format!("{key}=\"{v}\"")))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
