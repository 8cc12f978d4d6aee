// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-command callbacks

use crate::OedaError;
use std::fmt;
use std::str::FromStr;

/// Error type returned by user callbacks
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

type HookFn = Box<dyn FnMut(&str) -> Result<(), HookError> + Send>;

/// When a callback fires relative to its command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackMoment {
    /// Before the command is sent
    Before,
    /// After the command succeeded
    After,
}

impl FromStr for CallbackMoment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "before" => Ok(CallbackMoment::Before),
            "after" => Ok(CallbackMoment::After),
            other => Err(format!("unknown callback moment: {other}")),
        }
    }
}

pub(crate) struct Hook {
    moment: CallbackMoment,
    f: HookFn,
}

#[derive(Default)]
pub(crate) struct Hooks {
    hooks: Vec<Hook>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks").field("count", &self.hooks.len()).finish()
    }
}

impl Hooks {
    pub(crate) fn add(&mut self, moment: CallbackMoment, f: HookFn) {
        self.hooks.push(Hook { moment, f });
    }

    /// Invoke every callback registered for `moment`, in registration order
    pub(crate) fn run(&mut self, moment: CallbackMoment, command: &str) -> Result<(), OedaError> {
        for hook in self.hooks.iter_mut().filter(|h| h.moment == moment) {
            (hook.f)(command).map_err(|source| OedaError::Hook {
                command: command.to_string(),
                source,
            })?;
        }
        Ok(())
    }
}
