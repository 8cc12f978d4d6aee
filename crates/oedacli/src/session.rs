// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One live `oedacli` process and its shared output file

use crate::{OedaError, TranscriptTail};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::time::Duration;

const POLL_MIN: Duration = Duration::from_millis(5);
const POLL_MAX: Duration = Duration::from_millis(200);

/// A running tool whose stdout and stderr share one file with the
/// commands written to it.
///
/// The process is killed and reaped on drop, whatever the outcome.
#[derive(Debug)]
pub(crate) struct OedaSession {
    child: Child,
    stdin: Option<ChildStdin>,
    log: File,
    log_path: PathBuf,
    tail: TranscriptTail,
}

impl OedaSession {
    /// Create the command log in `log_dir` and spawn the tool on it.
    /// The log file is kept after the session ends.
    pub(crate) fn spawn(mut command: Command, log_dir: &Path) -> Result<Self, OedaError> {
        let (log, log_path) = tempfile::Builder::new()
            .prefix("oedacli_command_")
            .suffix(".log")
            .tempfile_in(log_dir)
            .map_err(OedaError::io(log_dir))?
            .keep()
            .map_err(|e| OedaError::Io {
                path: log_dir.to_path_buf(),
                source: e.error,
            })?;

        let stdout = log.try_clone().map_err(OedaError::io(&log_path))?;
        let stderr = log.try_clone().map_err(OedaError::io(&log_path))?;
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .spawn()
            .map_err(OedaError::io(&log_path))?;
        tracing::debug!(pid = child.id(), log = %log_path.display(), "oedacli started");

        let stdin = child.stdin.take();
        let tail = TranscriptTail::open(&log_path).map_err(OedaError::io(&log_path))?;
        Ok(Self {
            child,
            stdin,
            log,
            log_path,
            tail,
        })
    }

    pub(crate) fn log_path(&self) -> &Path {
        &self.log_path
    }

    fn stopped(&self) -> OedaError {
        OedaError::ProcessStopped {
            log: self.log_path.clone(),
        }
    }

    /// Block until at least `expected` prompts have appeared.
    /// Fails as soon as the process is found dead while waiting.
    pub(crate) fn wait_for_prompts(&mut self, expected: usize) -> Result<(), OedaError> {
        let mut delay = POLL_MIN;
        loop {
            self.tail.refresh().map_err(OedaError::io(&self.log_path))?;
            if self.tail.prompts() >= expected {
                return Ok(());
            }
            if let Some(status) = self.child.try_wait().map_err(OedaError::io(&self.log_path))? {
                tracing::warn!(%status, expected, seen = self.tail.prompts(), "oedacli exited early");
                return Err(self.stopped());
            }
            std::thread::sleep(delay);
            delay = (delay * 2).min(POLL_MAX);
        }
    }

    /// Echo a command into the log, then send it to the tool
    pub(crate) fn send(&mut self, command: &str) -> Result<(), OedaError> {
        tracing::debug!(%command, "sending");
        let line = format!("{command}\n");
        self.log
            .write_all(line.as_bytes())
            .and_then(|()| self.log.flush())
            .map_err(OedaError::io(&self.log_path))?;

        let sent = match self.stdin.as_mut() {
            Some(stdin) => stdin.write_all(line.as_bytes()).and_then(|()| stdin.flush()),
            None => return Err(self.stopped()),
        };
        sent.map_err(|e| {
            tracing::warn!(error = %e, "writing to oedacli failed");
            self.stopped()
        })
    }

    /// Output between the previous prompt and prompt `n`
    pub(crate) fn output(&self, n: usize) -> String {
        self.tail.segment(n).unwrap_or_default()
    }

    /// Whole transcript as written to the log
    pub(crate) fn transcript(&mut self) -> Result<String, OedaError> {
        self.tail.refresh().map_err(OedaError::io(&self.log_path))?;
        Ok(self.tail.contents().trim().to_string())
    }
}

impl Drop for OedaSession {
    fn drop(&mut self) {
        self.stdin.take();
        if let Err(e) = self.child.kill() {
            tracing::debug!(error = %e, "oedacli already exited");
        }
        if let Err(e) = self.child.wait() {
            tracing::warn!(error = %e, "failed to reap oedacli");
        }
    }
}
