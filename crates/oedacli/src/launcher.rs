// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locating, probing and preparing the `oedacli` launcher script

use crate::OedaError;
use regex::bytes::{NoExpand, Regex};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::LazyLock;

/// TCP port the Java debug agent listens on in JDB mode
pub const JDB_PORT: u16 = 8008;

#[allow(clippy::expect_used)]
static JAVA_OPTIONS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"JAVA_OPTIONS=.*").expect("constant regex pattern is valid"));

/// JVM options written into the launcher before each run
pub fn java_options(heap: &str, stack: &str, jdb: bool) -> String {
    let mut options = format!("-XX:-UseLargePages -Xss{stack} -Xmx{heap}");
    if jdb {
        options.push_str(&format!(
            " -Xdebug -Xrunjdwp:transport=dt_socket,address={JDB_PORT},server=y,suspend=n"
        ));
    }
    options
}

/// Replace every `JAVA_OPTIONS=...` line remainder in the launcher.
/// The file is only rewritten when its content changes.
pub fn rewrite_java_options(launcher: &Path, options: &str) -> Result<(), OedaError> {
    let original = std::fs::read(launcher).map_err(OedaError::io(launcher))?;
    let replacement = format!("JAVA_OPTIONS=\"{options}\"");
    let rewritten = JAVA_OPTIONS_LINE.replace_all(&original, NoExpand(replacement.as_bytes()));
    if rewritten[..] != original[..] {
        tracing::debug!(launcher = %launcher.display(), %options, "rewriting java options");
        std::fs::write(launcher, &*rewritten).map_err(OedaError::io(launcher))?;
    }
    Ok(())
}

/// Run `<launcher> -e help` and return the commands it advertises
pub(crate) fn probe(launcher: &Path) -> Result<Vec<String>, OedaError> {
    let invalid = || OedaError::InvalidPath(launcher.to_path_buf());
    let output = Command::new(launcher)
        .args(["-e", "help"])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| {
            tracing::warn!(launcher = %launcher.display(), error = %e, "oedacli probe failed to start");
            invalid()
        })?;
    if !output.status.success() {
        tracing::warn!(launcher = %launcher.display(), status = %output.status, "oedacli probe failed");
        return Err(invalid());
    }
    Ok(parse_help(&String::from_utf8_lossy(&output.stdout)))
}

/// Sorted command names from help output: lines indented by two spaces,
/// excluding the `Available Objects` heading.
pub fn parse_help(output: &str) -> Vec<String> {
    let mut commands: Vec<String> = output
        .replace('\t', " ")
        .lines()
        .filter(|line| line.starts_with("  ") && !line.contains("Available Objects"))
        .map(|line| line.trim().to_string())
        .collect();
    commands.sort();
    commands
}

/// The tool's own diagnostic log, read by line offset
#[derive(Debug)]
pub(crate) struct InternalLog {
    path: PathBuf,
    seen: usize,
}

impl InternalLog {
    /// `<launcher dir>/log/oedacli.out`
    pub(crate) fn for_launcher(launcher: &Path) -> Self {
        let dir = launcher.parent().unwrap_or_else(|| Path::new("."));
        let mut log = Self {
            path: dir.join("log").join("oedacli.out"),
            seen: 0,
        };
        log.mark();
        log
    }

    fn lines(&self) -> Vec<String> {
        match std::fs::read(&self.path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Lines appended since the last mark
    pub(crate) fn unseen(&self) -> Vec<String> {
        self.lines().into_iter().skip(self.seen).collect()
    }

    pub(crate) fn mark(&mut self) {
        self.seen = self.lines().len();
    }
}
