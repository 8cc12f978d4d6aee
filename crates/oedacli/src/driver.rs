// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The OEDA CLI driver

use crate::hooks::Hooks;
use crate::launcher::{self, InternalLog};
use crate::session::OedaSession;
use crate::{
    inventory_script, java_options, parse_inventory, AuditLevel, AuditLog, CallbackMoment,
    DriverConfig, FailureClassifier, HookError, Inventory, OedaError, OedaScript, JDB_PORT,
};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Audit log file name used when none is given
pub const DEFAULT_LOG_FILE: &str = "oedacli.log";

const BANNER: &str = "********************************************************************************";

/// Debugger hand-off state after the first failure in JDB mode
#[derive(Debug)]
struct DebugHandoff {
    failed_at: usize,
    command: String,
    announced: bool,
}

/// Drives an `oedacli` binary through scripts of commands
///
/// Each [`run`](Self::run), [`execute`](Self::execute) or
/// [`inventory`](Self::inventory) call starts a fresh process, loads the
/// configuration and feeds the commands one at a time, waiting for the
/// tool's prompt between each. The first failing command aborts the run
/// unless debugger mode is on.
#[derive(Debug)]
pub struct OedaCli {
    binary: Option<PathBuf>,
    config: DriverConfig,
    classifier: FailureClassifier,
    log_dir: PathBuf,
    audit: AuditLog,
    script: OedaScript,
    oeda_xml: Option<PathBuf>,
    save_xml: Option<PathBuf>,
    possible_commands: Vec<String>,
    hooks: Hooks,
}

fn absolute(path: &Path) -> Result<PathBuf, OedaError> {
    std::path::absolute(path).map_err(OedaError::io(path))
}

impl OedaCli {
    /// Create a driver writing its logs under `log_dir`.
    ///
    /// When a binary is given it is probed with `-e help`; a binary that
    /// cannot be run is rejected with [`OedaError::InvalidPath`].
    pub fn new(
        binary: Option<PathBuf>,
        log_dir: impl AsRef<Path>,
        config: DriverConfig,
    ) -> Result<Self, OedaError> {
        let log_dir = absolute(log_dir.as_ref())?;
        std::fs::create_dir_all(&log_dir).map_err(OedaError::io(&log_dir))?;

        let mut cli = Self {
            binary,
            classifier: FailureClassifier::new(config.ignorable_patterns.clone()),
            config,
            audit: AuditLog::new(log_dir.join(DEFAULT_LOG_FILE)),
            log_dir,
            script: OedaScript::default(),
            oeda_xml: None,
            save_xml: None,
            possible_commands: Vec::new(),
            hooks: Hooks::default(),
        };
        cli.audit.note(AuditLevel::Info, "__init__");

        if let Some(binary) = cli.binary.clone() {
            match launcher::probe(&binary) {
                Ok(commands) => cli.possible_commands = commands,
                Err(e) => {
                    cli.audit.note(AuditLevel::Error, &e.to_string());
                    return Err(e);
                }
            }
        }
        Ok(cli)
    }

    pub fn with_deploy(mut self, deploy: bool) -> Self {
        self.script.set_deploy(deploy);
        self
    }

    /// Name of the audit log inside the log directory
    pub fn with_log_file(mut self, name: &str) -> Self {
        self.audit = AuditLog::new(self.log_dir.join(name));
        self
    }

    pub fn binary(&self) -> Option<&Path> {
        self.binary.as_deref()
    }

    pub fn set_binary(&mut self, binary: impl Into<PathBuf>) {
        self.binary = Some(binary.into());
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn log_path(&self) -> &Path {
        self.audit.path()
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn script(&self) -> &OedaScript {
        &self.script
    }

    pub fn script_mut(&mut self) -> &mut OedaScript {
        &mut self.script
    }

    /// Commands advertised by the binary's help output, sorted
    pub fn possible_commands(&self) -> &[String] {
        &self.possible_commands
    }

    pub fn oeda_xml(&self) -> Option<&Path> {
        self.oeda_xml.as_deref()
    }

    pub fn set_oeda_xml(&mut self, xml: impl AsRef<Path>) -> Result<(), OedaError> {
        self.oeda_xml = Some(absolute(xml.as_ref())?);
        Ok(())
    }

    pub fn save_xml(&self) -> Option<&Path> {
        self.save_xml.as_deref()
    }

    pub fn set_save_xml(&mut self, xml: impl AsRef<Path>) -> Result<(), OedaError> {
        self.save_xml = Some(absolute(xml.as_ref())?);
        Ok(())
    }

    pub fn set_auto_save(&mut self, enabled: bool) {
        self.script.set_auto_save(enabled);
    }

    pub fn set_auto_merge(&mut self, enabled: bool) {
        self.script.set_auto_merge(enabled);
    }

    pub fn set_deploy(&mut self, deploy: bool) {
        self.script.set_deploy(deploy);
    }

    /// Register a callback run with each command line, either before it
    /// is sent or after it succeeded. An error from the callback aborts
    /// the run.
    pub fn add_callback<F>(&mut self, moment: CallbackMoment, f: F)
    where
        F: FnMut(&str) -> Result<(), HookError> + Send + 'static,
    {
        self.hooks.add(moment, Box::new(f));
    }

    /// See [`OedaScript::append_command`]
    pub fn append_command(
        &mut self,
        command: &str,
        args: &[(&str, Option<&str>)],
        conditions: &[(&str, Option<&str>)],
        force: bool,
    ) {
        let line = self.script.append_command(command, args, conditions, force);
        self.audit.note(AuditLevel::Info, &format!("Append cmd: '{line}'"));
    }

    pub fn comment(&mut self, text: &str) {
        self.script.comment(text);
    }

    /// Load the configuration, run the pending script and optionally save
    /// the result. The script is cleared whatever the outcome.
    pub fn run(&mut self, load: Option<&Path>, save: Option<&Path>) -> Result<String, OedaError> {
        if let Some(load) = load {
            self.set_oeda_xml(load)?;
        }
        if let Some(save) = save {
            self.set_save_xml(save)?;
        }
        let xml = self.oeda_xml.clone().ok_or(OedaError::NoXml)?;

        self.script.finalize(&xml, self.save_xml.as_deref());
        self.audit.note(AuditLevel::Info, &self.script.commands().join("\n"));
        let commands = self.script.take();
        self.execute_commands(&commands)
    }

    /// Run the pending script exactly as it stands
    pub fn execute(&mut self) -> Result<String, OedaError> {
        let commands = self.script.commands().to_vec();
        self.execute_commands(&commands)
    }

    /// List every entity in the configuration
    pub fn inventory(&mut self, xml: Option<&Path>) -> Result<Inventory, OedaError> {
        if let Some(xml) = xml {
            self.set_oeda_xml(xml)?;
        }
        let xml = self.oeda_xml.clone().ok_or(OedaError::NoXml)?;
        let commands = inventory_script(&xml);
        tracing::info!(xml = %xml.display(), "listing oeda inventory");
        let transcript = self.execute_commands(&commands)?;
        parse_inventory(&transcript)
    }

    fn banner(&self, title: &str) {
        self.audit.note(AuditLevel::Warn, BANNER);
        self.audit.note(AuditLevel::Warn, title);
        self.audit.note(AuditLevel::Warn, BANNER);
    }

    fn execute_commands(&mut self, commands: &[String]) -> Result<String, OedaError> {
        let binary = self.binary.clone().ok_or(OedaError::NoBinary)?;
        let span = tracing::info_span!("oedacli.execute", binary = %binary.display(), commands = commands.len());
        let _guard = span.enter();

        self.banner("*** START COMMAND EXECUTION ***");
        let options = java_options(
            &self.config.java_heap,
            &self.config.java_stack,
            self.config.jdb_enabled,
        );
        launcher::rewrite_java_options(&binary, &options)?;

        let mut command = Command::new(&binary);
        command.args(["-l", "-j"]).args(&self.config.extra_args);
        if self.config.rsa_enabled {
            command.arg("--enablersa");
        }

        let mut session = OedaSession::spawn(command, &self.log_dir)?;
        self.audit.note(
            AuditLevel::Info,
            &format!("Commands file: {}", session.log_path().display()),
        );

        self.drive(&mut session, &binary, commands)?;
        let transcript = session.transcript()?;
        tracing::info!("oedacli script completed");
        Ok(transcript)
    }

    fn drive(
        &mut self,
        session: &mut OedaSession,
        binary: &Path,
        commands: &[String],
    ) -> Result<(), OedaError> {
        let mut internal = InternalLog::for_launcher(binary);
        let mut jdb = self.config.jdb_enabled;
        let mut handoff: Option<DebugHandoff> = None;
        let mut expected = 1;
        let mut idx = 0;

        while idx < commands.len() {
            let command = &commands[idx];
            session.wait_for_prompts(expected)?;

            if let Some(h) = handoff.as_mut() {
                if idx == h.failed_at && !h.announced {
                    h.announced = true;
                    jdb = false;
                    self.announce_debugger(session.log_path(), binary, &h.command);
                }
            }

            self.hooks.run(CallbackMoment::Before, command)?;
            self.audit.note(AuditLevel::Info, &format!("Trying command: {command}"));
            session.send(command)?;
            expected += 1;
            session.wait_for_prompts(expected)?;

            let output = session.output(expected);
            self.audit.note(AuditLevel::Info, &format!("Stdout: {output}"));

            if jdb && (command.contains("MERGE") || command.contains("LOAD FILE")) {
                let snapshot = self.log_dir.join(format!("debug{idx}.xml"));
                session.send(&format!("SAVE FILE NAME={}", snapshot.display()))?;
                expected += 1;
            }

            let failed = self.classifier.is_failure(&output);
            if failed {
                tracing::warn!(%command, "oedacli command failed");
                self.banner("*** Dumping OEDACLI log ***");
                self.audit.note(AuditLevel::Warn, &internal.unseen().join("\n"));

                if !jdb {
                    let e = OedaError::CommandFailed {
                        command: command.clone(),
                        log: self.audit.path().to_path_buf(),
                    };
                    self.audit.note(AuditLevel::Error, &e.to_string());
                    return Err(e);
                }

                self.audit.note(AuditLevel::Warn, &format!("Command failed: {command}"));
                if handoff.is_none() {
                    handoff = Some(DebugHandoff {
                        failed_at: idx,
                        command: command.clone(),
                        announced: false,
                    });
                    internal.mark();
                    idx = idx.saturating_sub(2);
                    continue;
                }
            }

            internal.mark();
            idx += 1;
            if !failed {
                self.hooks.run(CallbackMoment::After, command)?;
            }
        }
        Ok(())
    }

    fn announce_debugger(&self, transcript: &Path, binary: &Path, command: &str) {
        let lines = [
            "*** Debugger hand-off ***".to_string(),
            format!("commands file: {}", transcript.display()),
            format!("oedacli path: {}", binary.display()),
            format!("last affected command: {command}"),
            "1. Use the jdb shipped with the deployment JDK".to_string(),
            "2. Change into the OEDA source tree".to_string(),
            format!("3. Attach with `jdb -attach localhost:{JDB_PORT} -sourcepath $PWD`"),
            "4. Set `stop in oracle.onecommand.cli.oedacli.processLine`".to_string(),
            "5. Continue and wait for the breakpoint".to_string(),
        ];
        for line in lines {
            tracing::warn!("{line}");
            self.audit.note(AuditLevel::Warn, &line);
        }
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
