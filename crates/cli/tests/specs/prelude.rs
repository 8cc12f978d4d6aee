//! Shared helpers for specs

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use predicates::str::contains;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

/// Specs write scripts and exec them; a fork from a concurrent spec could
/// keep a script open for writing (ETXTBSY), so projects are serialized.
static SERIAL: Mutex<()> = Mutex::new(());

/// Stand-in for the OEDA tool: prompts with `oedacli>` and answers a few
/// commands the way the real tool does.
pub const FAKE_OEDACLI: &str = r#"#!/bin/sh
JAVA_OPTIONS="-XX:-UseLargePages -Xss6m -Xmx4096m"
if [ "$1" = "-e" ]; then
  printf 'Available Objects:\n  LIST\n  ALTER\n  CLONE\n'
  exit 0
fi
printf 'OEDA command line\noedacli> '
loaded=""
while IFS= read -r line; do
  case "$line" in
    "LOAD FILE NAME="*) loaded="${line#LOAD FILE NAME=}"; echo "SUCCESS - file loaded" ;;
    "SAVE FILE NAME="*) cp "$loaded" "${line#SAVE FILE NAME=}"; echo "SUCCESS - file saved" ;;
    "LIST MACHINES") echo '[{"id":"db01"},{"id":"db02"}]' ;;
    "LIST "*) echo '[]' ;;
    *BROKEN*) echo "ERROR: invalid entity" ;;
    *) echo "SUCCESS" ;;
  esac
  printf 'oedacli> '
done
"#;

pub const CATALOG: &str = r#"{
  "callbacks": {
    "add_cluster": {
      "type": "xml_callback",
      "xml_callback": "cluster",
      "default_values": {"all": {"id": "<name>", "gi_version": "<gi_version>"}}
    },
    "add_vm": {
      "type": "xml_callback",
      "xml_callback": "machine",
      "default_values": {"all": {"id": "<host>", "cluster": "<parent/name>", "ordinal": "<idx1>"}}
    }
  },
  "structure": {
    "cluster": {"callbacks": ["add_cluster"], "vms": {"callbacks": ["add_vm"]}}
  },
  "preprocessor": {"cluster": {"gi_version": "19"}},
  "preprocessor_clusterless": {}
}"#;

pub const PAYLOAD: &str = r#"{
  "cluster": {
    "name": "c1",
    "vms": [{"host": "vm1"}, {"host": "vm2"}]
  }
}"#;

pub struct Project {
    dir: TempDir,
    _serial: MutexGuard<'static, ()>,
}

impl Project {
    pub fn empty() -> Self {
        let serial = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        Self {
            dir: tempfile::tempdir().unwrap(),
            _serial: serial,
        }
    }

    /// A project with the stand-in tool at `oeda/oedacli` and an
    /// `exa.toml` pointing at it
    pub fn with_oedacli() -> Self {
        let project = Self::empty();
        project.executable("oeda/oedacli", FAKE_OEDACLI);
        project.file("oeda/log/oedacli.out", "");
        project.file("cluster.xml", "<cluster/>");
        project.file(
            "exa.toml",
            "[oedacli]\npath = \"oeda/oedacli\"\nlog_dir = \"logs\"\n",
        );
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.path().join(rel)
    }

    pub fn file(&self, rel: &str, content: &str) {
        let path = self.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn executable(&self, rel: &str, content: &str) {
        self.file(rel, content);
        let path = self.join(rel);
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.join(rel)).unwrap()
    }

    pub fn exa(&self) -> CliBuilder {
        let mut cmd = Command::cargo_bin("exa")
            .unwrap_or_else(|err| panic!("exa binary is not built for this test run: {err}"));
        cmd.current_dir(self.path())
            .env("RUST_LOG", "warn")
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"));
        CliBuilder { cmd }
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn passes(mut self) -> RunAssert {
        RunAssert {
            assert: self.cmd.assert().success(),
        }
    }

    pub fn fails(mut self) -> RunAssert {
        RunAssert {
            assert: self.cmd.assert().failure(),
        }
    }
}

pub struct RunAssert {
    assert: Assert,
}

impl RunAssert {
    pub fn stdout_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stdout(contains(expected)),
        }
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stderr(contains(expected)),
        }
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stdout).into_owned()
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).unwrap()
    }
}
