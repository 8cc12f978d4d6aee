// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn parses_both_sections() {
    let config = Config::parse(
        r#"
        [oedacli]
        path = "/u01/oeda/oedacli"
        log_dir = "log/oedacli"
        log_file = "driver.log"
        extra_args = "--quiet --trace"
        ignorable_messages = ["error: rule deleted"]
        use_jdb = "true"
        key_algorithm = "RSA"
        java_heap = "2g"

        [xmlgen]
        defaults = "config/default_values.json"
        save_dir = "log/xmlgen"
        "#,
    )
    .unwrap();

    assert_eq!(config.oedacli.path, Some(PathBuf::from("/u01/oeda/oedacli")));
    assert_eq!(config.oedacli.log_file.as_deref(), Some("driver.log"));
    assert_eq!(config.xmlgen.save_dir, Some(PathBuf::from("log/xmlgen")));

    let driver = config.oedacli.driver.resolve().unwrap();
    assert_eq!(driver.extra_args, vec!["--quiet", "--trace"]);
    assert_eq!(driver.ignorable_patterns.len(), 1);
    assert!(driver.jdb_enabled);
    assert!(driver.rsa_enabled);
    assert_eq!(driver.java_heap, "2g");
    assert_eq!(driver.java_stack, "6m");
}

#[parameterized(
    empty = { "" },
    only_xmlgen = { "[xmlgen]\nsave_dir = \"x\"" },
)]
fn missing_sections_default(content: &str) {
    let config = Config::parse(content).unwrap();
    assert!(config.oedacli.path.is_none());
    assert!(!config.oedacli.driver.use_jdb());
}

#[test]
fn jdb_accepts_toml_bool() {
    let config = Config::parse("[oedacli]\nuse_jdb = true").unwrap();
    assert!(config.oedacli.driver.use_jdb());
}

#[test]
fn load_rebases_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exa.toml");
    std::fs::write(
        &path,
        "[oedacli]\npath = \"oeda/oedacli\"\nlog_dir = \"/abs/logs\"\n[xmlgen]\ndefaults = \"defaults.json\"\n",
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.oedacli.path, Some(dir.path().join("oeda/oedacli")));
    assert_eq!(config.oedacli.log_dir, Some(PathBuf::from("/abs/logs")));
    assert_eq!(config.xmlgen.defaults, Some(dir.path().join("defaults.json")));
}

#[test]
fn load_missing_explicit_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
    assert!(err.to_string().contains("failed to read config"));
}

#[test]
fn load_rejects_bad_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exa.toml");
    std::fs::write(&path, "[oedacli\n").unwrap();
    assert!(Config::load(Some(&path)).is_err());
}
