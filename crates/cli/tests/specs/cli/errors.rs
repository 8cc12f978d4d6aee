//! CLI error specs
//!
//! Failures print a readable error with hints and exit non-zero.

use crate::prelude::*;

#[test]
fn xmlgen_without_defaults_suggests_config() {
    let temp = Project::empty();
    temp.file("payload.json", PAYLOAD);
    temp.exa()
        .args(&["xmlgen", "--payload", "payload.json"])
        .fails()
        .stderr_has("error: no value for xmlgen.defaults")
        .stderr_has("Pass --defaults on the command line");
}

#[test]
fn oedacli_without_binary_suggests_config() {
    let temp = Project::empty();
    temp.exa()
        .args(&["oedacli", "commands"])
        .fails()
        .stderr_has("no value for oedacli.path");
}

#[test]
fn invalid_binary_path_is_reported() {
    let temp = Project::empty();
    temp.exa()
        .args(&["oedacli", "--binary", "missing/oedacli", "commands"])
        .fails()
        .stderr_has("Invalid path to oedacli")
        .stderr_has("code 0x0EDA/0x0EDA");
}

#[test]
fn invalid_ignorable_pattern_is_a_config_error() {
    let temp = Project::with_oedacli();
    temp.file(
        "exa.toml",
        "[oedacli]\npath = \"oeda/oedacli\"\nignorable_messages = [\"(unclosed\"]\n",
    );
    temp.exa()
        .args(&["oedacli", "commands"])
        .fails()
        .stderr_has("invalid ignorable message pattern");
}

#[test]
fn unknown_callback_in_grammar_is_reported() {
    let temp = Project::empty();
    temp.file(
        "defaults.json",
        r#"{"callbacks": {}, "structure": {"cluster": {"callbacks": ["nope"]}}}"#,
    );
    temp.file("payload.json", PAYLOAD);
    temp.exa()
        .args(&["xmlgen", "--defaults", "defaults.json", "--payload", "payload.json"])
        .fails()
        .stderr_has("invalid callback: nope");
}

#[test]
fn bad_config_file_is_reported() {
    let temp = Project::empty();
    temp.file("exa.toml", "[oedacli\n");
    temp.exa()
        .args(&["oedacli", "commands"])
        .fails()
        .stderr_has("invalid config");
}
