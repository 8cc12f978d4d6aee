//! CLI help specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    let temp = Project::empty();
    temp.exa()
        .args(&["--help"])
        .passes()
        .stdout_has("xmlgen")
        .stdout_has("oedacli")
        .stdout_has("--config");
}

#[test]
fn oedacli_help_lists_actions() {
    let temp = Project::empty();
    temp.exa()
        .args(&["oedacli", "--help"])
        .passes()
        .stdout_has("run")
        .stdout_has("inventory")
        .stdout_has("commands");
}

#[test]
fn run_help_shows_transaction_flags() {
    let temp = Project::empty();
    temp.exa()
        .args(&["oedacli", "run", "--help"])
        .passes()
        .stdout_has("--no-auto-save")
        .stdout_has("--no-auto-merge")
        .stdout_has("--deploy");
}
