//! oedacli run specs
//!
//! Verify scripts run against the stand-in tool.

use crate::prelude::*;

#[test]
fn run_prints_transcript_and_saves_xml() {
    let temp = Project::with_oedacli();
    temp.file("script.txt", "# resize\nALTER MACHINE ram=\"64\"\n\nADD SCAN name=\"s1\"\n");

    temp.exa()
        .args(&["oedacli", "run", "--xml", "cluster.xml", "--save", "out.xml", "script.txt"])
        .passes()
        .stdout_has("OEDA command line")
        .stdout_has("ALTER MACHINE ram=\"64\"")
        .stdout_has("MERGE ACTIONS FORCE")
        .stdout_has("SUCCESS - file saved");

    assert_eq!(temp.read("out.xml"), "<cluster/>");
    assert!(temp.read("logs/oedacli.log").contains("*** START COMMAND EXECUTION ***"));
}

#[test]
fn deploy_uses_two_phase_trailer() {
    let temp = Project::with_oedacli();
    temp.file("script.txt", "ADD SCAN name=\"s1\"\n");

    temp.exa()
        .args(&["oedacli", "run", "--xml", "cluster.xml", "--deploy", "script.txt"])
        .passes()
        .stdout_has("DEPLOY ACTIONS");
}

#[test]
fn batched_script_gets_one_trailer() {
    let temp = Project::with_oedacli();
    temp.file("script.txt", "ADD SCAN name=\"s1\"\nADD SCAN name=\"s2\"\n");

    let run = temp
        .exa()
        .args(&[
            "oedacli",
            "run",
            "--xml",
            "cluster.xml",
            "--no-auto-save",
            "--no-auto-merge",
            "script.txt",
        ])
        .passes();

    let transcript = run.stdout();
    assert_eq!(transcript.matches("MERGE ACTIONS FORCE").count(), 1);
    assert!(!transcript.contains("SAVE ACTION"));
}

#[test]
fn failing_command_exits_with_oeda_error() {
    let temp = Project::with_oedacli();
    temp.file("script.txt", "ADD BROKEN\n");

    temp.exa()
        .args(&["oedacli", "run", "--xml", "cluster.xml", "script.txt"])
        .fails()
        .stderr_has("Oedacli Error found on script execution.")
        .stderr_has("code 0x0EDA/0x0EDA")
        .stderr_has("Failing command: ADD BROKEN");
}

#[test]
fn ignorable_messages_from_config_are_not_failures() {
    let temp = Project::with_oedacli();
    temp.file(
        "exa.toml",
        "[oedacli]\npath = \"oeda/oedacli\"\nlog_dir = \"logs\"\nignorable_messages = [\"error: invalid entity\"]\n",
    );
    temp.file("script.txt", "ADD BROKEN\n");

    temp.exa()
        .args(&["oedacli", "run", "--xml", "cluster.xml", "script.txt"])
        .passes();
}
