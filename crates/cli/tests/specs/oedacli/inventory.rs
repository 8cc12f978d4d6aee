//! oedacli inventory and commands specs

use crate::prelude::*;

#[test]
fn inventory_prints_entity_lists() {
    let temp = Project::with_oedacli();

    let run = temp
        .exa()
        .args(&["oedacli", "inventory", "--xml", "cluster.xml"])
        .passes();

    let inventory = run.stdout_json();
    assert_eq!(inventory["machine"][0]["id"], "db01");
    assert_eq!(inventory["machine"].as_array().unwrap().len(), 2);
    assert_eq!(inventory["racks"], serde_json::json!([]));
}

#[test]
fn commands_lists_advertised_commands() {
    let temp = Project::with_oedacli();
    let run = temp.exa().args(&["oedacli", "commands"]).passes();
    assert_eq!(run.stdout(), "ALTER\nCLONE\nLIST\n");
}

#[test]
fn commands_as_json() {
    let temp = Project::with_oedacli();
    let run = temp
        .exa()
        .args(&["oedacli", "commands", "--format", "json"])
        .passes();
    assert_eq!(run.stdout_json(), serde_json::json!(["ALTER", "CLONE", "LIST"]));
}
