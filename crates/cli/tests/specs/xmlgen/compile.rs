//! xmlgen compile specs
//!
//! Verify payloads compile into ordered callback records.

use crate::prelude::*;

#[test]
fn compiles_payload_to_json_records() {
    let temp = Project::empty();
    temp.file("defaults.json", CATALOG);
    temp.file("payload.json", PAYLOAD);

    let run = temp
        .exa()
        .args(&[
            "xmlgen",
            "--defaults",
            "defaults.json",
            "--payload",
            "payload.json",
            "--uuid",
            "run1",
            "--save-dir",
            "snapshots",
        ])
        .passes();

    let records = run.stdout_json();
    similar_asserts::assert_eq!(
        records,
        serde_json::json!([
            {
                "name": "add_cluster",
                "type": "xml_callback",
                "xml_callback": "cluster",
                "values": {"id": "c1", "gi_version": "19"}
            },
            {
                "name": "add_vm",
                "type": "xml_callback",
                "xml_callback": "machine",
                "values": {"id": "vm1", "cluster": "c1", "ordinal": "1"}
            },
            {
                "name": "add_vm",
                "type": "xml_callback",
                "xml_callback": "machine",
                "values": {"id": "vm2", "cluster": "c1", "ordinal": "2"}
            }
        ])
    );
}

#[test]
fn writes_debug_snapshots_named_by_run_id() {
    let temp = Project::empty();
    temp.file("defaults.json", CATALOG);
    temp.file("payload.json", PAYLOAD);

    temp.exa()
        .args(&[
            "xmlgen",
            "--defaults",
            "defaults.json",
            "--payload",
            "payload.json",
            "--uuid",
            "run1",
            "--save-dir",
            "snapshots",
        ])
        .passes();

    for tag in [
        "p1-0-DeepUpdate.json",
        "p1-1-CreatePayload_callbackinfo.json",
        "p1-2-ProcessRelations_callbackinfo.json",
    ] {
        assert!(temp.join(&format!("snapshots/run1_{tag}")).is_file(), "missing {tag}");
    }
    let deep: serde_json::Value =
        serde_json::from_str(&temp.read("snapshots/run1_p1-0-DeepUpdate.json")).unwrap();
    assert_eq!(deep["cluster"]["gi_version"], "19");
}

#[test]
fn catalog_and_save_dir_come_from_config() {
    let temp = Project::empty();
    temp.file("conf/defaults.json", CATALOG);
    temp.file("conf/exa.toml", "[xmlgen]\ndefaults = \"defaults.json\"\nsave_dir = \"../out\"\n");
    temp.file("payload.json", PAYLOAD);

    let run = temp
        .exa()
        .args(&["--config", "conf/exa.toml", "xmlgen", "--payload", "payload.json", "--uuid", "cfg"])
        .passes();

    assert_eq!(run.stdout_json().as_array().unwrap().len(), 3);
    assert!(temp.join("out/cfg_p1-0-DeepUpdate.json").is_file());
}
