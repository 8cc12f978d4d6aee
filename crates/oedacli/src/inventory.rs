// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only enumeration of a configuration's entities

use crate::OedaError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;

/// Entities listed, in script order
pub const INVENTORY_ENTITIES: [&str; 11] = [
    "MACHINES",
    "SCANS",
    "CLUSTERS",
    "VIPS",
    "NETWORKS",
    "SWITCHES",
    "DATABASEHOMES",
    "DATABASES",
    "DISKGROUPS",
    "RACKS",
    "CLUSTERSCANS",
];

#[allow(clippy::expect_used)]
static PROMPT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"oedacli>.*\n").expect("constant regex pattern is valid"));

/// Every entity list in a loaded configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(rename = "machine")]
    pub machines: Vec<Value>,
    #[serde(rename = "scan")]
    pub scans: Vec<Value>,
    #[serde(rename = "cluster")]
    pub clusters: Vec<Value>,
    #[serde(rename = "vip")]
    pub vips: Vec<Value>,
    #[serde(rename = "network")]
    pub networks: Vec<Value>,
    #[serde(rename = "switch")]
    pub switches: Vec<Value>,
    #[serde(rename = "databaseHome")]
    pub database_homes: Vec<Value>,
    #[serde(rename = "database")]
    pub databases: Vec<Value>,
    #[serde(rename = "diskGroup")]
    pub disk_groups: Vec<Value>,
    pub racks: Vec<Value>,
    #[serde(rename = "clusterScan")]
    pub cluster_scans: Vec<Value>,
}

/// `LOAD FILE` followed by one `LIST` per entity
pub fn inventory_script(xml: &Path) -> Vec<String> {
    std::iter::once(format!("LOAD FILE NAME={}", xml.display()))
        .chain(INVENTORY_ENTITIES.iter().map(|entity| format!("LIST {entity}")))
        .collect()
}

/// Parse the transcript of an [`inventory_script`] run.
///
/// The transcript is split on prompt lines: segment 0 precedes the first
/// prompt, segment 1 is the load output and the rest are the lists. Each
/// list is decoded from its first `[`; trailing text is ignored.
pub fn parse_inventory(transcript: &str) -> Result<Inventory, OedaError> {
    let segments: Vec<&str> = PROMPT_LINE.split(transcript).collect();
    let mut lists = INVENTORY_ENTITIES
        .iter()
        .enumerate()
        .map(|(i, entity)| parse_list(entity, segments.get(i + 2).copied()))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();

    let mut next = || lists.next().unwrap_or_default();
    Ok(Inventory {
        machines: next(),
        scans: next(),
        clusters: next(),
        vips: next(),
        networks: next(),
        switches: next(),
        database_homes: next(),
        databases: next(),
        disk_groups: next(),
        racks: next(),
        cluster_scans: next(),
    })
}

fn parse_list(entity: &str, segment: Option<&str>) -> Result<Vec<Value>, OedaError> {
    let fail = |reason: String| OedaError::Inventory {
        entity: entity.to_string(),
        reason,
    };
    let segment = segment.ok_or_else(|| fail("no output".to_string()))?;
    let start = segment
        .find('[')
        .ok_or_else(|| fail(format!("no JSON array in '{}'", segment.trim())))?;
    serde_json::Deserializer::from_str(&segment[start..])
        .into_iter::<Vec<Value>>()
        .next()
        .ok_or_else(|| fail("empty array text".to_string()))?
        .map_err(|e| fail(e.to_string()))
}
