//! Loader for the supplementary JSON sibling documents: the label-info file
//! (`.bmelabelinfo`) and the board configuration (`.bmeconfig`).
//!
//! These documents arrive already structured; the codec only consumes the
//! lookups built here and never opens files or parses JSON itself.

use crate::error::Result;
use crate::models::LabelEntry;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Top-level structure of a `.bmelabelinfo` document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelInfoDocument {
    #[serde(rename = "labelInfoHeader", default)]
    pub header: LabelInfoHeader,
    #[serde(rename = "labelInformation", default)]
    pub labels: Vec<LabelInfoEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelInfoHeader {
    /// Opaque power-cycle identifier. Firmware builds emit it as either a
    /// string or a bare number; both are accepted and kept as text.
    #[serde(rename = "seedPowerOnOff", default, deserialize_with = "seed_as_string")]
    pub seed_power_on_off: Option<String>,
    #[serde(rename = "counterPowerOnOff")]
    pub counter_power_on_off: Option<u32>,
    #[serde(rename = "firmwareVersion")]
    pub firmware_version: Option<String>,
    #[serde(rename = "boardId")]
    pub board_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelInfoEntry {
    #[serde(rename = "labelTag")]
    pub label_tag: u32,
    #[serde(rename = "labelName", default)]
    pub label_name: String,
    #[serde(rename = "labelDescription", default)]
    pub label_description: String,
}

/// Top-level structure of a `BoardConfiguration.bmeconfig` document. Only
/// the identifying header is consumed; profile bodies pass through
/// untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardConfigDocument {
    #[serde(rename = "configHeader", default)]
    pub header: BoardConfigHeader,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardConfigHeader {
    #[serde(rename = "boardType")]
    pub board_type: Option<String>,
    #[serde(rename = "boardMode")]
    pub board_mode: Option<String>,
    #[serde(rename = "appVersion")]
    pub app_version: Option<String>,
}

/// Prebuilt tag lookup plus the per-file power-on seed.
///
/// Built once per file and never mutated afterwards, so it can be shared by
/// reference across decode passes.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    entries: HashMap<u32, LabelEntry>,
    power_on_seed: Option<String>,
}

impl LabelTable {
    /// An empty table: every lookup misses and no seed is attached. Used
    /// when no label-info sibling exists for a UDF file.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_document(doc: &LabelInfoDocument) -> Self {
        let entries = doc
            .labels
            .iter()
            .map(|l| {
                (
                    l.label_tag,
                    LabelEntry {
                        tag: l.label_tag,
                        name: l.label_name.clone(),
                        description: l.label_description.clone(),
                    },
                )
            })
            .collect();

        Self {
            entries,
            power_on_seed: doc.header.seed_power_on_off.clone(),
        }
    }

    /// Parse a raw `.bmelabelinfo` JSON document and build the table.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: LabelInfoDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(&doc))
    }

    /// O(1) tag lookup.
    pub fn lookup(&self, tag: u32) -> Option<&LabelEntry> {
        self.entries.get(&tag)
    }

    pub fn power_on_seed(&self) -> Option<&str> {
        self.power_on_seed.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a raw `.bmeconfig` JSON document.
pub fn parse_board_config(json: &str) -> Result<BoardConfigDocument> {
    Ok(serde_json::from_str(json)?)
}

fn seed_as_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELINFO: &str = r#"{
        "labelInfoHeader": {
            "counterPowerOnOff": 3,
            "seedPowerOnOff": "a1b2c3",
            "firmwareVersion": "3.1.0",
            "boardId": "board-42"
        },
        "labelInformation": [
            {"labelTag": 1001, "labelName": "Start", "labelDescription": "Session start"},
            {"labelTag": 1002, "labelName": "Stop", "labelDescription": "Session stop"}
        ]
    }"#;

    #[test]
    fn test_build_table_from_json() {
        let table = LabelTable::from_json(LABELINFO).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.power_on_seed(), Some("a1b2c3"));

        let entry = table.lookup(1001).unwrap();
        assert_eq!(entry.name, "Start");
        assert_eq!(entry.description, "Session start");
        assert!(table.lookup(9999).is_none());
    }

    #[test]
    fn test_empty_table() {
        let table = LabelTable::empty();
        assert!(table.is_empty());
        assert!(table.lookup(0).is_none());
        assert_eq!(table.power_on_seed(), None);
    }

    #[test]
    fn test_numeric_seed_is_kept_as_text() {
        let table = LabelTable::from_json(
            r#"{"labelInfoHeader": {"seedPowerOnOff": 20231104}, "labelInformation": []}"#,
        )
        .unwrap();
        assert_eq!(table.power_on_seed(), Some("20231104"));
    }

    #[test]
    fn test_null_seed_is_absent() {
        let table = LabelTable::from_json(
            r#"{"labelInfoHeader": {"seedPowerOnOff": null}, "labelInformation": []}"#,
        )
        .unwrap();
        assert_eq!(table.power_on_seed(), None);
    }

    #[test]
    fn test_missing_header_fields_tolerated() {
        let table = LabelTable::from_json(r#"{"labelInformation": []}"#).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.power_on_seed(), None);
    }
}
