use serde::Serialize;
use std::collections::HashMap;

/// A decoded field value. Integer widths are preserved so that output
/// rendering can distinguish counters from measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    U8(u8),
    S8(i8),
    U16(u16),
    S16(i16),
    U32(u32),
    S32(i32),
    U64(u64),
    F32(f32),
}

impl FieldValue {
    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            FieldValue::U8(v) => Some(v as u32),
            FieldValue::U16(v) => Some(v as u32),
            FieldValue::U32(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            FieldValue::U8(v) => Some(v as u64),
            FieldValue::U16(v) => Some(v as u64),
            FieldValue::U32(v) => Some(v as u64),
            FieldValue::U64(v) => Some(v),
            _ => None,
        }
    }
}

/// One decoded record: field name to typed value, in file order.
///
/// The field set is exactly the extractable subset of the record layout;
/// values absent from the layout are never synthesized here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedRecord {
    /// Zero-based position of the record in the binary block.
    pub index: usize,
    #[serde(flatten)]
    pub fields: HashMap<String, FieldValue>,
}

impl DecodedRecord {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            fields: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: &str, value: FieldValue) {
        self.fields.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

/// A label annotation sourced from a supplementary label-info document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelEntry {
    pub tag: u32,
    pub name: String,
    pub description: String,
}

/// A decoded record enriched with supplementary context.
///
/// `label_name`/`label_description` are present only when the record's
/// label tag has a matching entry; `power_on_seed` is constant across all
/// records of a file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub record: DecodedRecord,
    pub label_name: Option<String>,
    pub label_description: Option<String>,
    pub power_on_seed: Option<String>,
}

impl EnrichedRecord {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.record.get(name)
    }
}

/// Summary counters for one file's conversion, consumed by the CLI and
/// reporting layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Records decoded and emitted.
    pub records_emitted: usize,
    /// Bytes of the binary block consumed by emitted records.
    pub bytes_consumed: usize,
    /// Trailing or truncated bytes that were not part of any emitted record.
    pub bytes_discarded: usize,
}

impl ScanSummary {
    /// Get a human-readable summary of the conversion.
    pub fn summary(&self) -> String {
        format!(
            "Decoded {} records ({} bytes consumed, {} bytes discarded)",
            self.records_emitted, self.bytes_consumed, self.bytes_discarded
        )
    }
}
