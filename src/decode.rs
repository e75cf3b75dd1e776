//! Field decoding and label correlation for scanned records.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};
use crate::labels::LabelTable;
use crate::layout::{field, RecordLayout};
use crate::metadata::PrimitiveType;
use crate::models::{DecodedRecord, EnrichedRecord, FieldValue};
use crate::udf::RawRecord;

/// Decode every field of the layout at its resolved offset.
///
/// Also derives the millisecond form of the power-on timestamp from the raw
/// nanosecond value (truncating integer division); both are available to
/// downstream consumers.
pub fn decode_record(raw: &RawRecord<'_>, layout: &RecordLayout) -> Result<DecodedRecord> {
    let mut record = DecodedRecord::new(raw.index);

    for slot in layout.slots() {
        let end = slot.offset + slot.ty.size();
        if end > raw.bytes.len() {
            // The layout is validated against the record size up front, so
            // reaching this means the offset table itself is wrong.
            return Err(Error::Layout(format!(
                "field '{}' reads bytes {}..{} beyond the {}-byte record",
                slot.name,
                slot.offset,
                end,
                raw.bytes.len()
            )));
        }
        record.insert(slot.name, decode_value(&raw.bytes[slot.offset..end], slot.ty));
    }

    if let Some(ns) = record
        .get(field::TIME_SINCE_POWERON_NS)
        .and_then(FieldValue::as_u64)
    {
        record.insert(field::TIME_SINCE_POWERON, FieldValue::U64(ns / 1_000_000));
    }

    Ok(record)
}

fn decode_value(bytes: &[u8], ty: PrimitiveType) -> FieldValue {
    match ty {
        PrimitiveType::U8 => FieldValue::U8(bytes[0]),
        PrimitiveType::S8 => FieldValue::S8(bytes[0] as i8),
        PrimitiveType::U16 => FieldValue::U16(LittleEndian::read_u16(bytes)),
        PrimitiveType::S16 => FieldValue::S16(LittleEndian::read_i16(bytes)),
        PrimitiveType::U32 => FieldValue::U32(LittleEndian::read_u32(bytes)),
        PrimitiveType::S32 => FieldValue::S32(LittleEndian::read_i32(bytes)),
        PrimitiveType::U64 => FieldValue::U64(LittleEndian::read_u64(bytes)),
        PrimitiveType::F32 => FieldValue::F32(LittleEndian::read_f32(bytes)),
    }
}

/// Enriches decoded records with supplementary context, by pure lookup.
///
/// The label table is built once and only read here; nothing is ever
/// re-derived from the binary block.
pub struct Correlator<'a> {
    labels: &'a LabelTable,
}

impl<'a> Correlator<'a> {
    pub fn new(labels: &'a LabelTable) -> Self {
        Self { labels }
    }

    /// Attach label name/description for the record's label tag (absent on
    /// a miss; many valid tags have no friendly name) and the per-file
    /// power-on seed.
    pub fn enrich(&self, record: DecodedRecord) -> EnrichedRecord {
        let entry = record
            .get(field::LABEL_TAG)
            .and_then(FieldValue::as_u32)
            .and_then(|tag| self.labels.lookup(tag));

        EnrichedRecord {
            label_name: entry.map(|e| e.name.clone()),
            label_description: entry.map(|e| e.description.clone()),
            power_on_seed: self.labels.power_on_seed().map(str::to_string),
            record,
        }
    }
}
