//! Fixed record layout for the validated UDF format revision.
//!
//! The declared field order in the metadata header does not match the
//! physical byte order of the packed records, so the layout is not derived
//! by summing declared sizes. The offset table below is authoritative; the
//! header is only used to confirm field presence and to surface fields this
//! revision does not extract.

use crate::error::{Error, Result};
use crate::metadata::{FieldDefinition, PrimitiveType};
use log::{debug, warn};

/// Two-byte sentinel at the start of every packed record.
pub const RECORD_MARKER: [u8; 2] = [0x00, 0xFF];

/// Fixed record size of the validated format revision.
pub const RECORD_SIZE: usize = 61;

/// Output field names, shared by the decoder, correlator, and renderer.
pub mod field {
    pub const SENSOR_INDEX: &str = "Sensor Index";
    pub const SENSOR_ID: &str = "Sensor ID";
    pub const TIME_SINCE_POWERON: &str = "Time Since PowerOn";
    pub const TIME_SINCE_POWERON_NS: &str = "Time Since PowerOn [ns]";
    pub const REAL_TIME_CLOCK: &str = "Real time clock";
    pub const TEMPERATURE: &str = "Temperature";
    pub const PRESSURE: &str = "Pressure";
    pub const RELATIVE_HUMIDITY: &str = "Relative Humidity";
    pub const GAS_RESISTANCE: &str = "Resistance Gassensor";
    pub const HEATER_STEP: &str = "Heater Profile Step Index";
    pub const SCANNING_CYCLE: &str = "Scanning Cycle Index";
    pub const LABEL_TAG: &str = "Label Tag";
    pub const ERROR_CODE: &str = "Error Code";
}

/// One extractable field: output name, byte offset within the record, and
/// the primitive type to decode at that offset.
#[derive(Debug, Clone, Copy)]
pub struct FieldSlot {
    pub name: &'static str,
    pub offset: usize,
    pub ty: PrimitiveType,
}

/// Derived per-file record layout: the fixed record size plus the ordered
/// offset table. Built once per file and reused for every record.
#[derive(Debug, Clone)]
pub struct RecordLayout {
    record_size: usize,
    slots: Vec<FieldSlot>,
}

impl RecordLayout {
    /// Layout of the single documented format revision (61-byte records).
    ///
    /// Several narrow fields nest inside the byte range of a wider one
    /// (the heater step byte sits inside the RTC word, the error code byte
    /// inside the label tag word); that nesting is a property of the source
    /// format and each slot is decoded independently.
    pub fn standard() -> Result<Self> {
        use PrimitiveType::*;

        let layout = Self {
            record_size: RECORD_SIZE,
            slots: vec![
                FieldSlot { name: field::TIME_SINCE_POWERON_NS, offset: 2, ty: U64 },
                FieldSlot { name: field::REAL_TIME_CLOCK, offset: 10, ty: U32 },
                FieldSlot { name: field::HEATER_STEP, offset: 12, ty: U8 },
                FieldSlot { name: field::GAS_RESISTANCE, offset: 15, ty: F32 },
                FieldSlot { name: field::RELATIVE_HUMIDITY, offset: 21, ty: F32 },
                FieldSlot { name: field::PRESSURE, offset: 27, ty: F32 },
                FieldSlot { name: field::TEMPERATURE, offset: 33, ty: F32 },
                FieldSlot { name: field::SCANNING_CYCLE, offset: 39, ty: U8 },
                FieldSlot { name: field::SENSOR_ID, offset: 45, ty: U32 },
                FieldSlot { name: field::LABEL_TAG, offset: 51, ty: U32 },
                FieldSlot { name: field::ERROR_CODE, offset: 53, ty: S8 },
                FieldSlot { name: field::SENSOR_INDEX, offset: 60, ty: U8 },
            ],
        };
        layout.validate()?;
        Ok(layout)
    }

    pub fn record_size(&self) -> usize {
        self.record_size
    }

    pub fn slots(&self) -> &[FieldSlot] {
        &self.slots
    }

    /// Every slot must fit entirely within `[0, record_size)`. A violation
    /// is a bug in the offset table, not a data problem.
    fn validate(&self) -> Result<()> {
        if self.record_size <= RECORD_MARKER.len() {
            return Err(Error::Layout(format!(
                "record size {} leaves no room for fields",
                self.record_size
            )));
        }
        for slot in &self.slots {
            let end = slot.offset + slot.ty.size();
            if end > self.record_size {
                return Err(Error::Layout(format!(
                    "field '{}' spans bytes {}..{} outside the {}-byte record",
                    slot.name, slot.offset, end, self.record_size
                )));
            }
            if slot.offset < RECORD_MARKER.len() {
                return Err(Error::Layout(format!(
                    "field '{}' overlaps the record marker",
                    slot.name
                )));
            }
        }
        Ok(())
    }

    /// Advisory check of the parsed header against the offset table.
    ///
    /// Header fields with no counterpart in the table are logged and
    /// ignored; they are never decoded. The header never changes the
    /// layout.
    pub fn confirm_fields(&self, definitions: &[FieldDefinition]) {
        let mut matched = 0usize;
        for def in definitions {
            match canonical_field_name(&def.name) {
                Some(name) => {
                    matched += 1;
                    debug!("header field {} '{}' maps to '{}'", def.id, def.name, name);
                }
                None => {
                    debug!(
                        "header field {} '{}' is not part of the fixed layout, ignoring",
                        def.id, def.name
                    );
                }
            }
        }
        if matched == 0 && !definitions.is_empty() {
            warn!("no header field matches the fixed record layout");
        }
    }

    /// Advisory cross-check of the fixed record size against the marker
    /// spacing actually observed in the binary block. A disagreement is
    /// logged but never overrides the table.
    pub fn check_marker_spacing(&self, binary: &[u8]) {
        let probe = &binary[..binary.len().min(1024)];
        let mut positions = Vec::new();
        let mut i = 0;
        while i + RECORD_MARKER.len() <= probe.len() && positions.len() < 10 {
            if probe[i..i + 2] == RECORD_MARKER {
                positions.push(i);
                i += self.record_size.max(1);
            } else {
                i += 1;
            }
        }
        for pair in positions.windows(2) {
            let spacing = pair[1] - pair[0];
            if spacing != self.record_size {
                warn!(
                    "observed marker spacing {} differs from fixed record size {}",
                    spacing, self.record_size
                );
                return;
            }
        }
    }
}

/// Map a metadata header field name to its output column name.
///
/// Header names vary across firmware builds ("Raw temperature [deg C]" vs
/// "Temperature"); this table normalizes the spellings seen in validated
/// files.
pub fn canonical_field_name(header_name: &str) -> Option<&'static str> {
    match header_name {
        "Sensor Index" => Some(field::SENSOR_INDEX),
        "Sensor ID" => Some(field::SENSOR_ID),
        "Time Since PowerOn" => Some(field::TIME_SINCE_POWERON),
        "Real time clock" => Some(field::REAL_TIME_CLOCK),
        "Temperature" | "Raw temperature [deg C]" => Some(field::TEMPERATURE),
        "Pressure" | "Pressure [Pa]" => Some(field::PRESSURE),
        "Humidity" | "Raw humidity [%rH]" => Some(field::RELATIVE_HUMIDITY),
        "Gas resistance [ohm]" => Some(field::GAS_RESISTANCE),
        "Gas heater index" => Some(field::HEATER_STEP),
        "Scanning Cycle Index" => Some(field::SCANNING_CYCLE),
        "Label Tag" => Some(field::LABEL_TAG),
        "error_code" => Some(field::ERROR_CODE),
        _ => None,
    }
}
