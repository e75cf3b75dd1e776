use anyhow::Result;
use log::info;
use std::fs::create_dir_all;
use std::path::Path;

use crate::layout::field;
use crate::models::{EnrichedRecord, FieldValue};

/// Column order of the rendered table. Matches the column layout of the
/// vendor raw-data format, followed by the correlation columns.
pub const COLUMNS: &[&str] = &[
    field::SENSOR_INDEX,
    field::SENSOR_ID,
    field::TIME_SINCE_POWERON,
    field::REAL_TIME_CLOCK,
    field::TEMPERATURE,
    field::PRESSURE,
    field::RELATIVE_HUMIDITY,
    field::GAS_RESISTANCE,
    field::HEATER_STEP,
    "Scanning Mode Enabled",
    field::SCANNING_CYCLE,
    field::LABEL_TAG,
    field::ERROR_CODE,
    "Label Name",
    "Label Description",
    "Power-On Seed",
];

pub struct CsvFormatter {
    output_path: String,
}

impl CsvFormatter {
    pub fn new(output_path: String) -> Self {
        Self { output_path }
    }

    pub fn convert(&self, records: &[EnrichedRecord]) -> Result<()> {
        if records.is_empty() {
            anyhow::bail!("No valid records to write to CSV");
        }

        let path = Path::new(&self.output_path);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(COLUMNS)?;

        for record in records {
            writer.write_record(Self::render_row(record))?;
        }
        writer.flush()?;

        info!("Wrote {} rows to {}", records.len(), self.output_path);
        Ok(())
    }

    fn render_row(record: &EnrichedRecord) -> Vec<String> {
        COLUMNS
            .iter()
            .map(|&column| match column {
                // Not stored in the binary record; the logger always runs
                // in scanning mode.
                "Scanning Mode Enabled" => "true".to_string(),
                "Label Name" => record.label_name.clone().unwrap_or_default(),
                "Label Description" => record.label_description.clone().unwrap_or_default(),
                "Power-On Seed" => record.power_on_seed.clone().unwrap_or_default(),
                name => record.get(name).map(render_value).unwrap_or_default(),
            })
            .collect()
    }
}

fn render_value(value: &FieldValue) -> String {
    match *value {
        FieldValue::U8(v) => v.to_string(),
        FieldValue::S8(v) => v.to_string(),
        FieldValue::U16(v) => v.to_string(),
        FieldValue::S16(v) => v.to_string(),
        FieldValue::U32(v) => v.to_string(),
        FieldValue::S32(v) => v.to_string(),
        FieldValue::U64(v) => v.to_string(),
        FieldValue::F32(v) => v.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DecodedRecord;

    #[test]
    fn test_render_row_fills_missing_fields_with_blanks() {
        let mut decoded = DecodedRecord::new(0);
        decoded.insert(field::SENSOR_INDEX, FieldValue::U8(3));
        decoded.insert(field::LABEL_TAG, FieldValue::U32(1001));

        let enriched = EnrichedRecord {
            record: decoded,
            label_name: Some("Start".to_string()),
            label_description: None,
            power_on_seed: Some("seed-1".to_string()),
        };

        let row = CsvFormatter::render_row(&enriched);
        assert_eq!(row.len(), COLUMNS.len());
        assert_eq!(row[0], "3");
        assert_eq!(row[9], "true");
        assert_eq!(row[11], "1001");
        assert_eq!(row[13], "Start");
        assert_eq!(row[14], "");
        assert_eq!(row[15], "seed-1");
    }

    #[test]
    fn test_render_value_floats() {
        assert_eq!(render_value(&FieldValue::F32(25.5)), "25.5");
        assert_eq!(render_value(&FieldValue::S8(-3)), "-3");
    }
}
