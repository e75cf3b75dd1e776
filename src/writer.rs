//! High-level API for writing decoded UDF records to tabular output.

use crate::error::{Error, Result};
use crate::formats::csv::{CsvFormatter, COLUMNS};
use crate::models::EnrichedRecord;
use std::path::Path;

/// Writer for outputting decoded records to CSV.
///
/// # Examples
///
/// ```no_run
/// use udf_parser::{CsvWriter, UdfReader};
///
/// let reader = UdfReader::from_file("session.udf")?;
/// let records = reader.read_all()?;
///
/// CsvWriter::new("session.csv").write(&records)?;
/// # Ok::<(), udf_parser::Error>(())
/// ```
pub struct CsvWriter {
    output_path: String,
}

impl CsvWriter {
    /// Create a new CSV writer targeting the given file path. Parent
    /// directories are created on write.
    pub fn new<P: AsRef<Path>>(output_path: P) -> Self {
        Self {
            output_path: output_path.as_ref().to_string_lossy().to_string(),
        }
    }

    /// Write the records as one CSV file with a fixed column header.
    ///
    /// # Errors
    ///
    /// Returns an error if the record slice is empty or the file cannot be
    /// written.
    pub fn write(self, records: &[EnrichedRecord]) -> Result<()> {
        let formatter = CsvFormatter::new(self.output_path);

        formatter
            .convert(records)
            .map_err(|e| Error::Output(e.to_string()))?;

        Ok(())
    }

    /// Write records and return statistics about the write operation.
    pub fn write_with_stats(self, records: &[EnrichedRecord]) -> Result<WriteStats> {
        let num_records = records.len();

        self.write(records)?;

        Ok(WriteStats {
            num_records,
            num_columns: COLUMNS.len(),
        })
    }
}

/// Statistics about a CSV write operation.
#[derive(Debug, Clone)]
pub struct WriteStats {
    /// Total number of rows written (excluding the header row)
    pub num_records: usize,
    /// Number of output columns
    pub num_columns: usize,
}

impl WriteStats {
    /// Get a human-readable summary of the write operation.
    pub fn summary(&self) -> String {
        format!(
            "Wrote {} rows with {} columns",
            self.num_records, self.num_columns
        )
    }
}
