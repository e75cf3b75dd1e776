//! Single-pass assembly of the enriched record stream.

use crate::decode::{decode_record, Correlator};
use crate::error::Result;
use crate::labels::LabelTable;
use crate::layout::RecordLayout;
use crate::models::{EnrichedRecord, ScanSummary};
use crate::udf::UdfFile;

/// Drives one file through scan, decode, and correlation, producing the
/// final record stream in byte order together with summary counters.
pub struct Assembler<'a> {
    layout: &'a RecordLayout,
    labels: &'a LabelTable,
}

impl<'a> Assembler<'a> {
    pub fn new(layout: &'a RecordLayout, labels: &'a LabelTable) -> Self {
        Self { layout, labels }
    }

    /// Scan and decode every record of the file.
    ///
    /// The scan is strictly sequential: marker validation depends on exact
    /// stride alignment from the start of the block, so a truncation stops
    /// the stream and the remainder is counted as discarded. No partial
    /// record ever contributes to the output.
    pub fn run(&self, file: &UdfFile<'_>) -> Result<(Vec<EnrichedRecord>, ScanSummary)> {
        let mut scanner = file.scan(self.layout.record_size())?;
        let correlator = Correlator::new(self.labels);
        let mut records = Vec::new();

        for raw in scanner.by_ref() {
            let decoded = decode_record(&raw, self.layout)?;
            records.push(correlator.enrich(decoded));
        }

        let summary = ScanSummary {
            records_emitted: scanner.records_scanned(),
            bytes_consumed: scanner.bytes_consumed(),
            bytes_discarded: scanner.bytes_discarded(),
        };
        Ok((records, summary))
    }
}
