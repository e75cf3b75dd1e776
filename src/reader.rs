//! High-level API for reading UDF files.

use crate::assembler::Assembler;
use crate::error::{Error, Result};
use crate::labels::LabelTable;
use crate::layout::RecordLayout;
use crate::metadata::FieldDefinition;
use crate::models::{EnrichedRecord, ScanSummary};
use crate::udf::UdfFile;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

#[derive(Debug)]
enum Source {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl AsRef<[u8]> for Source {
    fn as_ref(&self) -> &[u8] {
        match self {
            Source::Owned(data) => data,
            Source::Mapped(map) => map,
        }
    }
}

/// A reader for UDF files that provides a high-level API for conversion.
///
/// # Examples
///
/// ```no_run
/// use udf_parser::UdfReader;
///
/// let reader = UdfReader::from_file("session.udf")?;
/// let (records, summary) = reader.read_all_with_summary()?;
///
/// println!("{}", summary.summary());
/// # Ok::<(), udf_parser::Error>(())
/// ```
#[derive(Debug)]
pub struct UdfReader {
    data: Source,
    labels: LabelTable,
}

impl UdfReader {
    /// Create a reader over a memory-mapped UDF file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or does not contain
    /// the UDF header/binary delimiter.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let map = unsafe { Mmap::map(&file)? };

        if !UdfFile::is_valid(&map) {
            return Err(Error::MalformedFile(
                "header/binary delimiter not found".to_string(),
            ));
        }

        Ok(Self {
            data: Source::Mapped(map),
            labels: LabelTable::empty(),
        })
    }

    /// Create a reader from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is not a valid UDF buffer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if !UdfFile::is_valid(&data) {
            return Err(Error::MalformedFile(
                "header/binary delimiter not found".to_string(),
            ));
        }

        Ok(Self {
            data: Source::Owned(data),
            labels: LabelTable::empty(),
        })
    }

    /// Attach a label table built from the supplementary label-info
    /// document. Records whose label tag matches an entry are enriched
    /// with the label name and description.
    pub fn with_labels(mut self, labels: LabelTable) -> Self {
        self.labels = labels;
        self
    }

    /// The version string from the file header (e.g. `"1.2"`).
    pub fn version(&self) -> Result<String> {
        UdfFile::new(self.data.as_ref())?.version()
    }

    /// The parsed field definitions from the metadata block, in
    /// declaration order.
    pub fn field_definitions(&self) -> Result<Vec<FieldDefinition>> {
        UdfFile::new(self.data.as_ref())?.field_definitions()
    }

    /// Decode every record of the file, in acquisition order.
    pub fn read_all(&self) -> Result<Vec<EnrichedRecord>> {
        self.read_all_with_summary().map(|(records, _)| records)
    }

    /// Decode every record and return the scan summary alongside.
    ///
    /// The summary accounts for every byte of the binary block:
    /// `records * record_size + discarded == block length`.
    pub fn read_all_with_summary(&self) -> Result<(Vec<EnrichedRecord>, ScanSummary)> {
        let file = UdfFile::new(self.data.as_ref())?;
        let layout = RecordLayout::standard()?;

        layout.confirm_fields(&file.field_definitions()?);
        layout.check_marker_spacing(file.binary_block());

        Assembler::new(&layout, &self.labels).run(&file)
    }

    /// Get a low-level split view for custom parsing logic.
    pub fn low_level(&self) -> Result<UdfFile<'_>> {
        UdfFile::new(self.data.as_ref())
    }
}

/// Builder for configuring UDF reading options.
///
/// # Examples
///
/// ```no_run
/// use udf_parser::{LabelTable, UdfReaderBuilder};
///
/// let labels = LabelTable::from_json(r#"{"labelInformation": []}"#)?;
/// let reader = UdfReaderBuilder::new()
///     .labels(labels)
///     .from_file("session.udf")?;
/// let records = reader.read_all()?;
/// # Ok::<(), udf_parser::Error>(())
/// ```
pub struct UdfReaderBuilder {
    labels: LabelTable,
}

impl UdfReaderBuilder {
    /// Create a new reader builder with an empty label table.
    pub fn new() -> Self {
        Self {
            labels: LabelTable::empty(),
        }
    }

    /// Set the label table used for record enrichment.
    pub fn labels(mut self, labels: LabelTable) -> Self {
        self.labels = labels;
        self
    }

    /// Build a reader from a file path.
    pub fn from_file<P: AsRef<Path>>(self, path: P) -> Result<UdfReader> {
        Ok(UdfReader::from_file(path)?.with_labels(self.labels))
    }

    /// Build a reader from raw bytes.
    pub fn from_bytes(self, data: Vec<u8>) -> Result<UdfReader> {
        Ok(UdfReader::from_bytes(data)?.with_labels(self.labels))
    }
}

impl Default for UdfReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
