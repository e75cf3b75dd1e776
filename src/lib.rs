//! # UDF Parser
//!
//! A Rust library for parsing Unit Definition Files (`.udf`) — binary
//! sensor logs with an ASCII metadata header — and converting them to
//! analysis-ready tabular output.
//!
//! ## Features
//!
//! - **Zero-copy scanning**: memory-mapped input, records decoded straight
//!   from the source buffer
//! - **Fixed-layout decoding**: the validated 61-byte record layout with
//!   marker-checked framing
//! - **Label correlation**: enrichment from the sibling label-info and
//!   board configuration documents
//! - **CSV output**: fixed-column rendering matching the vendor raw-data
//!   column order
//!
//! ## Quick Start
//!
//! ```no_run
//! use udf_parser::{CsvWriter, UdfReader};
//!
//! let reader = UdfReader::from_file("session.udf")?;
//! let (records, summary) = reader.read_all_with_summary()?;
//!
//! println!("{}", summary.summary());
//!
//! CsvWriter::new("session.csv").write(&records)?;
//! # Ok::<(), udf_parser::Error>(())
//! ```
//!
//! ## Label enrichment
//!
//! Records carry a numeric label tag; a sibling `.bmelabelinfo` document
//! maps tags to names and descriptions:
//!
//! ```no_run
//! use udf_parser::{LabelTable, UdfReaderBuilder};
//!
//! let json = std::fs::read_to_string("session.bmelabelinfo")?;
//! let labels = LabelTable::from_json(&json)?;
//!
//! let reader = UdfReaderBuilder::new()
//!     .labels(labels)
//!     .from_file("session.udf")?;
//!
//! for record in reader.read_all()? {
//!     if let Some(name) = &record.label_name {
//!         println!("record {} labeled {}", record.record.index, name);
//!     }
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Fatal conditions (missing header delimiter, unframed binary block,
//! inconsistent layout table) surface as typed errors and abort the file;
//! recoverable conditions (truncated tail, unknown label tags) are
//! reported through the scan summary and never interrupt the stream.
//!
//! ```no_run
//! use udf_parser::{Error, UdfReader};
//!
//! match UdfReader::from_file("session.udf") {
//!     Ok(reader) => {
//!         // Process the file...
//!     }
//!     Err(Error::MalformedFile(msg)) => {
//!         eprintln!("Not a UDF file: {}", msg);
//!     }
//!     Err(err) => {
//!         eprintln!("Error: {}", err);
//!     }
//! }
//! ```

// Public API modules
pub mod error;
pub mod reader;
pub mod writer;

// Re-export commonly used types
pub use error::{Error, Result};
pub use labels::{BoardConfigDocument, LabelInfoDocument, LabelTable};
pub use models::{DecodedRecord, EnrichedRecord, FieldValue, LabelEntry, ScanSummary};
pub use reader::{UdfReader, UdfReaderBuilder};
pub use writer::{CsvWriter, WriteStats};

// Internal modules (public but not part of the high-level API)
pub mod assembler;
pub mod decode;
pub mod formats;
pub mod labels;
pub mod layout;
pub mod metadata;
pub mod models;
pub mod udf;
