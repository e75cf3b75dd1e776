//! Error types for the UDF parser library.

use thiserror::Error;

/// Result type alias for UDF operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing UDF files or writing output.
#[derive(Debug, Error)]
pub enum Error {
    /// The header/binary delimiter could not be located, or the header text
    /// is unusable. Fatal for the whole file.
    #[error("malformed UDF file: {0}")]
    MalformedFile(String),

    /// The first record of the binary block does not start with the record
    /// marker, so there is no anchor to scan from. Fatal for the whole file.
    #[error("invalid framing: {0}")]
    InvalidFraming(String),

    /// Inconsistency between the resolved field offsets and the record size.
    /// Indicates a bug in the layout table, never a data problem.
    #[error("record layout error: {0}")]
    Layout(String),

    /// A supplementary label/config document could not be decoded.
    #[error("label document error: {0}")]
    Document(String),

    /// I/O error occurred while reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output rendering error (e.g. CSV write failure)
    #[error("output error: {0}")]
    Output(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Document(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Output(err.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}
