//! Low-level UDF file access: header splitting and record scanning.
//!
//! A UDF file is an ASCII header (version line plus field metadata) and a
//! packed binary block, separated by three consecutive CRLF sequences. The
//! binary block is a run of fixed-size records, each starting with a
//! two-byte marker.

use crate::error::{Error, Result};
use crate::layout::RECORD_MARKER;
use crate::metadata::{parse_field_definitions, FieldDefinition};
use log::warn;

/// Delimiter between the ASCII header and the binary block.
pub const METADATA_DELIMITER: &[u8] = b"\r\n\r\n\r\n";

/// A split view over a raw UDF byte buffer. No bytes are copied; the header
/// and binary block are slices of the source buffer.
#[derive(Debug)]
pub struct UdfFile<'a> {
    data: &'a [u8],
    header_end: usize,
}

impl<'a> UdfFile<'a> {
    /// Split a raw buffer at the first header/binary delimiter.
    ///
    /// Fails with [`Error::MalformedFile`] when the delimiter is absent.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let header_end = find_delimiter(data).ok_or_else(|| {
            Error::MalformedFile("header/binary delimiter not found".to_string())
        })?;
        Ok(Self { data, header_end })
    }

    /// Quick probe for batch scanners: does this buffer contain the
    /// header/binary delimiter at all?
    pub fn is_valid(data: &[u8]) -> bool {
        find_delimiter(data).is_some()
    }

    /// The textual header, decoded leniently. Vendor tools occasionally
    /// emit stray non-UTF-8 bytes in field names.
    pub fn header_text(&self) -> String {
        String::from_utf8_lossy(&self.data[..self.header_end]).into_owned()
    }

    /// The version string from the first header line (e.g. `"1.2"`).
    pub fn version(&self) -> Result<String> {
        let text = self.header_text();
        let first = text
            .lines()
            .next()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| Error::MalformedFile("empty header section".to_string()))?;
        Ok(first.to_string())
    }

    /// Parsed field definitions from the header lines after the version
    /// line, in declaration order.
    pub fn field_definitions(&self) -> Result<Vec<FieldDefinition>> {
        let text = self.header_text();
        let lines: Vec<&str> = text.lines().skip(1).collect();
        if text.trim().is_empty() {
            return Err(Error::MalformedFile("empty header section".to_string()));
        }
        Ok(parse_field_definitions(&lines))
    }

    /// The packed binary block following the delimiter.
    pub fn binary_block(&self) -> &'a [u8] {
        &self.data[self.header_end + METADATA_DELIMITER.len()..]
    }

    /// Start a marker-validated scan of the binary block.
    pub fn scan(&self, record_size: usize) -> Result<RecordScanner<'a>> {
        RecordScanner::new(self.binary_block(), record_size)
    }
}

fn find_delimiter(data: &[u8]) -> Option<usize> {
    data.windows(METADATA_DELIMITER.len())
        .position(|w| w == METADATA_DELIMITER)
}

/// A raw record: a contiguous slice of exactly `record_size` bytes starting
/// at a validated marker. Read-only view over the source buffer.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    /// Zero-based position in the scan order.
    pub index: usize,
    pub bytes: &'a [u8],
}

/// Walks the binary block in fixed strides, validating the record marker at
/// every stride boundary.
///
/// A marker mismatch after the first record stops the scan rather than
/// searching byte-by-byte for the next marker; the unscanned remainder is
/// reported as discarded. Resynchronizing mid-buffer could attribute
/// garbage bytes to real fields.
#[derive(Debug)]
pub struct RecordScanner<'a> {
    data: &'a [u8],
    record_size: usize,
    pos: usize,
    index: usize,
    halted: bool,
}

impl<'a> RecordScanner<'a> {
    fn new(data: &'a [u8], record_size: usize) -> Result<Self> {
        if record_size < RECORD_MARKER.len() {
            return Err(Error::Layout(format!(
                "record size {} is smaller than the marker",
                record_size
            )));
        }
        // The first record has no prior anchor; if its marker is wrong the
        // whole block is unframed.
        if data.len() >= RECORD_MARKER.len() && data[..RECORD_MARKER.len()] != RECORD_MARKER {
            return Err(Error::InvalidFraming(format!(
                "binary block starts with {:02x} {:02x}, expected {:02x} {:02x}",
                data[0], data[1], RECORD_MARKER[0], RECORD_MARKER[1]
            )));
        }
        Ok(Self {
            data,
            record_size,
            pos: 0,
            index: 0,
            halted: false,
        })
    }

    /// Bytes covered by the records emitted so far.
    pub fn bytes_consumed(&self) -> usize {
        self.pos
    }

    /// Bytes between the scan position and the end of the block. Once the
    /// iterator is exhausted this is the discarded tail.
    pub fn bytes_discarded(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Records emitted so far.
    pub fn records_scanned(&self) -> usize {
        self.index
    }
}

impl<'a> Iterator for RecordScanner<'a> {
    type Item = RawRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        if self.pos + self.record_size > self.data.len() {
            self.halted = true;
            if self.pos < self.data.len() {
                warn!(
                    "discarding {} trailing bytes shorter than a record",
                    self.data.len() - self.pos
                );
            }
            return None;
        }

        let bytes = &self.data[self.pos..self.pos + self.record_size];
        if bytes[..RECORD_MARKER.len()] != RECORD_MARKER {
            self.halted = true;
            warn!(
                "marker mismatch at offset {}, stopping scan with {} bytes unprocessed",
                self.pos,
                self.data.len() - self.pos
            );
            return None;
        }

        let record = RawRecord {
            index: self.index,
            bytes,
        };
        self.pos += self.record_size;
        self.index += 1;
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_delimiter() {
        let data = b"1.2\r\nfields\r\n\r\n\r\n\x00\xff";
        assert_eq!(find_delimiter(data), Some(11));
        assert!(find_delimiter(b"no delimiter here").is_none());
    }

    #[test]
    fn test_split_header_and_binary() {
        let mut data = b"1.2\r\n3: Temperature: 4: f: sig\r\n\r\n\r\n".to_vec();
        data.extend_from_slice(&[0x00, 0xFF, 0xAA]);
        let file = UdfFile::new(&data).unwrap();
        assert_eq!(file.version().unwrap(), "1.2");
        assert_eq!(file.binary_block(), &[0x00, 0xFF, 0xAA]);
        assert_eq!(file.field_definitions().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_delimiter_is_malformed() {
        let err = UdfFile::new(b"1.2\r\nno terminator").unwrap_err();
        assert!(matches!(err, Error::MalformedFile(_)));
    }
}
