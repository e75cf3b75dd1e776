/// Test utilities for building UDF files
use byteorder::{ByteOrder, LittleEndian};

/// Fixed record size of the format revision under test.
pub const RECORD_SIZE: usize = 61;

/// Field values for one synthetic 61-byte record.
///
/// Note the format's nested ranges: the heater step byte sits inside the
/// RTC word and the error code byte inside the label tag word. The encoder
/// writes the wide field first and then the nested byte, so tests that
/// assert on the wide field should leave the nested one at zero (and vice
/// versa).
#[derive(Debug, Clone, Copy)]
pub struct RecordValues {
    pub time_ns: u64,
    pub rtc: u32,
    pub heater_step: u8,
    pub gas_resistance: f32,
    pub humidity: f32,
    pub pressure: f32,
    pub temperature: f32,
    pub cycle_index: u8,
    pub sensor_id: u32,
    pub label_tag: u32,
    pub error_code: i8,
    pub sensor_index: u8,
}

impl Default for RecordValues {
    fn default() -> Self {
        Self {
            time_ns: 0,
            rtc: 0,
            heater_step: 0,
            gas_resistance: 0.0,
            humidity: 0.0,
            pressure: 0.0,
            temperature: 0.0,
            cycle_index: 0,
            sensor_id: 0,
            label_tag: 0,
            error_code: 0,
            sensor_index: 0,
        }
    }
}

impl RecordValues {
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];
        buf[0] = 0x00;
        buf[1] = 0xFF;
        LittleEndian::write_u64(&mut buf[2..10], self.time_ns);
        LittleEndian::write_u32(&mut buf[10..14], self.rtc);
        buf[12] = self.heater_step;
        LittleEndian::write_f32(&mut buf[15..19], self.gas_resistance);
        LittleEndian::write_f32(&mut buf[21..25], self.humidity);
        LittleEndian::write_f32(&mut buf[27..31], self.pressure);
        LittleEndian::write_f32(&mut buf[33..37], self.temperature);
        buf[39] = self.cycle_index;
        LittleEndian::write_u32(&mut buf[45..49], self.sensor_id);
        LittleEndian::write_u32(&mut buf[51..55], self.label_tag);
        buf[53] = self.error_code as u8;
        buf[60] = self.sensor_index;
        buf
    }
}

/// Builder for creating UDF test files
pub struct UdfBuilder {
    version: String,
    field_lines: Vec<String>,
    binary: Vec<u8>,
}

impl UdfBuilder {
    /// Create a new builder with version "1.2" and no metadata lines.
    pub fn new() -> Self {
        Self {
            version: "1.2".to_string(),
            field_lines: Vec::new(),
            binary: Vec::new(),
        }
    }

    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Add a raw metadata line.
    pub fn field_line(mut self, line: &str) -> Self {
        self.field_lines.push(line.to_string());
        self
    }

    /// Add the field declarations seen in validated capture files.
    pub fn standard_fields(self) -> Self {
        self.field_line("12: Sensor Index: 1: u8: sig: 0: 0: ok")
            .field_line("2: Time Since PowerOn: 8: u64: sig: 0: 0: ok")
            .field_line("3: Raw temperature [deg C]: 4: f: sig: 0: 0: ok")
            .field_line("4: Pressure [Pa]: 4: f: sig: 0: 0: ok")
            .field_line("5: Raw humidity [%rH]: 4: f: sig: 0: 0: ok")
            .field_line("7: Gas resistance [ohm]: 5: f,u8: acc: 0: 0: ok")
            .field_line("40: Label Tag: 4: u32: sig: 0: 0: ok")
    }

    /// Append one encoded record to the binary block.
    pub fn record(mut self, values: RecordValues) -> Self {
        self.binary.extend_from_slice(&values.encode());
        self
    }

    /// Append arbitrary bytes to the binary block.
    pub fn raw_bytes(mut self, bytes: &[u8]) -> Self {
        self.binary.extend_from_slice(bytes);
        self
    }

    /// Build the full file: version line, metadata lines, triple-CRLF
    /// delimiter, binary block.
    pub fn build(self) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(self.version.as_bytes());
        for line in &self.field_lines {
            data.extend_from_slice(b"\r\n");
            data.extend_from_slice(line.as_bytes());
        }
        data.extend_from_slice(b"\r\n\r\n\r\n");
        data.extend_from_slice(&self.binary);
        data
    }
}

impl Default for UdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}
