//! Parsing of the ASCII field-metadata block that precedes the binary data.
//!
//! Each metadata line describes one field as colon-separated segments:
//! `id: name: size: type[,type...]: flags[: ...]`. Trailing segments beyond
//! the flags (calibration values, status) exist in the wild and are ignored.

use log::warn;

/// A primitive wire type understood by the field decoder.
///
/// All values are stored little-endian. `F32` is IEEE-754 single precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    U8,
    S8,
    U16,
    S16,
    U32,
    S32,
    U64,
    F32,
}

impl PrimitiveType {
    /// Parse a type tag as it appears in the metadata block.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "u8" => Some(Self::U8),
            "s8" => Some(Self::S8),
            "u16" => Some(Self::U16),
            "s16" => Some(Self::S16),
            "u32" => Some(Self::U32),
            "s32" => Some(Self::S32),
            "u64" => Some(Self::U64),
            "f" => Some(Self::F32),
            _ => None,
        }
    }

    /// Encoded width in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::U8 | Self::S8 => 1,
            Self::U16 | Self::S16 => 2,
            Self::U32 | Self::S32 | Self::F32 => 4,
            Self::U64 => 8,
        }
    }
}

/// One component of a field's type specification.
///
/// Compound fields list several tags (e.g. `f,u8` for a float paired with an
/// accuracy byte). Tags the decoder does not understand are preserved so the
/// layout resolver can surface the field as ignored instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    Primitive(PrimitiveType),
    Unknown(String),
}

/// One parsed line of the metadata block. Immutable once parsed.
///
/// `id` is the stable identity of the field; ids are not necessarily
/// contiguous, ordered, or related to the field's byte offset.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub id: u32,
    pub name: String,
    pub declared_size: usize,
    pub type_spec: Vec<TypeTag>,
    pub flags: Vec<String>,
}

impl FieldDefinition {
    /// Whether every component of the type spec is a known primitive.
    pub fn is_decodable(&self) -> bool {
        self.type_spec
            .iter()
            .all(|t| matches!(t, TypeTag::Primitive(_)))
    }
}

/// Parse the metadata lines (everything after the version line) into field
/// definitions, preserving declaration order.
///
/// Unparseable lines are skipped with a warning rather than failing the
/// file: headers routinely carry variable-length or sensor-specific fields
/// that never appear in the fixed-offset records.
pub fn parse_field_definitions(lines: &[&str]) -> Vec<FieldDefinition> {
    let mut fields = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_field_line(line) {
            Some(field) => fields.push(field),
            None => warn!("skipping unparseable metadata line: {:?}", line),
        }
    }

    fields
}

fn parse_field_line(line: &str) -> Option<FieldDefinition> {
    let segments: Vec<&str> = line.split(':').map(str::trim).collect();
    if segments.len() < 4 {
        return None;
    }

    let id: u32 = segments[0].parse().ok()?;
    let name = segments[1].to_string();
    if name.is_empty() {
        return None;
    }
    let declared_size: usize = segments[2].parse().ok()?;

    let type_spec: Vec<TypeTag> = segments[3]
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| match PrimitiveType::from_tag(t) {
            Some(p) => TypeTag::Primitive(p),
            None => TypeTag::Unknown(t.to_string()),
        })
        .collect();
    if type_spec.is_empty() {
        return None;
    }

    let flags = segments
        .get(4)
        .map(|f| {
            f.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(FieldDefinition {
        id,
        name,
        declared_size,
        type_spec,
        flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_field() {
        let fields = parse_field_definitions(&["3: Temperature [deg C]: 4: f: sig: 0: 0: ok"]);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].id, 3);
        assert_eq!(fields[0].name, "Temperature [deg C]");
        assert_eq!(fields[0].declared_size, 4);
        assert_eq!(
            fields[0].type_spec,
            vec![TypeTag::Primitive(PrimitiveType::F32)]
        );
        assert_eq!(fields[0].flags, vec!["sig"]);
    }

    #[test]
    fn test_parse_compound_type() {
        let fields = parse_field_definitions(&["7: Gas resistance [ohm]: 5: f,u8: acc"]);
        assert_eq!(
            fields[0].type_spec,
            vec![
                TypeTag::Primitive(PrimitiveType::F32),
                TypeTag::Primitive(PrimitiveType::U8),
            ]
        );
        assert!(fields[0].is_decodable());
    }

    #[test]
    fn test_unknown_type_tag_is_preserved() {
        let fields = parse_field_definitions(&["9: Vendor blob: 16: blob16: raw"]);
        assert_eq!(fields.len(), 1);
        assert!(!fields[0].is_decodable());
        assert_eq!(
            fields[0].type_spec,
            vec![TypeTag::Unknown("blob16".to_string())]
        );
    }

    #[test]
    fn test_bad_lines_are_skipped() {
        let fields = parse_field_definitions(&[
            "not a field line",
            "12: Sensor Index: 1: u8: sig",
            ": missing id: 4: f",
            "",
        ]);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].id, 12);
    }

    #[test]
    fn test_ids_preserved_out_of_order() {
        let fields = parse_field_definitions(&[
            "40: Label Tag: 4: u32: sig",
            "2: Time Since PowerOn: 8: u64: sig",
        ]);
        assert_eq!(fields[0].id, 40);
        assert_eq!(fields[1].id, 2);
    }
}
