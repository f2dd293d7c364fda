//! PNG chunk walker.
//!
//! Iterates the length-prefixed, four-character-named chunk stream after
//! the 8-byte signature. Known chunk names are decoded against the
//! declarative schema table in [`crate::schema`]; unknown chunks are kept
//! with `parsed_fields = None` since PNG explicitly allows ancillary
//! chunks the reader doesn't recognize.

use std::collections::BTreeMap;

use rasterprobe_core::{ByteCursor, Span};

use crate::error::{Error, Result};
use crate::schema::{self, FieldValue};

const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// One PNG chunk: its name, the span of its data payload, its (unchecked)
/// CRC, and — for chunks in the known schema table — its decoded fields.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Chunk {
    pub name: [u8; 4],
    pub raw_data: Span,
    pub crc: u32,
    pub parsed_fields: Option<BTreeMap<String, FieldValue>>,
}

impl Chunk {
    pub fn name_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }
}

/// A fully parsed PNG file.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PngRecord {
    pub header_span: Span,
    pub chunks: Vec<Chunk>,
    pub buffer: Vec<u8>,
}

/// Parses a PNG file. `bytes` must begin with the 8-byte PNG signature.
pub fn parse_png(bytes: &[u8]) -> Result<PngRecord> {
    let mut cursor = ByteCursor::new(bytes, false);
    if !cursor.consume_if_equals(&SIGNATURE) {
        return Err(Error::BadSignature { format: "png" });
    }
    let header_span = Span::new(0, 8);

    let mut chunks = Vec::new();
    while !cursor.at_end() {
        let length = cursor.read_u32()? as usize;
        let mut name = [0u8; 4];
        for b in &mut name {
            *b = cursor.next()?;
        }
        let raw_data = cursor.get_span(length)?;

        let parsed_fields = match schema::schema_for(&name) {
            Some(schema) => {
                let mut schema_cursor = ByteCursor::new(bytes, false);
                schema_cursor.seek(raw_data.start);
                Some(schema::walk_schema(
                    &mut schema_cursor,
                    schema,
                    raw_data.end,
                    name,
                )?)
            }
            None => None,
        };

        let crc = cursor.read_u32()?;
        chunks.push(Chunk {
            name,
            raw_data,
            crc,
            parsed_fields,
        });
    }

    Ok(PngRecord {
        header_span,
        chunks,
        buffer: bytes.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ihdr_png() -> Vec<u8> {
        let mut data = SIGNATURE.to_vec();
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&10u32.to_be_bytes());
        data.extend_from_slice(&20u32.to_be_bytes());
        data.push(8);
        data.push(2);
        data.push(0);
        data.push(0);
        data.push(0);
        data.extend_from_slice(&0xDEAD_BEEFu32.to_be_bytes());
        data
    }

    #[test]
    fn ihdr_concrete_scenario() {
        let data = ihdr_png();
        let record = parse_png(&data).unwrap();
        assert_eq!(record.chunks.len(), 1);
        let chunk = &record.chunks[0];
        assert_eq!(&chunk.name, b"IHDR");
        let fields = chunk.parsed_fields.as_ref().unwrap();
        assert_eq!(fields.get("width"), Some(&FieldValue::U32(10)));
        assert_eq!(fields.get("height"), Some(&FieldValue::U32(20)));
        assert_eq!(fields.get("bit_depth"), Some(&FieldValue::U8(8)));
        assert_eq!(fields.get("color_type"), Some(&FieldValue::U8(2)));
        assert_eq!(fields.get("compression_method"), Some(&FieldValue::U8(0)));
        assert_eq!(fields.get("filter_method"), Some(&FieldValue::U8(0)));
        assert_eq!(fields.get("interlace_method"), Some(&FieldValue::U8(0)));
    }

    #[test]
    fn rejects_bad_signature() {
        let data = [0u8; 8];
        assert!(matches!(
            parse_png(&data),
            Err(Error::BadSignature { format: "png" })
        ));
    }

    #[test]
    fn zero_length_iend_is_one_chunk() {
        let mut data = SIGNATURE.to_vec();
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(b"IEND");
        data.extend_from_slice(&0u32.to_be_bytes());
        let record = parse_png(&data).unwrap();
        assert_eq!(record.chunks.len(), 1);
        assert_eq!(&record.chunks[0].name, b"IEND");
    }

    #[test]
    fn unknown_chunk_is_preserved_without_error() {
        let mut data = SIGNATURE.to_vec();
        data.extend_from_slice(&4u32.to_be_bytes());
        data.extend_from_slice(b"fOOb");
        data.extend_from_slice(b"xyzw");
        data.extend_from_slice(&0u32.to_be_bytes());
        let record = parse_png(&data).unwrap();
        assert_eq!(record.chunks.len(), 1);
        assert!(record.chunks[0].parsed_fields.is_none());
    }

    #[test]
    fn chunk_spans_cover_the_whole_file_with_framing() {
        let data = ihdr_png();
        let record = parse_png(&data).unwrap();
        let framing_per_chunk = 12;
        let total: usize = record
            .chunks
            .iter()
            .map(|c| c.raw_data.len() + framing_per_chunk)
            .sum();
        assert_eq!(record.header_span.len() + total, data.len());
    }

    #[test]
    fn rewalking_chunk_bytes_yields_same_numeric_fields() {
        let data = ihdr_png();
        let record = parse_png(&data).unwrap();
        let chunk = &record.chunks[0];
        let raw = &data[chunk.raw_data.start..chunk.raw_data.end];
        let mut cursor = ByteCursor::new(raw, false);
        let schema = schema::schema_for(&chunk.name).unwrap();
        let refreshed = schema::walk_schema(&mut cursor, schema, raw.len(), chunk.name).unwrap();
        assert_eq!(
            refreshed.get("width"),
            chunk.parsed_fields.as_ref().unwrap().get("width")
        );
    }
}
