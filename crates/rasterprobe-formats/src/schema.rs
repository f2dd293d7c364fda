//! Declarative PNG chunk schema table and the `SchemaDispatch` walk that
//! drives a [`ByteCursor`] over a chunk's `raw_data` span to populate its
//! `parsed_fields` map.

use std::collections::BTreeMap;

use rasterprobe_core::ByteCursor;

use crate::error::{Error, Result};

/// One decoded chunk field value: `u8`, `u16`, `u32`, a
/// null-terminated-string span, or a raw buffer span.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum FieldValue {
    U8(u8),
    U16(u16),
    U32(u32),
    Str(rasterprobe_core::Span),
    Bytes(rasterprobe_core::Span),
}

/// The kind of a declared schema field, used to drive the cursor walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    U16,
    U32,
    NullTerminatedString,
    /// Consumes everything from the current position to the end of the
    /// chunk's recorded span.
    RestOfChunk,
}

/// An ordered (name, kind) pair — one entry in a chunk's declared schema.
pub type SchemaField = (&'static str, FieldKind);

/// Looks up the declared field schema for a 4-byte PNG chunk name.
/// Returns `None` for chunk names with no known schema (callers treat that
/// as "preserve the chunk with `parsed_fields = None`", not an error).
pub fn schema_for(name: &[u8; 4]) -> Option<&'static [SchemaField]> {
    use FieldKind::*;
    Some(match name {
        b"IHDR" => &[
            ("width", U32),
            ("height", U32),
            ("bit_depth", U8),
            ("color_type", U8),
            ("compression_method", U8),
            ("filter_method", U8),
            ("interlace_method", U8),
        ],
        b"IDAT" => &[("buffer", RestOfChunk)],
        b"IEND" => &[],
        b"pHYs" => &[("ppu_x", U32), ("ppu_y", U32), ("unit", U8)],
        b"cHRM" => &[
            ("wpx", U32),
            ("wpy", U32),
            ("rx", U32),
            ("ry", U32),
            ("gx", U32),
            ("gy", U32),
            ("bx", U32),
            ("by", U32),
        ],
        b"iCCP" => &[
            ("profile_name", NullTerminatedString),
            ("compression_method", U8),
            ("compressed_profile", RestOfChunk),
        ],
        b"zTXt" => &[
            ("keyword", NullTerminatedString),
            ("compression_method", U8),
            ("compressed_text", RestOfChunk),
        ],
        b"eXIf" => &[("buffer", RestOfChunk)],
        b"tEXt" => &[("keyword", NullTerminatedString), ("text", RestOfChunk)],
        b"tIME" => &[
            ("year", U16),
            ("month", U8),
            ("day", U8),
            ("hour", U8),
            ("minute", U8),
            ("second", U8),
        ],
        b"gAMA" => &[("gamma", U32)],
        b"sRGB" => &[("rendering_intent", U8)],
        _ => return None,
    })
}

/// Walks `cursor` from its current position to `chunk_end` according to
/// `schema`, populating an ordered field-name → value map. `chunk_name` is
/// only used to label a [`Error::SchemaMismatch`] on failure.
pub fn walk_schema(
    cursor: &mut ByteCursor<'_>,
    schema: &[SchemaField],
    chunk_end: usize,
    chunk_name: [u8; 4],
) -> Result<BTreeMap<String, FieldValue>> {
    let mut fields = BTreeMap::new();
    for &(name, kind) in schema {
        let value = read_field(cursor, kind, chunk_end)
            .map_err(|_| Error::SchemaMismatch { chunk_name })?;
        fields.insert(name.to_string(), value);
    }
    Ok(fields)
}

fn read_field(
    cursor: &mut ByteCursor<'_>,
    kind: FieldKind,
    chunk_end: usize,
) -> Result<FieldValue> {
    Ok(match kind {
        FieldKind::U8 => FieldValue::U8(cursor.next()?),
        FieldKind::U16 => FieldValue::U16(cursor.read_u16()?),
        FieldKind::U32 => FieldValue::U32(cursor.read_u32()?),
        FieldKind::NullTerminatedString => FieldValue::Str(cursor.read_null_terminated_string()?),
        FieldKind::RestOfChunk => FieldValue::Bytes(cursor.get_span_to(chunk_end)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ihdr_schema_round_trips() {
        let data: [u8; 13] = [
            0x00, 0x00, 0x00, 0x0A, // width = 10
            0x00, 0x00, 0x00, 0x14, // height = 20
            0x08, // bit_depth
            0x02, // color_type
            0x00, 0x00, 0x00,
        ];
        let mut cursor = ByteCursor::new(&data, false);
        let schema = schema_for(b"IHDR").unwrap();
        let fields = walk_schema(&mut cursor, schema, data.len(), *b"IHDR").unwrap();
        assert_eq!(fields.get("width"), Some(&FieldValue::U32(10)));
        assert_eq!(fields.get("height"), Some(&FieldValue::U32(20)));
        assert_eq!(fields.get("bit_depth"), Some(&FieldValue::U8(8)));
    }

    #[test]
    fn unknown_chunk_has_no_schema() {
        assert!(schema_for(b"fOOb").is_none());
    }

    #[test]
    fn schema_failure_is_tagged_with_chunk_name() {
        let data: [u8; 2] = [0, 0];
        let mut cursor = ByteCursor::new(&data, false);
        let schema = schema_for(b"IHDR").unwrap();
        let err = walk_schema(&mut cursor, schema, data.len(), *b"IHDR").unwrap_err();
        assert!(matches!(
            err,
            Error::SchemaMismatch { chunk_name } if &chunk_name == b"IHDR"
        ));
    }
}
