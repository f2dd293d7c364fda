//! TIFF/EXIF reader: a two-level IFD walk that reads the root IFD and then
//! follows the EXIF (tag 34665) and GPS (tag 34853) sub-IFD pointers,
//! concatenating all three IFDs' fields into one flat list.
//!
//! Field values are decoded inline when `count * type_width <= 4` (the
//! value lives in the entry's own 4-byte `value_or_offset` slot) and by
//! seeking to `value_or_offset` otherwise. The inline packing is
//! type-dependent: BYTE/ASCII/UNDEFINED take bytes most-significant-first
//! off the decoded `u32`, independent of which byte order produced that
//! `u32`; SHORT uses the top half for index 0; LONG/SLONG are the `u32`
//! itself (reinterpreted for SLONG).

use rasterprobe_core::ByteCursor;

use crate::error::{Error, Result};

const MARKER_LE: [u8; 2] = *b"II";
const MARKER_BE: [u8; 2] = *b"MM";
const TIFF_MAGIC: u16 = 42;

const TAG_EXIF_SUBIFD: u16 = 34665;
const TAG_GPS_SUBIFD: u16 = 34853;

/// Caps runaway entry counts from a corrupt `count` field.
const MAX_IFD_ENTRIES: u16 = 10_000;

/// A decoded TIFF rational (unsigned numerator/denominator pair).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Rational {
    pub num: u32,
    pub den: u32,
}

/// A decoded TIFF signed rational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SRational {
    pub num: i32,
    pub den: i32,
}

/// A field's decoded value. Always a vector — a `count == 1` field is a
/// one-element vector rather than a bare scalar, so callers have one shape
/// to match regardless of count.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum DecodedValue {
    Byte(Vec<u8>),
    Ascii(Vec<u8>),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Slong(Vec<i32>),
    Rational(Vec<Rational>),
    SRational(Vec<SRational>),
    Undefined(Vec<u8>),
}

impl DecodedValue {
    fn first_u32(&self) -> Option<u32> {
        match self {
            DecodedValue::Long(v) => v.first().copied(),
            _ => None,
        }
    }
}

/// One decoded IFD entry.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ExifField {
    pub tag: u16,
    pub name: Option<&'static str>,
    pub field_type: u16,
    pub count: u32,
    pub value_offset: u32,
    pub value: DecodedValue,
}

/// The concatenated root + EXIF-sub-IFD + GPS-sub-IFD field list.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ExifRecord {
    pub fields: Vec<ExifField>,
}

impl ExifRecord {
    pub fn get(&self, tag: u16) -> Option<&ExifField> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    /// All fields with the given tag number, across root/EXIF/GPS IFDs —
    /// unlike [`ExifRecord::get`], this doesn't assume the tag number is
    /// unique once GPS's own namespace is concatenated in.
    pub fn iter_by_tag(&self, tag: u16) -> impl Iterator<Item = &ExifField> {
        self.fields.iter().filter(move |f| f.tag == tag)
    }
}

/// Knobs controlling TIFF parsing behavior.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// `true` (default): honor the `II`/`MM` byte-order marker, the
    /// corrected behavior. `false`: reproduce a legacy bug where the
    /// marker is parsed but every multi-byte read after it uses
    /// big-endian regardless of what it said.
    pub strict_byte_order: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            strict_byte_order: true,
        }
    }
}

fn type_width(field_type: u16) -> Option<usize> {
    match field_type {
        1 | 2 | 7 => Some(1), // BYTE, ASCII, UNDEFINED
        3 => Some(2),         // SHORT
        4 | 9 => Some(4),     // LONG, SLONG
        5 | 10 => Some(8),    // RATIONAL, SRATIONAL
        _ => None,
    }
}

/// Parses bytes beginning with a TIFF header, honoring the byte-order
/// marker (the corrected behavior — see [`ParseOptions`]).
pub fn parse_exif(bytes: &[u8]) -> Result<ExifRecord> {
    parse_exif_with_options(bytes, ParseOptions::default())
}

/// Parses bytes beginning with a TIFF header under explicit options.
pub fn parse_exif_with_options(bytes: &[u8], options: ParseOptions) -> Result<ExifRecord> {
    let marker_bytes = {
        let mut probe = ByteCursor::new(bytes, true);
        [probe.next()?, probe.next()?]
    };
    let little_endian = match marker_bytes {
        MARKER_LE => true,
        MARKER_BE => false,
        _ => return Err(Error::BadSignature { format: "tiff" }),
    };
    let cursor_is_little_endian = if options.strict_byte_order {
        little_endian
    } else {
        false
    };

    let mut cursor = ByteCursor::new(bytes, cursor_is_little_endian);
    cursor.seek(2);
    let magic = cursor.read_u16()?;
    if magic != TIFF_MAGIC {
        return Err(Error::BadSignature { format: "tiff" });
    }
    let root_offset = cursor.read_u32()?;

    let mut fields = read_ifd(&mut cursor, root_offset)?;

    for pointer_tag in [TAG_EXIF_SUBIFD, TAG_GPS_SUBIFD] {
        let sub_offset = fields
            .iter()
            .find(|f| f.tag == pointer_tag)
            .and_then(|f| f.value.first_u32());
        if let Some(sub_offset) = sub_offset {
            tracing::debug!(
                tag = pointer_tag,
                offset = sub_offset,
                "following EXIF sub-IFD pointer"
            );
            let mut sub_fields = read_ifd(&mut cursor, sub_offset)?;
            fields.append(&mut sub_fields);
        }
    }

    Ok(ExifRecord { fields })
}

/// Reads one IFD: a `u16` entry count, that many 12-byte entries, and a
/// trailing (ignored) next-IFD offset. Restores the cursor's prior
/// position before returning, since IFD reads happen at caller-chosen
/// offsets rather than in forward sequence.
fn read_ifd(cursor: &mut ByteCursor<'_>, offset: u32) -> Result<Vec<ExifField>> {
    let saved = cursor.position();
    cursor.seek(offset as usize);

    let count = cursor.read_u16()?;
    let count = count.min(MAX_IFD_ENTRIES);
    let mut fields = Vec::with_capacity(count as usize);
    for _ in 0..count {
        fields.push(read_entry(cursor)?);
    }
    let _next_ifd_offset = cursor.read_u32()?;

    cursor.seek(saved);
    Ok(fields)
}

fn read_entry(cursor: &mut ByteCursor<'_>) -> Result<ExifField> {
    let tag = cursor.read_u16()?;
    let field_type = cursor.read_u16()?;
    let count = cursor.read_u32()?;
    let value_offset = cursor.read_u32()?;

    let width = type_width(field_type).ok_or(Error::UnknownExifType {
        type_code: field_type,
    })?;
    let size = width.saturating_mul(count as usize);

    let value = if size <= 4 {
        decode_inline(field_type, count as usize, value_offset)
    } else {
        decode_pointer(cursor, field_type, count as usize, value_offset)?
    };

    Ok(ExifField {
        tag,
        name: rasterprobe_tags::lookup_tag(tag),
        field_type,
        count,
        value_offset,
        value,
    })
}

/// Decodes a field whose value fits in the entry's own 4-byte slot.
fn decode_inline(field_type: u16, count: usize, value_offset: u32) -> DecodedValue {
    let msb_first = value_offset.to_be_bytes();
    match field_type {
        1 => DecodedValue::Byte(msb_first[..count].to_vec()),
        2 => DecodedValue::Ascii(msb_first[..count].to_vec()),
        7 => DecodedValue::Undefined(msb_first[..count].to_vec()),
        3 => {
            let mut shorts = Vec::with_capacity(count);
            if count >= 1 {
                shorts.push((value_offset >> 16) as u16);
            }
            if count >= 2 {
                shorts.push((value_offset & 0xFFFF) as u16);
            }
            DecodedValue::Short(shorts)
        }
        4 => DecodedValue::Long(vec![value_offset]),
        9 => DecodedValue::Slong(vec![value_offset as i32]),
        _ => unreachable!("type_width rejects unknown types before decode_inline runs"),
    }
}

/// Decodes a field whose value lives at `value_offset`, seeking there and
/// restoring the cursor's position afterward.
fn decode_pointer(
    cursor: &mut ByteCursor<'_>,
    field_type: u16,
    count: usize,
    value_offset: u32,
) -> Result<DecodedValue> {
    let saved = cursor.position();
    cursor.seek(value_offset as usize);

    let value = match field_type {
        1 => {
            let mut bytes = Vec::with_capacity(count);
            for _ in 0..count {
                bytes.push(cursor.next()?);
            }
            DecodedValue::Byte(bytes)
        }
        2 => {
            let mut bytes = Vec::with_capacity(count);
            for _ in 0..count {
                bytes.push(cursor.next()?);
            }
            DecodedValue::Ascii(bytes)
        }
        7 => {
            let mut bytes = Vec::with_capacity(count);
            for _ in 0..count {
                bytes.push(cursor.next()?);
            }
            DecodedValue::Undefined(bytes)
        }
        3 => {
            let mut shorts = Vec::with_capacity(count);
            for _ in 0..count {
                shorts.push(cursor.read_u16()?);
            }
            DecodedValue::Short(shorts)
        }
        4 => {
            let mut longs = Vec::with_capacity(count);
            for _ in 0..count {
                longs.push(cursor.read_u32()?);
            }
            DecodedValue::Long(longs)
        }
        9 => {
            let mut slongs = Vec::with_capacity(count);
            for _ in 0..count {
                slongs.push(cursor.read_i32()?);
            }
            DecodedValue::Slong(slongs)
        }
        5 => {
            let mut rationals = Vec::with_capacity(count);
            for _ in 0..count {
                let num = cursor.read_u32()?;
                let den = cursor.read_u32()?;
                rationals.push(Rational { num, den });
            }
            DecodedValue::Rational(rationals)
        }
        10 => {
            let mut rationals = Vec::with_capacity(count);
            for _ in 0..count {
                let num = cursor.read_i32()?;
                let den = cursor.read_i32()?;
                rationals.push(SRational { num, den });
            }
            DecodedValue::SRational(rationals)
        }
        _ => unreachable!("type_width rejects unknown types before decode_pointer runs"),
    };

    cursor.seek(saved);
    Ok(value)
}
