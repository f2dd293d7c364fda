//! ICC tag table: signature → attribute keyword dictionary and per-type
//! tag value decoding.

use phf::phf_map;

use crate::error::{Error, Result};
use crate::TagValue;

/// Known tag signature → attribute keyword. Unknown signatures are
/// silently skipped per spec (ICC profiles carry many vendor tags this
/// reader has no opinion about).
static TAG_KEYWORDS: phf::Map<&'static str, &'static str> = phf_map! {
    "desc" => "description",
    "cprt" => "copyright",
    "dmdd" => "deviceModelDescription",
    "vued" => "viewingConditionsDescription",
    "wtpt" => "whitepoint",
};

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn read_s15fixed16(data: &[u8], offset: usize) -> f64 {
    let raw = i32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ]);
    raw as f64 / 65536.0
}

/// Decodes one tag's payload according to its leading 4-byte type
/// signature. Returns `None` for a type this reader doesn't decode
/// (the caller then leaves the tag out of the result map, matching the
/// "unknown tag signatures are silently skipped" policy — here applied to
/// unknown *type* signatures too, since there's nothing useful to surface).
fn decode_tag_value(tag_data: &[u8]) -> Option<TagValue> {
    if tag_data.len() < 8 {
        return None;
    }
    let type_sig = &tag_data[0..4];
    match type_sig {
        b"desc" => {
            if tag_data.len() < 12 {
                return None;
            }
            let text_size = read_u32(tag_data, 8) as usize;
            if text_size > tag_data.len() - 12 {
                return None;
            }
            let bytes = &tag_data[12..12 + text_size];
            let text = String::from_utf8_lossy(bytes)
                .trim_end_matches('\0')
                .to_string();
            Some(TagValue::Text(text))
        }
        b"text" => {
            // spec.md §4.5: "UTF-8 string from offset+8 .. offset+size-7",
            // relative to this tag's own start (`tag_data.len() == size`).
            if tag_data.len() < 15 {
                return None;
            }
            let bytes = &tag_data[8..tag_data.len() - 7];
            let text = String::from_utf8_lossy(bytes)
                .trim_end_matches('\0')
                .to_string();
            Some(TagValue::Text(text))
        }
        b"mluc" => {
            if tag_data.len() < 16 {
                return None;
            }
            let num_names = read_u32(tag_data, 8) as usize;
            let record_size = read_u32(tag_data, 12) as usize;
            if num_names == 0 || record_size != 12 {
                return None;
            }
            let record_offset = 16;
            if tag_data.len() < record_offset + 12 {
                return None;
            }
            let str_len = read_u32(tag_data, record_offset + 4) as usize;
            let str_offset = read_u32(tag_data, record_offset + 8) as usize;
            if str_offset + str_len > tag_data.len() {
                return None;
            }
            let utf16: Vec<u16> = tag_data[str_offset..str_offset + str_len]
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect();
            let text = String::from_utf16(&utf16)
                .ok()?
                .trim_end_matches('\0')
                .to_string();
            Some(TagValue::Text(text))
        }
        b"XYZ " => {
            if tag_data.len() < 20 {
                return None;
            }
            let x = read_s15fixed16(tag_data, 8);
            let y = read_s15fixed16(tag_data, 12);
            let z = read_s15fixed16(tag_data, 16);
            Some(TagValue::Xyz([x, y, z]))
        }
        _ => None,
    }
}

/// Walks the ICC tag table starting at offset 128 and decodes every known
/// tag's value into `attrs`.
pub fn parse_tags(data: &[u8], attrs: &mut Vec<(String, TagValue)>) -> Result<()> {
    if data.len() < 132 {
        return Ok(());
    }
    let tag_count = read_u32(data, 128) as usize;
    for i in 0..tag_count {
        let entry_offset = 132 + i * 12;
        if entry_offset + 12 > data.len() {
            return Err(Error::invalid("tag table entry out of bounds"));
        }
        let sig = String::from_utf8_lossy(&data[entry_offset..entry_offset + 4])
            .trim()
            .to_string();
        let offset = read_u32(data, entry_offset + 4) as usize;
        let size = read_u32(data, entry_offset + 8) as usize;

        let Some(keyword) = TAG_KEYWORDS.get(sig.as_str()) else {
            continue;
        };

        let end = offset.checked_add(size).ok_or_else(|| Error::invalid("tag offset out of bounds"))?;
        if end > data.len() {
            return Err(Error::invalid("tag offset out of bounds"));
        }

        if let Some(value) = decode_tag_value(&data[offset..end]) {
            attrs.push((keyword.to_string(), value));
        }
    }
    Ok(())
}
