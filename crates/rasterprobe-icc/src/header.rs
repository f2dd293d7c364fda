//! Fixed-offset ICC profile header attributes (the first 128 bytes).

use crate::error::{Error, Result};
use crate::TagValue;

const HEADER_LEN: usize = 128;
const SIGNATURE_OFFSET: usize = 36;

fn sig_to_str(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Maps a known four-byte device/platform/manufacturer signature to its
/// display name; unrecognized signatures pass through unchanged.
fn describe_signature(sig: &str) -> String {
    match sig {
        "scnr" => "Scanner".to_string(),
        "mntr" => "Display".to_string(),
        "prtr" => "Printer".to_string(),
        "link" => "DeviceLink".to_string(),
        "spac" => "ColorSpace".to_string(),
        "abst" => "Abstract".to_string(),
        "nmcl" => "NamedColor".to_string(),
        "APPL" => "Apple Computer Inc.".to_string(),
        "MSFT" => "Microsoft Corporation".to_string(),
        "SGI" => "Silicon Graphics Inc.".to_string(),
        "SUNW" => "Sun Microsystems Inc.".to_string(),
        "ADBE" => "Adobe".to_string(),
        other => other.to_string(),
    }
}

fn version_string(data: &[u8]) -> String {
    let major = data[8];
    let minor = data[9] >> 4;
    format!("{major}.{minor}")
}

fn intent_string(value: u32) -> Option<&'static str> {
    match value {
        0 => Some("Perceptual"),
        1 => Some("Media-Relative Colorimetric"),
        2 => Some("Saturation"),
        3 => Some("ICC-Absolute Colorimetric"),
        _ => None,
    }
}

/// Reads the fixed-offset fields of the 128-byte ICC header and appends
/// their decoded values to `attrs`, keyed by keyword. Fails if the
/// declared profile size doesn't match the buffer length, or the `acsp`
/// signature at offset 36 is missing.
pub fn parse_header(data: &[u8], attrs: &mut Vec<(String, TagValue)>) -> Result<()> {
    if data.len() < HEADER_LEN {
        return Err(Error::invalid(format!(
            "header too short: {} bytes (need {HEADER_LEN})",
            data.len()
        )));
    }

    let declared_size = read_u32(data, 0) as usize;
    if declared_size != data.len() {
        return Err(Error::invalid("length mismatch"));
    }

    if &data[SIGNATURE_OFFSET..SIGNATURE_OFFSET + 4] != b"acsp" {
        return Err(Error::invalid("missing signature"));
    }

    attrs.push(("version".to_string(), TagValue::Text(version_string(data))));

    let intent = read_u32(data, 64);
    if let Some(name) = intent_string(intent) {
        attrs.push(("intent".to_string(), TagValue::Text(name.to_string())));
    }

    // (label, byte offset) for the header's remaining signature fields.
    const SIG_FIELDS: [(&str, usize); 8] = [
        ("cmm", 4),
        ("deviceClass", 12),
        ("colorSpace", 16),
        ("connectionSpace", 20),
        ("platform", 40),
        ("manufacturer", 48),
        ("model", 52),
        ("creator", 80),
    ];
    for (label, offset) in SIG_FIELDS {
        let value = read_u32(data, offset);
        if value != 0 {
            let sig = sig_to_str(&data[offset..offset + 4]);
            attrs.push((label.to_string(), TagValue::Text(describe_signature(&sig))));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_header() -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data[0..4].copy_from_slice(&(HEADER_LEN as u32).to_be_bytes());
        data[8] = 4;
        data[9] = 0x30;
        data[12..16].copy_from_slice(b"mntr");
        data[16..20].copy_from_slice(b"RGB ");
        data[20..24].copy_from_slice(b"XYZ ");
        data[36..40].copy_from_slice(b"acsp");
        data[40..44].copy_from_slice(b"APPL");
        data[64..68].copy_from_slice(&0u32.to_be_bytes());
        data
    }

    #[test]
    fn version_and_intent() {
        let data = make_header();
        let mut attrs = Vec::new();
        parse_header(&data, &mut attrs).unwrap();
        assert!(attrs.contains(&("version".to_string(), TagValue::Text("4.3".into()))));
        assert!(attrs.contains(&("intent".to_string(), TagValue::Text("Perceptual".into()))));
    }

    #[test]
    fn rejects_length_mismatch() {
        let mut data = make_header();
        data[0..4].copy_from_slice(&999u32.to_be_bytes());
        let mut attrs = Vec::new();
        assert!(matches!(
            parse_header(&data, &mut attrs),
            Err(Error::InvalidIcc(_))
        ));
    }

    #[test]
    fn rejects_missing_acsp() {
        let mut data = make_header();
        data[36..40].copy_from_slice(b"xxxx");
        let mut attrs = Vec::new();
        assert!(matches!(
            parse_header(&data, &mut attrs),
            Err(Error::InvalidIcc(_))
        ));
    }
}
