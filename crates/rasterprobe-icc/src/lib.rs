//! ICC color profile parser.
//!
//! Input is an already-inflated ICC profile payload (big-endian
//! throughout): a 128-byte header followed by a tag table. [`parse_icc`]
//! validates the header and returns an order-irrelevant keyword → value
//! map; PNG's `iCCP` flow feeds this the DEFLATE-decompressed chunk
//! payload, but a profile can also be parsed standalone.
//!
//! # Example
//!
//! ```no_run
//! use rasterprobe_icc::parse_icc;
//!
//! let inflated = std::fs::read("profile.icc").unwrap();
//! let record = parse_icc(&inflated).unwrap();
//! if let Some(version) = record.get("version") {
//!     println!("{version:?}");
//! }
//! ```

mod error;
mod header;
mod tags;

pub use error::{Error, Result};

use std::collections::BTreeMap;

/// A decoded ICC tag or header attribute value.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum TagValue {
    Text(String),
    Xyz([f64; 3]),
}

/// An order-irrelevant mapping from known-tag keyword to decoded value.
pub type IccRecord = BTreeMap<String, TagValue>;

/// Parses an inflated ICC profile payload into its keyword → value map.
pub fn parse_icc(data: &[u8]) -> Result<IccRecord> {
    let mut entries = Vec::new();
    header::parse_header(data, &mut entries)?;
    tags::parse_tags(data, &mut entries)?;
    Ok(entries.into_iter().collect())
}
