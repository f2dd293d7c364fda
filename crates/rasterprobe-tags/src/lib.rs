//! Static EXIF tag-number → human-readable-name dictionary.
//!
//! A read-only, compile-time lookup keyed by tag number across the
//! Image/Photo/GPSInfo namespaces. The exhaustive multi-vendor
//! MakerNotes dictionary is deliberately not reproduced here.

mod exif;

pub use exif::{lookup_in_group, lookup_tag, TagDef, TagGroup, GPS_TAGS, IMAGE_TAGS, PHOTO_TAGS};
