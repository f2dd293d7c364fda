//! Byte-exact readers for common image and archive container formats.
//!
//! Each format has one parsing entry point that takes the whole file as a
//! `&[u8]` and returns a record tree in which every field and sub-structure
//! carries the [`rasterprobe_core::Span`] of the exact bytes it was decoded
//! from. There is no format auto-detection here — callers pick the parser
//! that matches the file's magic bytes (see `rasterprobe-cli` for a small
//! example of that dispatch).
//!
//! # Supported formats
//!
//! | Format | Entry point | Record |
//! |--------|-------------|--------|
//! | PNG | [`parse_png`] | [`PngRecord`] |
//! | GIF | [`parse_gif`] | [`GifRecord`] |
//! | BMP | [`parse_bmp`] | [`BmpRecord`] |
//! | ZIP | [`parse_zip`] | [`ZipRecord`] |
//! | TIFF / EXIF | [`parse_exif`] | [`ExifRecord`] |
//! | ICC profile | [`rasterprobe_icc::parse_icc`] | [`rasterprobe_icc::IccRecord`] |
//!
//! # Quick start
//!
//! ```no_run
//! use rasterprobe_formats::parse_png;
//!
//! let data = std::fs::read("photo.png").unwrap();
//! let record = parse_png(&data).unwrap();
//! println!("{} chunks", record.chunks.len());
//! ```

mod bmp;
mod error;
mod gif;
mod lzw;
mod png;
mod schema;
mod tiff;
mod zip;

pub use bmp::{BmpRecord, DibHeader, FileHeader as BmpFileHeader, InfoHeader, PaletteEntry, V5Header};
pub use error::{Error, Result};
pub use gif::{
    Application, ColorTable, Extension, GifRecord, GraphicsControl, Image, ImageDescriptor,
    LogicalScreenDescriptor, PlainText,
};
pub use png::{Chunk, PngRecord};
pub use schema::{FieldKind, FieldValue};
pub use tiff::{DecodedValue, ExifField, ExifRecord, ParseOptions, Rational, SRational};
pub use zip::{CentralDirectoryFileHeader, EndOfCentralDirectory, ZipRecord};

pub use bmp::parse_bmp;
pub use gif::{decode_gif_image, parse_gif};
pub use png::parse_png;
pub use tiff::{parse_exif, parse_exif_with_options};
pub use zip::parse_zip;
