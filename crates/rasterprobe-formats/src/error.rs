//! Error types for container format parsing.

use thiserror::Error;

/// Format-level parsing errors, wrapping the lower-layer cursor and ICC
/// errors plus the error kinds that only make sense above a single cursor
/// (bad top-level magic, schema mismatches, malformed sub-streams).
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] rasterprobe_core::Error),

    #[error(transparent)]
    Icc(#[from] rasterprobe_icc::Error),

    #[error("bad signature for {format}")]
    BadSignature { format: &'static str },

    #[error("unknown EXIF field type {type_code}")]
    UnknownExifType { type_code: u16 },

    #[error("PNG chunk {chunk_name:?} could not be decoded by its schema")]
    SchemaMismatch { chunk_name: [u8; 4] },

    #[error("unexpected GIF extension label 0x{label:02X}")]
    UnexpectedExtension { label: u8 },

    #[error("LZW stream has non-zero bits past the end code")]
    UnexpectedTrailingBits,

    #[error("trailing bytes after the declared terminator")]
    TrailingBytes,

    #[error("ZIP end-of-central-directory signature not found")]
    MissingCentralDirectory,

    #[error("unrecognized BMP DIB header size {size}")]
    UnknownDibHeaderSize { size: u32 },
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
