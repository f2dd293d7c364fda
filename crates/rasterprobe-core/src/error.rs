//! Error types for rasterprobe-core.

use thiserror::Error;

/// Cursor-level parsing errors, shared by every format parser.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[must_use]
pub enum Error {
    #[error("unexpected end of input: need {need} bytes at offset {at}, have {have}")]
    EndOfInput {
        at: usize,
        need: usize,
        have: usize,
    },

    #[error("unexpected byte at offset {at}: expected 0x{expected:02X}, found 0x{found:02X}")]
    UnexpectedByte { at: usize, expected: u8, found: u8 },

    #[error("bit cursor read past end of buffer at bit {bit}")]
    BitCursorOutOfBounds { bit: usize },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
