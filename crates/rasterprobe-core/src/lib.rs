//! Byte/bit cursors and span primitives shared by every container format
//! parser: [`ByteCursor`] for sequential, endianness-aware integer and
//! string reads, [`BitCursor`] for the LSB-first bit stream the GIF LZW
//! decoder needs, and [`Span`] as the universal "where did this value come
//! from" handle threaded through every parsed record.
//!
//! # Example
//!
//! ```
//! use rasterprobe_core::ByteCursor;
//!
//! let png_sig = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
//! let mut cursor = ByteCursor::new(&png_sig, false);
//! cursor.expect_bytes(&png_sig).unwrap();
//! assert!(cursor.at_end());
//! ```

mod bit_cursor;
mod byte_cursor;
mod byte_order;
mod error;
mod span;

pub use bit_cursor::BitCursor;
pub use byte_cursor::ByteCursor;
pub use byte_order::ByteOrder;
pub use error::{Error, Result};
pub use span::Span;
