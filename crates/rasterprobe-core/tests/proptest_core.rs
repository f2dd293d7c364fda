//! Property-based tests for the shared cursor primitives.
//!
//! These check the round-trip/idempotence and bounds invariants spec.md
//! §8 calls for, plus no-panic robustness over arbitrary byte input.

use rasterprobe_core::{BitCursor, ByteCursor};
use proptest::prelude::*;

proptest! {
    /// `read_n_bits(n)` followed by `read_n_bits(m)` must equal a single
    /// `read_n_bits(n + m)` with the low `n` bits from the first read and
    /// the next `m` bits shifted up above them.
    #[test]
    fn bit_cursor_split_read_matches_combined_read(
        bytes in prop::collection::vec(any::<u8>(), 1..8),
        n in 0u32..16,
        m in 0u32..16,
    ) {
        let total_bits = (bytes.len() * 8) as u32;
        prop_assume!(n + m <= total_bits);

        let mut split = BitCursor::new(&bytes);
        let low = split.read_n_bits(n).unwrap();
        let high = split.read_n_bits(m).unwrap();
        let combined_from_parts = low | (high << n);

        let mut whole = BitCursor::new(&bytes);
        let combined = whole.read_n_bits(n + m).unwrap();

        prop_assert_eq!(combined, combined_from_parts);
    }

    /// A `BitCursor` never panics reading arbitrary bit counts off
    /// arbitrary buffers, whether or not the read stays in bounds.
    #[test]
    fn bit_cursor_read_never_panics(
        bytes in prop::collection::vec(any::<u8>(), 0..16),
        n in 0u32..32,
    ) {
        let mut cursor = BitCursor::new(&bytes);
        let _ = cursor.read_n_bits(n);
    }

    /// spec.md §8 invariant 1: every span a successful `get_span` read
    /// returns satisfies `0 <= start <= end <= len(buffer)`, and its
    /// bounds line up with exactly the bytes consumed.
    #[test]
    fn byte_cursor_get_span_stays_in_bounds(
        bytes in prop::collection::vec(any::<u8>(), 0..64),
        start in 0usize..64,
        len in 0usize..64,
    ) {
        prop_assume!(start <= bytes.len());
        let mut cursor = ByteCursor::new(&bytes, true);
        cursor.seek(start);

        match cursor.get_span(len) {
            Ok(span) => {
                prop_assert!(span.in_bounds(bytes.len()));
                prop_assert_eq!(span.start, start);
                prop_assert_eq!(span.end, start + len);
                prop_assert_eq!(cursor.position(), span.end);
            }
            Err(_) => prop_assert!(start + len > bytes.len()),
        }
    }

    /// A `ByteCursor` never panics on any sequence of reads over arbitrary
    /// input, regardless of declared endianness.
    #[test]
    fn byte_cursor_reads_never_panic(
        bytes in prop::collection::vec(any::<u8>(), 0..64),
        little_endian in any::<bool>(),
    ) {
        let mut cursor = ByteCursor::new(&bytes, little_endian);
        while !cursor.at_end() {
            let _ = cursor.read_u32();
        }
    }
}
