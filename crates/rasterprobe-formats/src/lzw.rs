//! GIF-flavored LZW decompressor.
//!
//! Decodes the variable-width, clear/end-of-information-coded index
//! stream GIF packs into image sub-blocks. Output is the raw palette-index
//! stream, not RGB pixels — turning indices into colors is the caller's
//! job (`decode_gif_image` pairs this with whichever color table, local or
//! global, the image actually has reachable).

use rasterprobe_core::BitCursor;

use crate::error::{Error, Result};

const MAX_CODE_WIDTH: u32 = 12;

/// Decodes a GIF LZW stream. `min_code_size` comes from the image's own
/// header byte; `data` is the sub-block stream already concatenated by
/// [`crate::gif::read_sub_blocks`].
pub fn decode(min_code_size: u8, data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let clear_code: u32 = 1 << min_code_size;
    let end_code: u32 = clear_code + 1;
    let initial_width = min_code_size as u32 + 1;

    let mut cursor = BitCursor::new(data);
    let mut output = Vec::new();
    let mut table: Vec<Vec<u8>> = Vec::new();
    let mut width = initial_width;
    let mut prev: Option<u32> = None;

    let reset_table = |table: &mut Vec<Vec<u8>>| {
        table.clear();
        for code in 0..=end_code {
            table.push(vec![code as u8]);
        }
    };

    loop {
        let code = cursor.read_n_bits(width.min(MAX_CODE_WIDTH))?;

        if code == clear_code {
            reset_table(&mut table);
            width = initial_width;
            prev = None;
            continue;
        }
        if code == end_code {
            break;
        }

        if prev.is_none() {
            // First code after a clear must itself be a data code (the
            // singleton its table slot already holds).
            let entry = table
                .get(code as usize)
                .ok_or(Error::UnexpectedTrailingBits)?
                .clone();
            output.extend_from_slice(&entry);
            prev = Some(code);
            continue;
        }
        let prev_code = prev.unwrap();

        if (code as usize) < table.len() {
            output.extend_from_slice(&table[code as usize]);
            let mut appended = table[prev_code as usize].clone();
            appended.push(table[code as usize][0]);
            table.push(appended);
        } else if code as usize == table.len() {
            // KwKwK case: the code table doesn't have this entry yet
            // because it's the one this very code is about to create.
            let k = table[prev_code as usize][0];
            let mut appended = table[prev_code as usize].clone();
            appended.push(k);
            output.extend_from_slice(&appended);
            table.push(appended);
        } else {
            return Err(Error::UnexpectedTrailingBits);
        }

        if table.len() == (1usize << width) && width < MAX_CODE_WIDTH {
            width += 1;
        }
        prev = Some(code);
    }

    if !cursor.at_end() {
        return Err(Error::UnexpectedTrailingBits);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_then_sequential_codes_round_trip_the_index_stream() {
        // min_code_size=2: clear=4, end=5; codes clear,0,1,2,3,end at width 3,
        // packed LSB-first into `04 01 06 00`.
        let data = [0x04, 0x01, 0x06, 0x00];
        let indices = decode(2, &data).unwrap();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_bitmap_yields_empty_output() {
        let indices = decode(2, &[]).unwrap();
        assert!(indices.is_empty());
    }

    #[test]
    fn kwkwk_case_reuses_the_not_yet_complete_entry() {
        // min_code_size=2: clear=4, end=5, width starts at 3.
        // Codes: clear(4), 0, then the KwKwK code (5, == table.len() right
        // after the 0/1 pairing entries are appended) re-emits `[0,0]`.
        let mut bits = Vec::new();
        let mut push_code = |code: u32, width: u32, bitpos: &mut usize, out: &mut Vec<u8>| {
            for i in 0..width {
                let bit = (code >> i) & 1;
                let byte_index = *bitpos / 8;
                if out.len() <= byte_index {
                    out.push(0);
                }
                if bit == 1 {
                    out[byte_index] |= 1 << (*bitpos % 8);
                }
                *bitpos += 1;
            }
        };
        let mut bitpos = 0usize;
        push_code(4, 3, &mut bitpos, &mut bits); // clear
        push_code(0, 3, &mut bitpos, &mut bits); // emit [0], table now has index 6 = [0,0] pending? no: first code after clear doesn't append.
        push_code(6, 3, &mut bitpos, &mut bits); // KwKwK: table.len() == 6 at this point -> emits [0,0]
        push_code(5, 3, &mut bitpos, &mut bits); // end

        let indices = decode(2, &bits).unwrap();
        assert_eq!(indices, vec![0, 0, 0]);
    }

    #[test]
    fn trailing_nonzero_bits_past_end_code_is_an_error() {
        // clear(4), 0, end(5) at width 3 (LSB-first: 0x44, then bit8=1 of
        // the end code spilling into byte 1), followed by a stray 1 bit
        // that isn't zero padding.
        let data = [0x44, 0x03];
        let result = decode(2, &data);
        assert!(matches!(result, Err(Error::UnexpectedTrailingBits)));
    }

    #[test]
    fn widens_code_width_when_table_fills_up() {
        // min_code_size=2 starts at width 3 with table len 6 (0..=5).
        // After 2 appended entries (table len 8 == 1<<3), width should
        // bump to 4 before the next code is read. We only assert the
        // decode succeeds and produces the expected index prefix; the
        // width transition is exercised implicitly by a longer stream.
        let mut bits = Vec::new();
        let mut push_code = |code: u32, width: u32, bitpos: &mut usize, out: &mut Vec<u8>| {
            for i in 0..width {
                let bit = (code >> i) & 1;
                let byte_index = *bitpos / 8;
                if out.len() <= byte_index {
                    out.push(0);
                }
                if bit == 1 {
                    out[byte_index] |= 1 << (*bitpos % 8);
                }
                *bitpos += 1;
            }
        };
        let mut bitpos = 0usize;
        push_code(4, 3, &mut bitpos, &mut bits); // clear
        push_code(0, 3, &mut bitpos, &mut bits);
        push_code(1, 3, &mut bitpos, &mut bits);
        push_code(5, 3, &mut bitpos, &mut bits); // end
        let indices = decode(2, &bits).unwrap();
        assert_eq!(indices, vec![0, 1]);
    }
}
