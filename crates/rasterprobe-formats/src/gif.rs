//! GIF reader.
//!
//! Parses the header, Logical Screen Descriptor, optional Global Color
//! Table, and the sequence of `{extensions*, image descriptor, optional
//! Local Color Table, LZW sub-block stream}` blocks up to the trailer.
//! All multi-byte integers are little-endian.

use rasterprobe_core::{ByteCursor, Span};

use crate::error::{Error, Result};
use crate::lzw;

const TRAILER: u8 = 0x3B;
const EXTENSION_INTRODUCER: u8 = 0x21;
const IMAGE_SEPARATOR: u8 = 0x2C;

const LABEL_PLAIN_TEXT: u8 = 0x01;
const LABEL_GRAPHICS_CONTROL: u8 = 0xF9;
const LABEL_COMMENT: u8 = 0xFE;
const LABEL_APPLICATION: u8 = 0xFF;

/// A 24-bit-per-entry color table, Global or Local.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ColorTable {
    pub colors: Vec<(u8, u8, u8)>,
    pub span: Span,
}

/// The 7-byte Logical Screen Descriptor plus its derived packed-byte bits.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LogicalScreenDescriptor {
    pub width: u16,
    pub height: u16,
    pub packed: u8,
    pub bg_color_index: u8,
    pub pixel_aspect_ratio: u8,
    pub span: Span,
    pub has_gct: bool,
    pub sorted: bool,
    pub gct_size: u8,
    pub color_resolution: u8,
}

impl LogicalScreenDescriptor {
    fn from_packed(
        width: u16,
        height: u16,
        packed: u8,
        bg_color_index: u8,
        pixel_aspect_ratio: u8,
        span: Span,
    ) -> Self {
        LogicalScreenDescriptor {
            width,
            height,
            packed,
            bg_color_index,
            pixel_aspect_ratio,
            span,
            has_gct: packed & 0x80 != 0,
            sorted: packed & 0x08 != 0,
            gct_size: packed & 0x07,
            color_resolution: (packed >> 4) & 0x07,
        }
    }
}

/// The 10-byte Image Descriptor plus its derived packed-byte bits.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ImageDescriptor {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub packed: u8,
    pub span: Span,
    pub has_lct: bool,
    pub interlaced: bool,
    pub sorted: bool,
    pub lct_size: u8,
}

impl ImageDescriptor {
    fn from_packed(left: u16, top: u16, width: u16, height: u16, packed: u8, span: Span) -> Self {
        ImageDescriptor {
            left,
            top,
            width,
            height,
            packed,
            span,
            has_lct: packed & 0x80 != 0,
            interlaced: packed & 0x40 != 0,
            sorted: packed & 0x20 != 0,
            lct_size: packed & 0x07,
        }
    }
}

/// Graphics Control Extension fields, including its derived `packed` bits.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GraphicsControl {
    pub block_size: u8,
    pub packed: u8,
    pub delay_time: u16,
    pub transparent_color_index: u8,
    pub reserved: u8,
    pub disposal: u8,
    pub wait_for_input: bool,
    pub has_transparent_color: bool,
    pub span: Span,
}

/// Application Extension fields ("NETSCAPE2.0" looping data, typically).
#[derive(Debug, Clone, serde::Serialize)]
pub struct Application {
    pub identifier: Span,
    pub sub_index: u8,
    pub num_executions: u16,
    pub span: Span,
}

/// Plain Text Extension fields.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PlainText {
    pub skipped: Span,
    pub text: Vec<u8>,
    pub span: Span,
}

/// One GIF extension block, tagged by which kind it decoded as.
#[derive(Debug, Clone, serde::Serialize)]
pub enum Extension {
    GraphicsControl(GraphicsControl),
    Application(Application),
    Comment { text: Vec<u8>, span: Span },
    PlainText(PlainText),
}

/// One image in the GIF's frame sequence.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Image {
    pub descriptor: ImageDescriptor,
    pub local_color_table: Option<ColorTable>,
    pub extensions: Vec<Extension>,
    pub min_code_size: u8,
    pub data: Vec<u8>,
    pub span: Span,
}

/// A fully parsed GIF file.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GifRecord {
    pub header: Span,
    pub lsd: LogicalScreenDescriptor,
    pub global_color_table: Option<ColorTable>,
    pub images: Vec<Image>,
    pub buffer: Vec<u8>,
}

/// Parses a GIF file. `bytes` must begin with `GIF87a` or `GIF89a`.
pub fn parse_gif(bytes: &[u8]) -> Result<GifRecord> {
    let mut cursor = ByteCursor::new(bytes, true);
    let header = parse_header(&mut cursor)?;
    let lsd = parse_lsd(&mut cursor)?;

    let global_color_table = if lsd.has_gct {
        Some(parse_color_table(&mut cursor, lsd.gct_size)?)
    } else {
        None
    };

    let mut images = Vec::new();
    while cursor.peek() != Some(TRAILER) {
        let start = cursor.position();
        let mut extensions = Vec::new();
        while cursor.peek() == Some(EXTENSION_INTRODUCER) {
            extensions.push(parse_extension(&mut cursor)?);
        }

        let descriptor = parse_image_descriptor(&mut cursor)?;
        let local_color_table = if descriptor.has_lct {
            Some(parse_color_table(&mut cursor, descriptor.lct_size)?)
        } else {
            None
        };

        let min_code_size = cursor.next()?;
        let data = read_sub_blocks(&mut cursor)?;
        let span = Span::new(start, cursor.position());

        images.push(Image {
            descriptor,
            local_color_table,
            extensions,
            min_code_size,
            data,
            span,
        });
    }

    cursor.expect_byte(TRAILER)?;
    if !cursor.at_end() {
        return Err(Error::TrailingBytes);
    }

    Ok(GifRecord {
        header,
        lsd,
        global_color_table,
        images,
        buffer: bytes.to_vec(),
    })
}

/// Decodes one image's LZW-compressed sub-block stream into the raw
/// palette-index stream. The index stream is a function of the
/// compressed data alone — decoding it doesn't require a color table,
/// local or global, to be present; a caller that wants RGB pixels is the
/// one that needs a reachable table, and it can check
/// `image.local_color_table.or(gif.global_color_table)` itself before
/// mapping indices to colors. `gif` is taken for API symmetry with that
/// caller-side lookup, not because decoding consults it.
pub fn decode_gif_image(_gif: &GifRecord, image: &Image) -> Result<Vec<u8>> {
    lzw::decode(image.min_code_size, &image.data)
}

fn parse_header(cursor: &mut ByteCursor<'_>) -> Result<Span> {
    if cursor.consume_if_equals(b"GIF87a") || cursor.consume_if_equals(b"GIF89a") {
        Ok(Span::new(0, 6))
    } else {
        Err(Error::BadSignature { format: "gif" })
    }
}

fn parse_lsd(cursor: &mut ByteCursor<'_>) -> Result<LogicalScreenDescriptor> {
    let start = cursor.position();
    let width = cursor.read_u16()?;
    let height = cursor.read_u16()?;
    let packed = cursor.next()?;
    let bg_color_index = cursor.next()?;
    let pixel_aspect_ratio = cursor.next()?;
    let span = Span::new(start, cursor.position());
    Ok(LogicalScreenDescriptor::from_packed(
        width,
        height,
        packed,
        bg_color_index,
        pixel_aspect_ratio,
        span,
    ))
}

fn parse_color_table(cursor: &mut ByteCursor<'_>, size_field: u8) -> Result<ColorTable> {
    let entries = 2usize << size_field; // 2^(size_field+1)
    let byte_len = 3 * entries;
    let span = cursor.get_span(byte_len)?;
    let raw = cursor.bytes_for_span(span);
    let colors = raw.chunks_exact(3).map(|c| (c[0], c[1], c[2])).collect();
    Ok(ColorTable { colors, span })
}

fn parse_image_descriptor(cursor: &mut ByteCursor<'_>) -> Result<ImageDescriptor> {
    let start = cursor.position();
    cursor.expect_byte(IMAGE_SEPARATOR)?;
    let left = cursor.read_u16()?;
    let top = cursor.read_u16()?;
    let width = cursor.read_u16()?;
    let height = cursor.read_u16()?;
    let packed = cursor.next()?;
    let span = Span::new(start, cursor.position());
    Ok(ImageDescriptor::from_packed(
        left, top, width, height, packed, span,
    ))
}

/// Reads the "length-prefixed block until a zero-length block" convention
/// shared by GIF image data, Comment, and PlainText payloads. Accumulates
/// into one growable buffer and consumes the terminating zero byte.
fn read_sub_blocks(cursor: &mut ByteCursor<'_>) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    loop {
        let len = cursor.next()? as usize;
        if len == 0 {
            break;
        }
        let span = cursor.get_span(len)?;
        out.extend_from_slice(cursor.bytes_for_span(span));
    }
    Ok(out)
}

fn parse_extension(cursor: &mut ByteCursor<'_>) -> Result<Extension> {
    let start = cursor.position();
    cursor.expect_byte(EXTENSION_INTRODUCER)?;
    let label = cursor.next()?;
    match label {
        LABEL_GRAPHICS_CONTROL => {
            let block_size = cursor.next()?;
            let packed = cursor.next()?;
            let delay_time = cursor.read_u16()?;
            let transparent_color_index = cursor.next()?;
            let _block_terminator = cursor.next()?;
            let span = Span::new(start, cursor.position());
            Ok(Extension::GraphicsControl(GraphicsControl {
                block_size,
                packed,
                delay_time,
                transparent_color_index,
                reserved: (packed >> 5) & 0b111,
                disposal: (packed >> 2) & 0b111,
                wait_for_input: packed & 0b10 != 0,
                has_transparent_color: packed & 0b1 != 0,
                span,
            }))
        }
        LABEL_APPLICATION => {
            let block_length = cursor.next()? as usize;
            let identifier = cursor.get_span(block_length)?;
            let sub_index = cursor.next()?;
            let num_executions = cursor.read_u16()?;
            let _terminator = cursor.read_u16()?;
            let span = Span::new(start, cursor.position());
            Ok(Extension::Application(Application {
                identifier,
                sub_index,
                num_executions,
                span,
            }))
        }
        LABEL_COMMENT => {
            let text = read_sub_blocks(cursor)?;
            let span = Span::new(start, cursor.position());
            Ok(Extension::Comment { text, span })
        }
        LABEL_PLAIN_TEXT => {
            let num_bytes_to_skip = cursor.next()? as usize;
            let skipped = cursor.get_span(num_bytes_to_skip)?;
            let text = read_sub_blocks(cursor)?;
            let span = Span::new(start, cursor.position());
            Ok(Extension::PlainText(PlainText {
                skipped,
                text,
                span,
            }))
        }
        other => Err(Error::UnexpectedExtension { label: other }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gif_with(lsd_packed: u8, body: &[u8]) -> Vec<u8> {
        let mut data = b"GIF89a".to_vec();
        data.extend_from_slice(&10u16.to_le_bytes());
        data.extend_from_slice(&20u16.to_le_bytes());
        data.push(lsd_packed);
        data.push(0); // bg_color_index
        data.push(0); // pixel_aspect_ratio
        data.extend_from_slice(body);
        data
    }

    #[test]
    fn gct_present_and_no_images_just_a_trailer() {
        let mut body = vec![0u8; 3 * 2]; // 2-entry GCT (size field 0 -> 2 entries)
        body.push(TRAILER);
        let data = gif_with(0x80, &body); // has_gct=1, gct_size=0
        let record = parse_gif(&data).unwrap();
        assert!(record.global_color_table.is_some());
        assert_eq!(
            record.global_color_table.as_ref().unwrap().colors.len(),
            2
        );
        assert!(record.images.is_empty());
    }

    #[test]
    fn rejects_bad_signature() {
        let data = *b"NOTAGIFX";
        assert!(matches!(
            parse_gif(&data),
            Err(Error::BadSignature { format: "gif" })
        ));
    }

    fn minimal_image_bytes(lzw_bytes: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.push(IMAGE_SEPARATOR);
        body.extend_from_slice(&0u16.to_le_bytes()); // left
        body.extend_from_slice(&0u16.to_le_bytes()); // top
        body.extend_from_slice(&2u16.to_le_bytes()); // width
        body.extend_from_slice(&2u16.to_le_bytes()); // height
        body.push(0x00); // packed: no LCT
        body.push(2); // min_code_size
        body.push(lzw_bytes.len() as u8);
        body.extend_from_slice(lzw_bytes);
        body.push(0); // sub-block terminator
        body
    }

    #[test]
    fn one_image_with_no_color_tables_round_trips_lzw() {
        let mut body = minimal_image_bytes(&[0x04, 0x01, 0x06, 0x00]);
        body.push(TRAILER);

        let data = gif_with(0x00, &body);
        let record = parse_gif(&data).unwrap();
        assert_eq!(record.images.len(), 1);
        let indices = decode_gif_image(&record, &record.images[0]).unwrap();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn trailer_must_be_the_last_byte() {
        let mut data = gif_with(0x00, &[TRAILER]);
        data.push(0xFF);
        assert!(matches!(parse_gif(&data), Err(Error::TrailingBytes)));
    }

    #[test]
    fn unknown_extension_label_is_an_error() {
        let body = [EXTENSION_INTRODUCER, 0x77, TRAILER];
        let data = gif_with(0x00, &body);
        assert!(matches!(
            parse_gif(&data),
            Err(Error::UnexpectedExtension { label: 0x77 })
        ));
    }

    #[test]
    fn graphics_control_packed_bits_are_derived() {
        let mut body = vec![EXTENSION_INTRODUCER, LABEL_GRAPHICS_CONTROL, 4, 0b0000_1101];
        body.extend_from_slice(&0u16.to_le_bytes()); // delay_time
        body.push(0); // transparent_color_index
        body.push(0); // block terminator
        body.extend_from_slice(&minimal_image_bytes(&[0x04, 0x01, 0x06, 0x00]));
        body.push(TRAILER);

        let data = gif_with(0x00, &body);
        let record = parse_gif(&data).unwrap();
        assert_eq!(record.images.len(), 1);
        let Extension::GraphicsControl(gce) = &record.images[0].extensions[0] else {
            panic!("expected a graphics control extension");
        };
        assert_eq!(gce.disposal, 0b011);
        assert!(gce.wait_for_input);
        assert!(gce.has_transparent_color);
    }
}
