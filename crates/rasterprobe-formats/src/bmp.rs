//! BMP reader.
//!
//! Parses the 14-byte FileHeader, dispatches on the DIB header's own
//! declared size into a tagged `DibHeader` (Info or V5), then an optional
//! BGRA palette for indexed pixel formats, and finally locates the pixel
//! data span. All values are little-endian.

use rasterprobe_core::{ByteCursor, Span};

use crate::error::{Error, Result};

const FILE_HEADER_LEN: usize = 14;

/// The 14-byte BITMAPFILEHEADER.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FileHeader {
    pub file_size: u32,
    pub reserved: u32,
    pub data_offset: u32,
    pub span: Span,
}

/// BITMAPINFOHEADER (DIB header size 40).
#[derive(Debug, Clone, serde::Serialize)]
pub struct InfoHeader {
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bpp: u16,
    pub compression: u32,
    pub image_size: u32,
    pub ppm_x: i32,
    pub ppm_y: i32,
    pub colors_used: u32,
    pub important_colors: u32,
    pub span: Span,
}

/// BITMAPV5HEADER (DIB header size 124): the Info fields plus channel
/// masks, an embedded color space description, and ICC profile pointers.
#[derive(Debug, Clone, serde::Serialize)]
pub struct V5Header {
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bpp: u16,
    pub compression: u32,
    pub image_size: u32,
    pub ppm_x: i32,
    pub ppm_y: i32,
    pub colors_used: u32,
    pub important_colors: u32,
    pub red_mask: u32,
    pub green_mask: u32,
    pub blue_mask: u32,
    pub alpha_mask: u32,
    pub color_space_type: Span,
    pub endpoints: [u32; 9],
    pub gamma_red: u32,
    pub gamma_green: u32,
    pub gamma_blue: u32,
    pub intent: u32,
    pub profile_data_offset: u32,
    pub profile_size: u32,
    pub reserved: u32,
    pub span: Span,
}

/// The DIB header, tagged by which variant its declared size selected.
#[derive(Debug, Clone, serde::Serialize)]
pub enum DibHeader {
    Info(InfoHeader),
    V5(V5Header),
}

impl DibHeader {
    pub fn bpp(&self) -> u16 {
        match self {
            DibHeader::Info(h) => h.bpp,
            DibHeader::V5(h) => h.bpp,
        }
    }

    pub fn colors_used(&self) -> u32 {
        match self {
            DibHeader::Info(h) => h.colors_used,
            DibHeader::V5(h) => h.colors_used,
        }
    }
}

/// One BGRA palette entry, reordered to `(r, g, b, a)`.
pub type PaletteEntry = (u8, u8, u8, u8);

/// A fully parsed BMP file.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BmpRecord {
    pub file_header: FileHeader,
    pub dib_header: DibHeader,
    pub palette: Option<Vec<PaletteEntry>>,
    pub pixel_data: Span,
    pub buffer: Vec<u8>,
}

/// Parses a BMP file. `bytes` must begin with the `BM` signature.
pub fn parse_bmp(bytes: &[u8]) -> Result<BmpRecord> {
    let mut cursor = ByteCursor::new(bytes, true);
    let file_header = parse_file_header(&mut cursor)?;

    let dib_start = cursor.position();
    let info_header_size = cursor.read_u32()?;
    let dib_header = match info_header_size {
        40 => DibHeader::Info(parse_info_header(&mut cursor, dib_start)?),
        124 => DibHeader::V5(parse_v5_header(&mut cursor, dib_start)?),
        other => {
            return Err(Error::UnknownDibHeaderSize { size: other });
        }
    };

    let palette = if matches!(dib_header.bpp(), 4 | 8) {
        Some(parse_palette(
            &mut cursor,
            dib_header.colors_used(),
            dib_header.bpp(),
        )?)
    } else {
        None
    };

    cursor.seek(file_header.data_offset as usize);
    let pixel_data = cursor.get_span_to(bytes.len())?;

    Ok(BmpRecord {
        file_header,
        dib_header,
        palette,
        pixel_data,
        buffer: bytes.to_vec(),
    })
}

fn parse_file_header(cursor: &mut ByteCursor<'_>) -> Result<FileHeader> {
    let start = cursor.position();
    cursor.expect_bytes(b"BM")?;
    let file_size = cursor.read_u32()?;
    let reserved = cursor.read_u32()?;
    let data_offset = cursor.read_u32()?;
    debug_assert_eq!(cursor.position() - start, FILE_HEADER_LEN);
    Ok(FileHeader {
        file_size,
        reserved,
        data_offset,
        span: Span::new(start, cursor.position()),
    })
}

fn parse_info_header(cursor: &mut ByteCursor<'_>, start: usize) -> Result<InfoHeader> {
    let width = cursor.read_i32()?;
    let height = cursor.read_i32()?;
    let planes = cursor.read_u16()?;
    let bpp = cursor.read_u16()?;
    let compression = cursor.read_u32()?;
    let image_size = cursor.read_u32()?;
    let ppm_x = cursor.read_i32()?;
    let ppm_y = cursor.read_i32()?;
    let colors_used = cursor.read_u32()?;
    let important_colors = cursor.read_u32()?;
    Ok(InfoHeader {
        width,
        height,
        planes,
        bpp,
        compression,
        image_size,
        ppm_x,
        ppm_y,
        colors_used,
        important_colors,
        span: Span::new(start, cursor.position()),
    })
}

fn parse_v5_header(cursor: &mut ByteCursor<'_>, start: usize) -> Result<V5Header> {
    let width = cursor.read_i32()?;
    let height = cursor.read_i32()?;
    let planes = cursor.read_u16()?;
    let bpp = cursor.read_u16()?;
    let compression = cursor.read_u32()?;
    let image_size = cursor.read_u32()?;
    let ppm_x = cursor.read_i32()?;
    let ppm_y = cursor.read_i32()?;
    let colors_used = cursor.read_u32()?;
    let important_colors = cursor.read_u32()?;
    let red_mask = cursor.read_u32()?;
    let green_mask = cursor.read_u32()?;
    let blue_mask = cursor.read_u32()?;
    let alpha_mask = cursor.read_u32()?;
    let color_space_type = cursor.get_span(4)?;
    let mut endpoints = [0u32; 9];
    for e in endpoints.iter_mut() {
        *e = cursor.read_u32()?;
    }
    let gamma_red = cursor.read_u32()?;
    let gamma_green = cursor.read_u32()?;
    let gamma_blue = cursor.read_u32()?;
    let intent = cursor.read_u32()?;
    let profile_data_offset = cursor.read_u32()?;
    let profile_size = cursor.read_u32()?;
    let reserved = cursor.read_u32()?;
    Ok(V5Header {
        width,
        height,
        planes,
        bpp,
        compression,
        image_size,
        ppm_x,
        ppm_y,
        colors_used,
        important_colors,
        red_mask,
        green_mask,
        blue_mask,
        alpha_mask,
        color_space_type,
        endpoints,
        gamma_red,
        gamma_green,
        gamma_blue,
        intent,
        profile_data_offset,
        profile_size,
        reserved,
        span: Span::new(start, cursor.position()),
    })
}

/// `colors_used == 0` means "the full palette for this depth", which is
/// `1 << bpp` entries — not a fixed 256, or a 4-bpp palette over-reads
/// 240 entries into the pixel data.
fn parse_palette(
    cursor: &mut ByteCursor<'_>,
    colors_used: u32,
    bpp: u16,
) -> Result<Vec<PaletteEntry>> {
    let count = if colors_used == 0 {
        1usize << bpp
    } else {
        colors_used as usize
    };
    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let span = cursor.get_span(4)?;
        let raw = cursor.bytes_for_span(span);
        entries.push((raw[2], raw[1], raw[0], raw[3]));
    }
    Ok(entries)
}
