//! rasterprobe CLI — dumps a container file's byte-exact parsed record as JSON.
//!
//! Format is picked by magic bytes, not by file extension, since a span
//! tree is only meaningful for the bytes it was actually read from.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "rasterprobe", version, about = "Byte-exact container format reader")]
struct Args {
    /// File to parse (PNG, GIF, BMP, ZIP, or TIFF/EXIF).
    file: PathBuf,

    /// Pretty-print the JSON output (default).
    #[arg(long, default_value_t = true)]
    pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetectedFormat {
    Png,
    Gif,
    Bmp,
    Zip,
    Tiff,
    Icc,
}

/// Sniffs the format from the file's leading bytes. TIFF is checked last
/// since its `II`/`MM` marker is only two bytes and could otherwise shadow
/// a more specific match.
fn detect_format(bytes: &[u8]) -> Option<DetectedFormat> {
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some(DetectedFormat::Png);
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some(DetectedFormat::Gif);
    }
    if bytes.starts_with(b"BM") {
        return Some(DetectedFormat::Bmp);
    }
    if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) || bytes.starts_with(&[0x50, 0x4B, 0x05, 0x06]) {
        return Some(DetectedFormat::Zip);
    }
    if bytes.starts_with(b"II") || bytes.starts_with(b"MM") {
        return Some(DetectedFormat::Tiff);
    }
    if bytes.len() >= 40 && &bytes[36..40] == b"acsp" {
        return Some(DetectedFormat::Icc);
    }
    None
}

fn run(args: &Args) -> Result<()> {
    let bytes = fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;

    let format = detect_format(&bytes)
        .with_context(|| format!("{}: unrecognized format", args.file.display()))?;

    let json = match format {
        DetectedFormat::Png => {
            let record = rasterprobe_formats::parse_png(&bytes)?;
            serde_json::to_value(&record)?
        }
        DetectedFormat::Gif => {
            let record = rasterprobe_formats::parse_gif(&bytes)?;
            serde_json::to_value(&record)?
        }
        DetectedFormat::Bmp => {
            let record = rasterprobe_formats::parse_bmp(&bytes)?;
            serde_json::to_value(&record)?
        }
        DetectedFormat::Zip => {
            let record = rasterprobe_formats::parse_zip(&bytes)?;
            serde_json::to_value(&record)?
        }
        DetectedFormat::Tiff => {
            let record = rasterprobe_formats::parse_exif(&bytes)?;
            serde_json::to_value(&record)?
        }
        DetectedFormat::Icc => {
            let record = rasterprobe_icc::parse_icc(&bytes)?;
            serde_json::to_value(&record)?
        }
    };

    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("{}", serde_json::to_string(&json)?);
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("rasterprobe: {err:#}");
        std::process::exit(1);
    }
    Ok(())
}
