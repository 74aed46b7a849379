use std::fs;
use std::path::Path;

use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbImage, RgbaImage};

use crate::error::{CollageError, Result};

/// Quality used for every JPEG the tool writes.
pub const JPEG_QUALITY: u8 = 90;

/// Encoder for the collage, chosen from the output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg { quality: u8 },
}

impl OutputFormat {
    /// `.png` (any case) selects PNG; every other extension, or none, is JPEG.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase())
        {
            Some(ext) if ext == "png" => Self::Png,
            _ => Self::Jpeg {
                quality: JPEG_QUALITY,
            },
        }
    }
}

/// Decodes an in-memory file; the format is sniffed from its content.
pub fn decode(bytes: &[u8]) -> image::ImageResult<DynamicImage> {
    image::load_from_memory(bytes)
}

/// Encodes the canvas. JPEG has no alpha channel, so it is dropped.
pub fn encode(canvas: &RgbaImage, format: OutputFormat) -> Result<Vec<u8>> {
    let (w, h) = canvas.dimensions();
    let mut out = Vec::new();
    match format {
        OutputFormat::Png => {
            PngEncoder::new(&mut out).write_image(canvas.as_raw(), w, h, ExtendedColorType::Rgba8)?;
        }
        OutputFormat::Jpeg { quality } => {
            let rgb: RgbImage = canvas.convert();
            JpegEncoder::new_with_quality(&mut out, quality).encode_image(&rgb)?;
        }
    }
    Ok(out)
}

/// Encodes by extension and writes the file.
pub fn save_image(path: &Path, canvas: &RgbaImage) -> Result<()> {
    let wrap = |e: CollageError| CollageError::Output {
        path: path.to_path_buf(),
        source: Box::new(e),
    };
    let bytes = encode(canvas, OutputFormat::from_path(path)).map_err(wrap)?;
    fs::write(path, bytes).map_err(|e| wrap(e.into()))
}
