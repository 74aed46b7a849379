use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// EXIF/TIFF orientation (tag 0x0112). Each variant names the transform that
/// brings the stored pixels upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// 1: already upright.
    #[default]
    Normal,
    /// 2: mirror left-right.
    FlipHorizontal,
    /// 3: rotate 180°.
    Rotate180,
    /// 4: mirror top-bottom.
    FlipVertical,
    /// 5: mirror left-right, then rotate 90° counter-clockwise.
    Transpose,
    /// 6: rotate 90° clockwise.
    Rotate90,
    /// 7: mirror left-right, then rotate 90° clockwise.
    Transverse,
    /// 8: rotate 90° counter-clockwise.
    Rotate270,
}

impl Orientation {
    /// Maps an EXIF code to its transform. Anything outside 1..=8 is `Normal`.
    pub fn from_exif(code: u32) -> Self {
        match code {
            2 => Self::FlipHorizontal,
            3 => Self::Rotate180,
            4 => Self::FlipVertical,
            5 => Self::Transpose,
            6 => Self::Rotate90,
            7 => Self::Transverse,
            8 => Self::Rotate270,
            _ => Self::Normal,
        }
    }

    pub fn exif_code(self) -> u32 {
        match self {
            Self::Normal => 1,
            Self::FlipHorizontal => 2,
            Self::Rotate180 => 3,
            Self::FlipVertical => 4,
            Self::Transpose => 5,
            Self::Rotate90 => 6,
            Self::Transverse => 7,
            Self::Rotate270 => 8,
        }
    }

    /// True when the upright image has width and height swapped.
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }

    /// Applies the transform. `Normal` hands the buffer back untouched.
    pub fn apply(self, img: RgbaImage) -> RgbaImage {
        match self {
            Self::Normal => img,
            Self::FlipHorizontal => flip_horizontal(&img),
            Self::Rotate180 => rotate180(&img),
            Self::FlipVertical => flip_vertical(&img),
            Self::Transpose => rotate90_ccw(&flip_horizontal(&img)),
            Self::Rotate90 => rotate90_cw(&img),
            Self::Transverse => rotate90_cw(&flip_horizontal(&img)),
            Self::Rotate270 => rotate90_ccw(&img),
        }
    }
}

/// Mirrors pixels along the vertical axis.
pub fn flip_horizontal(src: &RgbaImage) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut dst = RgbaImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            dst.put_pixel(w - 1 - x, y, *src.get_pixel(x, y));
        }
    }
    dst
}

/// Mirrors pixels along the horizontal axis.
pub fn flip_vertical(src: &RgbaImage) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut dst = RgbaImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            dst.put_pixel(x, h - 1 - y, *src.get_pixel(x, y));
        }
    }
    dst
}

pub fn rotate180(src: &RgbaImage) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut dst = RgbaImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            dst.put_pixel(w - 1 - x, h - 1 - y, *src.get_pixel(x, y));
        }
    }
    dst
}

/// W×H in, H×W out; output (x, y) = input (y, H-1-x).
pub fn rotate90_cw(src: &RgbaImage) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut dst = RgbaImage::new(h, w);
    for y in 0..w {
        for x in 0..h {
            dst.put_pixel(x, y, *src.get_pixel(y, h - 1 - x));
        }
    }
    dst
}

/// W×H in, H×W out; output (x, y) = input (W-1-y, x).
pub fn rotate90_ccw(src: &RgbaImage) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut dst = RgbaImage::new(h, w);
    for y in 0..w {
        for x in 0..h {
            dst.put_pixel(x, y, *src.get_pixel(w - 1 - y, x));
        }
    }
    dst
}
