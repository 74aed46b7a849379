use image::{RgbaImage, imageops};

/// Ratios closer than this are treated as already matching.
pub const ASPECT_EPSILON: f64 = 1e-9;

/// Center-crops `img` to `target` (width / height), trimming only the longer
/// axis. Never stretches or pads.
///
/// Offsets use floor division, so an odd trim keeps one extra pixel on the
/// right/bottom side (the kept region leans top-left).
pub fn crop_to_aspect(img: RgbaImage, target: f64) -> RgbaImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return img;
    }
    match crop_rect(w, h, target) {
        Some((x, y, cw, ch)) => imageops::crop_imm(&img, x, y, cw, ch).to_image(),
        None => img,
    }
}

/// Crop window `(x, y, w, h)` for a `w`×`h` source, or `None` when the
/// source already matches `target`.
pub fn crop_rect(w: u32, h: u32, target: f64) -> Option<(u32, u32, u32, u32)> {
    let src_ratio = w as f64 / h as f64;
    if (src_ratio - target).abs() < ASPECT_EPSILON {
        return None;
    }
    if src_ratio > target {
        let new_w = clamp_dim((h as f64 * target).round(), w);
        Some(((w - new_w) / 2, 0, new_w, h))
    } else {
        let new_h = clamp_dim((w as f64 / target).round(), h);
        Some((0, (h - new_h) / 2, w, new_h))
    }
}

fn clamp_dim(v: f64, max: u32) -> u32 {
    if v.is_nan() || v < 1.0 {
        1
    } else if v > max as f64 {
        max
    } else {
        v as u32
    }
}
