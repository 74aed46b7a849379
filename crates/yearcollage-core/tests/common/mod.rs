#![allow(dead_code)]

use image::{DynamicImage, Rgba, RgbaImage};
use yearcollage_core::codec::{OutputFormat, encode};

pub const TAG_ORIENTATION: u16 = 0x0112;
pub const TAG_DATE_TIME: u16 = 0x0132;
pub const TAG_EXIF_POINTER: u16 = 0x8769;
pub const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;
pub const TAG_DATE_TIME_DIGITIZED: u16 = 0x9004;

pub fn solid_rgba(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba(rgba))
}

pub fn solid_image(w: u32, h: u32, rgba: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(solid_rgba(w, h, rgba))
}

/// W×H image whose red channel counts 0, 1, 2, ... in row-major order.
pub fn labeled(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| Rgba([(y * w + x) as u8, 0, 0, 255]))
}

/// Red channel of every pixel, row by row.
pub fn red_grid(img: &RgbaImage) -> Vec<Vec<u8>> {
    (0..img.height())
        .map(|y| (0..img.width()).map(|x| img.get_pixel(x, y)[0]).collect())
        .collect()
}

pub fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    encode(img, OutputFormat::Png).expect("encode png")
}

pub fn jpeg_bytes(img: &RgbaImage) -> Vec<u8> {
    encode(img, OutputFormat::Jpeg { quality: 95 }).expect("encode jpeg")
}

#[derive(Clone)]
pub enum Val {
    Short(u16),
    Long(u32),
    Ascii(String),
}

/// Little-endian TIFF block with IFD0 and, when non-empty, an Exif sub-IFD.
pub fn tiff(ifd0: &[(u16, Val)], exif: &[(u16, Val)]) -> Vec<u8> {
    let mut ifd0 = ifd0.to_vec();
    if !exif.is_empty() {
        ifd0.push((TAG_EXIF_POINTER, Val::Long(0)));
    }
    ifd0.sort_by_key(|(tag, _)| *tag);
    let exif_offset = (8 + ifd_len(&ifd0)) as u32;
    for (tag, v) in ifd0.iter_mut() {
        if *tag == TAG_EXIF_POINTER {
            *v = Val::Long(exif_offset);
        }
    }
    let mut exif = exif.to_vec();
    exif.sort_by_key(|(tag, _)| *tag);

    let mut out = b"II*\0".to_vec();
    out.extend(8u32.to_le_bytes());
    write_ifd(&mut out, &ifd0);
    if !exif.is_empty() {
        write_ifd(&mut out, &exif);
    }
    out
}

/// Inserts an APP1 Exif segment right after the JPEG SOI marker.
pub fn jpeg_with_exif(jpeg: &[u8], tiff: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
    let len = (2 + 6 + tiff.len()) as u16;
    out.extend(len.to_be_bytes());
    out.extend(b"Exif\0\0");
    out.extend(tiff);
    out.extend(&jpeg[2..]);
    out
}

fn ascii_bytes(s: &str) -> Vec<u8> {
    let mut b = s.as_bytes().to_vec();
    b.push(0);
    b
}

fn ifd_len(entries: &[(u16, Val)]) -> usize {
    let data: usize = entries
        .iter()
        .map(|(_, v)| match v {
            Val::Ascii(s) if s.len() + 1 > 4 => (s.len() + 2) & !1,
            _ => 0,
        })
        .sum();
    2 + 12 * entries.len() + 4 + data
}

fn write_ifd(out: &mut Vec<u8>, entries: &[(u16, Val)]) {
    let mut data_off = out.len() + 2 + 12 * entries.len() + 4;
    let mut data = Vec::new();
    out.extend((entries.len() as u16).to_le_bytes());
    for (tag, v) in entries {
        out.extend(tag.to_le_bytes());
        match v {
            Val::Short(x) => {
                out.extend(3u16.to_le_bytes());
                out.extend(1u32.to_le_bytes());
                out.extend(x.to_le_bytes());
                out.extend([0, 0]);
            }
            Val::Long(x) => {
                out.extend(4u16.to_le_bytes());
                out.extend(1u32.to_le_bytes());
                out.extend(x.to_le_bytes());
            }
            Val::Ascii(s) => {
                let mut bytes = ascii_bytes(s);
                out.extend(2u16.to_le_bytes());
                out.extend((bytes.len() as u32).to_le_bytes());
                if bytes.len() <= 4 {
                    bytes.resize(4, 0);
                    out.extend(bytes);
                } else {
                    out.extend((data_off as u32).to_le_bytes());
                    if bytes.len() % 2 == 1 {
                        bytes.push(0);
                    }
                    data_off += bytes.len();
                    data.extend(bytes);
                }
            }
        }
    }
    out.extend(0u32.to_le_bytes());
    out.extend(data);
}
