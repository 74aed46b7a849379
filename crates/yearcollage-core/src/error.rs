use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid aspect ratio format: {0:?} (expected W:H)")]
    InvalidFormat(String),
    #[error("Invalid {part} in aspect ratio: {value:?}")]
    InvalidNumber { part: &'static str, value: String },
    #[error("Height in aspect ratio cannot be zero")]
    ZeroHeight,
    #[error("Column count must be positive (got {0})")]
    NonPositiveColumns(i64),
    #[error("Computed tile height is non-positive for tile width {tile_width} and tile aspect {tile_aspect:.4}; check tile/collage aspect")]
    DegenerateTileHeight { tile_width: u32, tile_aspect: f64 },
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Encoding error: {0}")]
    Encode(String),
    #[error("No images found")]
    Empty,
    #[error("read image {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("decode image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("write output {path:?}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: Box<CollageError>,
    },
}

pub type Result<T> = std::result::Result<T, CollageError>;
