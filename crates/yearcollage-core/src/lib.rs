//! Core library for building photo collages.
//!
//! - Layout: explicit columns, or a target collage aspect from which columns and tile aspect are derived
//! - Per photo: EXIF orientation fix, centered crop to the tile aspect, bilinear resize, blit into its cell
//! - Pipeline: `run` walks a directory, sorts (time / name / exif) and writes one JPEG or PNG
//!
//! Quick example:
//! ```ignore
//! use yearcollage_core::{CollageConfig, run};
//! # fn main() -> anyhow::Result<()> {
//! let cfg = CollageConfig::builder()
//!     .input_dir("photos/2024")
//!     .output("2024.jpg")
//!     .collage_aspect(Some("16:9".into()))
//!     .build();
//! let summary = run(&cfg)?;
//! println!("{}", summary.summary());
//! # Ok(()) }
//! ```

pub mod aspect;
pub mod codec;
pub mod compositing;
pub mod config;
pub mod crop;
pub mod discover;
pub mod error;
pub mod layout;
pub mod metadata;
pub mod model;
pub mod orientation;
pub mod pipeline;
pub mod sequence;

pub use aspect::*;
pub use config::*;
pub use error::*;
pub use layout::*;
pub use model::*;
pub use orientation::*;
pub use pipeline::*;
pub use sequence::*;

/// Convenience prelude for common types and functions.
/// Importing `yearcollage_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::aspect::AspectRatio;
    pub use crate::codec::{OutputFormat, save_image};
    pub use crate::compositing::Compositor;
    pub use crate::config::{CollageConfig, CollageConfigBuilder};
    pub use crate::crop::crop_to_aspect;
    pub use crate::discover::collect_images;
    pub use crate::layout::{GridLayout, LayoutMode, TileSize, pick_columns_for_collage};
    pub use crate::model::{CollageSummary, Placement, Rect};
    pub use crate::orientation::Orientation;
    pub use crate::sequence::{SortStrategy, sort_paths};
    pub use crate::{
        CollageOutput, InputImage, compose_images, compose_paths, plan_paths, run, run_paths,
    };
}
