use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::aspect::AspectRatio;
use crate::compositing::TRANSPARENT;
use crate::error::{CollageError, Result};
use crate::layout::LayoutMode;
use crate::sequence::SortStrategy;

/// Run configuration. Key notes:
///   - `collage_aspect`, when set, decides both the column count and the tile
///     aspect; `columns` and `tile_aspect` are then ignored
///   - the output extension selects the encoder (`.png` or JPEG)
///   - `sort` is resolved leniently: unknown names fall back to `time`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CollageConfig {
    /// Directory walked for photos.
    pub input_dir: PathBuf,
    /// Collage file path.
    pub output: PathBuf,
    /// Tile aspect ratio, e.g. `1:1`, `3:2`, `4:3`.
    pub tile_aspect: String,
    /// Tile width in pixels.
    pub tile_width: u32,
    /// Number of columns in the grid.
    pub columns: i64,
    /// Overall collage aspect ratio, e.g. `16:9`.
    pub collage_aspect: Option<String>,
    /// Sort strategy name: `time`, `name` or `exif`.
    pub sort: String,
    /// RGBA fill for cells without a photo.
    pub background: [u8; 4],
}

impl Default for CollageConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::new(),
            output: PathBuf::from("collage.jpg"),
            tile_aspect: "1:1".into(),
            tile_width: 400,
            columns: 20,
            collage_aspect: None,
            sort: SortStrategy::Time.as_str().into(),
            background: TRANSPARENT,
        }
    }
}

impl CollageConfig {
    /// Checks required fields before any I/O happens.
    pub fn validate(&self) -> Result<()> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(CollageError::InvalidConfig(
                "missing required field: input".into(),
            ));
        }
        if self.tile_width == 0 {
            return Err(CollageError::InvalidConfig(
                "tile-width must be greater than zero".into(),
            ));
        }
        if self.columns < 0 {
            return Err(CollageError::InvalidConfig(
                "columns must not be negative".into(),
            ));
        }
        if self.columns == 0 && self.collage_aspect().is_none() {
            return Err(CollageError::InvalidConfig(
                "either columns or collage-aspect must be set".into(),
            ));
        }
        Ok(())
    }

    /// Non-empty collage aspect string, if any.
    pub fn collage_aspect(&self) -> Option<&str> {
        self.collage_aspect.as_deref().filter(|s| !s.is_empty())
    }

    /// Folds `columns`, `tile_aspect` and `collage_aspect` into one layout
    /// request. Ratio parse failures name the offending field.
    pub fn resolve_layout(&self) -> Result<LayoutMode> {
        if let Some(collage) = self.collage_aspect() {
            let ratio = AspectRatio::parse(collage).map_err(|e| {
                CollageError::InvalidConfig(format!("invalid collage-aspect {collage:?}: {e}"))
            })?;
            return Ok(LayoutMode::CollageAspect(ratio));
        }
        let tile_aspect = AspectRatio::parse(&self.tile_aspect).map_err(|e| {
            CollageError::InvalidConfig(format!(
                "invalid tile-aspect {:?}: {}",
                self.tile_aspect, e
            ))
        })?;
        Ok(LayoutMode::Columns {
            columns: self.columns,
            tile_aspect,
        })
    }

    pub fn sort_strategy(&self) -> SortStrategy {
        SortStrategy::from_name(&self.sort)
    }

    /// Create a fluent builder for `CollageConfig`.
    pub fn builder() -> CollageConfigBuilder {
        CollageConfigBuilder::new()
    }
}

/// Builder for `CollageConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct CollageConfigBuilder {
    cfg: CollageConfig,
}

impl CollageConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: CollageConfig::default(),
        }
    }
    pub fn input_dir(mut self, v: impl Into<PathBuf>) -> Self {
        self.cfg.input_dir = v.into();
        self
    }
    pub fn output(mut self, v: impl Into<PathBuf>) -> Self {
        self.cfg.output = v.into();
        self
    }
    pub fn tile_aspect(mut self, v: impl Into<String>) -> Self {
        self.cfg.tile_aspect = v.into();
        self
    }
    pub fn tile_width(mut self, v: u32) -> Self {
        self.cfg.tile_width = v;
        self
    }
    pub fn columns(mut self, v: i64) -> Self {
        self.cfg.columns = v;
        self
    }
    pub fn collage_aspect(mut self, v: Option<String>) -> Self {
        self.cfg.collage_aspect = v;
        self
    }
    pub fn sort(mut self, v: impl Into<String>) -> Self {
        self.cfg.sort = v.into();
        self
    }
    pub fn background(mut self, v: [u8; 4]) -> Self {
        self.cfg.background = v;
        self
    }
    pub fn build(self) -> CollageConfig {
        self.cfg
    }
}
