//! Grid resolution: how many columns and rows, and what shape each tile has.
//!
//! Two mutually exclusive modes feed the planner:
//! - explicit columns with a configured tile aspect, or
//! - a target collage aspect, from which both the column count and the tile
//!   aspect are derived (the configured tile aspect is ignored).

use serde::{Deserialize, Serialize};

use crate::aspect::AspectRatio;
use crate::error::{CollageError, Result};

/// Half-width of the column search window around the analytic ideal.
pub const COLUMN_SEARCH_RADIUS: i64 = 3;

/// Resolved layout request, computed once per run from the config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    Columns {
        columns: i64,
        tile_aspect: AspectRatio,
    },
    CollageAspect(AspectRatio),
}

/// Columns × rows and the tile aspect every cell is cropped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    pub tile_aspect: AspectRatio,
}

/// Pixel size of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

impl GridLayout {
    /// Plans a grid for `count` images.
    pub fn plan(count: usize, mode: &LayoutMode) -> Result<Self> {
        match *mode {
            LayoutMode::Columns {
                columns,
                tile_aspect,
            } => {
                if columns <= 0 {
                    return Err(CollageError::NonPositiveColumns(columns));
                }
                if count == 0 {
                    return Err(CollageError::Empty);
                }
                let columns = u32::try_from(columns).map_err(|_| {
                    CollageError::InvalidConfig(format!("columns {columns} is too large"))
                })?;
                Ok(Self {
                    columns,
                    rows: rows_for(count, columns as usize) as u32,
                    tile_aspect,
                })
            }
            LayoutMode::CollageAspect(collage) => {
                let columns = pick_columns_for_collage(count, collage.value());
                if columns == 0 {
                    return Err(CollageError::NonPositiveColumns(0));
                }
                let rows = rows_for(count, columns);
                let tile_aspect = tile_aspect_from_grid(count, columns, collage.value());
                Ok(Self {
                    columns: columns as u32,
                    rows: rows as u32,
                    tile_aspect: AspectRatio::new(tile_aspect),
                })
            }
        }
    }

    /// Tile height follows from the width and the tile aspect.
    pub fn tile_size(&self, tile_width: u32) -> Result<TileSize> {
        let height = (tile_width as f64 / self.tile_aspect.value()).round();
        if height.is_nan() || height < 1.0 || height > u32::MAX as f64 {
            return Err(CollageError::DegenerateTileHeight {
                tile_width,
                tile_aspect: self.tile_aspect.value(),
            });
        }
        Ok(TileSize {
            width: tile_width,
            height: height as u32,
        })
    }

    /// Canvas dimensions for `tile`; errors if they overflow `u32`.
    pub fn canvas_size(&self, tile: TileSize) -> Result<(u32, u32)> {
        let w = self.columns.checked_mul(tile.width);
        let h = self.rows.checked_mul(tile.height);
        match (w, h) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(CollageError::InvalidConfig(format!(
                "canvas {}x{} tiles of {}x{} px is too large",
                self.columns, self.rows, tile.width, tile.height
            ))),
        }
    }

    /// Grid cell `(column, row)` of the image at `index`, row-major.
    pub fn cell(&self, index: usize) -> (u32, u32) {
        let columns = self.columns as usize;
        ((index % columns) as u32, (index / columns) as u32)
    }

    pub fn capacity(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

/// Minimal row count covering `count` images in `columns` columns.
pub fn rows_for(count: usize, columns: usize) -> usize {
    count.div_ceil(columns)
}

/// Tile aspect implied by laying `count` images into `columns` columns on a
/// canvas of `collage_ratio`.
pub fn tile_aspect_from_grid(count: usize, columns: usize, collage_ratio: f64) -> f64 {
    let rows = rows_for(count, columns);
    collage_ratio * rows as f64 / columns as f64
}

/// Picks the column count that keeps tiles closest to square for a target
/// collage aspect.
///
/// Only a ±3 window around `round(sqrt(count * ratio))` is searched, each
/// candidate clamped to `[1, count]`; ties go to the smaller count. Returns 0
/// when `count` is 0.
pub fn pick_columns_for_collage(count: usize, collage_ratio: f64) -> usize {
    if count == 0 {
        return 0;
    }
    // saturates for huge or infinite ratios; NaN becomes 0
    let ideal = (count as f64 * collage_ratio).sqrt().round() as i64;
    let n = count as i64;
    let score = |c: i64| (tile_aspect_from_grid(count, c as usize, collage_ratio) - 1.0).abs();

    let mut best = ideal.clamp(1, n);
    let mut best_score = score(best);
    for delta in -COLUMN_SEARCH_RADIUS..=COLUMN_SEARCH_RADIUS {
        let c = ideal.saturating_add(delta).clamp(1, n);
        let s = score(c);
        if s < best_score || (s == best_score && c < best) {
            best = c;
            best_score = s;
        }
    }
    best as usize
}
