use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CollageError, Result};
use crate::layout::{GridLayout, TileSize};
use crate::sequence::SortStrategy;

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Last covered column (`x + w - 1`).
    pub fn right(&self) -> u32 {
        self.x + self.w.saturating_sub(1)
    }
    /// Last covered row (`y + h - 1`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h.saturating_sub(1)
    }
    /// True if the two rectangles share at least one pixel.
    pub fn intersects(&self, r: &Rect) -> bool {
        self.w > 0
            && self.h > 0
            && r.w > 0
            && r.h > 0
            && self.x <= r.right()
            && r.x <= self.right()
            && self.y <= r.bottom()
            && r.y <= self.bottom()
    }
}

/// Where one photo landed on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement<K = String> {
    /// Position in the sorted sequence.
    pub index: usize,
    /// Source key (file path for directory runs).
    pub key: K,
    pub column: u32,
    pub row: u32,
    /// Cell rectangle on the canvas.
    pub cell: Rect,
}

/// Record of a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollageSummary {
    pub image_count: usize,
    pub grid: GridLayout,
    pub tile: TileSize,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub sort: SortStrategy,
    pub output: Option<PathBuf>,
    pub placements: Vec<Placement>,
}

impl CollageSummary {
    /// Width / height of the whole canvas.
    pub fn canvas_aspect(&self) -> f64 {
        if self.canvas_height == 0 {
            0.0
        } else {
            self.canvas_width as f64 / self.canvas_height as f64
        }
    }

    /// Cells in the last row left at the background fill.
    pub fn empty_cells(&self) -> usize {
        self.grid.capacity().saturating_sub(self.image_count)
    }

    /// Returns a human-readable one-line summary.
    pub fn summary(&self) -> String {
        format!(
            "Images: {}, Grid: {}x{}, Tile: {}x{} px (aspect {}), Canvas: {}x{} px (aspect {:.4}), Empty cells: {}, Sort: {}",
            self.image_count,
            self.grid.columns,
            self.grid.rows,
            self.tile.width,
            self.tile.height,
            self.grid.tile_aspect,
            self.canvas_width,
            self.canvas_height,
            self.canvas_aspect(),
            self.empty_cells(),
            self.sort.as_str(),
        )
    }

    /// Pretty JSON for `--export-summary` and similar tooling.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CollageError::Encode(e.to_string()))
    }
}
