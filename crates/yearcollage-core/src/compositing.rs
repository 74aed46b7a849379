use image::{Rgba, RgbaImage, imageops};
use tracing::debug;

use crate::error::{CollageError, Result};
use crate::layout::{GridLayout, TileSize};
use crate::model::Rect;

/// Resampling filter for tiles (bilinear).
pub const TILE_FILTER: imageops::FilterType = imageops::FilterType::Triangle;

/// Fully transparent canvas fill.
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Copy `src` into `canvas` with its top-left at (dx, dy), overwriting
/// whatever was there. Pixels falling outside the canvas are dropped.
pub fn blit_rgba(src: &RgbaImage, canvas: &mut RgbaImage, dx: u32, dy: u32) {
    let (cw, ch) = canvas.dimensions();
    let (sw, sh) = src.dimensions();
    for yy in 0..sh {
        if dy + yy >= ch {
            break;
        }
        for xx in 0..sw {
            if dx + xx >= cw {
                break;
            }
            canvas.put_pixel(dx + xx, dy + yy, *src.get_pixel(xx, yy));
        }
    }
}

/// Owns the collage canvas for one run and fills it cell by cell.
pub struct Compositor {
    grid: GridLayout,
    tile: TileSize,
    canvas: RgbaImage,
}

impl Compositor {
    /// Allocates a `columns*tile.width` × `rows*tile.height` canvas filled
    /// with `background`.
    pub fn new(grid: GridLayout, tile: TileSize, background: [u8; 4]) -> Result<Self> {
        let (w, h) = grid.canvas_size(tile)?;
        debug!(w, h, "allocating canvas");
        Ok(Self {
            grid,
            tile,
            canvas: RgbaImage::from_pixel(w, h, Rgba(background)),
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    /// Canvas rectangle of the cell at `index`.
    pub fn cell_rect(&self, index: usize) -> Rect {
        let (col, row) = self.grid.cell(index);
        Rect::new(
            col * self.tile.width,
            row * self.tile.height,
            self.tile.width,
            self.tile.height,
        )
    }

    /// Resizes `tile` to the exact tile size and writes it into cell `index`.
    pub fn place(&mut self, index: usize, tile: &RgbaImage) -> Result<Rect> {
        if index >= self.grid.capacity() {
            return Err(CollageError::InvalidInput(format!(
                "tile index {} outside {}x{} grid",
                index, self.grid.columns, self.grid.rows
            )));
        }
        let cell = self.cell_rect(index);
        if tile.dimensions() == (self.tile.width, self.tile.height) {
            blit_rgba(tile, &mut self.canvas, cell.x, cell.y);
        } else {
            let resized = imageops::resize(tile, self.tile.width, self.tile.height, TILE_FILTER);
            blit_rgba(&resized, &mut self.canvas, cell.x, cell.y);
        }
        Ok(cell)
    }

    /// Hands the finished canvas over.
    pub fn finish(self) -> RgbaImage {
        self.canvas
    }
}
