use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbaImage};
use tracing::{debug, info, instrument};

use crate::codec;
use crate::compositing::Compositor;
use crate::config::CollageConfig;
use crate::crop::crop_to_aspect;
use crate::discover::collect_images;
use crate::error::{CollageError, Result};
use crate::layout::{GridLayout, LayoutMode, TileSize};
use crate::metadata;
use crate::model::{CollageSummary, Placement, Rect};
use crate::orientation::Orientation;
use crate::sequence::sort_paths;

/// How many discovered paths are echoed to the log.
const LISTED_PATHS: usize = 10;

/// In-memory photo to place (key + decoded image + EXIF orientation).
pub struct InputImage {
    pub key: String,
    pub image: DynamicImage,
    pub orientation: Orientation,
}

/// Finished canvas plus the geometry it was built with.
pub struct CollageOutput {
    pub grid: GridLayout,
    pub tile: TileSize,
    pub canvas: RgbaImage,
    pub placements: Vec<Placement>,
}

/// Resolves grid and tile size for `count` images.
pub fn plan_grid(count: usize, mode: &LayoutMode, tile_width: u32) -> Result<(GridLayout, TileSize)> {
    let grid = GridLayout::plan(count, mode)?;
    let tile = grid.tile_size(tile_width)?;
    Ok((grid, tile))
}

/// Upright, cropped tile ready for resizing.
pub fn prepare_tile(image: DynamicImage, orientation: Orientation, tile_aspect: f64) -> RgbaImage {
    let upright = orientation.apply(image.into_rgba8());
    crop_to_aspect(upright, tile_aspect)
}

#[instrument(skip_all)]
/// Runs the whole workflow: discover → sort → plan → compose → save.
pub fn run(cfg: &CollageConfig) -> Result<CollageSummary> {
    run_with_progress(cfg, |_, _| {})
}

#[instrument(skip_all)]
/// Like [`run`], calling `on_tile(index, path)` after each tile is placed.
///
/// Config and ratio errors surface before the input directory is touched.
pub fn run_with_progress<F>(cfg: &CollageConfig, on_tile: F) -> Result<CollageSummary>
where
    F: FnMut(usize, &Path),
{
    cfg.validate()?;
    cfg.resolve_layout()?;
    let paths = collect_images(&cfg.input_dir)?;
    run_paths(cfg, paths, on_tile)
}

#[instrument(skip_all)]
/// Sorts, composes and saves an already discovered list of files.
///
/// Any read or decode failure aborts the run before the output is written.
pub fn run_paths<F>(cfg: &CollageConfig, paths: Vec<PathBuf>, on_tile: F) -> Result<CollageSummary>
where
    F: FnMut(usize, &Path),
{
    cfg.validate()?;
    let mode = cfg.resolve_layout()?;
    let strategy = cfg.sort_strategy();
    if paths.is_empty() {
        return Err(CollageError::Empty);
    }
    let paths = sort_paths(paths, strategy);
    log_discovered(&paths, &cfg.input_dir);

    let out = compose_paths(&paths, &mode, cfg.tile_width, cfg.background, on_tile)?;
    codec::save_image(&cfg.output, &out.canvas)?;

    let (canvas_width, canvas_height) = out.canvas.dimensions();
    info!(
        output = ?cfg.output,
        width = canvas_width,
        height = canvas_height,
        "saved collage"
    );
    Ok(CollageSummary {
        image_count: paths.len(),
        grid: out.grid,
        tile: out.tile,
        canvas_width,
        canvas_height,
        sort: strategy,
        output: Some(cfg.output.clone()),
        placements: out.placements,
    })
}

/// Plans the collage for `paths` without decoding anything: sorts, resolves
/// the grid and reports where each file would go.
pub fn plan_paths(cfg: &CollageConfig, paths: Vec<PathBuf>) -> Result<CollageSummary> {
    cfg.validate()?;
    let mode = cfg.resolve_layout()?;
    let strategy = cfg.sort_strategy();
    if paths.is_empty() {
        return Err(CollageError::Empty);
    }
    let paths = sort_paths(paths, strategy);
    let (grid, tile) = plan_grid(paths.len(), &mode, cfg.tile_width)?;
    let (canvas_width, canvas_height) = grid.canvas_size(tile)?;
    let placements = paths
        .iter()
        .enumerate()
        .map(|(idx, path)| {
            let (column, row) = grid.cell(idx);
            Placement {
                index: idx,
                key: path_key(path),
                column,
                row,
                cell: Rect::new(column * tile.width, row * tile.height, tile.width, tile.height),
            }
        })
        .collect();
    Ok(CollageSummary {
        image_count: paths.len(),
        grid,
        tile,
        canvas_width,
        canvas_height,
        sort: strategy,
        output: None,
        placements,
    })
}

/// Reads, decodes and places each file in order. Each file is loaded, used
/// and released before the next one is opened.
pub fn compose_paths<F>(
    paths: &[PathBuf],
    mode: &LayoutMode,
    tile_width: u32,
    background: [u8; 4],
    mut on_tile: F,
) -> Result<CollageOutput>
where
    F: FnMut(usize, &Path),
{
    let (grid, tile) = plan_grid(paths.len(), mode, tile_width)?;
    log_layout(mode, &grid, tile);
    let mut compositor = Compositor::new(grid, tile, background)?;
    let mut placements = Vec::with_capacity(paths.len());

    for (idx, path) in paths.iter().enumerate() {
        let bytes = fs::read(path).map_err(|source| CollageError::Read {
            path: path.clone(),
            source,
        })?;
        let orientation = metadata::read_orientation(&bytes);
        let image = codec::decode(&bytes).map_err(|source| CollageError::Decode {
            path: path.clone(),
            source,
        })?;
        drop(bytes);

        debug!(?path, ?orientation, w = image.width(), h = image.height(), "decoded");
        let prepared = prepare_tile(image, orientation, grid.tile_aspect.value());
        let cell = compositor.place(idx, &prepared)?;
        let (column, row) = grid.cell(idx);
        placements.push(Placement {
            index: idx,
            key: path_key(path),
            column,
            row,
            cell,
        });
        on_tile(idx, path);
    }

    Ok(CollageOutput {
        grid,
        tile,
        canvas: compositor.finish(),
        placements,
    })
}

/// Composes already decoded images in the given order.
pub fn compose_images(
    inputs: Vec<InputImage>,
    mode: &LayoutMode,
    tile_width: u32,
    background: [u8; 4],
) -> Result<CollageOutput> {
    if inputs.is_empty() {
        return Err(CollageError::Empty);
    }
    let (grid, tile) = plan_grid(inputs.len(), mode, tile_width)?;
    log_layout(mode, &grid, tile);
    let mut compositor = Compositor::new(grid, tile, background)?;
    let mut placements = Vec::with_capacity(inputs.len());

    for (idx, input) in inputs.into_iter().enumerate() {
        let prepared = prepare_tile(input.image, input.orientation, grid.tile_aspect.value());
        let cell = compositor.place(idx, &prepared)?;
        let (column, row) = grid.cell(idx);
        placements.push(Placement {
            index: idx,
            key: input.key,
            column,
            row,
            cell,
        });
    }

    Ok(CollageOutput {
        grid,
        tile,
        canvas: compositor.finish(),
        placements,
    })
}

fn path_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn log_discovered(paths: &[PathBuf], root: &Path) {
    info!(count = paths.len(), root = ?root, "found images");
    for p in paths.iter().take(LISTED_PATHS) {
        info!("  {}", p.display());
    }
    if paths.len() > LISTED_PATHS {
        info!("... and {} more", paths.len() - LISTED_PATHS);
    }
}

fn log_layout(mode: &LayoutMode, grid: &GridLayout, tile: TileSize) {
    match mode {
        LayoutMode::CollageAspect(collage) => info!(
            collage_aspect = %collage,
            columns = grid.columns,
            rows = grid.rows,
            tile_aspect = %grid.tile_aspect,
            "layout from collage aspect (tile-aspect ignored)"
        ),
        LayoutMode::Columns { .. } => info!(
            columns = grid.columns,
            rows = grid.rows,
            tile_aspect = %grid.tile_aspect,
            "layout from explicit columns"
        ),
    }
    debug!(tile_w = tile.width, tile_h = tile.height, "tile size");
}
