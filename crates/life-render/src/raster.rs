//! Rasterization of live-cell sets.

use image::{Rgba, RgbaImage};
use life_core::Cell;
use std::collections::HashSet;

/// Fill color for live cells (dark on a light background).
const ALIVE: Rgba<u8> = Rgba([25, 25, 25, 255]);
const DEAD: Rgba<u8> = Rgba([245, 245, 245, 255]);

/// Render a live-cell set onto a `rows` x `cols` raster.
///
/// Each cell becomes a `cell_size` x `cell_size` square of pixels. Listed
/// cells are drawn "on", everything else stays "off"; marking a cell more
/// than once has no additional effect. Cells outside the grid are clipped.
pub fn rasterize(alive: &HashSet<Cell>, rows: i32, cols: i32, cell_size: u32) -> RgbaImage {
    let width = cols as u32 * cell_size;
    let height = rows as u32 * cell_size;
    let mut raster = RgbaImage::from_pixel(width, height, DEAD);

    for cell in alive {
        if !cell.in_bounds(rows, cols) {
            continue;
        }

        let x0 = cell.col as u32 * cell_size;
        let y0 = cell.row as u32 * cell_size;
        for dy in 0..cell_size {
            for dx in 0..cell_size {
                raster.put_pixel(x0 + dx, y0 + dy, ALIVE);
            }
        }
    }

    raster
}
