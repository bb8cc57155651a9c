use image::imageops;

use crate::foundation::core::{GridShape, RasterFrame};
use crate::foundation::error::{TileError, TileResult};

/// Slice `frame` into `grid.tile_count()` square tiles of `cell_size`, in row-major order.
///
/// The frame must already be exactly `columns * cell_size × rows * cell_size`. Every tile is
/// an independent copy and carries the frame's delay.
pub fn partition(
    frame: &RasterFrame,
    grid: GridShape,
    cell_size: u32,
) -> TileResult<Vec<RasterFrame>> {
    let expected = grid.pixel_size(cell_size)?;
    if frame.dimensions() != expected {
        return Err(TileError::config(format!(
            "frame is {}x{} but grid {grid} at {cell_size}px needs {}x{}",
            frame.width(),
            frame.height(),
            expected.0,
            expected.1
        )));
    }

    let tiles = grid
        .coords()
        .map(|c| {
            let tile = imageops::crop_imm(
                frame.pixels(),
                c.column * cell_size,
                c.row * cell_size,
                cell_size,
                cell_size,
            )
            .to_image();
            frame.with_pixels(tile)
        })
        .collect();
    Ok(tiles)
}

#[cfg(test)]
#[path = "../../tests/unit/grid/partition.rs"]
mod tests;
