use image::{Rgba, RgbaImage};

use super::*;
use crate::foundation::core::DelayCs;

/// Frame where each cell is filled with its row-major index in the red channel.
fn labelled_frame(grid: GridShape, cell: u32) -> RasterFrame {
    let (w, h) = grid.pixel_size(cell).unwrap();
    let img = RgbaImage::from_fn(w, h, |x, y| {
        let idx = (y / cell) * grid.columns + (x / cell);
        Rgba([idx as u8, 0, 0, 255])
    });
    RasterFrame::new(img, Some(DelayCs(4)))
}

#[test]
fn tiles_count_size_and_order() {
    for (cols, rows) in [(1, 1), (2, 3), (4, 1), (3, 3)] {
        let grid = GridShape::new(cols, rows).unwrap();
        let tiles = partition(&labelled_frame(grid, 5), grid, 5).unwrap();
        assert_eq!(tiles.len(), (cols * rows) as usize);
        for (i, t) in tiles.iter().enumerate() {
            assert_eq!(t.dimensions(), (5, 5));
            assert!(t.pixels().pixels().all(|p| p[0] as usize == i), "tile {i}");
            assert_eq!(t.delay(), Some(DelayCs(4)));
        }
    }
}

#[test]
fn tiles_are_independent_copies() {
    let grid = GridShape::new(2, 1).unwrap();
    let tiles = partition(&labelled_frame(grid, 2), grid, 2).unwrap();
    let mut first = tiles[0].clone().into_pixels();
    first.put_pixel(0, 0, Rgba([99, 99, 99, 99]));
    assert_eq!(tiles[0].pixels().get_pixel(0, 0)[0], 0);
    assert_eq!(tiles[1].pixels().get_pixel(0, 0)[0], 1);
}

#[test]
fn wrong_frame_size_is_rejected() {
    let grid = GridShape::new(2, 2).unwrap();
    let frame = RasterFrame::still(RgbaImage::new(10, 9));
    assert!(matches!(
        partition(&frame, grid, 5),
        Err(TileError::Config(_))
    ));
}
