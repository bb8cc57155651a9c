use image::{Rgba, RgbaImage};

use super::*;
use crate::foundation::core::DelayCs;
use crate::grid::partition::partition;

fn source(grid: GridShape, cell: u32, delays: &[u16]) -> Vec<RasterFrame> {
    let (w, h) = grid.pixel_size(cell).unwrap();
    delays
        .iter()
        .enumerate()
        .map(|(f, cs)| {
            let img = RgbaImage::from_fn(w, h, |x, y| {
                let tile = (y / cell) * grid.columns + (x / cell);
                Rgba([tile as u8, f as u8, 0, 255])
            });
            RasterFrame::new(img, Some(DelayCs(*cs)))
        })
        .collect()
}

#[test]
fn every_tile_gets_every_frame_with_source_delay() {
    let grid = GridShape::new(3, 2).unwrap();
    let delays = [10, 10, 20, 7];
    let per_frame: Vec<Vec<RasterFrame>> = source(grid, 4, &delays)
        .iter()
        .map(|f| partition(f, grid, 4).unwrap())
        .collect();

    let plan = TilePlan::aggregate(grid, per_frame).unwrap();
    assert_eq!(plan.len(), 6);
    for (coord, seq) in plan.iter() {
        assert_eq!(seq.len(), delays.len());
        for (i, frame) in seq.iter().enumerate() {
            assert_eq!(frame.delay(), Some(DelayCs(delays[i])));
            let px = frame.pixels().get_pixel(0, 0);
            assert_eq!(px[0] as usize, coord.index(grid));
            assert_eq!(px[1] as usize, i);
        }
    }
}

#[test]
fn lookup_by_coordinate() {
    let grid = GridShape::new(2, 2).unwrap();
    let per_frame = source(grid, 2, &[5])
        .iter()
        .map(|f| partition(f, grid, 2).unwrap())
        .collect();
    let plan = TilePlan::aggregate(grid, per_frame).unwrap();

    let seq = plan.get(TileCoord { column: 1, row: 1 }).unwrap();
    assert_eq!(seq.frames()[0].pixels().get_pixel(0, 0)[0], 3);
    assert!(plan.get(TileCoord { column: 2, row: 0 }).is_none());
}

#[test]
fn mismatched_tile_lists_are_rejected() {
    let grid = GridShape::new(2, 1).unwrap();
    let one = RasterFrame::still(RgbaImage::new(1, 1));
    assert!(TilePlan::aggregate(grid, vec![vec![one.clone()]]).is_err());
    assert!(TilePlan::aggregate(grid, Vec::new()).is_err());
    let plan = TilePlan::aggregate(grid, vec![vec![one.clone(), one]]).unwrap();
    assert_eq!(plan.sequences().len(), 2);
    assert_eq!(plan.into_sequences()[1].len(), 1);
}
