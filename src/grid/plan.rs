use crate::foundation::core::{FrameSequence, GridShape, RasterFrame, TileCoord};
use crate::foundation::error::TileResult;

/// Per-tile frame sequences of a whole run, indexed by canonical tile order.
///
/// Every sequence has the same length as the source, and frame `i` of each tile comes from
/// source frame `i` with its delay.
#[derive(Clone, Debug, PartialEq)]
pub struct TilePlan {
    grid: GridShape,
    tiles: Vec<FrameSequence>,
}

impl TilePlan {
    /// Regroup per-frame tile lists (outer index = source frame) into per-tile sequences.
    ///
    /// Purely positional: neither frames nor tiles are reordered.
    pub fn aggregate(grid: GridShape, per_frame: Vec<Vec<RasterFrame>>) -> TileResult<Self> {
        let tile_count = grid.tile_count();
        let frame_count = per_frame.len();
        if frame_count == 0 {
            return Err(anyhow::anyhow!("tile plan needs at least one source frame").into());
        }

        let mut tiles: Vec<Vec<RasterFrame>> = (0..tile_count)
            .map(|_| Vec::with_capacity(frame_count))
            .collect();

        for (frame_idx, frame_tiles) in per_frame.into_iter().enumerate() {
            if frame_tiles.len() != tile_count {
                return Err(anyhow::anyhow!(
                    "source frame {frame_idx} produced {} tiles, grid {grid} needs {tile_count}",
                    frame_tiles.len()
                )
                .into());
            }
            for (slot, tile) in tiles.iter_mut().zip(frame_tiles) {
                slot.push(tile);
            }
        }

        let tiles = tiles
            .into_iter()
            .map(FrameSequence::new)
            .collect::<TileResult<Vec<_>>>()?;
        Ok(Self { grid, tiles })
    }

    pub fn grid(&self) -> GridShape {
        self.grid
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, coord: TileCoord) -> Option<&FrameSequence> {
        if coord.column >= self.grid.columns || coord.row >= self.grid.rows {
            return None;
        }
        self.tiles.get(coord.index(self.grid))
    }

    /// Tiles with their coordinates, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, &FrameSequence)> {
        self.grid.coords().zip(self.tiles.iter())
    }

    /// Borrow the sequences in canonical order.
    pub fn sequences(&self) -> &[FrameSequence] {
        &self.tiles
    }

    /// Consume the plan, returning the sequences in canonical order.
    pub fn into_sequences(self) -> Vec<FrameSequence> {
        self.tiles
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/plan.rs"]
mod tests;
