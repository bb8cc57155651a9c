use std::str::FromStr;

use image::RgbaImage;

use crate::foundation::error::{TileError, TileResult};

/// GIF frame delay in hundredths of a second, as stored in the GIF container.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct DelayCs(pub u16);

impl DelayCs {
    /// Convert a decoder delay expressed as a millisecond ratio, rounding to the nearest
    /// centisecond.
    pub fn from_ms_ratio(numer: u32, denom: u32) -> Self {
        if denom == 0 {
            return Self(0);
        }
        let cs = (u64::from(numer) + 5 * u64::from(denom)) / (10 * u64::from(denom));
        Self(u16::try_from(cs).unwrap_or(u16::MAX))
    }

    /// Delay in whole milliseconds.
    pub fn as_ms(self) -> u32 {
        u32::from(self.0) * 10
    }
}

/// One decoded or transformed raster frame.
///
/// Pixels are straight (non-premultiplied) RGBA8. `delay` is present only for frames that
/// belong to an animation.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterFrame {
    pixels: RgbaImage,
    delay: Option<DelayCs>,
}

impl RasterFrame {
    /// Create a frame from pixels and optional animation delay.
    pub fn new(pixels: RgbaImage, delay: Option<DelayCs>) -> Self {
        Self { pixels, delay }
    }

    /// Create a frame of a static image (no delay).
    pub fn still(pixels: RgbaImage) -> Self {
        Self::new(pixels, None)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Borrow the pixel buffer.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Animation delay, if this frame came from an animation.
    pub fn delay(&self) -> Option<DelayCs> {
        self.delay
    }

    /// New frame with `pixels` replacing this frame's pixels; the delay is carried over.
    pub fn with_pixels(&self, pixels: RgbaImage) -> Self {
        Self {
            pixels,
            delay: self.delay,
        }
    }

    /// Consume the frame and return its pixel buffer.
    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }
}

/// Ordered frames of one animation, or a single static image as a length-1 case.
///
/// Order is the only carrier of temporal meaning.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSequence {
    frames: Vec<RasterFrame>,
}

impl FrameSequence {
    /// Build a sequence; at least one frame is required.
    pub fn new(frames: Vec<RasterFrame>) -> TileResult<Self> {
        if frames.is_empty() {
            return Err(TileError::decode("frame sequence must contain at least one frame"));
        }
        Ok(Self { frames })
    }

    /// Single-frame sequence holding a static image.
    pub fn single(frame: RasterFrame) -> Self {
        Self {
            frames: vec![frame],
        }
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` if the sequence has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Borrow the frames in order.
    pub fn frames(&self) -> &[RasterFrame] {
        &self.frames
    }

    /// Iterate frames in order.
    pub fn iter(&self) -> std::slice::Iter<'_, RasterFrame> {
        self.frames.iter()
    }

    /// Per-frame delays in order.
    pub fn delays(&self) -> Vec<Option<DelayCs>> {
        self.frames.iter().map(RasterFrame::delay).collect()
    }

    /// Shared `(width, height)` of all frames, or `None` if frames disagree (or there are none).
    pub fn uniform_dimensions(&self) -> Option<(u32, u32)> {
        let first = self.frames.first()?.dimensions();
        self.frames
            .iter()
            .all(|f| f.dimensions() == first)
            .then_some(first)
    }

    /// Consume the sequence and return its frames.
    pub fn into_frames(self) -> Vec<RasterFrame> {
        self.frames
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = &'a RasterFrame;
    type IntoIter = std::slice::Iter<'a, RasterFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Logical grid of output tiles: `columns × rows`, both positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct GridShape {
    pub columns: u32,
    pub rows: u32,
}

impl GridShape {
    /// Build a grid shape; both sides must be non-zero.
    pub fn new(columns: u32, rows: u32) -> TileResult<Self> {
        if columns == 0 || rows == 0 {
            return Err(TileError::config(format!(
                "grid shape must be positive, got {columns}x{rows}"
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Square `n × n` grid.
    pub fn square(n: u32) -> TileResult<Self> {
        Self::new(n, n)
    }

    /// Number of tiles (`columns * rows`).
    pub fn tile_count(self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Tile coordinates in canonical row-major order (row outer, column inner).
    pub fn coords(self) -> impl Iterator<Item = TileCoord> {
        (0..self.rows)
            .flat_map(move |row| (0..self.columns).map(move |column| TileCoord { column, row }))
    }

    /// Pixel size of the whole grid for square cells of `cell_size`.
    pub fn pixel_size(self, cell_size: u32) -> TileResult<(u32, u32)> {
        let w = self.columns.checked_mul(cell_size);
        let h = self.rows.checked_mul(cell_size);
        match (w, h) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Ok((w, h)),
            _ => Err(TileError::config(format!(
                "grid {}x{} with cell size {cell_size} has no valid pixel size",
                self.columns, self.rows
            ))),
        }
    }
}

impl FromStr for GridShape {
    type Err = TileError;

    /// Accepts `N`, `W,H` or `WxH`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse_side = |v: &str| -> TileResult<u32> {
            v.trim()
                .parse::<u32>()
                .map_err(|_| TileError::config(format!("invalid grid shape '{s}'")))
        };

        let parts: Vec<&str> = s.split([',', 'x', 'X']).collect();
        match parts.as_slice() {
            [n] => Self::square(parse_side(n)?),
            [w, h] => Self::new(parse_side(w)?, parse_side(h)?),
            _ => Err(TileError::config(format!("invalid grid shape '{s}'"))),
        }
    }
}

impl std::fmt::Display for GridShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// Position of one tile in a [`GridShape`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileCoord {
    pub column: u32,
    pub row: u32,
}

impl TileCoord {
    /// Zero-based index of this tile in canonical row-major order.
    pub fn index(self, grid: GridShape) -> usize {
        self.row as usize * grid.columns as usize + self.column as usize
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
