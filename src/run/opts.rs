use std::path::PathBuf;

use crate::encode::writer::{DEFAULT_GIF_SPEED, GifSettings};
use crate::foundation::core::GridShape;
use crate::foundation::error::{TileError, TileResult};
use crate::transform::filters::FilterSpec;
use crate::transform::resize::ResizeMode;

/// Default edge length of one output tile, in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 64;
/// Default root for run output folders.
pub const DEFAULT_OUT_ROOT: &str = "out";
/// Default mask directory for the masked variant.
pub const DEFAULT_MASK_DIR: &str = "masks";

/// What a run produces: one output per grid cell, or one output per mask.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunMode {
    Grid { grid: GridShape },
    Masked { mask_dir: PathBuf },
}

impl Default for RunMode {
    fn default() -> Self {
        Self::Grid {
            grid: GridShape {
                columns: 1,
                rows: 1,
            },
        }
    }
}

/// Fully-resolved configuration of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOpts {
    /// Raw source locator (path or URL), possibly single-quoted.
    pub source: String,
    /// Run name: output subfolder and file name prefix.
    pub name: String,
    pub mode: RunMode,
    pub cell_size: u32,
    pub resize_mode: ResizeMode,
    pub filters: FilterSpec,
    pub out_root: PathBuf,
    /// GIF quantizer speed shared by every animation of the run.
    pub gif_speed: i32,
    /// Encoder worker threads; `None` uses the rayon default.
    pub threads: Option<usize>,
}

impl RunOpts {
    /// Options with defaults for everything but the source and name.
    pub fn new(source: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
            mode: RunMode::default(),
            cell_size: DEFAULT_CELL_SIZE,
            resize_mode: ResizeMode::default(),
            filters: FilterSpec::default(),
            out_root: PathBuf::from(DEFAULT_OUT_ROOT),
            gif_speed: DEFAULT_GIF_SPEED,
            threads: None,
        }
    }

    /// Check everything that can be checked without touching the source.
    pub fn validate(&self) -> TileResult<()> {
        let name = self.name.trim();
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(TileError::config(format!(
                "run name '{}' must be a plain, non-empty file name",
                self.name
            )));
        }
        if self.cell_size == 0 {
            return Err(TileError::config("cell size must be positive"));
        }
        if let RunMode::Grid { grid } = self.mode {
            GridShape::new(grid.columns, grid.rows)?.pixel_size(self.cell_size)?;
        }
        GifSettings::new(self.gif_speed)?;
        if self.threads == Some(0) {
            return Err(TileError::config("threads must be >= 1 when set"));
        }
        Ok(())
    }

    /// Folder that receives this run's outputs.
    pub fn out_dir(&self) -> PathBuf {
        self.out_root.join(self.name.trim())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/run/opts.rs"]
mod tests;
