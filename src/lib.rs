//! tilecraft turns one source image, static or animated, into a set of square emoji tiles.
//!
//! # Pipeline overview
//!
//! 1. **Source**: locator (path or URL) -> [`FrameSequence`] with per-frame GIF delays
//! 2. **Transform**: resize to the grid box, apply the [`FilterSpec`], optionally a mask, and
//!    posterize frames bound for GIF output
//! 3. **Partition**: slice each frame into `columns × rows` tiles of `cell_size` pixels
//! 4. **Aggregate**: regroup per-frame tiles into one [`FrameSequence`] per tile ([`TilePlan`])
//! 5. **Encode**: one still image or GIF per tile (or per mask in masked mode)
//!
//! [`run`] drives all of the above for a [`RunOpts`] and reports per-output failures in a
//! [`RunReport`] instead of aborting sibling outputs.
#![forbid(unsafe_code)]

mod encode;
mod foundation;
mod grid;
pub mod history;
mod masks;
mod run;
mod source;
mod transform;

pub use encode::output::{OutputDescriptor, OutputFormat};
pub use encode::writer::{DEFAULT_GIF_SPEED, GifSettings, encode_sequence};
pub use foundation::core::{DelayCs, FrameSequence, GridShape, RasterFrame, TileCoord};
pub use foundation::error::{TileError, TileResult};
pub use grid::partition::partition;
pub use grid::plan::TilePlan;
pub use history::{HistoryStore, InMemoryHistory, JsonHistoryStore};
pub use masks::catalog::{MASK_SYMBOLS, MaskCatalog, MaskEntry, mask_name};
pub use run::opts::{DEFAULT_CELL_SIZE, DEFAULT_MASK_DIR, DEFAULT_OUT_ROOT, RunMode, RunOpts};
pub use run::session::{RunReport, TileFailure, build_grid_plan, prepare_out_dir, run};
pub use source::decode::{decode_frames, load_frames};
pub use source::fetch::read_source_bytes;
pub use source::locator::{Locator, SUPPORTED_EXTENSIONS, SourceKind, SourceLocation};
pub use transform::filters::{FADE_FACTOR, FilterOp, FilterSpec, posterize};
pub use transform::mask::apply_mask;
pub use transform::pipeline::{GIF_POSTERIZE_LEVELS, TransformOpts, transform};
pub use transform::resize::{ResizeMode, resize_to};
