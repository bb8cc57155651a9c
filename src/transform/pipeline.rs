use image::RgbaImage;

use crate::encode::output::OutputFormat;
use crate::foundation::core::RasterFrame;
use crate::foundation::error::{TileError, TileResult};
use crate::transform::filters::{FilterSpec, posterize};
use crate::transform::mask::apply_mask;
use crate::transform::resize::{ResizeMode, resize_to};

/// Posterize levels forced on every frame headed for an animated GIF.
///
/// Palette reduction of arbitrary RGBA without this step bands visibly.
pub const GIF_POSTERIZE_LEVELS: u8 = 15;

/// Per-run transform settings shared by every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformOpts {
    resize_mode: ResizeMode,
    target_width: u32,
    target_height: u32,
    filters: FilterSpec,
    output: OutputFormat,
}

impl TransformOpts {
    /// Validate and build transform settings. Zero target sides are a config error.
    pub fn new(
        resize_mode: ResizeMode,
        target_width: u32,
        target_height: u32,
        filters: FilterSpec,
        output: OutputFormat,
    ) -> TileResult<Self> {
        if target_width == 0 || target_height == 0 {
            return Err(TileError::config(format!(
                "resize target must be positive, got {target_width}x{target_height}"
            )));
        }
        Ok(Self {
            resize_mode,
            target_width,
            target_height,
            filters,
            output,
        })
    }

    pub fn target_size(&self) -> (u32, u32) {
        (self.target_width, self.target_height)
    }

    pub fn output(&self) -> OutputFormat {
        self.output
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }
}

/// Resize, filter, optionally mask, and apply format accommodations to one frame.
///
/// Pure: the input frame is not modified and the delay is carried to the result.
pub fn transform(
    frame: &RasterFrame,
    opts: &TransformOpts,
    mask: Option<&RgbaImage>,
) -> RasterFrame {
    let mut img = resize_to(
        frame.pixels(),
        opts.resize_mode,
        opts.target_width,
        opts.target_height,
    );

    if !opts.filters.is_empty() {
        img = opts.filters.apply(&img);
    }

    if let Some(mask) = mask {
        img = apply_mask(&img, mask);
    }

    if opts.output == OutputFormat::Gif {
        img = posterize(&img, GIF_POSTERIZE_LEVELS);
    }

    frame.with_pixels(img)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/pipeline.rs"]
mod tests;
