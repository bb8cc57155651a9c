use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, Rgba, RgbaImage};

use crate::encode::output::{OutputDescriptor, OutputFormat};
use crate::foundation::core::FrameSequence;
use crate::foundation::error::{TileError, TileResult};

/// Default GIF quantizer speed (1 = best palette, 30 = fastest).
pub const DEFAULT_GIF_SPEED: i32 = 10;

/// Background used to flatten alpha for formats without an alpha channel.
pub const FLATTEN_BG: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Run-wide GIF encoder settings, applied identically to every animation of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GifSettings {
    speed: i32,
}

impl GifSettings {
    /// `speed` must be in `1..=30`.
    pub fn new(speed: i32) -> TileResult<Self> {
        if !(1..=30).contains(&speed) {
            return Err(TileError::config(format!(
                "gif quantizer speed must be in 1..=30, got {speed}"
            )));
        }
        Ok(Self { speed })
    }

    pub fn speed(self) -> i32 {
        self.speed
    }
}

impl Default for GifSettings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_GIF_SPEED,
        }
    }
}

/// Encode one tile's frames to `dir` as described by `desc` and return the written path.
///
/// Still formats need exactly one frame. GIF output honours each frame's delay and loops
/// forever.
pub fn encode_sequence(
    frames: &FrameSequence,
    desc: &OutputDescriptor,
    dir: &Path,
    gif: GifSettings,
) -> TileResult<PathBuf> {
    let path = desc.path_in(dir);
    match desc.format() {
        OutputFormat::Gif => write_gif(frames, &path, gif)?,
        still => {
            let [frame] = frames.frames() else {
                return Err(TileError::encode(format!(
                    "{}: {still:?} output needs exactly one frame, got {}",
                    desc.file_name(),
                    frames.len()
                )));
            };
            write_still(frame.pixels(), still, &path)?;
        }
    }
    tracing::debug!(path = %path.display(), frames = frames.len(), "wrote output");
    Ok(path)
}

fn write_still(img: &RgbaImage, format: OutputFormat, path: &Path) -> TileResult<()> {
    let dyn_img = match format {
        OutputFormat::Jpeg => DynamicImage::ImageRgb8(flatten(img)),
        _ => DynamicImage::ImageRgba8(img.clone()),
    };
    dyn_img
        .save_with_format(path, format.image_format())
        .map_err(|e| TileError::encode(format!("write '{}': {e}", path.display())))
}

fn write_gif(frames: &FrameSequence, path: &Path, gif: GifSettings) -> TileResult<()> {
    let mut buf = Vec::new();
    {
        let mut enc = GifEncoder::new_with_speed(&mut buf, gif.speed());
        enc.set_repeat(Repeat::Infinite)
            .map_err(|e| TileError::encode(format!("gif repeat: {e}")))?;

        for (idx, f) in frames.iter().enumerate() {
            let delay_ms = f.delay().map_or(0, |d| d.as_ms());
            let frame = Frame::from_parts(
                f.pixels().clone(),
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms, 1),
            );
            enc.encode_frame(frame)
                .map_err(|e| TileError::encode(format!("gif frame {idx}: {e}")))?;
        }
    }

    std::fs::write(path, &buf)
        .map_err(|e| TileError::encode(format!("write '{}': {e}", path.display())))
}

fn flatten(img: &RgbaImage) -> image::RgbImage {
    let [br, bg, bb, _] = FLATTEN_BG.0;
    image::RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0;
        let a = u16::from(a);
        let mix = |c: u8, bgc: u8| {
            ((u16::from(c) * a + u16::from(bgc) * (255 - a) + 127) / 255) as u8
        };
        image::Rgb([mix(r, br), mix(g, bg), mix(b, bb)])
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/writer.rs"]
mod tests;
