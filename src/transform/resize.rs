use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Policy for mapping a source aspect ratio onto a fixed target box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    /// Non-uniform scale to the exact target size.
    Stretch,
    /// Uniform scale until the target is fully covered, then center-crop.
    #[default]
    Cover,
    /// Uniform scale until the image fits, then center on a transparent canvas.
    Contain,
}

const FILTER: FilterType = FilterType::Triangle;

/// Resize `src` to exactly `target_w × target_h` using `mode`.
///
/// Callers validate that both target sides are non-zero.
pub fn resize_to(src: &RgbaImage, mode: ResizeMode, target_w: u32, target_h: u32) -> RgbaImage {
    let (w, h) = src.dimensions();
    if (w, h) == (target_w, target_h) {
        return src.clone();
    }
    if w == 0 || h == 0 {
        return RgbaImage::new(target_w, target_h);
    }

    match mode {
        ResizeMode::Stretch => imageops::resize(src, target_w, target_h, FILTER),
        ResizeMode::Cover => cover(src, target_w, target_h),
        ResizeMode::Contain => contain(src, target_w, target_h),
    }
}

fn cover(src: &RgbaImage, target_w: u32, target_h: u32) -> RgbaImage {
    let (w, h) = src.dimensions();
    let scale = (f64::from(target_w) / f64::from(w)).max(f64::from(target_h) / f64::from(h));
    let scaled_w = scaled_side(w, scale, f64::ceil).max(target_w);
    let scaled_h = scaled_side(h, scale, f64::ceil).max(target_h);

    let scaled = imageops::resize(src, scaled_w, scaled_h, FILTER);
    let x = (scaled_w - target_w) / 2;
    let y = (scaled_h - target_h) / 2;
    imageops::crop_imm(&scaled, x, y, target_w, target_h).to_image()
}

fn contain(src: &RgbaImage, target_w: u32, target_h: u32) -> RgbaImage {
    let (w, h) = src.dimensions();
    let scale = (f64::from(target_w) / f64::from(w)).min(f64::from(target_h) / f64::from(h));
    let scaled_w = scaled_side(w, scale, f64::round).clamp(1, target_w);
    let scaled_h = scaled_side(h, scale, f64::round).clamp(1, target_h);

    let scaled = imageops::resize(src, scaled_w, scaled_h, FILTER);
    let mut canvas = RgbaImage::new(target_w, target_h);
    let x = (target_w - scaled_w) / 2;
    let y = (target_h - scaled_h) / 2;
    imageops::replace(&mut canvas, &scaled, i64::from(x), i64::from(y));
    canvas
}

fn scaled_side(side: u32, scale: f64, round: fn(f64) -> f64) -> u32 {
    let v = round(f64::from(side) * scale);
    if v >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        v.max(1.0) as u32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/resize.rs"]
mod tests;
