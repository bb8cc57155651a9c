use image::{Rgba, RgbaImage};

use crate::foundation::error::{TileError, TileResult};

/// Alpha multiplier applied by [`FilterOp::Fade`].
pub const FADE_FACTOR: f32 = 0.5;

/// One pixel-level filter with its parameter in operation units.
///
/// Operation units differ from the raw values a user types: see [`FilterOp::from_ui`] for the
/// conversion.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "filter", rename_all = "snake_case")]
pub enum FilterOp {
    /// `amount` in `[-1, 1]`; negative darkens towards black, positive lightens towards white.
    Brightness { amount: f32 },
    /// `amount` in `[-1, 1]`.
    Contrast { amount: f32 },
    Invert,
    Greyscale,
    Sepia,
    /// Per-channel min/max stretch to the full `0..=255` range.
    Normalize,
    /// Quantize every color channel to `levels` steps (values below 2 act as 2).
    Posterize { levels: u8 },
    Flip { horizontal: bool, vertical: bool },
    /// Clockwise rotation about the center; the canvas size is kept.
    Rotate { degrees: f32 },
    /// Alpha multiplied by [`FADE_FACTOR`].
    Fade,
    /// Alpha multiplied by `factor` in `[0, 1]`.
    Opacity { factor: f32 },
}

/// Ordered filter chain; filters compose left to right.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FilterSpec(pub Vec<FilterOp>);

impl FilterSpec {
    pub fn new(ops: Vec<FilterOp>) -> Self {
        Self(ops)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ops(&self) -> &[FilterOp] {
        &self.0
    }

    /// Build a chain from `(name, raw value)` pairs in user order.
    ///
    /// Unknown names are skipped with a warning.
    pub fn from_ui<'a>(
        pairs: impl IntoIterator<Item = (&'a str, Option<&'a str>)>,
    ) -> TileResult<Self> {
        let mut ops = Vec::new();
        for (name, raw) in pairs {
            if let Some(op) = FilterOp::from_ui(name, raw)? {
                ops.push(op);
            }
        }
        Ok(Self(ops))
    }

    /// Apply every filter in order.
    pub fn apply(&self, img: &RgbaImage) -> RgbaImage {
        let mut out = img.clone();
        for op in &self.0 {
            out = op.apply(&out);
        }
        out
    }
}

impl FilterOp {
    /// Parse a filter from its name and the raw value typed by the user.
    ///
    /// Raw ranges: brightness and contrast `[-100, 100]`, opacity `[0, 100]` (all divided by
    /// 100), posterize `[1, 255]` (used as is), rotate in degrees (used as is), flip one of
    /// `horizontal`, `vertical`, `both` (anything else flips nothing). The remaining filters take
    /// no value.
    ///
    /// Returns `Ok(None)` for an unknown filter name.
    pub fn from_ui(name: &str, raw: Option<&str>) -> TileResult<Option<Self>> {
        let name = name.trim().to_ascii_lowercase();
        let op = match name.as_str() {
            "brightness" => Self::Brightness {
                amount: ranged(&name, raw, -100.0, 100.0)? / 100.0,
            },
            "contrast" => Self::Contrast {
                amount: ranged(&name, raw, -100.0, 100.0)? / 100.0,
            },
            "opacity" => Self::Opacity {
                factor: ranged(&name, raw, 0.0, 100.0)? / 100.0,
            },
            "posterize" => Self::Posterize {
                levels: ranged(&name, raw, 1.0, 255.0)?.round() as u8,
            },
            "rotate" => Self::Rotate {
                degrees: number(&name, raw)?,
            },
            "flip" => {
                let (horizontal, vertical) = match raw.map(|v| v.trim().to_ascii_lowercase()) {
                    Some(v) if v == "horizontal" => (true, false),
                    Some(v) if v == "vertical" => (false, true),
                    Some(v) if v == "both" => (true, true),
                    _ => (false, false),
                };
                Self::Flip {
                    horizontal,
                    vertical,
                }
            }
            "invert" => Self::Invert,
            "greyscale" | "grayscale" => Self::Greyscale,
            "sepia" => Self::Sepia,
            "normalize" => Self::Normalize,
            "fade" => Self::Fade,
            _ => {
                tracing::warn!(filter = %name, "ignoring unknown filter");
                return Ok(None);
            }
        };
        Ok(Some(op))
    }

    /// Apply this filter, returning a new image of the same size.
    pub fn apply(&self, img: &RgbaImage) -> RgbaImage {
        match *self {
            Self::Brightness { amount } => {
                let amount = amount.clamp(-1.0, 1.0);
                map_rgb(img, |c| {
                    if amount < 0.0 {
                        c * (1.0 + amount)
                    } else {
                        c + (255.0 - c) * amount
                    }
                })
            }
            Self::Contrast { amount } => {
                let amount = amount.clamp(-1.0, 1.0);
                let factor = if amount >= 1.0 {
                    255.0
                } else {
                    (amount + 1.0) / (1.0 - amount)
                };
                map_rgb(img, |c| factor * (c - 127.0) + 127.0)
            }
            Self::Invert => map_rgb(img, |c| 255.0 - c),
            Self::Greyscale => map_pixels(img, |[r, g, b, a]| {
                let y = 0.2126 * r + 0.7152 * g + 0.0722 * b;
                [y, y, y, a]
            }),
            Self::Sepia => map_pixels(img, |[r, g, b, a]| {
                [
                    r * 0.393 + g * 0.769 + b * 0.189,
                    r * 0.349 + g * 0.686 + b * 0.168,
                    r * 0.272 + g * 0.534 + b * 0.131,
                    a,
                ]
            }),
            Self::Normalize => normalize(img),
            Self::Posterize { levels } => posterize(img, levels),
            Self::Flip {
                horizontal,
                vertical,
            } => {
                let mut out = img.clone();
                if horizontal {
                    image::imageops::flip_horizontal_in_place(&mut out);
                }
                if vertical {
                    image::imageops::flip_vertical_in_place(&mut out);
                }
                out
            }
            Self::Rotate { degrees } => rotate(img, degrees),
            Self::Fade => scale_alpha(img, FADE_FACTOR),
            Self::Opacity { factor } => scale_alpha(img, factor.clamp(0.0, 1.0)),
        }
    }
}

/// Quantize every color channel of `img` to `levels` steps.
pub fn posterize(img: &RgbaImage, levels: u8) -> RgbaImage {
    let steps = f32::from(levels.max(2) - 1);
    map_rgb(img, |c| (c / 255.0 * steps).floor() / steps * 255.0)
}

fn number(name: &str, raw: Option<&str>) -> TileResult<f32> {
    let raw = raw.ok_or_else(|| TileError::config(format!("filter '{name}' needs a value")))?;
    let v: f32 = raw
        .trim()
        .parse()
        .map_err(|_| TileError::config(format!("filter '{name}' value '{raw}' is not a number")))?;
    if !v.is_finite() {
        return Err(TileError::config(format!(
            "filter '{name}' value must be finite"
        )));
    }
    Ok(v)
}

fn ranged(name: &str, raw: Option<&str>, min: f32, max: f32) -> TileResult<f32> {
    let v = number(name, raw)?;
    if !(min..=max).contains(&v) {
        return Err(TileError::config(format!(
            "filter '{name}' value {v} is outside [{min}, {max}]"
        )));
    }
    Ok(v)
}

fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn map_pixels(img: &RgbaImage, f: impl Fn([f32; 4]) -> [f32; 4]) -> RgbaImage {
    let mut out = img.clone();
    for px in out.pixels_mut() {
        let [r, g, b, a] = px.0.map(f32::from);
        *px = Rgba(f([r, g, b, a]).map(to_u8));
    }
    out
}

fn map_rgb(img: &RgbaImage, f: impl Fn(f32) -> f32) -> RgbaImage {
    map_pixels(img, |[r, g, b, a]| [f(r), f(g), f(b), a])
}

fn scale_alpha(img: &RgbaImage, factor: f32) -> RgbaImage {
    map_pixels(img, |[r, g, b, a]| [r, g, b, a * factor])
}

fn normalize(img: &RgbaImage) -> RgbaImage {
    let mut lo = [u8::MAX; 3];
    let mut hi = [u8::MIN; 3];
    for px in img.pixels() {
        for ch in 0..3 {
            lo[ch] = lo[ch].min(px[ch]);
            hi[ch] = hi[ch].max(px[ch]);
        }
    }

    let mut out = img.clone();
    for px in out.pixels_mut() {
        for ch in 0..3 {
            if hi[ch] > lo[ch] {
                let span = f32::from(hi[ch] - lo[ch]);
                px[ch] = to_u8(f32::from(px[ch] - lo[ch]) / span * 255.0);
            }
        }
    }
    out
}

fn rotate(img: &RgbaImage, degrees: f32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let (sin, cos) = f64::from(degrees).to_radians().sin_cos();
    let cx = f64::from(w) / 2.0;
    let cy = f64::from(h) / 2.0;

    RgbaImage::from_fn(w, h, |x, y| {
        let dx = f64::from(x) + 0.5 - cx;
        let dy = f64::from(y) + 0.5 - cy;
        let sx = (cos * dx + sin * dy + cx).floor();
        let sy = (-sin * dx + cos * dy + cy).floor();
        if sx < 0.0 || sy < 0.0 || sx >= f64::from(w) || sy >= f64::from(h) {
            Rgba([0, 0, 0, 0])
        } else {
            *img.get_pixel(sx as u32, sy as u32)
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/transform/filters.rs"]
mod tests;
