use image::RgbaImage;

/// Multiply `img`'s alpha by the mask weight, with the mask anchored at the origin.
///
/// A mask pixel's weight is the mean of its RGB channels scaled by its own alpha, so both
/// white-on-black and alpha-cutout masks work. Pixels outside the mask are left untouched.
pub fn apply_mask(img: &RgbaImage, mask: &RgbaImage) -> RgbaImage {
    let mut out = img.clone();
    let w = img.width().min(mask.width());
    let h = img.height().min(mask.height());

    for y in 0..h {
        for x in 0..w {
            let m = mask.get_pixel(x, y);
            let mean = (u32::from(m[0]) + u32::from(m[1]) + u32::from(m[2])) / 3;
            let weight = (mean * u32::from(m[3]) + 127) / 255;

            let px = out.get_pixel_mut(x, y);
            px[3] = ((u32::from(px[3]) * weight + 127) / 255) as u8;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/transform/mask.rs"]
mod tests;
