use image::Rgba;

use super::*;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

#[test]
fn every_mode_hits_exact_target_size() {
    let src = RgbaImage::from_pixel(300, 120, RED);
    for mode in [ResizeMode::Stretch, ResizeMode::Cover, ResizeMode::Contain] {
        for (tw, th) in [(64, 64), (128, 64), (17, 93)] {
            let out = resize_to(&src, mode, tw, th);
            assert_eq!(out.dimensions(), (tw, th), "{mode:?} {tw}x{th}");
        }
    }
}

#[test]
fn contain_letterboxes_with_transparency() {
    // 2:1 source into a square box leaves transparent bands top and bottom.
    let src = RgbaImage::from_pixel(200, 100, RED);
    let out = resize_to(&src, ResizeMode::Contain, 64, 64);
    assert_eq!(out.get_pixel(32, 0)[3], 0);
    assert_eq!(out.get_pixel(32, 63)[3], 0);
    assert_eq!(out.get_pixel(32, 32), &RED);
}

#[test]
fn cover_fills_the_whole_box() {
    let src = RgbaImage::from_pixel(200, 100, RED);
    let out = resize_to(&src, ResizeMode::Cover, 64, 64);
    assert!(out.pixels().all(|p| p[3] == 255));
}

#[test]
fn cover_crops_from_the_center() {
    // Left half black, right half white; a square crop from the center keeps both.
    let mut src = RgbaImage::from_pixel(400, 100, Rgba([0, 0, 0, 255]));
    for y in 0..100 {
        for x in 200..400 {
            src.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
    }
    let out = resize_to(&src, ResizeMode::Cover, 10, 10);
    assert_eq!(out.get_pixel(0, 5)[0], 0);
    assert_eq!(out.get_pixel(9, 5)[0], 255);
}

#[test]
fn matching_size_is_a_copy() {
    let src = RgbaImage::from_pixel(5, 7, RED);
    assert_eq!(resize_to(&src, ResizeMode::Stretch, 5, 7), src);
}
