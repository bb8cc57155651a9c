use super::*;

fn solid(c: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(4, 4, Rgba(c))
}

fn op(name: &str, raw: Option<&str>) -> FilterOp {
    FilterOp::from_ui(name, raw).unwrap().unwrap()
}

#[test]
fn ui_values_are_normalized() {
    assert_eq!(op("brightness", Some("50")), FilterOp::Brightness { amount: 0.5 });
    assert_eq!(op("Contrast", Some("-25")), FilterOp::Contrast { amount: -0.25 });
    assert_eq!(op("opacity", Some("40")), FilterOp::Opacity { factor: 0.4 });
    assert_eq!(op("posterize", Some("8")), FilterOp::Posterize { levels: 8 });
    assert_eq!(op("rotate", Some("90")), FilterOp::Rotate { degrees: 90.0 });
    assert_eq!(op("grayscale", None), FilterOp::Greyscale);
    assert_eq!(op("fade", None), FilterOp::Fade);
}

#[test]
fn flip_values_map_to_axes() {
    let flip = |v: &str| op("flip", Some(v));
    assert_eq!(
        flip("horizontal"),
        FilterOp::Flip {
            horizontal: true,
            vertical: false
        }
    );
    assert_eq!(
        flip("vertical"),
        FilterOp::Flip {
            horizontal: false,
            vertical: true
        }
    );
    assert_eq!(
        flip("both"),
        FilterOp::Flip {
            horizontal: true,
            vertical: true
        }
    );
    let noop = flip("sideways");
    let img = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8, y as u8, 0, 255]));
    assert_eq!(noop.apply(&img), img);
}

#[test]
fn unknown_filters_are_ignored_and_bad_values_rejected() {
    assert_eq!(FilterOp::from_ui("sharpen", Some("3")).unwrap(), None);

    for (name, raw) in [
        ("brightness", Some("101")),
        ("opacity", Some("-1")),
        ("posterize", Some("0")),
        ("contrast", None),
        ("rotate", Some("ninety")),
        ("rotate", Some("inf")),
    ] {
        let err = FilterOp::from_ui(name, raw).unwrap_err();
        assert!(matches!(err, TileError::Config(_)), "{name}: {err}");
    }

    let spec = FilterSpec::from_ui([("invert", None), ("blur", Some("2")), ("sepia", None)]).unwrap();
    assert_eq!(spec.ops(), &[FilterOp::Invert, FilterOp::Sepia]);
}

#[test]
fn filter_order_matters() {
    let img = solid([100, 100, 100, 255]);
    let bright = FilterOp::Brightness { amount: 0.5 };

    let a = FilterSpec::new(vec![bright, FilterOp::Invert]).apply(&img);
    let b = FilterSpec::new(vec![FilterOp::Invert, bright]).apply(&img);

    assert_eq!(a.get_pixel(0, 0)[0], 255 - 178);
    assert_eq!(b.get_pixel(0, 0)[0], 205);
    assert_ne!(a, b);
}

#[test]
fn brightness_and_contrast_extremes() {
    let img = solid([100, 150, 200, 255]);
    let dark = FilterOp::Brightness { amount: -1.0 }.apply(&img);
    assert_eq!(dark.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));

    let flat = FilterOp::Contrast { amount: -1.0 }.apply(&img);
    assert_eq!(flat.get_pixel(0, 0), &Rgba([127, 127, 127, 255]));

    let hard = FilterOp::Contrast { amount: 1.0 }.apply(&img);
    assert_eq!(hard.get_pixel(0, 0), &Rgba([0, 255, 255, 255]));
}

#[test]
fn colour_filters_leave_alpha_alone() {
    let img = solid([10, 200, 60, 77]);
    for f in [FilterOp::Invert, FilterOp::Greyscale, FilterOp::Sepia, FilterOp::Normalize] {
        assert_eq!(f.apply(&img).get_pixel(1, 1)[3], 77, "{f:?}");
    }
    let grey = FilterOp::Greyscale.apply(&img);
    let px = grey.get_pixel(0, 0);
    assert_eq!(px[0], px[1]);
    assert_eq!(px[1], px[2]);
}

#[test]
fn opacity_and_fade_scale_alpha() {
    let img = solid([1, 2, 3, 200]);
    assert_eq!(FilterOp::Opacity { factor: 0.25 }.apply(&img).get_pixel(0, 0)[3], 50);
    assert_eq!(FilterOp::Fade.apply(&img).get_pixel(0, 0)[3], 100);
}

#[test]
fn posterize_quantizes_channels() {
    let img = RgbaImage::from_fn(256, 1, |x, _| Rgba([x as u8, x as u8, x as u8, 255]));
    let out = posterize(&img, 2);
    assert!(out.pixels().all(|p| p[0] == 0 || p[0] == 255));

    let out = posterize(&img, 15);
    let mut distinct: Vec<u8> = out.pixels().map(|p| p[0]).collect();
    distinct.dedup();
    assert_eq!(distinct.len(), 15);

    // Levels below two behave like two.
    assert_eq!(posterize(&img, 1), posterize(&img, 2));
}

#[test]
fn normalize_stretches_each_channel() {
    let img = RgbaImage::from_fn(2, 1, |x, _| {
        if x == 0 {
            Rgba([50, 10, 7, 255])
        } else {
            Rgba([150, 20, 7, 255])
        }
    });
    let out = FilterOp::Normalize.apply(&img);
    assert_eq!(out.get_pixel(0, 0), &Rgba([0, 0, 7, 255]));
    assert_eq!(out.get_pixel(1, 0), &Rgba([255, 255, 7, 255]));
}

#[test]
fn rotate_quarter_turn_moves_corner_clockwise() {
    let mut img = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 255]));
    img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));

    let out = FilterOp::Rotate { degrees: 90.0 }.apply(&img);
    assert_eq!(out.dimensions(), (3, 3));
    assert_eq!(out.get_pixel(2, 0), &Rgba([255, 0, 0, 255]));
    assert_eq!(out.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
}

#[test]
fn rotate_off_canvas_is_transparent() {
    let img = solid([9, 9, 9, 255]);
    let out = FilterOp::Rotate { degrees: 45.0 }.apply(&img);
    assert_eq!(out.get_pixel(0, 0)[3], 0);
    assert_eq!(out.get_pixel(2, 2)[3], 255);
}

#[test]
fn spec_round_trips_through_json() {
    let spec = FilterSpec::new(vec![
        FilterOp::Brightness { amount: 0.5 },
        FilterOp::Flip {
            horizontal: true,
            vertical: false,
        },
        FilterOp::Invert,
    ]);
    let json = serde_json::to_string(&spec).unwrap();
    assert!(json.starts_with(r#"[{"filter":"brightness""#));
    let back: FilterSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(back, spec);
}
