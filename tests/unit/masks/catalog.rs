use image::Rgba;

use super::*;

fn write_mask(dir: &Path, name: &str, shade: u8) {
    RgbaImage::from_pixel(4, 4, Rgba([shade, shade, shade, 255]))
        .save(dir.join(name))
        .unwrap();
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_masks").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn numeric_prefix_maps_to_symbol() {
    assert_eq!(mask_name("0.png"), "a");
    assert_eq!(mask_name("25-zed.png"), "z");
    assert_eq!(mask_name("26.png"), "0");
    assert_eq!(mask_name("36.png"), "exclamation");
}

#[test]
fn out_of_range_prefix_keeps_digits_and_missing_prefix_keeps_stem() {
    assert_eq!(mask_name("999.png"), "999");
    assert_eq!(mask_name("44.png"), "44");
    assert_eq!(mask_name("99-star.png"), "99");
    assert_eq!(mask_name("circle.png"), "circle");
}

#[test]
fn load_dir_skips_hidden_files_and_orders_numerically() {
    let dir = scratch_dir("ordering");
    write_mask(&dir, "10.png", 10);
    write_mask(&dir, "2.png", 2);
    write_mask(&dir, "heart.png", 200);
    write_mask(&dir, ".hidden.png", 1);
    std::fs::write(dir.join(".DS_Store"), b"junk").unwrap();

    let catalog = MaskCatalog::load_dir(&dir).unwrap();
    let names: Vec<&str> = catalog.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["c", "k", "heart"]);
    assert_eq!(catalog.entries()[0].pixels.get_pixel(0, 0)[0], 2);
}

#[test]
fn empty_or_missing_directory_fails() {
    let dir = scratch_dir("empty");
    std::fs::write(dir.join(".keep"), b"").unwrap();
    assert!(matches!(
        MaskCatalog::load_dir(&dir),
        Err(TileError::Config(_))
    ));
    assert!(MaskCatalog::load_dir(&dir.join("nope")).is_err());
}

#[test]
fn colliding_mask_names_are_rejected() {
    let dir = scratch_dir("collision");
    write_mask(&dir, "0.png", 255);
    write_mask(&dir, "0-round.png", 128);
    write_mask(&dir, "1.png", 0);

    let err = MaskCatalog::load_dir(&dir).unwrap_err();
    assert!(matches!(err, TileError::Config(_)));
    assert!(err.to_string().contains("'a'"));
}

#[test]
fn distinct_names_load_one_entry_per_file() {
    let dir = scratch_dir("distinct");
    write_mask(&dir, "0-round.png", 255);
    write_mask(&dir, "50-big.png", 10);
    write_mask(&dir, "round.png", 0);

    let catalog = MaskCatalog::load_dir(&dir).unwrap();
    let names: Vec<&str> = catalog.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["a", "50", "round"]);
}
