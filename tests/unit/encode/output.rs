use super::*;

#[test]
fn single_output_has_no_suffix() {
    let d = OutputDescriptor::for_tile("party", 0, 1, OutputFormat::Png, "png");
    assert_eq!(d.file_name(), "party.png");
}

#[test]
fn tiles_are_suffixed_from_one() {
    let names: Vec<String> = (0..6)
        .map(|i| OutputDescriptor::for_tile("party", i, 6, OutputFormat::Png, "PNG").file_name())
        .collect();
    assert_eq!(
        names,
        [
            "party-1.png",
            "party-2.png",
            "party-3.png",
            "party-4.png",
            "party-5.png",
            "party-6.png"
        ]
    );
}

#[test]
fn gif_outputs_always_use_gif_extension() {
    let d = OutputDescriptor::new("wave", "a", 3, OutputFormat::Gif, "png");
    assert_eq!(d.file_name(), "wave-a.gif");
    assert_eq!(
        d.path_in(Path::new("out/wave")),
        PathBuf::from("out/wave/wave-a.gif")
    );
}

#[test]
fn still_sources_keep_their_format_and_spelling() {
    let jpg = Locator::parse("cat.jpg").unwrap();
    assert_eq!(OutputFormat::for_source(&jpg).unwrap(), OutputFormat::Jpeg);
    let d = OutputDescriptor::for_tile("cat", 1, 4, OutputFormat::Jpeg, jpg.extension());
    assert_eq!(d.file_name(), "cat-2.jpg");

    let gif = Locator::parse("dance.gif").unwrap();
    assert_eq!(OutputFormat::for_source(&gif).unwrap(), OutputFormat::Gif);

    assert!(OutputFormat::from_extension("tiff").is_err());
}
