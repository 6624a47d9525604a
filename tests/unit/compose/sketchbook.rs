use std::io::Cursor;
use std::path::PathBuf;

use super::*;
use crate::foundation::error::ErrorKind;

const WHITE: [u8; 4] = [255, 255, 255, 255];
const YELLOW: [u8; 4] = [250, 220, 0, 255];
const RED: [u8; 4] = [255, 0, 0, 255];

fn png(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

/// Fixture tree under `target/<name>` with two 64x64 templates and no overlay file.
fn fixture(name: &str) -> SketchbookConfig {
    let root = PathBuf::from("target").join(name);
    let images = root.join("BaseImages");
    std::fs::create_dir_all(&images).unwrap();
    std::fs::write(images.join("base.png"), png(64, 64, WHITE)).unwrap();
    std::fs::write(images.join("开心.png"), png(64, 64, YELLOW)).unwrap();

    let json = r#"{
        "text_box": { "top_left": [8, 8], "bottom_right": [56, 56] },
        "image": { "padding": 0 }
    }"#;
    SketchbookConfig::from_reader(json.as_bytes())
        .unwrap()
        .with_base_dir(root)
}

fn pixel(png_bytes: &[u8], x: u32, y: u32) -> [u8; 4] {
    image::load_from_memory(png_bytes).unwrap().to_rgba8().get_pixel(x, y).0
}

fn sketchbook(name: &str) -> Sketchbook {
    Sketchbook::with_fonts(fixture(name), FontLibrary::from_bytes(Vec::new())).unwrap()
}

#[test]
fn nothing_to_draw_is_rejected_before_any_io() {
    let sb = Sketchbook::with_fonts(
        SketchbookConfig::default().with_base_dir("target/sketchbook_unit_nowhere"),
        FontLibrary::from_bytes(Vec::new()),
    )
    .unwrap();
    for text in ["", "   ", "\n"] {
        let err = sb.generate(text, None, "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoContentSupplied);
    }
    let err = sb.generate("#开心#", None, "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoContentSupplied);
}

#[test]
fn picture_lands_in_the_box_on_the_default_template() {
    let sb = sketchbook("sketchbook_unit_picture");
    assert!(!sb.has_overlay());

    let out = sb.generate("", Some(png(48, 48, RED).as_slice()), "").unwrap();
    assert_eq!(pixel(&out, 0, 0), WHITE);
    assert_eq!(pixel(&out, 32, 32), RED);
    assert_eq!(pixel(&out, 60, 60), WHITE);
}

#[test]
fn tag_in_text_switches_template() {
    let sb = sketchbook("sketchbook_unit_text_tag");
    let out = sb.generate("#开心# hi", Some(png(48, 48, RED).as_slice()), "").unwrap();
    assert_eq!(pixel(&out, 0, 0), YELLOW);
}

#[test]
fn explicit_emotion_switches_template() {
    let sb = sketchbook("sketchbook_unit_explicit");
    let out = sb.generate("", Some(png(48, 48, RED).as_slice()), "#开心#").unwrap();
    assert_eq!(pixel(&out, 0, 0), YELLOW);

    let out = sb.generate("", Some(png(48, 48, RED).as_slice()), "#不存在#").unwrap();
    assert_eq!(pixel(&out, 0, 0), WHITE);
}

#[test]
fn undecodable_picture_is_unreadable_image() {
    let sb = sketchbook("sketchbook_unit_garbage");
    let err = sb.generate("", Some(b"definitely not an image".as_slice()), "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnreadableImage);
    let err = sb.generate("text", Some(&[][..]), "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnreadableImage);
}

#[test]
fn missing_template_is_unreadable_image() {
    let sb = sketchbook("sketchbook_unit_missing_template");
    // #生气# maps to a file the fixture never wrote.
    let err = sb.generate("", Some(png(48, 48, RED).as_slice()), "#生气#").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnreadableImage);
}

#[test]
fn degenerate_box_is_invalid_region() {
    let mut cfg = fixture("sketchbook_unit_bad_box");
    cfg.text_box.bottom_right = [8, 56];
    let sb = Sketchbook::with_fonts(cfg, FontLibrary::from_bytes(Vec::new())).unwrap();
    let err = sb.generate("", Some(png(48, 48, RED).as_slice()), "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRegion);
}

#[test]
fn emotions_are_listed_in_config_order() {
    let sb = sketchbook("sketchbook_unit_emotions");
    assert_eq!(
        sb.emotions(),
        ["#普通#", "#开心#", "#生气#", "#无语#", "#脸红#", "#病娇#"]
    );
}

#[test]
fn sketchbook_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Sketchbook>();
}
