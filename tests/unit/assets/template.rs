use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(2, 1, vec![100, 50, 200, 128, 1, 2, 3, 255]).unwrap();
    let t = TemplateImage::decode(&png_bytes(img)).unwrap();
    assert_eq!(
        t.size(),
        Size {
            width: 2,
            height: 1
        }
    );
    assert_eq!(
        t.premul_pixels(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128,
            1,
            2,
            3,
            255
        ]
    );
}

#[test]
fn load_missing_file_is_asset_not_found() {
    let err = TemplateImage::load(Path::new("no/such/template.png")).unwrap_err();
    assert!(matches!(err, CertError::AssetNotFound(p) if p.ends_with("template.png")));
}

#[test]
fn load_garbage_is_asset_error() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("broken.png");
    std::fs::write(&p, b"not an image").unwrap();
    let err = TemplateImage::load(&p).unwrap_err();
    assert!(matches!(err, CertError::Asset(msg) if msg.contains("broken.png")));
}
