use super::*;

#[test]
fn centered_origin_keeps_short_text_on_canvas() {
    let canvas = 1200u32;
    for w in [0.0f32, 1.0, 37.5, 599.0, 600.0, 1199.0, 1200.0] {
        let x = centered_origin(canvas, w);
        assert!(x >= 0.0, "origin {x} for width {w}");
        assert!(x + w <= canvas as f32, "overflow for width {w}");
        assert!(((canvas as f32 - (x + w)) - x).abs() < 1e-3);
    }
}

#[test]
fn centered_origin_overflows_evenly_for_wide_text() {
    assert_eq!(centered_origin(100, 140.0), -20.0);
}

#[test]
fn rgb8_serializes_as_triple() {
    let c = Rgb8::new(50, 89, 158);
    let s = serde_json::to_string(&c).unwrap();
    assert_eq!(s, "[50,89,158]");
    let back: Rgb8 = serde_json::from_str(&s).unwrap();
    assert_eq!(back, c);
}

#[test]
fn size_to_u16_rejects_oversized() {
    assert_eq!(
        Size {
            width: 64,
            height: 32
        }
        .to_u16()
        .unwrap(),
        (64, 32)
    );
    assert!(
        Size {
            width: 70_000,
            height: 1
        }
        .to_u16()
        .is_err()
    );
}
