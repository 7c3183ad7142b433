use super::*;

#[test]
fn widening_from_rgba8_hits_full_scale() {
    let c = Rgba16::from_rgba8([0, 1, 128, 255]);
    assert_eq!(c, Rgba16::new(0, 257, 32896, 65535));
}

#[test]
fn image_pixel_conversion_keeps_channel_order() {
    let c = Rgba16::new(1, 2, 3, 4);
    let px: image::Rgba<u16> = c.into();
    assert_eq!(px.0, [1, 2, 3, 4]);
    assert_eq!(Rgba16::from(px), c);
}

#[test]
fn canvas_rejects_empty_and_defaults_to_800() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (800, 800));
    assert_eq!(Canvas::new(3, 4).unwrap().area(), 12);
}
