use super::*;
use crate::foundation::core::{Canvas, Rgba16};

#[test]
fn encodes_decodable_jpeg_of_same_size() {
    let raster = Raster::filled(Canvas::new(16, 8).unwrap(), Rgba16::opaque(65535, 0, 0));
    let bytes = encode_jpeg(&raster, DEFAULT_JPEG_QUALITY).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

    let back = image::load_from_memory_with_format(&bytes, image::ImageFormat::Jpeg)
        .unwrap()
        .to_rgb8();
    assert_eq!(back.dimensions(), (16, 8));
    let px = back.get_pixel(8, 4).0;
    assert!(px[0] > 240 && px[1] < 16 && px[2] < 16, "{px:?}");
}

#[test]
fn quality_out_of_range_is_rejected() {
    let raster = Raster::new(Canvas::new(1, 1).unwrap());
    assert!(encode_jpeg(&raster, 0).is_err());
    assert!(encode_jpeg(&raster, 101).is_err());
    assert!(encode_jpeg(&raster, 100).is_ok());
}
