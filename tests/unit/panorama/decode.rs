use std::io::Cursor;

use super::*;
use crate::raster::source::PixelSource;

#[test]
fn decode_png_widens_to_16_bit() {
    let img = image::RgbaImage::from_raw(2, 1, vec![255, 0, 128, 255, 1, 2, 3, 0]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let tile = decode_tile(&buf).unwrap();
    assert_eq!(PixelSource::dimensions(&tile), (2, 1));
    assert_eq!(tile.pixel(0, 0).to_array(), [65535, 0, 128 * 257, 65535]);
    assert_eq!(tile.pixel(1, 0).to_array(), [257, 514, 771, 0]);
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(decode_tile(b"definitely not an image").is_err());
    assert!(decode_tile(&[]).is_err());
}
