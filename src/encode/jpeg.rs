use image::ImageEncoder;

use crate::{
    foundation::error::{PlanetError, PlanetResult},
    raster::buffer::Raster,
};

/// Default JPEG quality for finished renders.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Encode `raster` as baseline JPEG at `quality` (1..=100).
///
/// JPEG has no alpha channel; colors are narrowed to 8 bits and alpha is
/// discarded.
#[tracing::instrument(skip(raster), fields(width = raster.width(), height = raster.height()))]
pub fn encode_jpeg(raster: &Raster, quality: u8) -> PlanetResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(PlanetError::validation(format!(
            "jpeg quality must be in 1..=100, got {quality}"
        )));
    }
    let rgb = raster.to_rgb8();
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality)
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| PlanetError::encode(format!("jpeg: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/jpeg.rs"]
mod tests;
