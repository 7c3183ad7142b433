use anyhow::Context;

use crate::{foundation::error::PlanetResult, raster::source::TileImage};

/// Decode encoded tile bytes and widen to 16-bit RGBA.
///
/// 8-bit channels are scaled by 257 so full intensity maps to 65535.
pub fn decode_tile(bytes: &[u8]) -> PlanetResult<TileImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode tile from memory")?;
    Ok(dyn_img.to_rgba16())
}

#[cfg(test)]
#[path = "../../tests/unit/panorama/decode.rs"]
mod tests;
