use std::io::Read;

use serde::Deserialize;

use crate::{
    foundation::error::{PlanetError, PlanetResult},
    foundation::math::ceil_div,
};

/// Panorama details needed to enumerate and download its tiles.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PanoramaDetails {
    /// Full-resolution image width.
    pub image_width: u32,
    /// Full-resolution image height.
    pub image_height: u32,
    /// Nominal tile width.
    pub tile_width: u32,
    /// Nominal tile height.
    pub tile_height: u32,
    /// Server-side panorama identifier.
    pub pano_id: String,
}

impl PanoramaDetails {
    /// Validate dimensions and build a descriptor.
    pub fn new(
        image_width: u32,
        image_height: u32,
        tile_width: u32,
        tile_height: u32,
        pano_id: impl Into<String>,
    ) -> PlanetResult<Self> {
        if image_width == 0 || image_height == 0 {
            return Err(PlanetError::validation("image dimensions must be > 0"));
        }
        if tile_width == 0 || tile_height == 0 {
            return Err(PlanetError::validation("tile dimensions must be > 0"));
        }
        Ok(Self {
            image_width,
            image_height,
            tile_width,
            tile_height,
            pano_id: pano_id.into(),
        })
    }

    /// Zoom level at which the image is served at full resolution.
    ///
    /// Zoom 0 fits the whole image in one tile, so this is
    /// `ceil(log2(image / tile))` over the larger of the two axis ratios,
    /// never below zero.
    pub fn max_zoom(&self) -> u32 {
        let x = (f64::from(self.image_width) / f64::from(self.tile_width)).log2();
        let y = (f64::from(self.image_height) / f64::from(self.tile_height)).log2();
        x.max(y).ceil().max(0.0) as u32
    }

    /// Image dimensions at `zoom`: full size halved once per level below max.
    pub fn size_at_zoom(&self, zoom: u32) -> PlanetResult<(u32, u32)> {
        let max = self.max_zoom();
        if zoom > max {
            return Err(PlanetError::validation(format!(
                "zoom {zoom} exceeds max zoom {max} for panorama '{}'",
                self.pano_id
            )));
        }
        let n = max - zoom;
        Ok((
            self.image_width.checked_shr(n).unwrap_or(0),
            self.image_height.checked_shr(n).unwrap_or(0),
        ))
    }

    /// Tile grid covering the image at `zoom`.
    pub fn grid_at_zoom(&self, zoom: u32) -> PlanetResult<TileGrid> {
        let (width, height) = self.size_at_zoom(zoom)?;
        if width == 0 || height == 0 {
            return Err(PlanetError::validation(format!(
                "panorama '{}' is empty at zoom {zoom}",
                self.pano_id
            )));
        }
        Ok(TileGrid {
            zoom,
            width,
            height,
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            nx: ceil_div(width, self.tile_width),
            ny: ceil_div(height, self.tile_height),
        })
    }

    /// Parse the metadata document served by the panorama host.
    pub fn from_json(reader: impl Read) -> PlanetResult<Self> {
        let raw: RawDetails = serde_json::from_reader(reader)
            .map_err(|e| PlanetError::metadata(format!("decode metadata json: {e}")))?;

        let dim = |name: &str, v: &str| -> PlanetResult<u32> {
            v.trim()
                .parse::<u32>()
                .map_err(|e| PlanetError::metadata(format!("field {name} = {v:?}: {e}")))
        };
        let image_width = dim("image_width", &raw.data.image_width)?;
        let image_height = dim("image_height", &raw.data.image_height)?;
        let tile_width = dim("tile_width", &raw.data.tile_width)?;
        let tile_height = dim("tile_height", &raw.data.tile_height)?;

        Self::new(
            image_width,
            image_height,
            tile_width,
            tile_height,
            raw.location.pano_id,
        )
        .map_err(|e| PlanetError::metadata(e.to_string()))
    }
}

#[derive(Deserialize)]
struct RawDetails {
    #[serde(rename = "Data", alias = "data")]
    data: RawData,
    #[serde(rename = "Location", alias = "location")]
    location: RawLocation,
}

#[derive(Deserialize)]
struct RawData {
    #[serde(alias = "Image_Width", alias = "imageWidth")]
    image_width: String,
    #[serde(alias = "Image_Height", alias = "imageHeight")]
    image_height: String,
    #[serde(alias = "Tile_Width", alias = "tileWidth")]
    tile_width: String,
    #[serde(alias = "Tile_Height", alias = "tileHeight")]
    tile_height: String,
}

#[derive(Deserialize)]
struct RawLocation {
    #[serde(rename = "panoId", alias = "panoid", alias = "PanoId", alias = "pano_id")]
    pano_id: String,
}

/// Grid cell coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileKey {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

/// Rectangular tile grid covering a panorama at one zoom level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileGrid {
    /// Zoom level the grid was derived for.
    pub zoom: u32,
    /// Logical image width at this zoom.
    pub width: u32,
    /// Logical image height at this zoom.
    pub height: u32,
    /// Nominal tile width.
    pub tile_width: u32,
    /// Nominal tile height.
    pub tile_height: u32,
    /// Tile columns.
    pub nx: u32,
    /// Tile rows.
    pub ny: u32,
}

impl TileGrid {
    /// `nx * ny`.
    pub fn tile_count(&self) -> usize {
        self.nx as usize * self.ny as usize
    }

    /// Storage index of cell `(tx, ty)`.
    pub fn index(&self, tx: u32, ty: u32) -> usize {
        tx as usize * self.ny as usize + ty as usize
    }

    /// Every cell, in storage-index order.
    pub fn keys(&self) -> Vec<TileKey> {
        let mut out = Vec::with_capacity(self.tile_count());
        for x in 0..self.nx {
            for y in 0..self.ny {
                out.push(TileKey { x, y });
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/panorama/details.rs"]
mod tests;
