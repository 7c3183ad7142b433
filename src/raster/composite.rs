use crate::{
    foundation::core::Rgba16,
    foundation::error::{PlanetError, PlanetResult},
    panorama::details::TileGrid,
    raster::source::{PixelSource, TileImage},
};

/// A grid of independently decoded tiles addressed as one image.
///
/// Tiles are stored column-major: the tile at grid cell `(tx, ty)` lives at
/// index `tx * ny + ty`. All tiles are decoded to the same 16-bit RGBA
/// encoding, so the color model is uniform across the surface.
#[derive(Clone, Debug)]
pub struct CompositeSurface {
    tiles: Vec<TileImage>,
    grid: TileGrid,
}

impl CompositeSurface {
    /// Assemble a surface from a complete tile set.
    ///
    /// Fails when the tile count does not match the grid or a tile is empty.
    pub fn new(tiles: Vec<TileImage>, grid: TileGrid) -> PlanetResult<Self> {
        if grid.width == 0 || grid.height == 0 {
            return Err(PlanetError::validation("surface dimensions must be > 0"));
        }
        if grid.tile_width == 0 || grid.tile_height == 0 {
            return Err(PlanetError::validation("nominal tile size must be > 0"));
        }
        if tiles.len() != grid.tile_count() {
            return Err(PlanetError::validation(format!(
                "grid {}x{} needs {} tiles, got {}",
                grid.nx,
                grid.ny,
                grid.tile_count(),
                tiles.len()
            )));
        }
        if let Some(i) = tiles.iter().position(|t| t.width() == 0 || t.height() == 0) {
            return Err(PlanetError::validation(format!("tile {i} is empty")));
        }
        Ok(Self { tiles, grid })
    }

    /// Logical `(width, height)` of the whole surface.
    pub fn bounds(&self) -> (u32, u32) {
        (self.grid.width, self.grid.height)
    }

    /// Grid the surface was assembled from.
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Number of tiles held.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}

impl PixelSource for CompositeSurface {
    fn dimensions(&self) -> (u32, u32) {
        self.bounds()
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba16 {
        assert!(
            x < self.grid.width && y < self.grid.height,
            "({x}, {y}) outside {}x{} surface",
            self.grid.width,
            self.grid.height
        );
        let (tx, lx) = (x / self.grid.tile_width, x % self.grid.tile_width);
        let (ty, ly) = (y / self.grid.tile_height, y % self.grid.tile_height);
        let tile = &self.tiles[self.grid.index(tx, ty)];

        let u = rescale(lx, self.grid.tile_width, tile.width());
        let v = rescale(ly, self.grid.tile_height, tile.height());
        tile.pixel(u, v)
    }
}

/// Map a local coordinate on the nominal tile onto the decoded tile's actual
/// resolution, rounding to the nearest pixel.
fn rescale(local: u32, nominal: u32, actual: u32) -> u32 {
    if nominal <= 1 {
        return 0;
    }
    let t = f64::from(local) / f64::from(nominal - 1);
    let v = (t * f64::from(actual - 1) + 0.5).floor() as u32;
    v.min(actual - 1)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
