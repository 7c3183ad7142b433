//! Concurrent tile fan-out and the fan-in barrier that assembles the surface.

use rayon::prelude::*;

use crate::{
    foundation::error::{PlanetError, PlanetResult, TileError},
    foundation::pool::build_thread_pool,
    panorama::decode::decode_tile,
    panorama::details::{PanoramaDetails, TileKey},
    raster::composite::CompositeSurface,
    raster::source::TileImage,
};

/// Looks up the tile-grid description for a panorama id.
pub trait MetadataSource: Sync {
    /// Details for `pano_id`; failures are [`PlanetError::Metadata`].
    fn details(&self, pano_id: &str) -> PlanetResult<PanoramaDetails>;
}

/// Fetches the encoded bytes of one grid cell.
///
/// Implementations own transport concerns such as timeouts and retries; an
/// error here marks the cell as failed.
pub trait TileSource: Sync {
    /// Raw encoded image bytes for `key` at `zoom`.
    fn tile_bytes(&self, pano_id: &str, zoom: u32, key: TileKey) -> anyhow::Result<Vec<u8>>;
}

/// Fan-out controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchOpts {
    /// Zoom level of the tile set to download.
    pub zoom: u32,
    /// Maximum number of tiles fetched at once.
    pub max_in_flight: usize,
}

impl Default for FetchOpts {
    fn default() -> Self {
        Self {
            zoom: 2,
            max_in_flight: 8,
        }
    }
}

/// Download and decode every tile of `details` at `opts.zoom`, then assemble
/// them into a [`CompositeSurface`].
///
/// One task is dispatched per grid cell on a pool capped at
/// `opts.max_in_flight` workers. Every task settles before anything is
/// assembled; if any cell failed the whole fetch fails with
/// [`PlanetError::Tiles`] listing each failed cell.
#[tracing::instrument(skip(details, source), fields(pano = %details.pano_id))]
pub fn fetch_panorama<T: TileSource + ?Sized>(
    details: &PanoramaDetails,
    source: &T,
    opts: &FetchOpts,
) -> PlanetResult<CompositeSurface> {
    let grid = details.grid_at_zoom(opts.zoom)?;
    let pool = build_thread_pool(Some(opts.max_in_flight))?;
    let keys = grid.keys();
    tracing::info!(
        nx = grid.nx,
        ny = grid.ny,
        width = grid.width,
        height = grid.height,
        "fetching panorama tiles"
    );

    let slots: Vec<Result<TileImage, TileError>> = pool.install(|| {
        keys.par_iter()
            .map(|&key| fetch_tile(source, &details.pano_id, grid.zoom, key))
            .collect()
    });

    let total = slots.len();
    let mut tiles = Vec::with_capacity(total);
    let mut failures = Vec::new();
    for slot in slots {
        match slot {
            Ok(tile) => tiles.push(tile),
            Err(e) => {
                tracing::warn!(error = %e, "tile failed");
                failures.push(e);
            }
        }
    }
    if !failures.is_empty() {
        return Err(PlanetError::Tiles { total, failures });
    }

    CompositeSurface::new(tiles, grid)
}

fn fetch_tile<T: TileSource + ?Sized>(
    source: &T,
    pano_id: &str,
    zoom: u32,
    key: TileKey,
) -> Result<TileImage, TileError> {
    let bytes = source
        .tile_bytes(pano_id, zoom, key)
        .map_err(|e| TileError::Fetch {
            x: key.x,
            y: key.y,
            reason: format!("{e:#}"),
        })?;
    let tile = decode_tile(&bytes).map_err(|e| TileError::Decode {
        x: key.x,
        y: key.y,
        reason: e.to_string(),
    })?;
    tracing::debug!(x = key.x, y = key.y, bytes = bytes.len(), "tile decoded");
    Ok(tile)
}

#[cfg(test)]
#[path = "../../tests/unit/panorama/fetch.rs"]
mod tests;
