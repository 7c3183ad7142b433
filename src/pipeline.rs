use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::core::Canvas,
    foundation::error::{PlanetError, PlanetResult},
    foundation::pool::build_thread_pool,
    panorama::decode::decode_tile,
    panorama::fetch::{FetchOpts, MetadataSource, TileSource, fetch_panorama},
    raster::buffer::Raster,
    raster::source::PixelSource,
    resample::interpolate::{EdgePolicy, Interpolation, Sampler},
    resample::warp::{warp, warp_serial},
    transform::log_polar::LogPolarMap,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Options for a planet render.
pub struct RenderOpts {
    /// Output canvas.
    pub canvas: Canvas,
    /// Log-polar zoom factor; scales the planet's maximum radius.
    pub zoom: f64,
    /// Sampling variant.
    pub interpolation: Interpolation,
    /// How samples past the source edges are resolved.
    pub edge: EdgePolicy,
    /// Zoom level of the tile set to download.
    pub fetch_zoom: u32,
    /// JPEG quality for the encoded output.
    pub jpeg_quality: u8,
    /// Maximum number of tiles fetched at once.
    pub max_in_flight: usize,
    /// Per-request timeout for metadata and tile fetches.
    pub tile_timeout_secs: u64,
    /// Warp worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Warp rows in parallel when `true`.
    pub parallel: bool,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            zoom: 2.0,
            interpolation: Interpolation::Bilinear,
            edge: EdgePolicy::Clamp,
            fetch_zoom: 2,
            jpeg_quality: crate::encode::jpeg::DEFAULT_JPEG_QUALITY,
            max_in_flight: 8,
            tile_timeout_secs: 30,
            threads: None,
            parallel: true,
        }
    }
}

impl RenderOpts {
    /// Load options from a JSON file. Missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> PlanetResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read options '{}'", path.display()))?;
        let opts: Self = serde_json::from_slice(&bytes).map_err(|e| {
            PlanetError::validation(format!("parse options '{}': {e}", path.display()))
        })?;
        opts.validate()?;
        Ok(opts)
    }

    /// Reject option combinations no render can satisfy.
    pub fn validate(&self) -> PlanetResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(PlanetError::validation(format!(
                "zoom must be finite and > 0, got {}",
                self.zoom
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(PlanetError::validation(format!(
                "jpeg_quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        if self.max_in_flight == 0 {
            return Err(PlanetError::validation("max_in_flight must be >= 1"));
        }
        if self.tile_timeout_secs == 0 {
            return Err(PlanetError::validation("tile_timeout_secs must be >= 1"));
        }
        if self.threads == Some(0) {
            return Err(PlanetError::validation("threads must be >= 1 when set"));
        }
        Ok(())
    }

    /// Fan-out options derived from these render options.
    pub fn fetch_opts(&self) -> FetchOpts {
        FetchOpts {
            zoom: self.fetch_zoom,
            max_in_flight: self.max_in_flight,
        }
    }
}

/// Fetch panorama `pano_id` and render it as a tiny planet.
///
/// Pipeline:
/// 1. metadata lookup (fails fast, before any tile is requested)
/// 2. tile fan-out and fan-in into a composite surface
/// 3. log-polar warp of the surface onto the output canvas
#[tracing::instrument(skip(metadata, tiles, opts))]
pub fn render_planet<M, T>(
    pano_id: &str,
    metadata: &M,
    tiles: &T,
    opts: &RenderOpts,
) -> PlanetResult<Raster>
where
    M: MetadataSource + ?Sized,
    T: TileSource + ?Sized,
{
    opts.validate()?;
    if pano_id.is_empty() {
        return Err(PlanetError::validation("pano id must not be empty"));
    }

    tracing::info!("getting panorama details");
    let details = metadata.details(pano_id)?;
    tracing::info!(
        width = details.image_width,
        height = details.image_height,
        max_zoom = details.max_zoom(),
        "getting panorama tiles"
    );
    let surface = fetch_panorama(&details, tiles, &opts.fetch_opts())?;
    render_surface(&surface, opts)
}

/// Render an already assembled source image as a tiny planet.
pub fn render_surface<S: PixelSource + ?Sized>(
    source: &S,
    opts: &RenderOpts,
) -> PlanetResult<Raster> {
    opts.validate()?;
    let (w, h) = source.dimensions();
    let map = LogPolarMap::new(opts.canvas.width, opts.canvas.height, w, h, opts.zoom)?;
    let sampler = Sampler::new(source, opts.interpolation, opts.edge);

    tracing::info!(
        src_width = w,
        src_height = h,
        dst_width = opts.canvas.width,
        dst_height = opts.canvas.height,
        "warping image"
    );
    if !opts.parallel {
        return Ok(warp_serial(&sampler, opts.canvas, &map));
    }
    let pool = build_thread_pool(opts.threads)?;
    Ok(pool.install(|| warp(&sampler, opts.canvas, &map)))
}

/// Decode an encoded, already stitched panorama and render it.
pub fn render_image(bytes: &[u8], opts: &RenderOpts) -> PlanetResult<Raster> {
    let image = decode_tile(bytes)?;
    render_surface(&image, opts)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
