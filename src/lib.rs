//! Tinyplanet fetches a tiled panorama, stitches it into one addressable
//! image and reprojects it into a log-polar "tiny planet".
//!
//! # Pipeline overview
//!
//! 1. **Metadata**: `pano id -> PanoramaDetails` (image and tile sizes, max zoom)
//! 2. **Fetch**: `PanoramaDetails + zoom -> CompositeSurface` (one task per tile,
//!    bounded concurrency, all tiles settle before assembly)
//! 3. **Sample**: the surface is wrapped in a `Nearest` or `Bilinear` sampler
//! 4. **Warp**: every destination pixel is pulled through `LogPolarMap` into a `Raster`
//! 5. **Encode / store** (optional): JPEG encoding and a content-addressed `PlanetStore`
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure maps**: coordinate maps and samplers hold no mutable state and are
//!   safe to evaluate from any number of threads.
//! - **No partial renders**: a single failed tile fails the whole render.
//! - **16-bit straight RGBA** throughout; blending happens in `f64` and is
//!   truncated on store.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod encode;
mod foundation;
mod panorama;
mod pipeline;
mod raster;
mod resample;
mod store;

pub mod transform;

pub use encode::jpeg::{DEFAULT_JPEG_QUALITY, encode_jpeg};
pub use foundation::core::{Canvas, Rgba16};
pub use foundation::error::{PlanetError, PlanetResult, TileError};
pub use panorama::decode::decode_tile;
pub use panorama::details::{PanoramaDetails, TileGrid, TileKey};
pub use panorama::fetch::{FetchOpts, MetadataSource, TileSource, fetch_panorama};
pub use panorama::http::{DEFAULT_HOST, StreetViewClient};
pub use pipeline::{RenderOpts, render_image, render_planet, render_surface};
pub use raster::buffer::Raster;
pub use raster::composite::CompositeSurface;
pub use raster::source::{PixelSource, Solid, TileImage};
pub use resample::interpolate::{
    Bilinear, ContinuousSource, EdgePolicy, Interpolation, Nearest, Sampler, mix,
};
pub use resample::warp::{warp, warp_serial};
pub use store::planet::{PlanetRecord, PlanetStore};
pub use transform::log_polar::LogPolarMap;
pub use transform::map::{CoordinateMap, Identity};
