//! Log-polar ("tiny planet") projection.
//!
//! The source panorama's horizontal axis is the full azimuth sweep and its
//! vertical axis runs from sky to ground. Each destination pixel is converted
//! to polar coordinates about the canvas center; the angle selects the source
//! column and the logarithm of the radius selects the source row, so the
//! ground ends up in the middle of the planet and the sky around it.

use std::f64::consts::TAU;

use crate::{
    foundation::error::{PlanetError, PlanetResult},
    transform::map::CoordinateMap,
};

/// Log-polar inverse map from a `dst_width x dst_height` canvas onto a
/// `src_width x src_height` panorama.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogPolarMap {
    dst_width: f64,
    dst_height: f64,
    src_width: f64,
    src_height: f64,
    zoom: f64,
    radius: f64,
    scale: f64,
}

impl LogPolarMap {
    /// Precompute the radius and scale for the given sizes and zoom factor.
    pub fn new(
        dst_width: u32,
        dst_height: u32,
        src_width: u32,
        src_height: u32,
        zoom: f64,
    ) -> PlanetResult<Self> {
        if dst_width == 0 || dst_height == 0 || src_width == 0 || src_height == 0 {
            return Err(PlanetError::validation("log-polar map dimensions must be > 0"));
        }
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(PlanetError::validation(format!(
                "log-polar zoom must be finite and > 0, got {zoom}"
            )));
        }

        let (m, n) = (f64::from(dst_width), f64::from(dst_height));
        let (w, h) = (f64::from(src_width), f64::from(src_height));

        let radius = m.hypot(n) / 2.0 * zoom;
        let denom = (TAU * h / w).exp() - 1.0;
        let scale = radius / denom;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(PlanetError::validation(format!(
                "panorama aspect {src_width}x{src_height} gives a degenerate log-polar scale"
            )));
        }

        Ok(Self {
            dst_width: m,
            dst_height: n,
            src_width: w,
            src_height: h,
            zoom,
            radius,
            scale,
        })
    }

    /// Maximum destination radius `R`, linear in the zoom factor.
    pub fn max_radius(&self) -> f64 {
        self.radius
    }

    /// Log-polar scale `A = R / (exp(2*pi*h/w) - 1)`.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Zoom factor the map was built with.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Evaluate the map at a continuous destination position.
    pub fn map_point(&self, x: f64, y: f64) -> (f64, f64) {
        let i = x - (self.dst_width - 1.0) / 2.0;
        let j = y - (self.dst_height - 1.0) / 2.0;

        let r = i.hypot(j);
        let mut theta = i.atan2(j);
        if theta < 0.0 {
            theta += TAU;
        }

        let k = self.src_width / TAU;
        let p = k * (r / self.scale + 1.0).ln();
        let q = k * theta;

        // Flip both axes; the swapped return order fixes the planet's orientation.
        let p = (self.src_height - 1.0) - p;
        let q = (self.src_width - 1.0) - q;
        (q, p)
    }
}

impl CoordinateMap for LogPolarMap {
    #[inline]
    fn map(&self, x: u32, y: u32) -> (f64, f64) {
        self.map_point(f64::from(x), f64::from(y))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/log_polar.rs"]
mod tests;
