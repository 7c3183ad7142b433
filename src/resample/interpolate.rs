//! Continuous-coordinate sampling over discrete pixel sources.

use crate::{
    foundation::core::Rgba16,
    foundation::math::quantize_u16,
    raster::source::PixelSource,
};

/// Anything answering real-valued-coordinate color queries.
pub trait ContinuousSource: Sync {
    /// Color at `(x, y)` in source pixel space.
    fn sample(&self, x: f64, y: f64) -> Rgba16;
}

/// How integer lookups outside the source are brought back in range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Clamp into `[0, dim - 1]`.
    #[default]
    Clamp,
    /// Treat the source as periodic.
    Wrap,
}

impl EdgePolicy {
    /// Resolve a possibly out-of-range coordinate against a `dim`-pixel axis.
    #[inline]
    pub fn resolve(self, v: i64, dim: u32) -> u32 {
        debug_assert!(dim > 0);
        let dim = i64::from(dim);
        let v = match self {
            Self::Clamp => v.clamp(0, dim - 1),
            Self::Wrap => v.rem_euclid(dim),
        };
        v as u32
    }
}

/// Interpolation variant selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Nearest-pixel lookup.
    Nearest,
    /// Four-pixel bilinear blend.
    #[default]
    Bilinear,
}

/// Blend `a` towards `b` by `theta`, per channel, truncating on store.
///
/// `theta = 0` yields `a` and `theta = 1` yields `b` exactly.
pub fn mix(a: Rgba16, b: Rgba16, theta: f64) -> Rgba16 {
    quantize(mix_f64(widen(a), widen(b), theta))
}

#[inline]
fn mix_f64(a: [f64; 4], b: [f64; 4], theta: f64) -> [f64; 4] {
    std::array::from_fn(|i| a[i] + theta * (b[i] - a[i]))
}

#[inline]
fn widen(c: Rgba16) -> [f64; 4] {
    c.to_array().map(f64::from)
}

#[inline]
fn quantize(c: [f64; 4]) -> Rgba16 {
    Rgba16::from_array(c.map(quantize_u16))
}

/// Offset of `v` past its floor; `0` when that is not finite (`inf - inf`).
#[inline]
fn fraction(v: f64, floor: f64) -> f64 {
    let d = v - floor;
    if d.is_finite() { d } else { 0.0 }
}

#[inline]
fn lookup<S: PixelSource + ?Sized>(source: &S, edge: EdgePolicy, x: i64, y: i64) -> Rgba16 {
    let (w, h) = source.dimensions();
    source.pixel(edge.resolve(x, w), edge.resolve(y, h))
}

/// Nearest-neighbor sampler: rounds to the closest pixel center.
#[derive(Clone, Debug)]
pub struct Nearest<S> {
    source: S,
    edge: EdgePolicy,
}

impl<S: PixelSource> Nearest<S> {
    /// Wrap `source`.
    pub fn new(source: S, edge: EdgePolicy) -> Self {
        Self { source, edge }
    }
}

impl<S: PixelSource> ContinuousSource for Nearest<S> {
    fn sample(&self, x: f64, y: f64) -> Rgba16 {
        let u = (x + 0.5).floor() as i64;
        let v = (y + 0.5).floor() as i64;
        lookup(&self.source, self.edge, u, v)
    }
}

/// Bilinear sampler.
///
/// Blends the two horizontal pairs by the fractional x offset, then the two
/// results by the fractional y offset. Intermediate values stay in `f64`; only
/// the final color is truncated.
#[derive(Clone, Debug)]
pub struct Bilinear<S> {
    source: S,
    edge: EdgePolicy,
}

impl<S: PixelSource> Bilinear<S> {
    /// Wrap `source`.
    pub fn new(source: S, edge: EdgePolicy) -> Self {
        Self { source, edge }
    }
}

impl<S: PixelSource> ContinuousSource for Bilinear<S> {
    fn sample(&self, x: f64, y: f64) -> Rgba16 {
        let (fx, fy) = (x.floor(), y.floor());
        let (dx, dy) = (fraction(x, fx), fraction(y, fy));
        // `as` saturates for huge or infinite inputs; the edge policy handles the rest.
        let (x1, y1) = (fx as i64, fy as i64);
        let (x2, y2) = (x1.saturating_add(1), y1.saturating_add(1));

        let at = |u, v| widen(lookup(&self.source, self.edge, u, v));
        let bottom = mix_f64(at(x1, y1), at(x2, y1), dx);
        let top = mix_f64(at(x1, y2), at(x2, y2), dx);
        quantize(mix_f64(bottom, top, dy))
    }
}

/// Runtime-selected sampler over a borrowed source.
#[derive(Clone, Debug)]
pub enum Sampler<S> {
    /// See [`Nearest`].
    Nearest(Nearest<S>),
    /// See [`Bilinear`].
    Bilinear(Bilinear<S>),
}

impl<S: PixelSource> Sampler<S> {
    /// Build the sampler variant named by `mode`.
    pub fn new(source: S, mode: Interpolation, edge: EdgePolicy) -> Self {
        match mode {
            Interpolation::Nearest => Self::Nearest(Nearest::new(source, edge)),
            Interpolation::Bilinear => Self::Bilinear(Bilinear::new(source, edge)),
        }
    }
}

impl<S: PixelSource> ContinuousSource for Sampler<S> {
    fn sample(&self, x: f64, y: f64) -> Rgba16 {
        match self {
            Self::Nearest(s) => s.sample(x, y),
            Self::Bilinear(s) => s.sample(x, y),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resample/interpolate.rs"]
mod tests;
