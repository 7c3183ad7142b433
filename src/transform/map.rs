//! Inverse coordinate maps driving a warp.

/// Pure function from a destination pixel to a source coordinate.
///
/// The returned coordinate may be fractional and may fall outside the source;
/// the sampler's edge policy decides what that means. Implementations must be
/// deterministic and free of side effects, since a warp evaluates them once
/// per destination pixel from many threads.
pub trait CoordinateMap: Sync {
    /// Source `(x, y)` for destination pixel `(x, y)`.
    fn map(&self, x: u32, y: u32) -> (f64, f64);
}

impl<F> CoordinateMap for F
where
    F: Fn(u32, u32) -> (f64, f64) + Sync,
{
    #[inline]
    fn map(&self, x: u32, y: u32) -> (f64, f64) {
        self(x, y)
    }
}

/// Identity map: destination pixel `(x, y)` samples source `(x, y)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl CoordinateMap for Identity {
    #[inline]
    fn map(&self, x: u32, y: u32) -> (f64, f64) {
        (f64::from(x), f64::from(y))
    }
}
