//! Inverse-mapping warp executor.

use rayon::prelude::*;

use crate::{
    foundation::core::{Canvas, Rgba16},
    raster::buffer::Raster,
    resample::interpolate::ContinuousSource,
    transform::map::CoordinateMap,
};

/// Render `canvas` by pulling every destination pixel through `map` and
/// sampling `source` there.
///
/// Rows are distributed over the current rayon pool. No destination pixel
/// depends on another, so the result is identical to [`warp_serial`].
#[tracing::instrument(skip(source, map))]
pub fn warp<S, M>(source: &S, canvas: Canvas, map: &M) -> Raster
where
    S: ContinuousSource + ?Sized,
    M: CoordinateMap + ?Sized,
{
    let mut out = Raster::new(canvas);
    if canvas.area() == 0 {
        return out;
    }
    let width = canvas.width as usize;
    out.pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| fill_row(source, map, y as u32, row));
    out
}

/// Single-threaded [`warp`].
pub fn warp_serial<S, M>(source: &S, canvas: Canvas, map: &M) -> Raster
where
    S: ContinuousSource + ?Sized,
    M: CoordinateMap + ?Sized,
{
    let mut out = Raster::new(canvas);
    if canvas.area() == 0 {
        return out;
    }
    let width = canvas.width as usize;
    for (y, row) in out.pixels_mut().chunks_mut(width).enumerate() {
        fill_row(source, map, y as u32, row);
    }
    out
}

#[inline]
fn fill_row<S, M>(source: &S, map: &M, y: u32, row: &mut [Rgba16])
where
    S: ContinuousSource + ?Sized,
    M: CoordinateMap + ?Sized,
{
    for (x, px) in row.iter_mut().enumerate() {
        let (u, v) = map.map(x as u32, y);
        *px = source.sample(u, v);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resample/warp.rs"]
mod tests;
