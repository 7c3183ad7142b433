use crate::foundation::core::{Canvas, Rgba16};
use crate::foundation::math::narrow_u8;
use crate::raster::source::PixelSource;

/// Dense, row-major output raster.
///
/// Owned exclusively by the warp executor while it is being filled and handed
/// to the caller afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<Rgba16>,
}

impl Raster {
    /// Transparent raster covering `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        Self::filled(canvas, Rgba16::transparent())
    }

    /// Raster covering `canvas` with every pixel set to `color`.
    pub fn filled(canvas: Canvas, color: Rgba16) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![color; canvas.area()],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color at `(x, y)`, `None` outside the raster.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(self.offset(x, y)).copied()
    }

    /// Overwrite the pixel at `(x, y)`. Out-of-range writes are ignored.
    pub fn put(&mut self, x: u32, y: u32, color: Rgba16) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.offset(x, y);
        self.data[i] = color;
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Rgba16] {
        &self.data
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgba16] {
        &mut self.data
    }

    /// Narrow to 8-bit RGB, dropping alpha.
    pub fn to_rgb8(&self) -> image::RgbImage {
        let mut out = image::RgbImage::new(self.width, self.height);
        for (dst, src) in out.pixels_mut().zip(&self.data) {
            *dst = image::Rgb([narrow_u8(src.r), narrow_u8(src.g), narrow_u8(src.b)]);
        }
        out
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl PixelSource for Raster {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba16 {
        self.data[self.offset(x, y)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
