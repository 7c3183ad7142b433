use crate::foundation::core::Rgba16;

/// Decoded tile: 16-bit RGBA, row-major.
pub type TileImage = image::ImageBuffer<image::Rgba<u16>, Vec<u16>>;

/// Anything answering integer-coordinate color queries.
///
/// Coordinates must lie inside `dimensions()`. Sources are read-only during a
/// render and may be queried from many worker threads at once.
pub trait PixelSource: Sync {
    /// `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Color at `(x, y)`.
    fn pixel(&self, x: u32, y: u32) -> Rgba16;
}

impl PixelSource for TileImage {
    fn dimensions(&self) -> (u32, u32) {
        image::ImageBuffer::dimensions(self)
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba16 {
        Rgba16::from(*self.get_pixel(x, y))
    }
}

impl<S: PixelSource + ?Sized> PixelSource for &S {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba16 {
        (**self).pixel(x, y)
    }
}

/// Uniform color over a fixed extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Solid {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// The single color returned everywhere.
    pub color: Rgba16,
}

impl PixelSource for Solid {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba16 {
        debug_assert!(x < self.width && y < self.height);
        self.color
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/source.rs"]
mod tests;
