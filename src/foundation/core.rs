use crate::foundation::error::{PlanetError, PlanetResult};

/// Straight (non-premultiplied) RGBA color on the 16-bit scale `0..=65535`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba16 {
    /// Red channel.
    pub r: u16,
    /// Green channel.
    pub g: u16,
    /// Blue channel.
    pub b: u16,
    /// Alpha channel.
    pub a: u16,
}

impl Rgba16 {
    /// Full-scale channel value.
    pub const MAX: u16 = u16::MAX;

    /// Build a color from its four channels.
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn opaque(r: u16, g: u16, b: u16) -> Self {
        Self::new(r, g, b, Self::MAX)
    }

    /// All channels zero.
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Widen an 8-bit color the way decoders do (`v * 257`).
    pub fn from_rgba8(px: [u8; 4]) -> Self {
        Self::new(
            u16::from(px[0]) * 257,
            u16::from(px[1]) * 257,
            u16::from(px[2]) * 257,
            u16::from(px[3]) * 257,
        )
    }

    /// Channels in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u16; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Inverse of [`Rgba16::to_array`].
    pub fn from_array(c: [u16; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<image::Rgba<u16>> for Rgba16 {
    fn from(px: image::Rgba<u16>) -> Self {
        Self::from_array(px.0)
    }
}

impl From<Rgba16> for image::Rgba<u16> {
    fn from(c: Rgba16) -> Self {
        image::Rgba(c.to_array())
    }
}

/// Destination canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting empty dimensions.
    pub fn new(width: u32, height: u32) -> PlanetResult<Self> {
        if width == 0 || height == 0 {
            return Err(PlanetError::validation("canvas dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels covered by the canvas.
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
