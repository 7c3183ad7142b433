pub(crate) mod interpolate;
pub(crate) mod warp;
