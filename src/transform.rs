//! Coordinate maps from destination pixels to source positions.

pub mod log_polar;
pub mod map;
