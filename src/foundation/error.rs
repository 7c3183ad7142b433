/// Convenience result type used across the crate.
pub type PlanetResult<T> = Result<T, PlanetError>;

/// Top-level error taxonomy for a planet render.
#[derive(thiserror::Error, Debug)]
pub enum PlanetError {
    /// Invalid user-provided options, dimensions or zoom levels.
    #[error("validation error: {0}")]
    Validation(String),

    /// The tile-grid description could not be fetched or parsed.
    #[error("metadata error: {0}")]
    Metadata(String),

    /// One or more grid cells failed to fetch or decode.
    #[error("{} of {total} tiles failed; first: {}", .failures.len(), first_failure(.failures))]
    Tiles {
        /// Number of cells in the grid.
        total: usize,
        /// Every slot that did not settle successfully, in grid order.
        failures: Vec<TileError>,
    },

    /// The output raster could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure of a single grid cell.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    /// Transport failure (including timeouts and non-success status codes).
    #[error("tile ({x}, {y}) fetch failed: {reason}")]
    Fetch {
        /// Grid column.
        x: u32,
        /// Grid row.
        y: u32,
        /// Underlying cause.
        reason: String,
    },

    /// The tile bytes arrived but are not a decodable image.
    #[error("tile ({x}, {y}) decode failed: {reason}")]
    Decode {
        /// Grid column.
        x: u32,
        /// Grid row.
        y: u32,
        /// Underlying cause.
        reason: String,
    },
}

impl TileError {
    /// Grid cell the failure belongs to.
    pub fn cell(&self) -> (u32, u32) {
        match self {
            Self::Fetch { x, y, .. } | Self::Decode { x, y, .. } => (*x, *y),
        }
    }
}

fn first_failure(failures: &[TileError]) -> String {
    failures
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_string())
}

impl PlanetError {
    /// Build a [`PlanetError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PlanetError::Metadata`] value.
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    /// Build a [`PlanetError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
