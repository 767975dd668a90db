//! Error types shared across the tile services.

use thiserror::Error;

/// Result type alias using TileError.
pub type TileResult<T> = Result<T, TileError>;

/// Primary error type for tile operations.
#[derive(Debug, Error)]
pub enum TileError {
    /// Bad URL parameters (unknown provider, out-of-range coordinates).
    #[error("invalid request: {0}")]
    Validation(String),

    /// Elevation fetch failed after retries were exhausted.
    #[error("upstream elevation source unavailable: {0}")]
    Upstream(String),

    /// Upstream payload was not decodable (PNG/TIFF).
    #[error("failed to decode upstream payload: {0}")]
    Decode(String),

    /// Triangulation or geometry construction failure during bootstrap.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Output image encoding failure.
    #[error("failed to encode tile image: {0}")]
    Encoding(String),

    /// Client disconnect or deadline exceeded.
    #[error("request canceled")]
    Canceled,
}

impl TileError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            TileError::Validation(_) => 400,
            TileError::Upstream(_) | TileError::Decode(_) | TileError::Encoding(_) => 500,
            TileError::Geometry(_) => 500,
            TileError::Canceled => 504,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(TileError::Validation("z".into()).http_status_code(), 400);
        assert_eq!(TileError::Upstream("down".into()).http_status_code(), 500);
        assert_eq!(TileError::Canceled.http_status_code(), 504);
    }
}
