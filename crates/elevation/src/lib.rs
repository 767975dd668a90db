//! Elevation data access for the tile renderer.
//!
//! Two upstream sources (Terrarium PNG quadrants, GeoTIFF) behind a
//! shared single-flight cache with TTL expiry. Cached grids are
//! immutable after publish; callers that rewrite elevations must work
//! on a private copy.

pub mod cache;
pub mod geotiff;
pub mod grid;
pub mod source;
pub mod terrarium;

pub use cache::ElevationCache;
pub use geotiff::GeoTiffSource;
pub use grid::ElevationGrid;
pub use source::{ElevationService, ElevationSource};
pub use terrarium::TerrariumSource;

use thiserror::Error;

/// Elevation fetch/decode failures. Cloneable so single-flight waiters
/// can all observe the initiating fetch's error.
#[derive(Debug, Clone, Error)]
pub enum ElevationError {
    /// Upstream unreachable or unusable after retries.
    #[error("elevation source unavailable: {0}")]
    Upstream(String),

    /// Upstream payload not decodable.
    #[error("failed to decode elevation payload: {0}")]
    Decode(String),
}
