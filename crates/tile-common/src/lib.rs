//! Shared tile grid types for the elevation tile services.
//!
//! Web Mercator (Google/OSM) tile addressing, geographic bounding boxes
//! and the per-tile pixel-to-coordinate lookup tables used by the
//! rendering pipeline.

pub mod bbox;
pub mod bounds;
pub mod error;
pub mod tile;

pub use bbox::BoundingBox;
pub use bounds::TileBounds;
pub use error::{TileError, TileResult};
pub use tile::TileCoord;
