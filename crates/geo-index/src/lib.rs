//! Triangulated spatial index over static polygon layers.
//!
//! Polygons are decomposed into triangles by ear clipping and stored in
//! an R-tree keyed by slightly inflated triangle bounds. Queries run a
//! coarse envelope search followed by the exact point-in-triangle test,
//! so containment answers are exact while the tree keeps candidate sets
//! small.

pub mod codec;
pub mod distance;
pub mod index;
pub mod triangle;

pub use distance::distance_to_boundary;
pub use index::GeoIndex;
pub use triangle::{triangulate, IndexedPolygon, Point2, Triangle};

use thiserror::Error;

/// Geometry construction failures. Fatal to bootstrap when raised
/// while loading a layer.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("triangulation failed: {0}")]
    Triangulation(String),

    #[error("polygon '{0}' has no rings")]
    EmptyPolygon(String),

    #[error("no triangles provided")]
    NoTriangles,

    #[error("failed to decode triangle collection: {0}")]
    Codec(String),
}
