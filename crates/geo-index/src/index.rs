//! The triangulated R-tree index.

use std::collections::HashMap;
use std::sync::Arc;

use rstar::{RTree, RTreeObject, RTreeParams, RStarInsertionStrategy, AABB};
use tile_common::BoundingBox;

use crate::triangle::{point_in_triangle, triangulate, IndexedPolygon, Point2, Triangle};
use crate::GeometryError;

/// Inflation applied to every stored triangle's bounds so adjacency
/// searches stay robust against shared edges.
const BOUNDS_EPSILON: f64 = 1e-7;

/// Half extent of the envelope used for point queries. Wide enough that
/// the exact triangle filter almost never needs a second tree pass.
const QUERY_PADDING: f64 = 1e-2;

/// R-tree fan-out tuning used for all polygon layers.
pub struct LayerTreeParams;

impl RTreeParams for LayerTreeParams {
    const MIN_SIZE: usize = 25;
    const MAX_SIZE: usize = 50;
    const REINSERTION_COUNT: usize = 16;
    type DefaultInsertionStrategy = RStarInsertionStrategy;
}

/// One triangle stored in the tree: inflated envelope, vertices and a
/// back-reference to the owning polygon's id.
struct TriangleEntry {
    envelope: AABB<[f64; 2]>,
    points: [Point2; 3],
    polygon_id: Arc<str>,
}

impl RTreeObject for TriangleEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

fn inflated_envelope(bounds: &BoundingBox) -> AABB<[f64; 2]> {
    AABB::from_corners(
        [bounds.min_x - BOUNDS_EPSILON, bounds.min_y - BOUNDS_EPSILON],
        [bounds.max_x + BOUNDS_EPSILON, bounds.max_y + BOUNDS_EPSILON],
    )
}

/// Spatial index over one polygon layer.
///
/// Supports incremental inserts during setup and bulk construction
/// from a pre-triangulated layer. All queries are read-only.
pub struct GeoIndex {
    tree: RTree<TriangleEntry, LayerTreeParams>,
    polygons: HashMap<Arc<str>, IndexedPolygon>,
    bounds: BoundingBox,
}

impl Default for GeoIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new_with_params(),
            polygons: HashMap::new(),
            bounds: BoundingBox::empty(),
        }
    }

    /// Bulk construct from a precomputed triangle list (the binary
    /// layer format). Each triangle doubles as its own polygon.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Result<Self, GeometryError> {
        if triangles.is_empty() {
            return Err(GeometryError::NoTriangles);
        }

        let mut bounds = BoundingBox::empty();
        let mut polygons = HashMap::with_capacity(triangles.len());
        let mut entries = Vec::with_capacity(triangles.len());

        for tri in triangles {
            bounds = bounds.union(&tri.bounds());
            let id: Arc<str> = Arc::from(tri.id());
            entries.push(TriangleEntry {
                envelope: inflated_envelope(&tri.bounds()),
                points: tri.points(),
                polygon_id: id.clone(),
            });
            polygons.insert(id, tri.to_polygon());
        }

        Ok(Self {
            tree: RTree::bulk_load_with_params(entries),
            polygons,
            bounds,
        })
    }

    /// Insert a polygon, triangulating it on the fly.
    pub fn insert(&mut self, polygon: IndexedPolygon) -> Result<(), GeometryError> {
        let triangles = triangulate(polygon.rings()).map_err(|e| match e {
            GeometryError::EmptyPolygon(_) => GeometryError::EmptyPolygon(polygon.id().to_string()),
            other => other,
        })?;

        self.bounds = self.bounds.union(&polygon.bounds());

        let id: Arc<str> = Arc::from(polygon.id());
        for points in triangles {
            let tri_bounds = Triangle::new("", points).bounds();
            self.tree.insert(TriangleEntry {
                envelope: inflated_envelope(&tri_bounds),
                points,
                polygon_id: id.clone(),
            });
        }
        self.polygons.insert(id, polygon);

        Ok(())
    }

    /// Number of stored triangles.
    pub fn size(&self) -> usize {
        self.tree.size()
    }

    /// Union of all inserted polygon bounds.
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// True if any indexed polygon contains the point.
    pub fn point_in_any(&self, point: Point2) -> bool {
        self.candidates(point)
            .any(|entry| point_in_triangle(point, entry.points[0], entry.points[1], entry.points[2]))
    }

    /// All distinct polygons containing the point.
    pub fn point_in_polygons(&self, point: Point2) -> Vec<&IndexedPolygon> {
        let mut found: Vec<&IndexedPolygon> = Vec::new();
        for entry in self.candidates(point) {
            if found.iter().any(|p| *p.id() == *entry.polygon_id) {
                continue;
            }
            if point_in_triangle(point, entry.points[0], entry.points[1], entry.points[2]) {
                if let Some(poly) = self.polygons.get(&entry.polygon_id) {
                    found.push(poly);
                }
            }
        }
        found
    }

    /// True if any stored triangle's bounds intersect the rectangle.
    pub fn bounds_intersects(&self, bounds: &BoundingBox) -> bool {
        let envelope = AABB::from_corners(
            [bounds.min_x, bounds.min_y],
            [bounds.max_x, bounds.max_y],
        );
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .next()
            .is_some()
    }

    /// Polygon lookup by stable id.
    pub fn polygon_by_id(&self, id: &str) -> Option<&IndexedPolygon> {
        self.polygons.get(id)
    }

    /// Coarse candidate pass: a small envelope around the point. NaN
    /// coordinates and points outside the layer bounds yield nothing.
    fn candidates(&self, point: Point2) -> impl Iterator<Item = &TriangleEntry> {
        let usable = point[0].is_finite()
            && point[1].is_finite()
            && self.bounds.contains_point(point[0], point[1]);

        let envelope = if usable {
            AABB::from_corners(
                [point[0] - QUERY_PADDING, point[1] - QUERY_PADDING],
                [point[0] + QUERY_PADDING, point[1] + QUERY_PADDING],
            )
        } else {
            // Degenerate envelope far outside any layer.
            AABB::from_corners([f64::MAX, f64::MAX], [f64::MAX, f64::MAX])
        };

        self.tree.locate_in_envelope_intersecting(&envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(id: &str, min: f64, max: f64) -> IndexedPolygon {
        IndexedPolygon::new(
            id,
            vec![vec![[min, min], [max, min], [max, max], [min, max], [min, min]]],
        )
    }

    #[test]
    fn test_insert_updates_size_and_bounds() {
        let mut index = GeoIndex::new();
        index.insert(square("a", 0.0, 2.0)).unwrap();
        assert_eq!(index.size(), 2);
        assert_eq!(index.bounds(), BoundingBox::new(0.0, 0.0, 2.0, 2.0));
    }

    #[test]
    fn test_from_triangles_rejects_empty() {
        assert!(matches!(
            GeoIndex::from_triangles(Vec::new()),
            Err(GeometryError::NoTriangles)
        ));
    }

    #[test]
    fn test_nan_point_is_not_contained() {
        let mut index = GeoIndex::new();
        index.insert(square("a", -1.0, 1.0)).unwrap();
        assert!(!index.point_in_any([f64::NAN, 0.0]));
        assert!(!index.point_in_any([0.0, f64::NAN]));
    }

    #[test]
    fn test_out_of_range_point_is_not_contained() {
        let mut index = GeoIndex::new();
        index.insert(square("a", -1.0, 1.0)).unwrap();
        assert!(!index.point_in_any([361.0, 0.0]));
    }
}
