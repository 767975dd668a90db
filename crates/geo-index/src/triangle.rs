//! Polygon and triangle geometry, plus ear-clipping triangulation.

use crate::GeometryError;
use tile_common::BoundingBox;

/// A 2D point as `[lon, lat]` in degrees.
pub type Point2 = [f64; 2];

/// A polygon held by the index: stable string id, rings (outer first,
/// then holes) and precomputed bounds.
///
/// Both ring-backed polygons (from GeoJSON layers) and triangle-backed
/// polygons (from pre-triangulated binary layers) use this shape; the
/// latter simply carry a single 3-vertex ring.
#[derive(Debug, Clone)]
pub struct IndexedPolygon {
    id: String,
    rings: Vec<Vec<Point2>>,
    bounds: BoundingBox,
}

impl IndexedPolygon {
    pub fn new(id: impl Into<String>, rings: Vec<Vec<Point2>>) -> Self {
        let mut bounds = BoundingBox::empty();
        for ring in &rings {
            for p in ring {
                bounds = bounds.union(&BoundingBox::new(p[0], p[1], p[0], p[1]));
            }
        }
        Self {
            id: id.into(),
            rings,
            bounds,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rings(&self) -> &[Vec<Point2>] {
        &self.rings
    }

    /// The exterior ring. Empty slice for a degenerate polygon.
    pub fn outer_ring(&self) -> &[Point2] {
        self.rings.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }
}

/// A single triangle with precomputed bounds and its owning polygon id.
#[derive(Debug, Clone)]
pub struct Triangle {
    id: String,
    points: [Point2; 3],
    bounds: BoundingBox,
}

impl Triangle {
    pub fn new(id: impl Into<String>, points: [Point2; 3]) -> Self {
        let min_x = points[0][0].min(points[1][0]).min(points[2][0]);
        let min_y = points[0][1].min(points[1][1]).min(points[2][1]);
        let max_x = points[0][0].max(points[1][0]).max(points[2][0]);
        let max_y = points[0][1].max(points[1][1]).max(points[2][1]);
        Self {
            id: id.into(),
            points,
            bounds: BoundingBox::new(min_x, min_y, max_x, max_y),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn points(&self) -> [Point2; 3] {
        self.points
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// View this triangle as a polygon of its own (closed 3-vertex ring).
    pub fn to_polygon(&self) -> IndexedPolygon {
        IndexedPolygon::new(
            self.id.clone(),
            vec![vec![self.points[0], self.points[1], self.points[2], self.points[0]]],
        )
    }
}

/// Ear-clip a polygon (outer ring + holes) into triangle vertex triples.
///
/// Vertex winding within the result is not significant; the containment
/// test handles either orientation.
pub fn triangulate(rings: &[Vec<Point2>]) -> Result<Vec<[Point2; 3]>, GeometryError> {
    let outer = rings
        .first()
        .ok_or_else(|| GeometryError::EmptyPolygon(String::new()))?;

    // Flatten outer ring + holes into earcut's input layout.
    let mut vertices = Vec::with_capacity(rings.iter().map(Vec::len).sum::<usize>() * 2);
    let mut hole_indices = Vec::with_capacity(rings.len().saturating_sub(1));

    for p in outer {
        vertices.push(p[0]);
        vertices.push(p[1]);
    }
    let mut offset = outer.len();
    for hole in &rings[1..] {
        hole_indices.push(offset);
        for p in hole {
            vertices.push(p[0]);
            vertices.push(p[1]);
        }
        offset += hole.len();
    }

    let indices = earcutr::earcut(&vertices, &hole_indices, 2)
        .map_err(|e| GeometryError::Triangulation(format!("{e:?}")))?;

    let triangles = indices
        .chunks_exact(3)
        .map(|tri| {
            let p = |i: usize| [vertices[i * 2], vertices[i * 2 + 1]];
            [p(tri[0]), p(tri[1]), p(tri[2])]
        })
        .collect();

    Ok(triangles)
}

/// Exact point-in-triangle test via the three signed cross products.
/// Mixed signs mean outside; zeros (on an edge or vertex) count inside.
pub fn point_in_triangle(pt: Point2, v1: Point2, v2: Point2, v3: Point2) -> bool {
    let d1 = sign(pt, v1, v2);
    let d2 = sign(pt, v2, v3);
    let d3 = sign(pt, v3, v1);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;

    !(has_neg && has_pos)
}

fn sign(p1: Point2, p2: Point2, p3: Point2) -> f64 {
    (p1[0] - p3[0]) * (p2[1] - p3[1]) - (p2[0] - p3[0]) * (p1[1] - p3[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_ring() -> Vec<Point2> {
        vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]]
    }

    #[test]
    fn test_triangulate_square() {
        let triangles = triangulate(&[square_ring()]).unwrap();
        assert_eq!(triangles.len(), 2);

        // Triangle areas must sum to the square's area.
        let area: f64 = triangles
            .iter()
            .map(|t| (sign(t[0], t[1], t[2]) / 2.0).abs())
            .sum();
        assert!((area - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_triangulate_with_hole() {
        let hole = vec![[1.0, 1.0], [3.0, 1.0], [3.0, 3.0], [1.0, 3.0], [1.0, 1.0]];
        let triangles = triangulate(&[square_ring(), hole]).unwrap();

        let area: f64 = triangles
            .iter()
            .map(|t| (sign(t[0], t[1], t[2]) / 2.0).abs())
            .sum();
        assert!((area - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_in_triangle_either_winding() {
        let (a, b, c) = ([0.0, 0.0], [2.0, 0.0], [1.0, 2.0]);
        assert!(point_in_triangle([1.0, 0.5], a, b, c));
        assert!(point_in_triangle([1.0, 0.5], c, b, a));
        assert!(!point_in_triangle([3.0, 0.5], a, b, c));
    }

    #[test]
    fn test_point_on_boundary_counts_inside() {
        let (a, b, c) = ([0.0, 0.0], [2.0, 0.0], [1.0, 2.0]);
        assert!(point_in_triangle([1.0, 0.0], a, b, c));
        assert!(point_in_triangle([0.0, 0.0], a, b, c));
    }

    #[test]
    fn test_polygon_bounds() {
        let poly = IndexedPolygon::new("p", vec![square_ring()]);
        assert_eq!(poly.bounds(), tile_common::BoundingBox::new(0.0, 0.0, 4.0, 4.0));
    }

    #[test]
    fn test_triangle_as_polygon_ring_is_closed() {
        let tri = Triangle::new("0", [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        let poly = tri.to_polygon();
        let ring = poly.outer_ring();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[0], ring[3]);
    }
}
