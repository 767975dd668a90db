//! Containment and lookup behavior of the triangulated index.

use geo_index::{codec, distance_to_boundary, GeoIndex, IndexedPolygon, Triangle};
use tile_common::BoundingBox;

fn square(id: &str, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> IndexedPolygon {
    IndexedPolygon::new(
        id,
        vec![vec![
            [min_x, min_y],
            [max_x, min_y],
            [max_x, max_y],
            [min_x, max_y],
            [min_x, min_y],
        ]],
    )
}

#[test]
fn containment_round_trip() {
    let mut index = GeoIndex::new();
    index.insert(square("a", 10.0, 20.0, 12.0, 22.0)).unwrap();

    // Interior point is contained.
    assert!(index.point_in_any([11.0, 21.0]));

    // A point clearly outside the polygon's bounds is not.
    assert!(!index.point_in_any([13.0, 21.0]));
    assert!(!index.point_in_any([11.0, 23.5]));
}

#[test]
fn point_in_polygons_dedupes_by_id() {
    let mut index = GeoIndex::new();
    // Non-convex polygon triangulates into several triangles; a point
    // near the centroid may hit more than one candidate triangle.
    index
        .insert(IndexedPolygon::new(
            "star",
            vec![vec![
                [0.0, 0.0],
                [4.0, 0.0],
                [4.0, 4.0],
                [2.0, 2.5],
                [0.0, 4.0],
                [0.0, 0.0],
            ]],
        ))
        .unwrap();

    let hits = index.point_in_polygons([2.0, 1.0]);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id(), "star");
}

#[test]
fn overlapping_polygons_are_all_reported() {
    let mut index = GeoIndex::new();
    index.insert(square("a", 0.0, 0.0, 2.0, 2.0)).unwrap();
    index.insert(square("b", 1.0, 1.0, 3.0, 3.0)).unwrap();

    let mut ids: Vec<&str> = index
        .point_in_polygons([1.5, 1.5])
        .into_iter()
        .map(|p| p.id())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["a", "b"]);

    assert_eq!(index.point_in_polygons([0.5, 0.5]).len(), 1);
}

#[test]
fn bounds_intersects_uses_the_full_rectangle() {
    let mut index = GeoIndex::new();
    index.insert(square("a", 10.0, 10.0, 11.0, 11.0)).unwrap();

    // Query rectangle overlaps the polygon without containing any vertex.
    assert!(index.bounds_intersects(&BoundingBox::new(10.4, 9.0, 10.6, 12.0)));
    // Disjoint rectangle.
    assert!(!index.bounds_intersects(&BoundingBox::new(20.0, 20.0, 21.0, 21.0)));
}

#[test]
fn polygon_by_id_round_trip() {
    let mut index = GeoIndex::new();
    index.insert(square("inner-3", -5.0, -5.0, 5.0, 5.0)).unwrap();

    let poly = index.polygon_by_id("inner-3").expect("polygon present");
    assert_eq!(poly.bounds(), BoundingBox::new(-5.0, -5.0, 5.0, 5.0));
    assert!(index.polygon_by_id("inner-4").is_none());
}

#[test]
fn bulk_load_from_binary_layer() {
    let triangles = vec![
        Triangle::new("ignored", [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]),
        Triangle::new("ignored", [[10.0, 10.0], [11.0, 10.0], [10.0, 11.0]]),
    ];
    let decoded = codec::decode(&codec::encode(&triangles)).unwrap();
    let index = GeoIndex::from_triangles(decoded).unwrap();

    assert_eq!(index.size(), 2);
    assert!(index.point_in_any([0.2, 0.2]));
    assert!(index.point_in_any([10.2, 10.2]));
    assert!(!index.point_in_any([5.0, 5.0]));

    // Triangle-backed polygons are addressable by decode-order id.
    assert!(index.polygon_by_id("0").is_some());
    assert!(index.polygon_by_id("1").is_some());
    assert!(index.polygon_by_id("2").is_none());
}

#[test]
fn distance_matches_between_nested_squares() {
    let inner = square("d", -1.0, -1.0, 1.0, 1.0);
    let outer = square("d", -3.0, -3.0, 3.0, 3.0);

    // A point in the annulus between the rings.
    let p = [2.0, 0.0];
    let d_inner = distance_to_boundary(p, &inner);
    let d_outer = distance_to_boundary(p, &outer);
    assert!((d_inner - 1.0).abs() < 1e-12);
    assert!((d_outer - 1.0).abs() < 1e-12);
}
