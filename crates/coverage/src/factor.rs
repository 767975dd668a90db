//! Distance-blended factor between paired inner/outer layers.

use geo_index::{distance_to_boundary, GeoIndex, IndexedPolygon, Point2};
use tracing::warn;

/// Blend factor for a point against a paired (inner, outer) layer set.
///
/// 1 inside any inner polygon, 0 outside every outer polygon. In the
/// annulus between them the factor falls off linearly in the ratio of
/// boundary distances: `1 − d_inner / (d_inner + d_outer)`, measured
/// against the inner polygon sharing the id of the containing outer
/// polygon. An outer polygon without an inner counterpart stands in
/// for itself.
pub fn pair_factor(point: Point2, inner: &GeoIndex, outer: &GeoIndex) -> f64 {
    let outer_hits = outer.point_in_polygons(point);
    if outer_hits.is_empty() {
        return 0.0;
    }

    if !inner.point_in_polygons(point).is_empty() {
        return 1.0;
    }

    let mut closest: Option<(&IndexedPolygon, f64)> = None;
    for &outer_poly in &outer_hits {
        let candidate = match inner.polygon_by_id(outer_poly.id()) {
            Some(p) => p,
            None => {
                warn!(id = outer_poly.id(), "no inner polygon for outer id");
                outer_poly
            }
        };

        let dist = distance_to_boundary(point, candidate);
        if closest.map_or(true, |(_, best)| dist < best) {
            closest = Some((candidate, dist));
        }
    }

    // outer_hits is non-empty, so a closest candidate always exists.
    let (closest_poly, distance_to_inner) = closest.expect("candidate list is non-empty");

    // Measure the outer distance against the same polygon id.
    let outer_same = outer
        .polygon_by_id(closest_poly.id())
        .unwrap_or(outer_hits[0]);
    let distance_to_outer = distance_to_boundary(point, outer_same);

    let total = distance_to_inner + distance_to_outer;
    if total == 0.0 {
        return 1.0;
    }

    1.0 - (distance_to_inner / total).clamp(0.0, 1.0)
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

    fn nested_layers() -> (GeoIndex, GeoIndex) {
        let mut inner = GeoIndex::new();
        inner.insert(square("0", -1.0, 1.0)).unwrap();
        let mut outer = GeoIndex::new();
        outer.insert(square("0", -3.0, 3.0)).unwrap();
        (inner, outer)
    }

    #[test]
    fn test_inside_inner_is_one() {
        let (inner, outer) = nested_layers();
        assert_eq!(pair_factor([0.0, 0.0], &inner, &outer), 1.0);
    }

    #[test]
    fn test_outside_outer_is_zero() {
        let (inner, outer) = nested_layers();
        assert_eq!(pair_factor([5.0, 0.0], &inner, &outer), 0.0);
    }

    #[test]
    fn test_midpoint_of_annulus() {
        let (inner, outer) = nested_layers();
        // d_inner = 1, d_outer = 1 at x = 2.
        let factor = pair_factor([2.0, 0.0], &inner, &outer);
        assert!((factor - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_monotonic_along_ray() {
        let (inner, outer) = nested_layers();
        let samples: Vec<f64> = [0.5, 1.2, 1.6, 2.0, 2.4, 2.8, 3.5]
            .iter()
            .map(|&x| pair_factor([x, 0.0], &inner, &outer))
            .collect();

        for pair in samples.windows(2) {
            assert!(
                pair[1] <= pair[0] + 1e-12,
                "factor increased along outward ray: {samples:?}"
            );
        }
        assert_eq!(samples[0], 1.0);
        assert_eq!(*samples.last().unwrap(), 0.0);
    }

    #[test]
    fn test_missing_inner_substitutes_outer() {
        let inner = GeoIndex::new();
        let mut outer = GeoIndex::new();
        outer.insert(square("7", -3.0, 3.0)).unwrap();

        // With the outer polygon standing in for the missing inner,
        // both distances are equal and the factor stays at 0.5.
        let factor = pair_factor([2.0, 0.0], &inner, &outer);
        assert!((factor - 0.5).abs() < 1e-12);
    }
}
