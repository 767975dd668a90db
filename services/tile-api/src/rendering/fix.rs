//! Shallow-water elevation rewrite over the fix-mask layers.
//!
//! Some coastal regions in the upstream data read as implausibly
//! shallow water; inside the fix masks those pixels are pushed down
//! toward a deeper target elevation, blended at the mask edge.

use coverage::GeoCoverage;
use elevation::ElevationGrid;
use tile_common::TileBounds;

/// The fix only runs on overview zooms.
const MAX_FIX_ZOOM: u32 = 10;

const FIXED_ELEVATION: f32 = -220.0;
const MIN_HEIGHT: f32 = -24.0;

/// Rewrite masked shallow-water pixels in place.
pub fn apply(grid: &mut ElevationGrid, bounds: &TileBounds, coverage: &GeoCoverage) {
    if bounds.zoom() > MAX_FIX_ZOOM {
        return;
    }

    if !coverage.has_fix_in_bounds(&bounds.bounding_box()) {
        return;
    }

    let size = grid.tile_size();
    for y in 0..size {
        let lat = bounds.pixel_lat(y);
        for x in 0..size {
            let elevation = grid.get(x as i32, y as i32);

            // Known land keeps its elevation.
            if elevation > 20.0 {
                continue;
            }
            let lon = bounds.pixel_lon(x);
            if coverage.is_land(lon, lat) {
                continue;
            }

            let factor = coverage.high_fix_factor(lon, lat);
            if factor == 0.0 {
                continue;
            }

            let target = MIN_HEIGHT + (FIXED_ELEVATION - MIN_HEIGHT) * factor as f32;

            // Blend toward the existing elevation near the mask edge.
            if factor <= 0.1 {
                let edge_weight = (factor / 0.1) as f32;
                grid.set(x, y, target * edge_weight + elevation * (1.0 - edge_weight));
            } else {
                grid.set(x, y, target);
            }
        }
    }
}
