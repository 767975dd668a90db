//! Coastline smoothing.
//!
//! True coastline pixels get their elevation mixed with a
//! distance-weighted average of their neighborhood, clamped to the
//! correct side of sea level. Pixels whose neighborhood touches the
//! tile edge are left alone so adjacent tiles stay seam-free.

use elevation::ElevationGrid;

/// Share of the smoothed average mixed into the original elevation.
const MIX_FACTOR: f32 = 0.5;

/// Elevation band treated as potential coastline.
const COASTLINE_BAND: f32 = 200.0;

/// Minimum share of both land and water in the neighborhood.
const MIN_CLASS_SHARE: f64 = 0.2;

/// Smoothed elevation for the pixel at `(x, y)`. Reads only; the
/// caller decides where the value lands.
pub fn smooth_coastline(
    elevation: f32,
    x: usize,
    y: usize,
    grid: &ElevationGrid,
    zoom: u32,
) -> f32 {
    if zoom < 7 {
        return elevation;
    }

    if elevation.abs() > COASTLINE_BAND {
        return elevation;
    }

    let radius = 1i32 << (zoom - 7);
    let (x, y) = (x as i32, y as i32);

    let stats = grid.neighborhood_stats(x, y, radius);
    if stats.has_edge {
        return elevation;
    }

    let min_count = (stats.total() as f64 * MIN_CLASS_SHARE) as usize;
    if stats.land_count < min_count || stats.water_count < min_count {
        return elevation;
    }

    let mut weighted_sum = 0.0f32;
    let mut total_weight = 0.0f32;
    let center_is_land = grid.is_land(x, y);

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx == 0 && dy == 0 {
                continue;
            }

            let neighbor = grid.get(x + dx, y + dy);
            let neighbor_is_land = grid.is_land(x + dx, y + dy);

            let distance = ((dx * dx + dy * dy) as f64).sqrt();
            let mut weight = (1.0 / (1.0 + distance)) as f32;

            // Same-class neighbors pull harder than the opposite shore.
            if neighbor_is_land == center_is_land {
                weight *= 2.0;
            } else {
                weight *= 1.5;
            }

            weighted_sum += neighbor * weight;
            total_weight += weight;
        }
    }

    let smoothed = weighted_sum / total_weight;
    let result = elevation * (1.0 - MIX_FACTOR) + smoothed * MIX_FACTOR;

    // The smoothed pixel must not switch sides of sea level.
    if center_is_land {
        result.max(0.1)
    } else {
        result.min(0.0)
    }
}
