//! Per-tile pixel-to-coordinate lookup tables.

use crate::bbox::BoundingBox;
use crate::tile::{tile_latitudes, tile_longitudes};

/// Precomputed geographic bounds and pixel lookup tables for one tile.
///
/// Longitude is linear across the tile. Latitude is linear in projected
/// Mercator space, so both edge latitudes are projected with
/// `y = ln(tan(π/4 + lat/2))`, interpolated per pixel row and inverted
/// back. Immutable after construction.
#[derive(Debug, Clone)]
pub struct TileBounds {
    zoom: u32,
    tile_x: u32,
    tile_y: u32,
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
    x_lookup: Vec<f64>,
    y_lookup: Vec<f64>,
}

impl TileBounds {
    pub fn new(zoom: u32, tile_y: u32, tile_x: u32, tile_size: usize) -> Self {
        let (lat_top, lat_bottom) = tile_latitudes(zoom, tile_y);
        let (min_lon, max_lon) = tile_longitudes(zoom, tile_x);

        let merc_top = mercator_y(lat_top);
        let merc_bottom = mercator_y(lat_bottom);
        let delta_merc = merc_bottom - merc_top;

        // Row 0 is the tile's top edge; rows interpolate in projected space.
        let y_lookup = (0..tile_size)
            .map(|py| {
                let norm = py as f64 / (tile_size - 1) as f64;
                inverse_mercator_y(merc_top + norm * delta_merc)
            })
            .collect();

        let delta_lon = max_lon - min_lon;
        let x_lookup = (0..tile_size)
            .map(|px| {
                let norm = px as f64 / tile_size as f64;
                min_lon + norm * delta_lon
            })
            .collect();

        Self {
            zoom,
            tile_x,
            tile_y,
            min_lat: lat_bottom,
            max_lat: lat_top,
            min_lon,
            max_lon,
            x_lookup,
            y_lookup,
        }
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn tile_x(&self) -> u32 {
        self.tile_x
    }

    pub fn tile_y(&self) -> u32 {
        self.tile_y
    }

    /// Latitude of pixel row `py`.
    pub fn pixel_lat(&self, py: usize) -> f64 {
        self.y_lookup[py]
    }

    /// Longitude of pixel column `px`.
    pub fn pixel_lon(&self, px: usize) -> f64 {
        self.x_lookup[px]
    }

    pub fn tile_size(&self) -> usize {
        self.y_lookup.len()
    }

    /// The tile's geographic bounding box.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.min_lon, self.min_lat, self.max_lon, self.max_lat)
    }
}

fn mercator_y(lat_deg: f64) -> f64 {
    (std::f64::consts::FRAC_PI_4 + lat_deg.to_radians() / 2.0).tan().ln()
}

fn inverse_mercator_y(y: f64) -> f64 {
    (2.0 * y.exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::tile_latitudes;

    #[test]
    fn test_lookup_endpoints_match_tile_edges() {
        for (z, y, x) in [(0u32, 0u32, 0u32), (3, 4, 2), (7, 40, 70), (14, 5000, 9000)] {
            let bounds = TileBounds::new(z, y, x, 256);
            let (top, bottom) = tile_latitudes(z, y);
            assert!(
                (bounds.pixel_lat(0) - top).abs() < 1e-9,
                "top edge mismatch at {}/{}/{}",
                z,
                y,
                x
            );
            assert!(
                (bounds.pixel_lat(255) - bottom).abs() < 1e-9,
                "bottom edge mismatch at {}/{}/{}",
                z,
                y,
                x
            );
        }
    }

    #[test]
    fn test_y_lookup_strictly_decreasing() {
        let bounds = TileBounds::new(5, 11, 17, 512);
        for py in 1..512 {
            assert!(bounds.pixel_lat(py) < bounds.pixel_lat(py - 1));
        }
    }

    #[test]
    fn test_x_lookup_strictly_increasing() {
        let bounds = TileBounds::new(5, 11, 17, 512);
        assert_eq!(bounds.pixel_lon(0), bounds.bounding_box().min_x);
        for px in 1..512 {
            assert!(bounds.pixel_lon(px) > bounds.pixel_lon(px - 1));
        }
    }

    #[test]
    fn test_bounding_box_is_normalized() {
        let bbox = TileBounds::new(6, 20, 33, 256).bounding_box();
        assert!(bbox.min_y < bbox.max_y);
        assert!(bbox.min_x < bbox.max_x);
    }

    #[test]
    fn test_equator_tile_latitudes() {
        // Tile 3/4/2 sits just below the equator.
        let bounds = TileBounds::new(3, 4, 2, 256);
        assert!(bounds.pixel_lat(0).abs() < 1e-9);
        assert!(bounds.pixel_lat(255) < 0.0);
    }
}
