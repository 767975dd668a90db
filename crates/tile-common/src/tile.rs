//! Web Mercator (Google/OSM) tile addressing.

use serde::{Deserialize, Serialize};

/// A tile coordinate (z/x/y) on the standard slippy-map grid.
///
/// The origin is the top-left corner of the world: `y` grows southward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level
    pub z: u32,
    /// Column (x)
    pub x: u32,
    /// Row (y)
    pub y: u32,
}

impl TileCoord {
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Generate a cache key string.
    pub fn cache_key(&self) -> String {
        format!("{}/{}/{}", self.z, self.x, self.y)
    }

    /// The four children tiles at zoom + 1, in (dx, dy) order
    /// (0,0), (1,0), (0,1), (1,1).
    pub fn children(&self) -> [TileCoord; 4] {
        let x = self.x * 2;
        let y = self.y * 2;
        let z = self.z + 1;
        [
            TileCoord { z, x, y },
            TileCoord { z, x: x + 1, y },
            TileCoord { z, x, y: y + 1 },
            TileCoord {
                z,
                x: x + 1,
                y: y + 1,
            },
        ]
    }
}

/// Latitudes of the top and bottom edges of tile row `y` at zoom `z`.
pub fn tile_latitudes(z: u32, y: u32) -> (f64, f64) {
    let n = std::f64::consts::PI - 2.0 * std::f64::consts::PI * y as f64 / 2f64.powi(z as i32);
    let top = n.sinh().atan().to_degrees();

    let n = std::f64::consts::PI - 2.0 * std::f64::consts::PI * (y + 1) as f64 / 2f64.powi(z as i32);
    let bottom = n.sinh().atan().to_degrees();

    (top, bottom)
}

/// Longitudes of the western and eastern edges of tile column `x` at zoom `z`.
pub fn tile_longitudes(z: u32, x: u32) -> (f64, f64) {
    let tile_width = 360.0 / 2f64.powi(z as i32);
    let min_lon = x as f64 * tile_width - 180.0;
    (min_lon, min_lon + tile_width)
}
