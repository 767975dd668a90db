//! Per-pixel classification.

use coverage::GeoCoverage;
use elevation::ElevationGrid;
use palette::{CellField, DataCell};
use tile_common::TileBounds;

use super::smooth::smooth_coastline;

const POLAR_START_LATITUDE: f64 = 64.0;
const POLAR_ABSOLUTE_LATITUDE: f64 = 70.0;
const EARTH_TILT: f64 = 6.0;

/// One classified pixel. Elevation and position are fixed at build
/// time; the geospatial predicates consult the coverage layers on
/// demand.
pub struct PixelCell<'a> {
    elevation: f32,
    latitude: f64,
    longitude: f64,
    coverage: &'a GeoCoverage,
}

impl<'a> PixelCell<'a> {
    pub fn new(elevation: f32, latitude: f64, longitude: f64, coverage: &'a GeoCoverage) -> Self {
        Self {
            elevation,
            latitude,
            longitude,
            coverage,
        }
    }
}

impl DataCell for PixelCell<'_> {
    fn elevation(&self) -> f32 {
        self.elevation
    }

    fn is_land(&self) -> bool {
        if self.elevation < -420.0 {
            return false;
        }
        self.elevation > 100.0 || self.coverage.is_land(self.longitude, self.latitude)
    }

    fn is_ice(&self) -> bool {
        // No glaciers between the warm-zone latitudes.
        if self.latitude < 23.0 && self.latitude > -35.0 {
            return false;
        }
        self.coverage.is_ice(self.longitude, self.latitude)
    }

    fn desert_factor(&self) -> f64 {
        self.coverage.desert_factor(self.longitude, self.latitude)
    }

    fn polar_factor(&self) -> f64 {
        // The northern polar zone starts deeper inland than the
        // southern one, offset by the earth's tilt.
        let abs_latitude = self.latitude.abs();
        if self.latitude < -(POLAR_START_LATITUDE - EARTH_TILT) {
            let start = POLAR_START_LATITUDE - EARTH_TILT;
            let end = POLAR_ABSOLUTE_LATITUDE - EARTH_TILT;
            ((abs_latitude - start) / (end - start)).clamp(0.0, 1.0)
        } else if self.latitude > POLAR_START_LATITUDE + EARTH_TILT {
            let start = POLAR_START_LATITUDE + EARTH_TILT;
            let end = POLAR_ABSOLUTE_LATITUDE + EARTH_TILT;
            ((abs_latitude - start) / (end - start)).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn equator_factor(&self) -> f64 {
        (self.latitude.abs() / POLAR_ABSOLUTE_LATITUDE).clamp(0.0, 1.0)
    }
}

/// All cells of one tile, row-major. Built once per rendering pass.
pub struct CellMatrix<'a> {
    cells: Vec<PixelCell<'a>>,
    size: usize,
}

impl<'a> CellMatrix<'a> {
    /// Classify every pixel, feeding each cell the coastline-smoothed
    /// elevation read from the (post-fix) grid.
    pub fn build(
        grid: &ElevationGrid,
        bounds: &TileBounds,
        coverage: &'a GeoCoverage,
        zoom: u32,
    ) -> Self {
        let size = grid.tile_size();
        let mut cells = Vec::with_capacity(size * size);

        for y in 0..size {
            let latitude = bounds.pixel_lat(y);
            for x in 0..size {
                let elevation = grid.get(x as i32, y as i32);
                let elevation = smooth_coastline(elevation, x, y, grid, zoom);
                cells.push(PixelCell::new(
                    elevation,
                    latitude,
                    bounds.pixel_lon(x),
                    coverage,
                ));
            }
        }

        Self { cells, size }
    }
}

impl CellField for CellMatrix<'_> {
    fn size(&self) -> usize {
        self.size
    }

    fn cell(&self, x: usize, y: usize) -> &dyn DataCell {
        &self.cells[y * self.size + x]
    }
}
