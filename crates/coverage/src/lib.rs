//! Geospatial coverage layers consulted by the tile renderer.
//!
//! Six independent polygon layers (landmass, glaciers, inner/outer
//! deserts, inner/outer elevation-fix masks) loaded once at startup and
//! immutable afterwards, wrapped with the point and bounds queries the
//! per-pixel kernel needs.

mod factor;
pub mod loader;

use std::path::Path;

use thiserror::Error;
use tile_common::BoundingBox;
use tracing::info;

use geo_index::GeoIndex;

pub use factor::pair_factor;

#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("failed to read layer '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse layer '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("layer load task failed: {0}")]
    Join(String),
}

/// The six coverage layers plus their derived queries.
pub struct GeoCoverage {
    land: GeoIndex,
    ice: GeoIndex,
    inner_deserts: GeoIndex,
    outer_deserts: GeoIndex,
    high_fix_inner: GeoIndex,
    high_fix_outer: GeoIndex,
}

impl GeoCoverage {
    /// Assemble a coverage set from already-built layers. The loader
    /// and tests both go through this.
    pub fn new(
        land: GeoIndex,
        ice: GeoIndex,
        inner_deserts: GeoIndex,
        outer_deserts: GeoIndex,
        high_fix_inner: GeoIndex,
        high_fix_outer: GeoIndex,
    ) -> Self {
        Self {
            land,
            ice,
            inner_deserts,
            outer_deserts,
            high_fix_inner,
            high_fix_outer,
        }
    }

    /// Load all six layers concurrently from `data_dir`. Any layer
    /// failure is fatal to bootstrap.
    pub async fn load(data_dir: &Path) -> Result<Self, CoverageError> {
        let (land, ice, inner_deserts, outer_deserts, high_fix_inner, high_fix_outer) = tokio::try_join!(
            loader::load_triangle_layer(data_dir.join("osm_land_simplified.tri.pbf")),
            loader::load_triangle_layer(data_dir.join("glaciers.tri.pbf")),
            loader::load_geojson_layer(data_dir.join("inner-deserts.geojson")),
            loader::load_geojson_layer(data_dir.join("outer-deserts.geojson")),
            loader::load_geojson_layer(data_dir.join("high-fix-inner.geojson")),
            loader::load_geojson_layer(data_dir.join("high-fix-outer.geojson")),
        )?;

        info!(
            land = land.size(),
            ice = ice.size(),
            deserts = outer_deserts.size(),
            fix = high_fix_outer.size(),
            "coverage layers loaded"
        );

        Ok(Self::new(
            land,
            ice,
            inner_deserts,
            outer_deserts,
            high_fix_inner,
            high_fix_outer,
        ))
    }

    pub fn is_land(&self, lon: f64, lat: f64) -> bool {
        self.land.point_in_any([lon, lat])
    }

    pub fn is_ice(&self, lon: f64, lat: f64) -> bool {
        self.ice.point_in_any([lon, lat])
    }

    /// Desert blend factor in `[0, 1]`: 1 inside the inner desert
    /// polygons, 0 outside the outer ones, distance-blended between.
    pub fn desert_factor(&self, lon: f64, lat: f64) -> f64 {
        pair_factor([lon, lat], &self.inner_deserts, &self.outer_deserts)
    }

    /// Elevation-fix blend factor in `[0, 1]`, same pairing scheme as
    /// the deserts.
    pub fn high_fix_factor(&self, lon: f64, lat: f64) -> f64 {
        pair_factor([lon, lat], &self.high_fix_inner, &self.high_fix_outer)
    }

    /// True if the tile rectangle touches any fix-mask polygon.
    pub fn has_fix_in_bounds(&self, bounds: &BoundingBox) -> bool {
        self.high_fix_outer.bounds_intersects(bounds)
    }
}
