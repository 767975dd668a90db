//! Layer loaders: pre-triangulated binary layers and GeoJSON layers.

use std::path::PathBuf;

use geojson::{GeoJson, Value};
use tokio::task;
use tracing::info;

use geo_index::{codec, GeoIndex, IndexedPolygon, Point2};

use crate::CoverageError;

/// Load a pre-triangulated `.tri.pbf` layer and bulk-build the index.
pub async fn load_triangle_layer(path: PathBuf) -> Result<GeoIndex, CoverageError> {
    task::spawn_blocking(move || {
        let data = std::fs::read(&path).map_err(|source| CoverageError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let triangles = codec::decode(&data).map_err(|e| CoverageError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        info!(path = %path.display(), triangles = triangles.len(), "loading triangle layer");

        GeoIndex::from_triangles(triangles).map_err(|e| CoverageError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    })
    .await
    .map_err(|e| CoverageError::Join(e.to_string()))?
}

/// Load a GeoJSON feature collection, triangulating each polygon into
/// the index. Feature ids follow the collection order: `"{feature}"`
/// for polygons, `"{feature}-{member}"` for multipolygon members.
pub async fn load_geojson_layer(path: PathBuf) -> Result<GeoIndex, CoverageError> {
    task::spawn_blocking(move || {
        let data = std::fs::read_to_string(&path).map_err(|source| CoverageError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let parsed: GeoJson = data.parse().map_err(|e: geojson::Error| CoverageError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let collection = match parsed {
            GeoJson::FeatureCollection(fc) => fc,
            other => {
                return Err(CoverageError::Parse {
                    path: path.display().to_string(),
                    message: format!("expected FeatureCollection, got {}", geojson_kind(&other)),
                })
            }
        };

        info!(path = %path.display(), features = collection.features.len(), "loading geojson layer");

        let mut index = GeoIndex::new();
        for (feature_idx, feature) in collection.features.iter().enumerate() {
            let Some(geometry) = &feature.geometry else {
                continue;
            };

            match &geometry.value {
                Value::Polygon(rings) => {
                    insert_polygon(&mut index, &path, feature_idx.to_string(), rings)?;
                }
                Value::MultiPolygon(polys) => {
                    for (member_idx, rings) in polys.iter().enumerate() {
                        insert_polygon(
                            &mut index,
                            &path,
                            format!("{feature_idx}-{member_idx}"),
                            rings,
                        )?;
                    }
                }
                _ => {}
            }
        }

        Ok(index)
    })
    .await
    .map_err(|e| CoverageError::Join(e.to_string()))?
}

fn insert_polygon(
    index: &mut GeoIndex,
    path: &std::path::Path,
    id: String,
    rings: &[Vec<Vec<f64>>],
) -> Result<(), CoverageError> {
    let rings: Vec<Vec<Point2>> = rings
        .iter()
        .map(|ring| ring.iter().map(|pos| [pos[0], pos[1]]).collect())
        .collect();

    index
        .insert(IndexedPolygon::new(id, rings))
        .map_err(|e| CoverageError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

fn geojson_kind(value: &GeoJson) -> &'static str {
    match value {
        GeoJson::Geometry(_) => "Geometry",
        GeoJson::Feature(_) => "Feature",
        GeoJson::FeatureCollection(_) => "FeatureCollection",
    }
}
