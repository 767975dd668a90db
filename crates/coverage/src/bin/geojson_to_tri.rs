//! Offline converter: GeoJSON polygon layer → triangulated `.tri.pbf`.
//!
//! Usage: `geojson-to-tri <input.geojson> <output.tri.pbf>`

use std::process::ExitCode;

use geojson::{GeoJson, Value};

use geo_index::{codec, triangulate, Point2, Triangle};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: geojson-to-tri <input.geojson> <output.tri.pbf>");
        return ExitCode::FAILURE;
    }

    match run(&args[1], &args[2]) {
        Ok(count) => {
            eprintln!("wrote {count} triangles to {}", args[2]);
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(input: &str, output: &str) -> Result<usize, String> {
    let data = std::fs::read_to_string(input).map_err(|e| format!("reading {input}: {e}"))?;
    let parsed: GeoJson = data.parse().map_err(|e| format!("parsing {input}: {e}"))?;

    let GeoJson::FeatureCollection(collection) = parsed else {
        return Err(format!("{input} is not a FeatureCollection"));
    };

    let mut triangles: Vec<Triangle> = Vec::new();
    for feature in &collection.features {
        let Some(geometry) = &feature.geometry else {
            continue;
        };

        match &geometry.value {
            Value::Polygon(rings) => collect_triangles(&mut triangles, rings)?,
            Value::MultiPolygon(polys) => {
                for rings in polys {
                    collect_triangles(&mut triangles, rings)?;
                }
            }
            _ => {}
        }
    }

    std::fs::write(output, codec::encode(&triangles))
        .map_err(|e| format!("writing {output}: {e}"))?;

    Ok(triangles.len())
}

fn collect_triangles(
    triangles: &mut Vec<Triangle>,
    rings: &[Vec<Vec<f64>>],
) -> Result<(), String> {
    let rings: Vec<Vec<Point2>> = rings
        .iter()
        .map(|ring| ring.iter().map(|pos| [pos[0], pos[1]]).collect())
        .collect();

    for points in triangulate(&rings).map_err(|e| e.to_string())? {
        let id = triangles.len().to_string();
        triangles.push(Triangle::new(id, points));
    }

    Ok(())
}
