//! Binary triangle layer format (`.tri.pbf`).
//!
//! A protobuf `TriangleCollection` of 3-vertex triangles with 32-bit
//! float coordinates (`x` = lon, `y` = lat). Triangle ids are assigned
//! as the decode-order index, stringified.

use prost::Message;

use crate::triangle::Triangle;
use crate::GeometryError;

#[derive(Clone, PartialEq, Message)]
pub struct Point {
    #[prost(float, tag = "1")]
    pub x: f32,
    #[prost(float, tag = "2")]
    pub y: f32,
}

#[derive(Clone, PartialEq, Message)]
pub struct PbTriangle {
    #[prost(message, optional, tag = "1")]
    pub p1: Option<Point>,
    #[prost(message, optional, tag = "2")]
    pub p2: Option<Point>,
    #[prost(message, optional, tag = "3")]
    pub p3: Option<Point>,
}

#[derive(Clone, PartialEq, Message)]
pub struct TriangleCollection {
    #[prost(message, repeated, tag = "1")]
    pub triangles: Vec<PbTriangle>,
}

/// Decode a triangle collection from protobuf bytes.
pub fn decode(data: &[u8]) -> Result<Vec<Triangle>, GeometryError> {
    let collection =
        TriangleCollection::decode(data).map_err(|e| GeometryError::Codec(e.to_string()))?;

    collection
        .triangles
        .into_iter()
        .enumerate()
        .map(|(i, tri)| {
            let p1 = tri.p1.ok_or_else(|| missing_vertex(i))?;
            let p2 = tri.p2.ok_or_else(|| missing_vertex(i))?;
            let p3 = tri.p3.ok_or_else(|| missing_vertex(i))?;
            Ok(Triangle::new(
                i.to_string(),
                [
                    [p1.x as f64, p1.y as f64],
                    [p2.x as f64, p2.y as f64],
                    [p3.x as f64, p3.y as f64],
                ],
            ))
        })
        .collect()
}

/// Encode triangles into the binary layer format.
pub fn encode(triangles: &[Triangle]) -> Vec<u8> {
    let collection = TriangleCollection {
        triangles: triangles
            .iter()
            .map(|tri| {
                let points = tri.points();
                let pb = |p: [f64; 2]| Point {
                    x: p[0] as f32,
                    y: p[1] as f32,
                };
                PbTriangle {
                    p1: Some(pb(points[0])),
                    p2: Some(pb(points[1])),
                    p3: Some(pb(points[2])),
                }
            })
            .collect(),
    };
    collection.encode_to_vec()
}

fn missing_vertex(index: usize) -> GeometryError {
    GeometryError::Codec(format!("triangle {index} is missing a vertex"))
}
