//! GeoTIFF elevation source.
//!
//! One upstream call per tile, no retry. The first band is 16-bit
//! signed gray; the grid side length follows the decoded width.

use async_trait::async_trait;
use image::DynamicImage;

use tile_common::TileCoord;

use crate::source::ElevationSource;
use crate::{ElevationError, ElevationGrid};

const SOURCE_URL: &str =
    "https://elevation-tiles-prod.s3.dualstack.us-east-1.amazonaws.com/geotiff";

pub struct GeoTiffSource {
    client: reqwest::Client,
}

impl GeoTiffSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ElevationSource for GeoTiffSource {
    fn name(&self) -> &'static str {
        "geotiff"
    }

    async fn fetch(&self, coord: TileCoord) -> Result<ElevationGrid, ElevationError> {
        let url = format!("{SOURCE_URL}/{}/{}/{}.tif", coord.z, coord.x, coord.y);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ElevationError::Upstream(format!("failed to download {url}: {e}")))?;
        if !response.status().is_success() {
            return Err(ElevationError::Upstream(format!(
                "HTTP {} for {url}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ElevationError::Upstream(format!("failed to read {url}: {e}")))?;

        decode_geotiff(&body)
    }
}

/// Decode the first band of a GeoTIFF into float meters.
pub fn decode_geotiff(data: &[u8]) -> Result<ElevationGrid, ElevationError> {
    let image = image::load_from_memory_with_format(data, image::ImageFormat::Tiff)
        .map_err(|e| ElevationError::Decode(e.to_string()))?;

    match image {
        DynamicImage::ImageLuma16(band) => {
            let tile_size = band.width() as usize;
            if band.height() as usize != tile_size {
                return Err(ElevationError::Decode(format!(
                    "non-square elevation tile: {}x{}",
                    band.width(),
                    band.height()
                )));
            }

            let mut grid = ElevationGrid::new(tile_size);
            for (x, y, pixel) in band.enumerate_pixels() {
                // The band stores signed meters in unsigned samples.
                grid.set(x as usize, y as usize, pixel.0[0] as i16 as f32);
            }
            Ok(grid)
        }
        // 8-bit gray means an empty tile; everything stays at sea level.
        DynamicImage::ImageLuma8(band) => Ok(ElevationGrid::new(band.width() as usize)),
        other => Err(ElevationError::Decode(format!(
            "unsupported color type: {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};
    use std::io::Cursor;

    #[test]
    fn test_decode_signed_band() {
        let mut band: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(4, 4);
        band.put_pixel(0, 0, Luma([1234u16]));
        // -500 as two's-complement u16.
        band.put_pixel(1, 0, Luma([(-500i16) as u16]));

        let mut bytes = Vec::new();
        DynamicImage::ImageLuma16(band)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Tiff)
            .unwrap();

        let grid = decode_geotiff(&bytes).unwrap();
        assert_eq!(grid.tile_size(), 4);
        assert_eq!(grid.get(0, 0), 1234.0);
        assert_eq!(grid.get(1, 0), -500.0);
        assert_eq!(grid.get(2, 2), 0.0);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            decode_geotiff(&[1, 2, 3, 4]),
            Err(ElevationError::Decode(_))
        ));
    }
}
