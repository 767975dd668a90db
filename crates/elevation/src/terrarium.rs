//! Terrarium-encoded elevation source.
//!
//! A tile at zoom `z` is assembled from its four children at `z + 1`,
//! fetched concurrently and composited into one 512×512 grid, so the
//! served resolution doubles the upstream's 256-pixel tiles.

use std::time::Duration;

use async_trait::async_trait;
use image::RgbaImage;
use tracing::{debug, warn};

use tile_common::TileCoord;

use crate::source::ElevationSource;
use crate::{ElevationError, ElevationGrid};

const SOURCE_URL: &str = "https://elevation-tiles-prod.s3.amazonaws.com/terrarium";

/// Upstream tile side length; the composited grid is twice this.
pub const CHILD_TILE_SIZE: usize = 256;

const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(200);

pub struct TerrariumSource {
    client: reqwest::Client,
}

impl TerrariumSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch_child(&self, coord: TileCoord) -> Result<RgbaImage, ElevationError> {
        let url = format!("{SOURCE_URL}/{}/{}/{}.png", coord.z, coord.x, coord.y);

        let mut last_error = String::new();
        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                tokio::time::sleep(RETRY_DELAY).await;
                debug!(url = %url, attempt, "retrying child tile download");
            }

            match self.try_fetch(&url).await {
                Ok(image) => return Ok(image),
                Err(message) => {
                    warn!(url = %url, attempt, error = %message, "child tile download failed");
                    last_error = message;
                }
            }
        }

        Err(ElevationError::Upstream(format!(
            "failed to download {url} after {MAX_ATTEMPTS} attempts: {last_error}"
        )))
    }

    async fn try_fetch(&self, url: &str) -> Result<RgbaImage, String> {
        let response = self.client.get(url).send().await.map_err(|e| e.to_string())?;
        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status()));
        }

        let body = response.bytes().await.map_err(|e| e.to_string())?;
        let image = image::load_from_memory_with_format(&body, image::ImageFormat::Png)
            .map_err(|e| e.to_string())?;

        Ok(image.to_rgba8())
    }
}

#[async_trait]
impl ElevationSource for TerrariumSource {
    fn name(&self) -> &'static str {
        "terrarium"
    }

    async fn fetch(&self, coord: TileCoord) -> Result<ElevationGrid, ElevationError> {
        let children = coord.children();
        let images = futures::future::try_join_all(
            children.iter().map(|child| self.fetch_child(*child)),
        )
        .await?;

        composite_children(&children, &images)
    }
}

/// Composite the four child images into one double-size grid, decoding
/// each pixel's Terrarium triple into meters. The child at
/// `(2x + i, 2y + j)` lands at pixel offset `(i·256, j·256)`.
pub fn composite_children(
    children: &[TileCoord; 4],
    images: &[RgbaImage],
) -> Result<ElevationGrid, ElevationError> {
    let mut grid = ElevationGrid::new(CHILD_TILE_SIZE * 2);

    for (child, image) in children.iter().zip(images) {
        if image.dimensions() != (CHILD_TILE_SIZE as u32, CHILD_TILE_SIZE as u32) {
            return Err(ElevationError::Decode(format!(
                "child tile {} is {}x{}, expected {CHILD_TILE_SIZE}x{CHILD_TILE_SIZE}",
                child.cache_key(),
                image.width(),
                image.height()
            )));
        }

        let offset_x = (child.x % 2) as usize * CHILD_TILE_SIZE;
        let offset_y = (child.y % 2) as usize * CHILD_TILE_SIZE;

        for (x, y, pixel) in image.enumerate_pixels() {
            let [r, g, b, _] = pixel.0;
            grid.set(
                offset_x + x as usize,
                offset_y + y as usize,
                decode_terrarium(r, g, b),
            );
        }
    }

    Ok(grid)
}

/// Invert the Terrarium RGB encoding: `h = R·256 + G + B/256 − 32768`.
pub fn decode_terrarium(r: u8, g: u8, b: u8) -> f32 {
    r as f32 * 256.0 + g as f32 + b as f32 / 256.0 - 32768.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid_child(r: u8, g: u8, b: u8) -> RgbaImage {
        RgbaImage::from_pixel(
            CHILD_TILE_SIZE as u32,
            CHILD_TILE_SIZE as u32,
            Rgba([r, g, b, 255]),
        )
    }

    #[test]
    fn test_decode_terrarium_known_values() {
        assert_eq!(decode_terrarium(128, 0, 0), 0.0);
        assert_eq!(decode_terrarium(132, 210, 0), 1234.0);
        assert_eq!(decode_terrarium(0, 0, 0), -32768.0);
        assert_eq!(decode_terrarium(128, 0, 128), 0.5);
    }

    #[test]
    fn test_composite_places_children_by_parity() {
        let children = TileCoord::new(4, 6, 10).children();
        // Encode a distinct elevation per child: 1, 2, 3, 4 meters.
        let images = vec![
            solid_child(128, 1, 0),
            solid_child(128, 2, 0),
            solid_child(128, 3, 0),
            solid_child(128, 4, 0),
        ];

        let grid = composite_children(&children, &images).unwrap();
        assert_eq!(grid.tile_size(), 512);

        // children() yields (dx, dy) = (0,0), (1,0), (0,1), (1,1).
        assert_eq!(grid.get(0, 0), 1.0);
        assert_eq!(grid.get(256, 0), 2.0);
        assert_eq!(grid.get(0, 256), 3.0);
        assert_eq!(grid.get(256, 256), 4.0);

        // Quadrant interiors are uniform.
        assert_eq!(grid.get(255, 255), 1.0);
        assert_eq!(grid.get(511, 511), 4.0);
    }

    #[test]
    fn test_composite_rejects_wrong_child_size() {
        let children = TileCoord::new(4, 6, 10).children();
        let mut images = vec![
            solid_child(128, 1, 0),
            solid_child(128, 2, 0),
            solid_child(128, 3, 0),
            solid_child(128, 4, 0),
        ];
        images[2] = RgbaImage::from_pixel(64, 64, Rgba([128, 3, 0, 255]));

        assert!(matches!(
            composite_children(&children, &images),
            Err(ElevationError::Decode(_))
        ));
    }
}
