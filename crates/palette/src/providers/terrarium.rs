//! Raw Terrarium RGB elevation encodings, masked to land or water.

use crate::canvas::{PngCompression, RgbaCanvas, TileCanvas};
use crate::cell::ColorInput;
use crate::color::Color;
use crate::provider::{checked_size, PaletteProvider};
use crate::PaletteError;

/// Sentinel for masked or sea-level pixels: encoded elevation 0.
pub const ZERO_ELEVATION: Color = Color::new(128, 0, 0, 255);

/// Sentinel for ice: encoded elevation 3.
pub const ICE_ELEVATION: Color = Color::new(128, 3, 0, 255);

/// Encode meters into the Terrarium triple `v = elevation + 32768`,
/// `R = ⌊v/256⌋`, `G = ⌊v mod 256⌋`, `B = ⌊frac(v)·256⌋`.
pub fn encode_elevation(elevation: f64) -> Color {
    let v = elevation + 32768.0;
    Color::new(
        (v / 256.0).floor() as u8,
        (v % 256.0).floor() as u8,
        ((v - v.floor()) * 256.0).floor() as u8,
        255,
    )
}

pub struct TerrariumLandProvider;

impl PaletteProvider for TerrariumLandProvider {
    fn name(&self) -> &'static str {
        "terrarium-land"
    }

    fn max_zoom(&self) -> u32 {
        14
    }

    fn compression(&self) -> PngCompression {
        PngCompression::Fast
    }

    fn render(&self, input: &ColorInput<'_>) -> Result<TileCanvas, PaletteError> {
        let size = checked_size(self, input)?;
        let mut canvas = RgbaCanvas::new(size);

        for y in 0..size {
            for x in 0..size {
                let cell = input.cells.cell(x, y);

                let color = if !cell.is_land() {
                    if cell.is_ice() {
                        ICE_ELEVATION
                    } else {
                        ZERO_ELEVATION
                    }
                } else if cell.elevation() == 0.0 {
                    ZERO_ELEVATION
                } else {
                    encode_elevation(cell.elevation() as f64)
                };

                canvas.put(x, y, color);
            }
        }

        Ok(TileCanvas::Rgba(canvas))
    }
}

pub struct TerrariumWaterProvider;

impl PaletteProvider for TerrariumWaterProvider {
    fn name(&self) -> &'static str {
        "terrarium-water"
    }

    fn max_zoom(&self) -> u32 {
        14
    }

    fn compression(&self) -> PngCompression {
        PngCompression::Fast
    }

    fn render(&self, input: &ColorInput<'_>) -> Result<TileCanvas, PaletteError> {
        let size = checked_size(self, input)?;
        let mut canvas = RgbaCanvas::new(size);

        for y in 0..size {
            for x in 0..size {
                let cell = input.cells.cell(x, y);

                let color = if cell.is_land() {
                    ZERO_ELEVATION
                } else if cell.is_ice() {
                    ICE_ELEVATION
                } else if cell.elevation() == 0.0 {
                    ZERO_ELEVATION
                } else {
                    encode_elevation(cell.elevation() as f64)
                };

                canvas.put(x, y, color);
            }
        }

        Ok(TileCanvas::Rgba(canvas))
    }
}
