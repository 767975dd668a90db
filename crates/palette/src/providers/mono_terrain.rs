//! 16-bit monochrome elevation encodings, masked to land or water.
//!
//! `gray = (elevation + 7500)·4`; decoders invert with
//! `elevation = gray/4 − 7500`.

use crate::canvas::{Gray16Canvas, PngCompression, TileCanvas};
use crate::cell::ColorInput;
use crate::provider::{checked_size, PaletteProvider};
use crate::PaletteError;

pub const ZERO_ELEVATION: u16 = 30000;
pub const ICE_ELEVATION: u16 = 30012;

const ELEVATION_SHIFT: f32 = 7500.0;

pub fn encode_elevation(elevation: f32) -> u16 {
    let v = (elevation + ELEVATION_SHIFT) * 4.0;
    v.round().clamp(0.0, u16::MAX as f32) as u16
}

pub fn decode_elevation(gray: u16) -> f32 {
    gray as f32 / 4.0 - ELEVATION_SHIFT
}

pub struct MonoTerrainLandProvider;

impl PaletteProvider for MonoTerrainLandProvider {
    fn name(&self) -> &'static str {
        "mono-terrain-land"
    }

    fn max_zoom(&self) -> u32 {
        14
    }

    fn compression(&self) -> PngCompression {
        PngCompression::Fast
    }

    fn render(&self, input: &ColorInput<'_>) -> Result<TileCanvas, PaletteError> {
        let size = checked_size(self, input)?;
        let mut canvas = Gray16Canvas::new(size);

        for y in 0..size {
            for x in 0..size {
                let cell = input.cells.cell(x, y);

                let value = if !cell.is_land() {
                    if cell.is_ice() {
                        ICE_ELEVATION
                    } else {
                        ZERO_ELEVATION
                    }
                } else if cell.elevation() == 0.0 {
                    ZERO_ELEVATION
                } else {
                    encode_elevation(cell.elevation())
                };

                canvas.put(x, y, value);
            }
        }

        Ok(TileCanvas::Gray16(canvas))
    }
}

pub struct MonoTerrainWaterProvider;

impl PaletteProvider for MonoTerrainWaterProvider {
    fn name(&self) -> &'static str {
        "mono-terrain-water"
    }

    fn max_zoom(&self) -> u32 {
        14
    }

    fn compression(&self) -> PngCompression {
        PngCompression::Fast
    }

    fn render(&self, input: &ColorInput<'_>) -> Result<TileCanvas, PaletteError> {
        let size = checked_size(self, input)?;
        let mut canvas = Gray16Canvas::new(size);

        for y in 0..size {
            for x in 0..size {
                let cell = input.cells.cell(x, y);

                let value = if cell.is_land() {
                    ZERO_ELEVATION
                } else if cell.is_ice() {
                    ICE_ELEVATION
                } else if cell.elevation() == 0.0 {
                    ZERO_ELEVATION
                } else {
                    encode_elevation(cell.elevation())
                };

                canvas.put(x, y, value);
            }
        }

        Ok(TileCanvas::Gray16(canvas))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubCell, UniformField};

    fn render_land(cell: StubCell) -> u16 {
        let field = UniformField { cell, size: 2 };
        let input = ColorInput {
            zoom: 12,
            cells: &field,
        };
        match MonoTerrainLandProvider.render(&input).unwrap() {
            TileCanvas::Gray16(canvas) => canvas.pixel(0, 0),
            _ => panic!("mono-terrain renders Gray16"),
        }
    }

    #[test]
    fn test_encode_decode_round_trip() {
        for elevation in [-7500.0f32, -220.0, 0.0, 1234.0, 8848.0] {
            assert_eq!(decode_elevation(encode_elevation(elevation)), elevation);
        }
    }

    #[test]
    fn test_encode_clamps_extremes() {
        assert_eq!(encode_elevation(-12000.0), 0);
        assert_eq!(encode_elevation(99999.0), u16::MAX);
    }

    #[test]
    fn test_land_profile_values() {
        assert_eq!(render_land(StubCell::land(1234.0)), encode_elevation(1234.0));
        assert_eq!(render_land(StubCell::water(-2000.0)), ZERO_ELEVATION);

        let mut icy = StubCell::water(-50.0);
        icy.ice = true;
        assert_eq!(render_land(icy), ICE_ELEVATION);
    }
}
