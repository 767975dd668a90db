//! The revised themed palette: brighter water, warmer high ground, no
//! desert handling and no latitude scaling.

use crate::canvas::{PngCompression, RgbaCanvas, TileCanvas};
use crate::cell::ColorInput;
use crate::color::{color_for_elevation, stop, ColorStop};
use crate::provider::{checked_size, PaletteProvider};
use crate::PaletteError;

pub(crate) static WATER_PALETTE: [ColorStop; 9] = [
    stop(-7000.0, 69, 121, 180),
    stop(-2500.0, 133, 185, 228),
    stop(-2000.0, 141, 193, 234),
    stop(-1500.0, 149, 201, 240),
    stop(-1000.0, 161, 210, 247),
    stop(-500.0, 171, 219, 252),
    stop(-200.0, 185, 227, 255),
    stop(-50.0, 200, 234, 255),
    stop(0.0, 216, 242, 254),
];

pub(crate) static NORMAL_PALETTE: [ColorStop; 13] = [
    stop(0.0, 172, 208, 165),
    stop(100.0, 148, 191, 139),
    stop(250.0, 168, 198, 143),
    stop(500.0, 189, 204, 150),
    stop(750.0, 209, 215, 171),
    stop(1250.0, 239, 235, 192),
    stop(1500.0, 222, 214, 163),
    stop(2000.0, 211, 202, 157),
    stop(2500.0, 202, 185, 130),
    stop(3000.0, 192, 154, 83),
    stop(5000.0, 168, 120, 62),
    stop(6500.0, 133, 100, 50),
    stop(8000.0, 100, 70, 30),
];

pub(crate) static POLAR_PALETTE: [ColorStop; 10] = [
    stop(0.0, 235, 246, 250),
    stop(50.0, 228, 240, 245),
    stop(200.0, 225, 234, 237),
    stop(400.0, 211, 221, 222),
    stop(700.0, 218, 228, 230),
    stop(1000.0, 217, 221, 222),
    stop(1500.0, 227, 231, 232),
    stop(2000.0, 233, 238, 240),
    stop(2500.0, 237, 243, 245),
    stop(3000.0, 245, 251, 252),
];

pub struct ColorV2Provider;

impl PaletteProvider for ColorV2Provider {
    fn name(&self) -> &'static str {
        "color-v2"
    }

    fn max_zoom(&self) -> u32 {
        13
    }

    fn compression(&self) -> PngCompression {
        PngCompression::Default
    }

    fn render(&self, input: &ColorInput<'_>) -> Result<TileCanvas, PaletteError> {
        let size = checked_size(self, input)?;
        let mut canvas = RgbaCanvas::new(size);

        for y in 0..size {
            for x in 0..size {
                let cell = input.cells.cell(x, y);
                let elevation = cell.elevation();

                let palette: &[ColorStop] = if !cell.is_land() {
                    if cell.is_ice() {
                        &POLAR_PALETTE
                    } else {
                        &WATER_PALETTE
                    }
                } else if cell.is_ice() {
                    &POLAR_PALETTE
                } else {
                    &NORMAL_PALETTE
                };

                canvas.put(x, y, color_for_elevation(elevation, palette));
            }
        }

        Ok(TileCanvas::Rgba(canvas))
    }
}
