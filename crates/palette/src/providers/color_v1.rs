//! The original themed palette: water, normal land, polar and desert
//! tables with snow-line scaling by latitude.

use crate::canvas::{PngCompression, RgbaCanvas, TileCanvas};
use crate::cell::ColorInput;
use crate::color::{color_for_elevation, mix, stop, ColorStop};
use crate::provider::{checked_size, PaletteProvider};
use crate::PaletteError;

pub(crate) static WATER_PALETTE: [ColorStop; 8] = [
    stop(-10000.0, 65, 146, 208),
    stop(-1000.0, 87, 172, 230),
    stop(-500.0, 96, 178, 235),
    stop(-200.0, 109, 187, 239),
    stop(-80.0, 125, 197, 245),
    stop(-40.0, 170, 218, 252),
    stop(-20.0, 173, 216, 247),
    stop(0.0, 191, 228, 252),
];

pub(crate) static NORMAL_PALETTE: [ColorStop; 11] = [
    stop(0.0, 172, 208, 165),    // Coastline
    stop(50.0, 148, 191, 139),   // Coastal plains
    stop(100.0, 148, 191, 139),  // Coastal plains
    stop(300.0, 168, 198, 143),  // Lowlands
    stop(600.0, 189, 204, 150),  // Hills
    stop(1000.0, 195, 182, 157), // Low mountains
    stop(1500.0, 168, 154, 134), // Medium mountains
    stop(2000.0, 148, 144, 139), // High mountains
    stop(2500.0, 130, 115, 95),  // Very high mountains
    stop(3000.0, 240, 240, 240), // Alpine/Snow transition
    stop(4000.0, 255, 255, 255), // Permanent snow
];

pub(crate) static POLAR_PALETTE: [ColorStop; 11] = [
    stop(-500.0, 242, 248, 250), // Iced water
    stop(0.0, 235, 246, 250),    // Iced coastline
    stop(50.0, 228, 240, 245),   // Snow plains
    stop(200.0, 225, 234, 237),  // Snow lowlands
    stop(400.0, 211, 221, 222),  // Snow hills
    stop(700.0, 218, 228, 230),  // Snow mountains
    stop(1000.0, 217, 221, 222), // Deep snow mountains
    stop(1500.0, 227, 231, 232), // High snow
    stop(2000.0, 233, 238, 240), // Alpine snow
    stop(2500.0, 237, 243, 245), // Permanent snow
    stop(3000.0, 245, 251, 252), // High permanent snow
];

pub(crate) static DESERT_PALETTE: [ColorStop; 8] = [
    stop(0.0, 235, 230, 185),    // Beach
    stop(300.0, 209, 199, 159),  // Lowlands
    stop(600.0, 189, 170, 134),  // Hills
    stop(1500.0, 168, 154, 134), // Medium mountains
    stop(2000.0, 148, 144, 139), // High mountains
    stop(2500.0, 130, 115, 95),  // Very high mountains
    stop(3000.0, 240, 240, 240), // Alpine/Snow transition
    stop(4000.0, 255, 255, 255), // Permanent snow
];

pub struct ColorV1Provider;

impl PaletteProvider for ColorV1Provider {
    fn name(&self) -> &'static str {
        "color-v1"
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

                if !cell.is_land() {
                    let palette: &[ColorStop] = if cell.is_ice() {
                        &POLAR_PALETTE
                    } else {
                        &WATER_PALETTE
                    };
                    canvas.put(x, y, color_for_elevation(elevation, palette));
                    continue;
                }

                // Lower the snow line toward the poles by scaling the
                // elevation the palettes see.
                let snow_threshold = (cell.equator_factor() / 0.7).powf(1.5).max(0.05);
                let elevation = elevation * snow_threshold as f32;

                let polar_factor = cell.polar_factor();
                if polar_factor == 1.0 {
                    canvas.put(x, y, color_for_elevation(elevation, &POLAR_PALETTE));
                    continue;
                } else if polar_factor > 0.0 {
                    let polar = color_for_elevation(elevation, &POLAR_PALETTE);
                    if cell.is_ice() {
                        canvas.put(x, y, polar);
                    } else {
                        let normal = color_for_elevation(elevation, &NORMAL_PALETTE);
                        canvas.put(x, y, mix(normal, polar, polar_factor));
                    }
                    continue;
                }

                let desert_factor = cell.desert_factor();
                if desert_factor == 1.0 {
                    canvas.put(x, y, color_for_elevation(elevation, &DESERT_PALETTE));
                    continue;
                } else if desert_factor > 0.0 {
                    let normal = color_for_elevation(elevation, &NORMAL_PALETTE);
                    let desert = color_for_elevation(elevation, &DESERT_PALETTE);
                    canvas.put(x, y, mix(normal, desert, desert_factor));
                    continue;
                }

                if cell.is_ice() {
                    canvas.put(x, y, color_for_elevation(elevation, &POLAR_PALETTE));
                    continue;
                }

                canvas.put(x, y, color_for_elevation(elevation, &NORMAL_PALETTE));
            }
        }

        Ok(TileCanvas::Rgba(canvas))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubCell, UniformField};

    fn render_single(cell: StubCell) -> crate::color::Color {
        let field = UniformField { cell, size: 2 };
        let input = ColorInput {
            zoom: 3,
            cells: &field,
        };
        match ColorV1Provider.render(&input).unwrap() {
            TileCanvas::Rgba(canvas) => canvas.pixel(0, 0),
            _ => panic!("color-v1 renders RGBA"),
        }
    }

    #[test]
    fn test_oceanic_pixel_uses_water_palette() {
        let color = render_single(StubCell::water(-2000.0));
        assert_eq!(color, color_for_elevation(-2000.0, &WATER_PALETTE));
        assert_eq!(color.a, 255);
    }

    #[test]
    fn test_icy_water_uses_polar_palette() {
        let mut cell = StubCell::water(-300.0);
        cell.ice = true;
        let color = render_single(cell);
        assert_eq!(color, color_for_elevation(-300.0, &POLAR_PALETTE));
    }

    #[test]
    fn test_high_latitude_land_scales_snow_line() {
        // 68°N, 300 m: equator factor 68/70, polar factor still 0.
        let mut cell = StubCell::land(300.0);
        cell.equator = 68.0 / 70.0;

        let scale = (cell.equator / 0.7f64).powf(1.5).max(0.05);
        let scaled = 300.0f32 * scale as f32;
        assert!((scaled - 490.0).abs() < 2.0);

        let color = render_single(cell);
        assert_eq!(color, color_for_elevation(scaled, &NORMAL_PALETTE));
    }

    #[test]
    fn test_inner_desert_uses_desert_palette() {
        let mut cell = StubCell::land(400.0);
        cell.desert = 1.0;
        // Snow scaling applies before the desert branch.
        let scaled = 400.0 * 0.05;
        assert_eq!(
            render_single(cell),
            color_for_elevation(scaled, &DESERT_PALETTE)
        );
    }

    #[test]
    fn test_desert_annulus_blends_palettes() {
        let mut cell = StubCell::land(400.0);
        cell.desert = 0.5;
        let scaled = 400.0 * 0.05;
        let expected = mix(
            color_for_elevation(scaled, &NORMAL_PALETTE),
            color_for_elevation(scaled, &DESERT_PALETTE),
            0.5,
        );
        assert_eq!(render_single(cell), expected);
    }

    #[test]
    fn test_full_polar_land_uses_polar_palette() {
        let mut cell = StubCell::land(100.0);
        cell.polar = 1.0;
        cell.equator = 1.0;
        let scale = (1.0f64 / 0.7).powf(1.5);
        let scaled = 100.0 * scale as f32;
        assert_eq!(
            render_single(cell),
            color_for_elevation(scaled, &POLAR_PALETTE)
        );
    }

    #[test]
    fn test_zoom_above_max_is_rejected() {
        let field = UniformField {
            cell: StubCell::water(0.0),
            size: 2,
        };
        let input = ColorInput {
            zoom: 14,
            cells: &field,
        };
        assert!(matches!(
            ColorV1Provider.render(&input),
            Err(PaletteError::ZoomUnsupported(14))
        ));
    }
}
