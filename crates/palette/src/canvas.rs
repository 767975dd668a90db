//! Output canvases and PNG encoding.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};

use crate::color::Color;
use crate::PaletteError;

/// A square RGBA8 pixel buffer.
pub struct RgbaCanvas {
    size: usize,
    pixels: Vec<u8>,
}

impl RgbaCanvas {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            pixels: vec![0; size * size * 4],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn put(&mut self, x: usize, y: usize, color: Color) {
        let idx = (y * self.size + x) * 4;
        self.pixels[idx] = color.r;
        self.pixels[idx + 1] = color.g;
        self.pixels[idx + 2] = color.b;
        self.pixels[idx + 3] = color.a;
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        let idx = (y * self.size + x) * 4;
        Color::new(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }
}

/// A square 16-bit grayscale buffer.
pub struct Gray16Canvas {
    size: usize,
    pixels: Vec<u16>,
}

impl Gray16Canvas {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            pixels: vec![0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn put(&mut self, x: usize, y: usize, value: u16) {
        self.pixels[y * self.size + x] = value;
    }

    pub fn pixel(&self, x: usize, y: usize) -> u16 {
        self.pixels[y * self.size + x]
    }
}

/// A rendered tile before encoding.
pub enum TileCanvas {
    Rgba(RgbaCanvas),
    Gray16(Gray16Canvas),
}

/// PNG compression choice per provider: raw elevation encodings favor
/// encode speed, themed tiles favor size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngCompression {
    Fast,
    Default,
}

/// Encode a canvas as PNG.
pub fn encode_png(canvas: &TileCanvas, compression: PngCompression) -> Result<Vec<u8>, PaletteError> {
    let compression = match compression {
        PngCompression::Fast => CompressionType::Fast,
        PngCompression::Default => CompressionType::Default,
    };

    let mut out = Vec::new();
    match canvas {
        TileCanvas::Rgba(canvas) => {
            PngEncoder::new_with_quality(&mut out, compression, FilterType::Adaptive)
                .write_image(
                    &canvas.pixels,
                    canvas.size as u32,
                    canvas.size as u32,
                    ExtendedColorType::Rgba8,
                )
                .map_err(|e| PaletteError::Encode(e.to_string()))?;
        }
        TileCanvas::Gray16(canvas) => {
            // PngEncoder expects native-endian samples and converts to
            // big-endian internally.
            let bytes: Vec<u8> = canvas
                .pixels
                .iter()
                .flat_map(|value| value.to_ne_bytes())
                .collect();
            PngEncoder::new_with_quality(&mut out, compression, FilterType::Adaptive)
                .write_image(
                    &bytes,
                    canvas.size as u32,
                    canvas.size as u32,
                    ExtendedColorType::L16,
                )
                .map_err(|e| PaletteError::Encode(e.to_string()))?;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_round_trip_through_png() {
        let mut canvas = RgbaCanvas::new(4);
        canvas.put(1, 2, Color::new(10, 20, 30, 255));

        let png = encode_png(&TileCanvas::Rgba(canvas), PngCompression::Default).unwrap();
        let decoded = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.get_pixel(1, 2).0, [10, 20, 30, 255]);
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_gray16_round_trip_through_png() {
        let mut canvas = Gray16Canvas::new(4);
        canvas.put(3, 0, 30012);

        let png = encode_png(&TileCanvas::Gray16(canvas), PngCompression::Fast).unwrap();
        let decoded = image::load_from_memory_with_format(&png, image::ImageFormat::Png).unwrap();
        let decoded = decoded.to_luma16();
        assert_eq!(decoded.get_pixel(3, 0).0, [30012]);
    }
}
