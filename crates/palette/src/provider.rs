//! The palette provider interface.

use crate::canvas::{PngCompression, TileCanvas};
use crate::cell::ColorInput;
use crate::PaletteError;

/// Turns a classified cell field into a tile image.
pub trait PaletteProvider: Send + Sync {
    /// URL prefix identifying this provider.
    fn name(&self) -> &'static str;

    /// Highest zoom level this provider serves.
    fn max_zoom(&self) -> u32;

    /// Compression used when the rendered tile is encoded.
    fn compression(&self) -> PngCompression;

    fn render(&self, input: &ColorInput<'_>) -> Result<TileCanvas, PaletteError>;
}

/// Shared render-input validation; returns the field side length.
pub(crate) fn checked_size(
    provider: &dyn PaletteProvider,
    input: &ColorInput<'_>,
) -> Result<usize, PaletteError> {
    if input.zoom > provider.max_zoom() {
        return Err(PaletteError::ZoomUnsupported(input.zoom));
    }
    let size = input.cells.size();
    if size == 0 {
        return Err(PaletteError::EmptyInput);
    }
    Ok(size)
}
