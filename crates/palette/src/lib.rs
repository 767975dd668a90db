//! Elevation colorization.
//!
//! Palettes are ordered elevation/color stops interpolated with a
//! smoothstep factor and gamma-correct channel blending. Concrete
//! providers turn a field of classified pixels into themed raster
//! tiles or raw elevation encodings (Terrarium RGB, 16-bit mono).

pub mod canvas;
pub mod cell;
pub mod color;
pub mod provider;
pub mod providers;

pub use canvas::{encode_png, Gray16Canvas, PngCompression, RgbaCanvas, TileCanvas};
pub use cell::{CellField, ColorInput, DataCell};
pub use color::{color_for_elevation, mix, Color, ColorStop};
pub use provider::PaletteProvider;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("zoom level {0} is not supported")]
    ZoomUnsupported(u32),

    #[error("cell field is empty")]
    EmptyInput,

    #[error("png encoding failed: {0}")]
    Encode(String),
}
