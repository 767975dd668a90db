//! The per-tile rendering pipeline.
//!
//! fetch grid → private copy → elevation fix → classified cells (with
//! coastal smoothing) → palette provider → PNG. Strictly sequential
//! within one request.

pub mod cell;
pub mod fix;
pub mod smooth;

use palette::{encode_png, ColorInput, PaletteProvider};
use tile_common::{TileBounds, TileCoord, TileError};

use coverage::GeoCoverage;
use elevation::{ElevationError, ElevationGrid};

use crate::state::AppState;
use self::cell::CellMatrix;

/// Fetch the elevation grid for `coord` and colorize it.
pub async fn render_tile(
    state: &AppState,
    provider: &dyn PaletteProvider,
    coord: TileCoord,
) -> Result<Vec<u8>, TileError> {
    let shared_grid = state.elevation.get(coord).await.map_err(|err| match err {
        ElevationError::Decode(message) => TileError::Decode(message),
        other => TileError::Upstream(other.to_string()),
    })?;

    // The cached grid is shared between requests; the fix step needs a
    // private copy to write into.
    let grid = ElevationGrid::clone(&shared_grid);

    colorize_tile(&state.coverage, grid, provider, coord)
}

/// The CPU half of the pipeline, deterministic for a given grid and
/// coverage set.
pub fn colorize_tile(
    coverage: &GeoCoverage,
    mut grid: ElevationGrid,
    provider: &dyn PaletteProvider,
    coord: TileCoord,
) -> Result<Vec<u8>, TileError> {
    let bounds = TileBounds::new(coord.z, coord.y, coord.x, grid.tile_size());

    fix::apply(&mut grid, &bounds, coverage);

    let cells = CellMatrix::build(&grid, &bounds, coverage, coord.z);
    let input = ColorInput {
        zoom: coord.z,
        cells: &cells,
    };

    let canvas = provider
        .render(&input)
        .map_err(|e| TileError::Encoding(e.to_string()))?;

    encode_png(&canvas, provider.compression()).map_err(|e| TileError::Encoding(e.to_string()))
}
