//! Tile request validation.

use palette::PaletteProvider;
use tile_common::{TileCoord, TileError};

/// Split the final path segment into its coordinate and extension,
/// e.g. `"7.png"` → `(7, "png")`.
pub fn parse_tile_segment(segment: &str) -> Result<(u32, &str), TileError> {
    let (coord, ext) = segment
        .rsplit_once('.')
        .ok_or_else(|| TileError::Validation(format!("missing file extension in '{segment}'")))?;

    let coord = coord
        .parse::<u32>()
        .map_err(|_| TileError::Validation(format!("invalid x coordinate '{coord}'")))?;

    Ok((coord, ext))
}

/// Check coordinate ranges against the provider's zoom ceiling.
pub fn validate_coord(
    provider: &dyn PaletteProvider,
    z: u32,
    y: u32,
    x: u32,
) -> Result<TileCoord, TileError> {
    if z > provider.max_zoom() {
        return Err(TileError::Validation(format!(
            "zoom {z} exceeds maximum {} for provider {}",
            provider.max_zoom(),
            provider.name()
        )));
    }

    let scale = 1u64 << z;
    if (x as u64) >= scale {
        return Err(TileError::Validation(format!(
            "x coordinate {x} out of range at zoom {z}"
        )));
    }
    if (y as u64) >= scale {
        return Err(TileError::Validation(format!(
            "y coordinate {y} out of range at zoom {z}"
        )));
    }

    Ok(TileCoord::new(z, x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::providers::{ColorV1Provider, TerrariumLandProvider};

    #[test]
    fn test_parse_tile_segment() {
        assert_eq!(parse_tile_segment("7.png").unwrap(), (7, "png"));
        assert!(parse_tile_segment("7").is_err());
        assert!(parse_tile_segment("abc.png").is_err());
        assert!(parse_tile_segment("-1.png").is_err());
    }

    #[test]
    fn test_zoom_ceiling_is_per_provider() {
        assert!(validate_coord(&ColorV1Provider, 13, 0, 0).is_ok());
        assert!(validate_coord(&ColorV1Provider, 14, 0, 0).is_err());
        assert!(validate_coord(&TerrariumLandProvider, 14, 0, 0).is_ok());
        assert!(validate_coord(&TerrariumLandProvider, 15, 0, 0).is_err());
    }

    #[test]
    fn test_coordinate_range() {
        assert!(validate_coord(&ColorV1Provider, 3, 7, 7).is_ok());
        assert!(validate_coord(&ColorV1Provider, 3, 8, 0).is_err());
        assert!(validate_coord(&ColorV1Provider, 3, 0, 8).is_err());
        assert!(validate_coord(&ColorV1Provider, 0, 0, 0).is_ok());
        assert!(validate_coord(&ColorV1Provider, 0, 0, 1).is_err());
    }
}
