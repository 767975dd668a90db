//! The per-pixel view handed to palette providers.

/// One classified pixel of a tile.
pub trait DataCell {
    /// Elevation in meters; roughly −12000 to 9000 can be expected.
    fn elevation(&self) -> f32;

    /// True if the cell is part of the landmass.
    fn is_land(&self) -> bool;

    /// True if the cell carries ice.
    fn is_ice(&self) -> bool;

    /// 0 = normal land, 1 = desert, blended in between.
    fn desert_factor(&self) -> f64;

    /// 0 = non-polar, 1 = polar, blended in between.
    fn polar_factor(&self) -> f64;

    /// 0 at the poles, 1 at the equator-facing end of the scale.
    fn equator_factor(&self) -> f64;
}

/// A square field of cells covering one tile.
pub trait CellField {
    /// Side length in pixels.
    fn size(&self) -> usize;

    fn cell(&self, x: usize, y: usize) -> &dyn DataCell;
}

/// Input for one provider render pass.
pub struct ColorInput<'a> {
    pub zoom: u32,
    pub cells: &'a dyn CellField,
}
