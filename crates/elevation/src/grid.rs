//! The per-tile elevation grid.

/// A square grid of elevations in meters, row-major.
///
/// Out-of-bounds reads return 0 (sea level); `elevation > 0` counts as
/// land for neighborhood statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationGrid {
    data: Vec<f32>,
    tile_size: usize,
}

impl ElevationGrid {
    /// A grid of the given side length filled with sea level.
    pub fn new(tile_size: usize) -> Self {
        Self {
            data: vec![0.0; tile_size * tile_size],
            tile_size,
        }
    }

    /// Wrap existing row-major data. Panics if the length is not a
    /// perfect `tile_size × tile_size` square.
    pub fn from_data(data: Vec<f32>, tile_size: usize) -> Self {
        assert_eq!(data.len(), tile_size * tile_size);
        Self { data, tile_size }
    }

    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Elevation at `(x, y)`; out of bounds reads are sea level.
    pub fn get(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x as usize >= self.tile_size || y as usize >= self.tile_size {
            return 0.0;
        }
        self.data[y as usize * self.tile_size + x as usize]
    }

    /// Rewrite the elevation at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, elevation: f32) {
        self.data[y * self.tile_size + x] = elevation;
    }

    /// True if the cell at `(x, y)` is above sea level.
    pub fn is_land(&self, x: i32, y: i32) -> bool {
        self.get(x, y) > 0.0
    }

    /// Land/water counts over the `(2r+1)²` neighborhood. Any sample
    /// falling outside the tile sets `has_edge` instead of counting.
    pub fn neighborhood_stats(&self, x: i32, y: i32, radius: i32) -> NeighborhoodStats {
        let mut stats = NeighborhoodStats::default();

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let nx = x + dx;
                let ny = y + dy;

                if nx < 0 || ny < 0 || nx as usize >= self.tile_size || ny as usize >= self.tile_size
                {
                    stats.has_edge = true;
                    continue;
                }

                if self.is_land(nx, ny) {
                    stats.land_count += 1;
                } else {
                    stats.water_count += 1;
                }
            }
        }

        stats
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeighborhoodStats {
    pub land_count: usize,
    pub water_count: usize,
    pub has_edge: bool,
}

impl NeighborhoodStats {
    pub fn total(&self) -> usize {
        self.land_count + self.water_count
    }
}
