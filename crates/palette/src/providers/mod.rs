//! Concrete palette providers.

pub mod color_v1;
pub mod color_v2;
pub mod mono_terrain;
pub mod terrarium;

use std::sync::Arc;

use crate::provider::PaletteProvider;

pub use color_v1::ColorV1Provider;
pub use color_v2::ColorV2Provider;
pub use mono_terrain::{MonoTerrainLandProvider, MonoTerrainWaterProvider};
pub use terrarium::{TerrariumLandProvider, TerrariumWaterProvider};

/// Every provider the server exposes, in registration order.
pub fn all_providers() -> Vec<Arc<dyn PaletteProvider>> {
    vec![
        Arc::new(ColorV1Provider),
        Arc::new(ColorV2Provider),
        Arc::new(TerrariumLandProvider),
        Arc::new(TerrariumWaterProvider),
        Arc::new(MonoTerrainLandProvider),
        Arc::new(MonoTerrainWaterProvider),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_names_are_unique() {
        let providers = all_providers();
        let mut names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn test_zoom_limits() {
        for provider in all_providers() {
            let expected = match provider.name() {
                "color-v1" | "color-v2" => 13,
                _ => 14,
            };
            assert_eq!(provider.max_zoom(), expected, "{}", provider.name());
        }
    }
}
