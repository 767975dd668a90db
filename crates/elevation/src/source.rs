//! The elevation source abstraction and cached service facade.

use std::sync::Arc;

use async_trait::async_trait;

use tile_common::TileCoord;

use crate::cache::{ElevationCache, DEFAULT_TTL};
use crate::{ElevationError, ElevationGrid};

/// An upstream provider of per-tile elevation grids.
#[async_trait]
pub trait ElevationSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetch and decode the grid for one tile.
    async fn fetch(&self, coord: TileCoord) -> Result<ElevationGrid, ElevationError>;
}

/// An elevation source behind the shared single-flight TTL cache.
pub struct ElevationService {
    cache: ElevationCache,
    source: Arc<dyn ElevationSource>,
}

impl ElevationService {
    pub fn new(source: Arc<dyn ElevationSource>) -> Self {
        Self {
            cache: ElevationCache::new(DEFAULT_TTL),
            source,
        }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// The grid for `coord`, from cache or a (de-duplicated) fetch.
    ///
    /// The returned grid is shared and must not be mutated; the
    /// renderer copies it before the elevation-fix pass.
    pub async fn get(&self, coord: TileCoord) -> Result<Arc<ElevationGrid>, ElevationError> {
        let source = self.source.clone();
        self.cache
            .get_or_fetch(coord, move || async move { source.fetch(coord).await })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ElevationSource for CountingSource {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn fetch(&self, _coord: TileCoord) -> Result<ElevationGrid, ElevationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ElevationGrid::new(4))
        }
    }

    #[tokio::test]
    async fn test_repeated_gets_hit_the_cache() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });
        let service = ElevationService::new(source.clone());
        let coord = TileCoord::new(6, 33, 21);

        let first = service.get(coord).await.unwrap();
        let second = service.get(coord).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
