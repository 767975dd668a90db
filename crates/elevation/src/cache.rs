//! Single-flight TTL cache for elevation grids.
//!
//! Lock discipline: the entries table sits behind its own RwLock, the
//! in-flight table behind a separate Mutex. The first caller for a key
//! installs a broadcast rendezvous, runs the fetch in a detached task
//! (a waiter's cancellation never aborts the shared fetch) and
//! publishes the result; concurrent callers subscribe and receive the
//! same result, errors included. The cache is populated on success
//! only, and a background sweep drops expired entries once a minute.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::time::Instant;
use tracing::debug;

use tile_common::TileCoord;

use crate::{ElevationError, ElevationGrid};

/// How long a fetched grid stays valid.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

type FetchResult = Result<Arc<ElevationGrid>, ElevationError>;

struct CacheEntry {
    grid: Arc<ElevationGrid>,
    expires_at: Instant,
}

struct Shared {
    entries: RwLock<HashMap<TileCoord, CacheEntry>>,
    in_flight: Mutex<HashMap<TileCoord, broadcast::Sender<FetchResult>>>,
    ttl: Duration,
}

pub struct ElevationCache {
    shared: Arc<Shared>,
}

impl ElevationCache {
    /// Create the cache and start its cleanup task. The task exits
    /// when the cache is dropped.
    pub fn new(ttl: Duration) -> Self {
        let shared = Arc::new(Shared {
            entries: RwLock::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
            ttl,
        });

        let weak = Arc::downgrade(&shared);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SWEEP_INTERVAL);
            interval.tick().await;
            loop {
                interval.tick().await;
                match weak.upgrade() {
                    Some(shared) => sweep(&shared).await,
                    None => break,
                }
            }
        });

        Self { shared }
    }

    /// Cached grid for `coord` if present and unexpired.
    pub async fn get(&self, coord: TileCoord) -> Option<Arc<ElevationGrid>> {
        let entries = self.shared.entries.read().await;
        entries
            .get(&coord)
            .filter(|entry| Instant::now() < entry.expires_at)
            .map(|entry| entry.grid.clone())
    }

    /// Cache lookup with single-flight fetch on miss.
    ///
    /// Exactly one fetch runs per key at a time; every concurrent
    /// caller observes the result of that one fetch.
    pub async fn get_or_fetch<F, Fut>(&self, coord: TileCoord, fetch: F) -> FetchResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ElevationGrid, ElevationError>> + Send + 'static,
    {
        if let Some(grid) = self.get(coord).await {
            return Ok(grid);
        }

        let mut rx = {
            let mut in_flight = self.shared.in_flight.lock().await;
            match in_flight.get(&coord) {
                Some(tx) => tx.subscribe(),
                None => {
                    let (tx, _) = broadcast::channel(1);
                    in_flight.insert(coord, tx.clone());
                    drop(in_flight);

                    let shared = self.shared.clone();
                    let future = fetch();
                    let handle = tokio::spawn(async move {
                        let result = match future.await {
                            Ok(grid) => {
                                let grid = Arc::new(grid);
                                let mut entries = shared.entries.write().await;
                                entries.insert(
                                    coord,
                                    CacheEntry {
                                        grid: grid.clone(),
                                        expires_at: Instant::now() + shared.ttl,
                                    },
                                );
                                drop(entries);
                                Ok(grid)
                            }
                            Err(err) => Err(err),
                        };

                        let _ = tx.send(result.clone());
                        shared.in_flight.lock().await.remove(&coord);
                        result
                    });

                    return match handle.await {
                        Ok(result) => result,
                        Err(join_err) => Err(ElevationError::Upstream(format!(
                            "elevation fetch task failed: {join_err}"
                        ))),
                    };
                }
            }
        };

        match rx.recv().await {
            Ok(result) => result,
            // The rendezvous closed between our subscribe and the
            // publish; the cache has the answer if the fetch succeeded.
            Err(_) => match self.get(coord).await {
                Some(grid) => Ok(grid),
                None => Err(ElevationError::Upstream(
                    "in-flight elevation fetch was dropped".to_string(),
                )),
            },
        }
    }

    /// Current number of cached entries.
    pub async fn len(&self) -> usize {
        self.shared.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.shared.entries.read().await.is_empty()
    }

    /// Drop expired entries now. The background task calls this once a
    /// minute; exposed for tests.
    pub async fn sweep_expired(&self) {
        sweep(&self.shared).await;
    }
}

async fn sweep(shared: &Shared) {
    let now = Instant::now();

    let keys: Vec<TileCoord> = shared.entries.read().await.keys().copied().collect();

    let mut removed = 0usize;
    for coord in keys {
        let mut entries = shared.entries.write().await;
        if let Some(entry) = entries.get(&coord) {
            if now >= entry.expires_at {
                entries.remove(&coord);
                removed += 1;
            }
        }
    }

    if removed > 0 {
        debug!(removed, "swept expired elevation cache entries");
    }
}
