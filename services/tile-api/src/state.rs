//! Application state and shared resources.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;

use coverage::GeoCoverage;
use elevation::{ElevationService, ElevationSource, GeoTiffSource, TerrariumSource};
use palette::{providers::all_providers, PaletteProvider};

/// Which upstream elevation format the server renders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Terrarium PNG tiles, composited from four child tiles.
    Terrarium,
    /// GeoTIFF tiles at the requested coordinate.
    Geotiff,
}

/// Shared application state.
pub struct AppState {
    pub coverage: Arc<GeoCoverage>,
    pub elevation: ElevationService,
    providers: HashMap<&'static str, Arc<dyn PaletteProvider>>,
}

impl AppState {
    pub async fn new(data_dir: &Path, source_kind: SourceKind) -> Result<Self> {
        let coverage = GeoCoverage::load(data_dir)
            .await
            .with_context(|| format!("loading coverage layers from {}", data_dir.display()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("building upstream HTTP client")?;

        let source: Arc<dyn ElevationSource> = match source_kind {
            SourceKind::Terrarium => Arc::new(TerrariumSource::new(client)),
            SourceKind::Geotiff => Arc::new(GeoTiffSource::new(client)),
        };

        Ok(Self {
            coverage: Arc::new(coverage),
            elevation: ElevationService::new(source),
            providers: all_providers()
                .into_iter()
                .map(|provider| (provider.name(), provider))
                .collect(),
        })
    }

    /// Provider lookup by URL prefix.
    pub fn provider(&self, name: &str) -> Option<Arc<dyn PaletteProvider>> {
        self.providers.get(name).cloned()
    }
}
