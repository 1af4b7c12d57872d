use std::sync::Arc;

use trip_atlas_core::OverlayConfig;
use trip_atlas_core::profiling::profile_function;
use trip_atlas_core::{Config, Station};
use trip_atlas_stations::{DatasetError, DatasetSource, LoadReport, StationDataset, StationIndex};

/// A loaded station set ready to feed either renderer.
///
/// Loading builds the spatial index once; every renderer created from the
/// overlay shares it through an `Arc`.
#[derive(Debug, Clone)]
pub struct StationOverlay {
    index: Arc<StationIndex>,
    report: LoadReport,
    config: OverlayConfig,
}

impl StationOverlay {
    pub fn load(source: &DatasetSource, config: OverlayConfig) -> Result<Self, DatasetError> {
        let dataset = source.load()?;
        Ok(Self::from_dataset(dataset, config))
    }

    /// Load using the overlay section of a full [`Config`].
    pub fn load_with(source: &DatasetSource, config: &Config) -> Result<Self, DatasetError> {
        Self::load(source, config.overlay)
    }

    pub fn from_dataset(dataset: StationDataset, config: OverlayConfig) -> Self {
        profile_function!();

        let report = dataset.report().clone();
        if !report.is_clean() {
            tracing::warn!(
                "Dropped {} of {} station records",
                report.dropped.len(),
                report.total_records
            );
        }

        let index = StationIndex::from_dataset(dataset);
        tracing::info!("Station overlay ready with {} stations", index.len());

        Self {
            index: Arc::new(index),
            report,
            config,
        }
    }

    pub fn from_stations(stations: Vec<Station>, config: OverlayConfig) -> Self {
        Self::from_dataset(StationDataset::new(stations), config)
    }

    pub fn index(&self) -> &Arc<StationIndex> {
        &self.index
    }

    pub fn stations(&self) -> &[Station] {
        self.index.stations()
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// A tile renderer over the shared index.
    #[cfg(feature = "tiles")]
    pub fn tile_renderer(&self) -> trip_atlas_tiles::TileOverlayRenderer {
        trip_atlas_tiles::TileOverlayRenderer::new(Arc::clone(&self.index)).with_config(&self.config)
    }

    /// A GPU renderer with this overlay's stations already uploaded.
    #[cfg(feature = "gpu")]
    pub fn gpu_renderer(
        &self,
        context: Arc<trip_atlas_render::GraphicsContext>,
    ) -> Result<trip_atlas_render::GpuStationRenderer, trip_atlas_render::ResourceError> {
        let mut renderer = trip_atlas_render::GpuStationRenderer::new(context, self.config)?;
        renderer.load_stations(self.stations());
        Ok(renderer)
    }
}
