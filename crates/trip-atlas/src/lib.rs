//! Trip Atlas - travel-time overlays for slippy maps
//!
//! Trip Atlas draws every station of a transit network as a colored disk on
//! top of a host map, colored by how long it takes to reach it. Two renderers
//! share one [`StationOverlay`]:
//!
//! - **Tiles** (`tiles` feature): per-tile queries against an R-tree, emitting
//!   vector markers or rasterized PNG tiles
//! - **GPU** (`gpu` feature): all stations in one instanced wgpu draw, redrawn
//!   on every pan and zoom
//!
//! # Quick Start
//!
//! ```no_run
//! use trip_atlas::prelude::*;
//!
//! let source = DatasetSource::File("stations.json".into());
//! let overlay = StationOverlay::load(&source, OverlayConfig::default()).unwrap();
//!
//! let mut tiles = overlay.tile_renderer();
//! let content = tiles.create_tile(TileCoords::new(8802, 5373, 14), Size::new(256, 256));
//! println!("{} markers", content.markers.len());
//! ```

pub mod overlay;

pub use trip_atlas_core as core;
pub use trip_atlas_stations as stations;

#[cfg(feature = "tiles")]
pub use trip_atlas_tiles as tiles;

#[cfg(feature = "gpu")]
pub use trip_atlas_render as render;

pub use overlay::StationOverlay;

pub mod prelude {
    pub use crate::overlay::StationOverlay;
    pub use trip_atlas_core::{
        Color, Config, LatLng, MapView, MapViewport, OverlayConfig, Size, Station, StationTime,
        TileCoords, ViewState, ViewportEvent,
    };
    pub use trip_atlas_stations::{DatasetError, DatasetSource, StationDataset, StationIndex};

    #[cfg(feature = "tiles")]
    pub use trip_atlas_tiles::{TileContent, TileLayer, TileMarker, TileOverlayRenderer};

    #[cfg(feature = "gpu")]
    pub use trip_atlas_render::{GpuStationRenderer, GraphicsContext};
}
