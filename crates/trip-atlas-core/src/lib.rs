//! Trip Atlas Core
//!
//! Shared building blocks of the station overlay: geographic geometry, the
//! Web Mercator projection, the viewport contract consumed from the host map,
//! the station model and the visual style policy that both renderers agree on.

pub mod alloc;
pub mod color;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod profiling;
pub mod projection;
pub mod station;
pub mod style;
pub mod tile;
pub mod viewport;

pub use color::Color;
pub use config::{BorderStyle, Config, ConfigError, OverlayConfig, ProfilingMode, TileStyle};
pub use geometry::{GeoRect, LatLng, LatLngBounds, Size};
pub use projection::{MapProjection, ProjectionError, WebMercator};
pub use station::{Station, StationTime};
pub use style::{ColorScale, ZoomStyleTable};
pub use tile::{TileCoords, TileSurfaceId};
pub use viewport::{MapView, MapViewport, ViewState, ViewportEvent};

/// Pixel-space points are plain double precision vectors.
pub use glam::DVec2;
