//! Station markers drawn tile by tile.

use std::sync::Arc;

use trip_atlas_core::alloc::HashMap;
use trip_atlas_core::profiling::profile_function;
use trip_atlas_core::{
    ColorScale, LatLngBounds, MapProjection, OverlayConfig, ProjectionError, Size, TileCoords,
    TileStyle, TileSurfaceId, WebMercator,
};
use trip_atlas_stations::StationIndex;

use crate::layer::{TileContent, TileLayer, TileMarker};

/// Bookkeeping kept for each live tile surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileOverlayInfo {
    pub coords: TileCoords,
    pub size: Size<u32>,
    pub marker_count: usize,
}

/// Renders the stations of a shared [`StationIndex`] onto map tiles.
///
/// Each instance owns its own tile registry, so several maps can share one
/// index without sharing any tile state.
pub struct TileOverlayRenderer<P = WebMercator> {
    index: Arc<StationIndex>,
    projection: P,
    color_scale: ColorScale,
    style: TileStyle,
    registry: HashMap<TileSurfaceId, TileOverlayInfo>,
    next_surface: u64,
}

impl TileOverlayRenderer<WebMercator> {
    pub fn new(index: Arc<StationIndex>) -> Self {
        Self::with_projection(index, WebMercator::default())
    }
}

impl<P: MapProjection> TileOverlayRenderer<P> {
    pub fn with_projection(index: Arc<StationIndex>, projection: P) -> Self {
        Self {
            index,
            projection,
            color_scale: ColorScale::default(),
            style: TileStyle::default(),
            registry: HashMap::new(),
            next_surface: 1,
        }
    }

    pub fn with_config(mut self, config: &OverlayConfig) -> Self {
        self.color_scale = config.color_scale;
        self.style = config.tile;
        self
    }

    pub fn with_style(mut self, style: TileStyle) -> Self {
        self.style = style;
        self
    }

    pub fn index(&self) -> &Arc<StationIndex> {
        &self.index
    }

    pub fn style(&self) -> TileStyle {
        self.style
    }

    pub fn color_scale(&self) -> ColorScale {
        self.color_scale
    }

    /// Geographic box covered by the tile, from its two pixel corners.
    pub fn tile_bounds(
        &self,
        coords: TileCoords,
        size: Size<u32>,
    ) -> Result<LatLngBounds, ProjectionError> {
        let zoom = coords.z as f64;
        let north_west = self.projection.unproject(coords.origin(size), zoom)?;
        let south_east = self.projection.unproject(coords.far_corner(size), zoom)?;
        Ok(LatLngBounds::from_corners(north_west, south_east))
    }

    /// The tile box grown by the padding, so circles centered just outside
    /// the tile are still found.
    pub fn query_bounds(
        &self,
        coords: TileCoords,
        size: Size<u32>,
    ) -> Result<LatLngBounds, ProjectionError> {
        Ok(self.tile_bounds(coords, size)?.pad(self.style.padding))
    }

    /// Markers for one tile, without touching the registry.
    ///
    /// Stations that cannot be projected are skipped; if the tile itself
    /// cannot be unprojected it gets no markers.
    pub fn markers(&self, coords: TileCoords, size: Size<u32>) -> Vec<TileMarker> {
        profile_function!();

        let bounds = match self.query_bounds(coords, size) {
            Ok(bounds) => bounds,
            Err(e) => {
                tracing::debug!("Tile {} has no usable bounds: {}", coords, e);
                return Vec::new();
            }
        };

        let zoom = coords.z as f64;
        let origin = coords.origin(size);
        let radius = self.style.marker_radius;
        let (width, height) = (size.width as f64, size.height as f64);

        self.index
            .query_iter(&bounds.to_rect())
            .filter_map(|station| {
                let point = match self.projection.project(station.location(), zoom) {
                    Ok(point) => point,
                    Err(e) => {
                        tracing::debug!("Skipping station {:?} on tile {}: {}", station.name, coords, e);
                        return None;
                    }
                };
                let center = point - origin;

                let outside = center.x + radius < 0.0
                    || center.x - radius > width
                    || center.y + radius < 0.0
                    || center.y - radius > height;
                (!outside).then(|| TileMarker {
                    center,
                    radius,
                    color: self.color_scale.color(station.time),
                })
            })
            .collect()
    }

    pub fn tile_info(&self, surface: TileSurfaceId) -> Option<&TileOverlayInfo> {
        self.registry.get(&surface)
    }

    /// Number of live tiles.
    pub fn registry_len(&self) -> usize {
        self.registry.len()
    }

    fn allocate_surface(&mut self) -> TileSurfaceId {
        let id = TileSurfaceId(self.next_surface);
        self.next_surface += 1;
        id
    }
}

impl<P: MapProjection> TileLayer for TileOverlayRenderer<P> {
    fn create_tile(&mut self, coords: TileCoords, size: Size<u32>) -> TileContent {
        let markers = self.markers(coords, size);
        let surface = self.allocate_surface();

        self.registry.insert(
            surface,
            TileOverlayInfo {
                coords,
                size,
                marker_count: markers.len(),
            },
        );
        tracing::debug!(
            "Created tile {} ({:?}) with {} markers",
            coords,
            surface,
            markers.len()
        );

        TileContent {
            surface,
            coords,
            size,
            markers,
        }
    }

    fn destroy_tile(&mut self, surface: TileSurfaceId) -> bool {
        match self.registry.remove(&surface) {
            Some(info) => {
                tracing::debug!("Destroyed tile {} ({:?})", info.coords, surface);
                true
            }
            None => {
                tracing::debug!("Destroy for unknown tile surface {:?}", surface);
                false
            }
        }
    }
}
