use glam::DVec2;
use trip_atlas_core::{Color, Size, TileCoords, TileSurfaceId, ViewportEvent};

/// A filled circle in tile-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileMarker {
    /// Center relative to the tile's top-left corner. May lie outside the tile.
    pub center: DVec2,
    pub radius: f64,
    pub color: Color,
}

/// Everything drawn onto one tile surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TileContent {
    pub surface: TileSurfaceId,
    pub coords: TileCoords,
    pub size: Size<u32>,
    pub markers: Vec<TileMarker>,
}

/// A map layer whose content is produced tile by tile.
///
/// The host owns tile lifetimes: it calls [`TileLayer::create_tile`] when a
/// tile scrolls into view and [`TileLayer::destroy_tile`] once the surface is
/// discarded. No surface is touched after its destroy call.
pub trait TileLayer {
    fn create_tile(&mut self, coords: TileCoords, size: Size<u32>) -> TileContent;

    /// Forget the bookkeeping for `surface`. Returns whether it was known.
    fn destroy_tile(&mut self, surface: TileSurfaceId) -> bool;

    /// Route a host notification to the lifecycle methods.
    ///
    /// Returns the new content for `TileCreate`; view changes need no work
    /// because tile content does not depend on the view.
    fn handle_event(&mut self, event: &ViewportEvent) -> Option<TileContent> {
        match event {
            ViewportEvent::TileCreate { coords, size } => Some(self.create_tile(*coords, *size)),
            ViewportEvent::TileDestroy { surface } => {
                self.destroy_tile(*surface);
                None
            }
            _ => None,
        }
    }
}
