//! The viewport contract between the host map and the overlay renderers.
//!
//! The host owns pan/zoom state and tile lifecycles. Renderers read the
//! current state through [`MapViewport`] and react to [`ViewportEvent`]s.
//! [`MapView`] is a self-contained implementation for headless hosts and tests.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{LatLng, LatLngBounds, Size};
use crate::projection::{MapProjection, ProjectionError, WebMercator};
use crate::tile::{TileCoords, TileSurfaceId};

/// Read access to the host map's current view.
pub trait MapViewport: MapProjection {
    fn center(&self) -> LatLng;

    /// Current, possibly fractional, zoom level.
    fn zoom(&self) -> f64;

    fn bounds(&self) -> LatLngBounds;

    /// Size of the map viewport in pixels.
    fn size(&self) -> Size<u32>;
}

/// Notifications fired by the host map.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportEvent {
    Move,
    ZoomLevelsChange,
    /// One tick of an animated zoom towards `center`/`zoom`.
    ZoomAnimation { center: LatLng, zoom: f64 },
    Drag,
    TileCreate { coords: TileCoords, size: Size<u32> },
    TileDestroy { surface: TileSurfaceId },
}

impl ViewportEvent {
    /// Whether the visible region changed, which invalidates a full-view frame.
    pub fn is_view_change(&self) -> bool {
        matches!(
            self,
            Self::Move | Self::ZoomLevelsChange | Self::ZoomAnimation { .. } | Self::Drag
        )
    }
}

/// Last viewed map position, persisted by the host between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

impl ViewState {
    /// Key the host stores the serialized view state under.
    pub const STORAGE_KEY: &'static str = "trip-atlas.last-view";

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

impl Default for ViewState {
    /// Hennigsdorf, north-west of Berlin.
    fn default() -> Self {
        Self {
            latitude: 52.637778,
            longitude: 13.203611,
            zoom: 14.0,
        }
    }
}

/// A Web Mercator map view with a center, zoom level and pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    center: LatLng,
    zoom: f64,
    size: Size<u32>,
    projection: WebMercator,
}

impl MapView {
    pub fn new(center: LatLng, zoom: f64, size: Size<u32>) -> Self {
        Self {
            center,
            zoom,
            size,
            projection: WebMercator::default(),
        }
    }

    pub fn from_view_state(state: ViewState, size: Size<u32>) -> Self {
        Self::new(state.center(), state.zoom, size)
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            latitude: self.center.lat,
            longitude: self.center.lng,
            zoom: self.zoom,
        }
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.center = center;
        self.zoom = zoom;
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    pub fn resize(&mut self, size: Size<u32>) {
        self.size = size;
    }

    /// Pan by `offset` screen pixels; positive values move the view right/down.
    pub fn pan_by(&mut self, offset: DVec2) -> Result<(), ProjectionError> {
        let center = self.projection.project(self.center, self.zoom)?;
        self.center = self.projection.unproject(center + offset, self.zoom)?;
        Ok(())
    }

    /// Absolute pixel position of the viewport's top-left corner.
    pub fn pixel_origin(&self) -> Result<DVec2, ProjectionError> {
        let center = self.projection.project(self.center, self.zoom)?;
        Ok(center - self.size.as_dvec2() * 0.5)
    }

    fn try_bounds(&self) -> Result<LatLngBounds, ProjectionError> {
        let origin = self.pixel_origin()?;
        let north_west = self.projection.unproject(origin, self.zoom)?;
        let south_east = self
            .projection
            .unproject(origin + self.size.as_dvec2(), self.zoom)?;
        Ok(LatLngBounds::from_corners(north_west, south_east))
    }
}

impl MapProjection for MapView {
    fn project(&self, position: LatLng, zoom: f64) -> Result<DVec2, ProjectionError> {
        self.projection.project(position, zoom)
    }

    fn unproject(&self, point: DVec2, zoom: f64) -> Result<LatLng, ProjectionError> {
        self.projection.unproject(point, zoom)
    }
}

impl MapViewport for MapView {
    fn center(&self) -> LatLng {
        self.center
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn bounds(&self) -> LatLngBounds {
        match self.try_bounds() {
            Ok(bounds) => bounds,
            Err(e) => {
                tracing::warn!("Viewport bounds unavailable: {}", e);
                LatLngBounds::from_corners(self.center, self.center)
            }
        }
    }

    fn size(&self) -> Size<u32> {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_state() {
        let state = ViewState::default();
        assert_eq!(state.zoom, 14.0);
        assert!((state.latitude - 52.637778).abs() < 1e-9);
        assert!((state.longitude - 13.203611).abs() < 1e-9);
    }

    #[test]
    fn test_view_state_json_round_trip() {
        let state = ViewState {
            latitude: 48.1,
            longitude: 11.5,
            zoom: 9.5,
        };
        let json = state.to_json().unwrap();
        assert!(json.contains("\"latitude\""));
        assert_eq!(ViewState::from_json(&json).unwrap(), state);
    }

    #[test]
    fn test_bounds_surround_center() {
        let view = MapView::new(LatLng::new(52.5, 13.4), 12.0, Size::new(800, 600));
        let bounds = view.bounds();

        assert!(bounds.contains(view.center()));
        assert!(bounds.north() > 52.5 && bounds.south() < 52.5);
        assert!(((bounds.east() + bounds.west()) * 0.5 - 13.4).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_shrink_when_zooming_in() {
        let mut view = MapView::new(LatLng::new(52.5, 13.4), 10.0, Size::new(800, 600));
        let (wide, _) = view.bounds().extent();
        view.set_zoom(11.0);
        let (narrow, _) = view.bounds().extent();
        assert!((wide / narrow - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_pan_moves_center_east() {
        let mut view = MapView::new(LatLng::new(52.5, 13.4), 12.0, Size::new(800, 600));
        view.pan_by(DVec2::new(100.0, 0.0)).unwrap();
        assert!(view.center().lng > 13.4);
        assert!((view.center().lat - 52.5).abs() < 1e-9);
    }

    #[test]
    fn test_view_change_events() {
        assert!(ViewportEvent::Move.is_view_change());
        assert!(ViewportEvent::Drag.is_view_change());
        assert!(
            ViewportEvent::ZoomAnimation {
                center: LatLng::new(0.0, 0.0),
                zoom: 3.0
            }
            .is_view_change()
        );
        assert!(
            !ViewportEvent::TileDestroy {
                surface: TileSurfaceId(1)
            }
            .is_view_change()
        );
    }
}
