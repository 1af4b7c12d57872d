//! Spherical Web Mercator (EPSG:3857) as used by slippy-map hosts.
//!
//! Pixel coordinates grow right and down from the north-west corner of the
//! world, which is `tile_size * 2^zoom` pixels wide at a given zoom.

use std::f64::consts::PI;
use std::fmt;

use glam::DVec2;

use crate::geometry::LatLng;

/// Latitude at which the square Mercator world is cut off.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

/// Edge length of a standard map tile.
pub const DEFAULT_TILE_SIZE: f64 = 256.0;

/// Projection or unprojection produced a non-finite result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionError {
    /// The geographic input or output was not finite.
    NonFiniteLatLng { lat: f64, lng: f64 },
    /// The pixel input or output was not finite.
    NonFinitePoint { x: f64, y: f64 },
    /// The zoom level was not finite.
    InvalidZoom(f64),
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteLatLng { lat, lng } => {
                write!(f, "non-finite geographic position ({}, {})", lat, lng)
            }
            Self::NonFinitePoint { x, y } => write!(f, "non-finite pixel position ({}, {})", x, y),
            Self::InvalidZoom(zoom) => write!(f, "invalid zoom level {}", zoom),
        }
    }
}

impl std::error::Error for ProjectionError {}

/// Conversion between geographic and absolute pixel coordinates.
pub trait MapProjection {
    fn project(&self, position: LatLng, zoom: f64) -> Result<DVec2, ProjectionError>;

    fn unproject(&self, point: DVec2, zoom: f64) -> Result<LatLng, ProjectionError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebMercator {
    tile_size: f64,
}

impl WebMercator {
    pub const fn new(tile_size: f64) -> Self {
        Self { tile_size }
    }

    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Width of the whole world in pixels at `zoom`.
    pub fn world_size(&self, zoom: f64) -> f64 {
        self.tile_size * zoom.exp2()
    }
}

impl Default for WebMercator {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_SIZE)
    }
}

impl MapProjection for WebMercator {
    fn project(&self, position: LatLng, zoom: f64) -> Result<DVec2, ProjectionError> {
        if !position.is_finite() {
            return Err(ProjectionError::NonFiniteLatLng {
                lat: position.lat,
                lng: position.lng,
            });
        }
        if !zoom.is_finite() {
            return Err(ProjectionError::InvalidZoom(zoom));
        }

        let lat = position.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = position.lng.to_radians();
        let y = (PI / 4.0 + lat / 2.0).tan().ln();

        let scale = self.world_size(zoom);
        let point = DVec2::new(scale * (0.5 + x / (2.0 * PI)), scale * (0.5 - y / (2.0 * PI)));

        if !point.is_finite() {
            return Err(ProjectionError::NonFinitePoint {
                x: point.x,
                y: point.y,
            });
        }
        Ok(point)
    }

    fn unproject(&self, point: DVec2, zoom: f64) -> Result<LatLng, ProjectionError> {
        if !point.is_finite() {
            return Err(ProjectionError::NonFinitePoint {
                x: point.x,
                y: point.y,
            });
        }
        if !zoom.is_finite() {
            return Err(ProjectionError::InvalidZoom(zoom));
        }

        let scale = self.world_size(zoom);
        let x = (point.x / scale - 0.5) * 2.0 * PI;
        let y = (0.5 - point.y / scale) * 2.0 * PI;

        let position = LatLng::new(
            (2.0 * y.exp().atan() - PI / 2.0).to_degrees(),
            x.to_degrees(),
        );

        if !position.is_finite() {
            return Err(ProjectionError::NonFiniteLatLng {
                lat: position.lat,
                lng: position.lng,
            });
        }
        Ok(position)
    }
}
