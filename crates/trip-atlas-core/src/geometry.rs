//! Geographic primitives.
//!
//! Longitude is always the x axis and latitude the y axis when a geographic
//! position is treated as a 2-D point.

use serde::{Deserialize, Serialize};

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}

impl<T> Size<T> {
    pub const fn new(width: T, height: T) -> Self {
        Size { width, height }
    }
}

impl Size<u32> {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_dvec2(&self) -> glam::DVec2 {
        glam::DVec2::new(self.width as f64, self.height as f64)
    }
}

/// Geographic bounding box spanned by its south-west and north-east corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Bounds spanning two arbitrary opposite corners.
    pub fn from_corners(a: LatLng, b: LatLng) -> Self {
        Self {
            south_west: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub fn east(&self) -> f64 {
        self.north_east.lng
    }

    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    /// Extent in degrees as `(east - west, north - south)`.
    pub fn extent(&self) -> (f64, f64) {
        (self.east() - self.west(), self.north() - self.south())
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.north() + self.south()) * 0.5,
            (self.east() + self.west()) * 0.5,
        )
    }

    /// Grow the box on every side by `ratio` of its own width/height.
    ///
    /// A ratio of `0.3` widens a 1° box to 1.6°.
    pub fn pad(&self, ratio: f64) -> Self {
        let (width, height) = self.extent();
        let lng_buffer = width.abs() * ratio;
        let lat_buffer = height.abs() * ratio;

        Self {
            south_west: LatLng::new(self.south() - lat_buffer, self.west() - lng_buffer),
            north_east: LatLng::new(self.north() + lat_buffer, self.east() + lng_buffer),
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south()
            && point.lat <= self.north()
            && point.lng >= self.west()
            && point.lng <= self.east()
    }

    pub fn is_finite(&self) -> bool {
        self.south_west.is_finite() && self.north_east.is_finite()
    }

    pub fn to_rect(&self) -> GeoRect {
        GeoRect::new(self.west(), self.south(), self.east(), self.north())
    }
}

/// Axis-aligned query rectangle in `(longitude, latitude)` space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoRect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl GeoRect {
    /// Create a rectangle, ordering the bounds so that `min <= max`.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// Degenerate rectangle covering a single point.
    pub fn point(lng: f64, lat: f64) -> Self {
        Self::new(lng, lat, lng, lat)
    }

    /// Inclusive on all four bounds.
    pub fn contains(&self, lng: f64, lat: f64) -> bool {
        lng >= self.min_x && lng <= self.max_x && lat >= self.min_y && lat <= self.max_y
    }

    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }
}
