//! Mapping from station values and zoom levels to visuals.
//!
//! Both the tile renderer and the GPU renderer use these tables so the two
//! strategies draw identical colors and sizes.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::station::StationTime;

/// Travel time (seconds) at which the hue scale saturates.
pub const DEFAULT_SATURATION_TIME: f64 = 3000.0;

pub const SATURATION: f64 = 1.0;
pub const LIGHTNESS: f64 = 0.5;

/// Maps a station's time onto a hue: `min(1, time / saturation_time)` turns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScale {
    pub saturation_time: f64,
}

impl ColorScale {
    pub const fn new(saturation_time: f64) -> Self {
        Self { saturation_time }
    }

    /// Hue in full turns, in `0.0..=1.0`.
    ///
    /// `Unknown` saturates to `1.0`, the same as any time at or beyond the
    /// saturation point. Negative times clamp to `0.0`.
    pub fn hue_turns(&self, time: StationTime) -> f64 {
        match time {
            StationTime::Known(seconds) => (seconds / self.saturation_time).clamp(0.0, 1.0),
            StationTime::Unknown => 1.0,
        }
    }

    pub fn color(&self, time: StationTime) -> Color {
        Color::from_hsl(self.hue_turns(time), SATURATION, LIGHTNESS)
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::new(DEFAULT_SATURATION_TIME)
    }
}

/// Point size in pixels per integer zoom level.
const STANDARD_ZOOM_SIZES: &[(i32, f32)] = &[
    (8, 3.0),
    (9, 3.0),
    (10, 4.0),
    (11, 5.0),
    (12, 6.0),
    (13, 8.0),
    (14, 10.0),
    (15, 12.0),
    (16, 14.0),
    (17, 17.0),
    (18, 20.0),
];

pub const DEFAULT_POINT_SIZE: f32 = 2.0;

/// Static lookup from zoom level to point size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomStyleTable {
    levels: &'static [(i32, f32)],
    default_size: f32,
}

impl ZoomStyleTable {
    /// `levels` must be sorted by zoom level.
    pub const fn new(levels: &'static [(i32, f32)], default_size: f32) -> Self {
        Self {
            levels,
            default_size,
        }
    }

    pub const fn standard() -> Self {
        Self::new(STANDARD_ZOOM_SIZES, DEFAULT_POINT_SIZE)
    }

    pub fn levels(&self) -> &'static [(i32, f32)] {
        self.levels
    }

    pub fn default_size(&self) -> f32 {
        self.default_size
    }

    pub fn size_for_level(&self, level: i32) -> f32 {
        self.levels
            .binary_search_by_key(&level, |&(zoom, _)| zoom)
            .map(|i| self.levels[i].1)
            .unwrap_or(self.default_size)
    }

    /// Size for a fractional zoom, looked up at the nearest integer level.
    pub fn size_for_zoom(&self, zoom: f64) -> f32 {
        let level = zoom.round();
        if !level.is_finite() || level < i32::MIN as f64 || level > i32::MAX as f64 {
            return self.default_size;
        }
        self.size_for_level(level as i32)
    }
}

impl Default for ZoomStyleTable {
    fn default() -> Self {
        Self::standard()
    }
}
