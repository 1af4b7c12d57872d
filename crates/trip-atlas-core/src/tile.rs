use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// A tile coordinate in the slippy-map scheme (z/x/y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoords {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl TileCoords {
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Absolute pixel position of the tile's top-left corner at zoom `z`.
    pub fn origin(&self, tile_size: Size<u32>) -> DVec2 {
        DVec2::new(
            self.x as f64 * tile_size.width as f64,
            self.y as f64 * tile_size.height as f64,
        )
    }

    /// Absolute pixel position of the tile's bottom-right corner at zoom `z`.
    pub fn far_corner(&self, tile_size: Size<u32>) -> DVec2 {
        self.origin(tile_size) + tile_size.as_dvec2()
    }

    /// The tile at zoom `z` containing the absolute pixel `point`.
    ///
    /// Returns `None` for points left of or above the world origin.
    pub fn containing(point: DVec2, z: u32, tile_size: Size<u32>) -> Option<Self> {
        if tile_size.is_empty() || !point.is_finite() || point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let x = (point.x / tile_size.width as f64).floor();
        let y = (point.y / tile_size.height as f64).floor();
        if x > u32::MAX as f64 || y > u32::MAX as f64 {
            return None;
        }
        Some(Self::new(x as u32, y as u32, z))
    }
}

impl fmt::Display for TileCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Handle to a tile drawing surface.
///
/// The surface itself belongs to the host map; the handle only keys
/// per-tile bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileSurfaceId(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: Size<u32> = Size::new(256, 256);

    #[test]
    fn test_origin_and_far_corner() {
        let coords = TileCoords::new(3, 5, 4);
        assert_eq!(coords.origin(TILE), DVec2::new(768.0, 1280.0));
        assert_eq!(coords.far_corner(TILE), DVec2::new(1024.0, 1536.0));
    }

    #[test]
    fn test_containing() {
        let coords = TileCoords::containing(DVec2::new(770.0, 1535.9), 4, TILE).unwrap();
        assert_eq!(coords, TileCoords::new(3, 5, 4));
        assert!(TileCoords::containing(DVec2::new(-1.0, 10.0), 4, TILE).is_none());
    }

    #[test]
    fn test_display_is_z_x_y() {
        assert_eq!(TileCoords::new(1, 2, 3).to_string(), "3/1/2");
    }
}
