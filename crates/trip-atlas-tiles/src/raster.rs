//! Raster tile surfaces.

use std::fmt;

use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};
use trip_atlas_core::profiling::profile_function;

use crate::layer::TileContent;

#[derive(Debug)]
pub enum RasterError {
    /// The tile has a zero or oversized dimension
    InvalidSize { width: u32, height: u32 },
    /// PNG encoding failed
    Encode(String),
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "Cannot rasterize a {}x{} tile", width, height)
            }
            Self::Encode(msg) => write!(f, "PNG encoding failed: {}", msg),
        }
    }
}

impl std::error::Error for RasterError {}

/// Draw the tile's markers as anti-aliased disks on a transparent pixmap.
///
/// Markers hanging over the tile edge are clipped by the pixmap.
pub fn rasterize(content: &TileContent) -> Result<Pixmap, RasterError> {
    profile_function!();

    let (width, height) = (content.size.width, content.size.height);
    let mut pixmap = Pixmap::new(width, height).ok_or(RasterError::InvalidSize { width, height })?;

    let mut paint = Paint::default();
    paint.anti_alias = true;

    for marker in &content.markers {
        let [r, g, b, a] = marker.color.to_rgba8();
        paint.set_color_rgba8(r, g, b, a);

        let Some(path) = PathBuilder::from_circle(
            marker.center.x as f32,
            marker.center.y as f32,
            marker.radius as f32,
        ) else {
            continue;
        };
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    Ok(pixmap)
}

pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, RasterError> {
    pixmap
        .encode_png()
        .map_err(|e| RasterError::Encode(e.to_string()))
}

impl TileContent {
    /// Rasterize and encode as PNG in one step.
    pub fn to_png(&self) -> Result<Vec<u8>, RasterError> {
        encode_png(&rasterize(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::TileMarker;
    use glam::DVec2;
    use trip_atlas_core::{Color, Size, TileCoords, TileSurfaceId};

    fn content(markers: Vec<TileMarker>) -> TileContent {
        TileContent {
            surface: TileSurfaceId(1),
            coords: TileCoords::new(0, 0, 0),
            size: Size::new(64, 64),
            markers,
        }
    }

    #[test]
    fn test_marker_fills_its_center() {
        let pixmap = rasterize(&content(vec![TileMarker {
            center: DVec2::new(20.0, 30.0),
            radius: 3.0,
            color: Color::rgb(0.0, 1.0, 1.0),
        }]))
        .unwrap();

        let center = pixmap.pixel(20, 30).unwrap();
        assert_eq!(
            (center.red(), center.green(), center.blue(), center.alpha()),
            (0, 255, 255, 255)
        );
        assert_eq!(pixmap.pixel(40, 40).unwrap().alpha(), 0);
    }

    #[test]
    fn test_marker_outside_edge_is_clipped() {
        let pixmap = rasterize(&content(vec![TileMarker {
            center: DVec2::new(65.0, 32.0),
            radius: 3.0,
            color: Color::RED,
        }]))
        .unwrap();

        assert!(pixmap.pixel(63, 32).unwrap().alpha() > 0);
    }

    #[test]
    fn test_empty_tile_is_rejected() {
        let mut tile = content(Vec::new());
        tile.size = Size::new(0, 256);
        assert!(matches!(
            rasterize(&tile),
            Err(RasterError::InvalidSize { width: 0, height: 256 })
        ));
    }

    #[test]
    fn test_png_signature() {
        let png = content(Vec::new()).to_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
