//! Tile-based station overlay.
//!
//! [`TileOverlayRenderer`] answers the host map's tile lifecycle: on creation
//! it queries the shared [`StationIndex`](trip_atlas_stations::StationIndex)
//! for the padded tile box and emits one colored disk per visible station; on
//! destruction it drops the tile's registry entry. [`raster`] turns tile
//! content into pixels for hosts with raster tile surfaces.

pub mod layer;
pub mod raster;
pub mod renderer;

pub use layer::{TileContent, TileLayer, TileMarker};
pub use raster::{RasterError, encode_png, rasterize};
pub use renderer::{TileOverlayInfo, TileOverlayRenderer};
