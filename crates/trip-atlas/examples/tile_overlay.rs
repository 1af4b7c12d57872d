//! Renders the tiles around the default view to PNG files.
//!
//! Pass a station JSON file to render it; otherwise synthetic stations
//! around Berlin are used.
//!
//! Run with: cargo run -p trip-atlas --example tile_overlay -- [stations.json]

use std::path::PathBuf;

use trip_atlas::core::{MapProjection, WebMercator, logging};
use trip_atlas::prelude::*;
use trip_atlas_test_utils::stations::{BRANDENBURG, random_stations};

const TILE_SIZE: Size<u32> = Size {
    width: 256,
    height: 256,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = OverlayConfig::default();
    let overlay = match std::env::args().nth(1) {
        Some(path) => StationOverlay::load(&DatasetSource::File(PathBuf::from(path)), config)?,
        None => StationOverlay::from_stations(random_stations(20_000, 7, BRANDENBURG), config),
    };

    let view = ViewState::default();
    let zoom = view.zoom.round() as u32;
    let center = WebMercator::default().project(view.center(), zoom as f64)?;
    let Some(center_tile) = TileCoords::containing(center, zoom, TILE_SIZE) else {
        return Err("default view is outside the tile grid".into());
    };

    let out_dir = std::env::temp_dir().join("trip-atlas-tiles");
    std::fs::create_dir_all(&out_dir)?;

    let mut renderer = overlay.tile_renderer();
    for dy in -1i64..=1 {
        for dx in -1i64..=1 {
            let coords = TileCoords::new(
                (center_tile.x as i64 + dx) as u32,
                (center_tile.y as i64 + dy) as u32,
                zoom,
            );
            let content = renderer.create_tile(coords, TILE_SIZE);
            let path = out_dir.join(format!("{}_{}_{}.png", coords.z, coords.x, coords.y));
            std::fs::write(&path, content.to_png()?)?;
            println!("{} -> {} markers, {}", coords, content.markers.len(), path.display());
            renderer.destroy_tile(content.surface);
        }
    }

    Ok(())
}
