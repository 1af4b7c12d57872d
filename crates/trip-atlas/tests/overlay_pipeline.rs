//! Dataset file to rendered output through the facade.

use std::io::Write;

use trip_atlas::core::{MapProjection, WebMercator};
use trip_atlas::prelude::*;
use trip_atlas_test_utils::stations::SCENARIO_JSON;

fn scenario_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SCENARIO_JSON.as_bytes()).unwrap();
    file
}

fn tile_containing(location: LatLng, zoom: u32, size: Size<u32>) -> TileCoords {
    let point = WebMercator::default().project(location, zoom as f64).unwrap();
    TileCoords::containing(point, zoom, size).unwrap()
}

#[test]
fn test_file_source_to_tile_markers() {
    let file = scenario_file();
    let source = DatasetSource::File(file.path().to_path_buf());
    let overlay = StationOverlay::load(&source, OverlayConfig::default()).unwrap();
    assert_eq!(overlay.index().len(), 2);

    let size = Size::new(256, 256);
    let coords = tile_containing(LatLng::new(52.0, 13.0), 14, size);

    let mut renderer = overlay.tile_renderer();
    let content = renderer.create_tile(coords, size);
    assert_eq!(content.markers.len(), 1);
    // 1500 s is half of the default saturation time
    assert_eq!(content.markers[0].color, Color::from_hsl(0.5, 1.0, 0.5));

    assert!(renderer.destroy_tile(content.surface));
    assert!(!renderer.destroy_tile(content.surface));
}

#[test]
fn test_config_from_json_reaches_tiles() {
    let config = Config::from_json_str(r#"{ "overlay": { "color_scale": { "saturation_time": 1500.0 } } }"#)
        .unwrap();
    let source = DatasetSource::Inline(SCENARIO_JSON.to_string());
    let overlay = StationOverlay::load_with(&source, &config).unwrap();

    let size = Size::new(256, 256);
    let coords = tile_containing(LatLng::new(52.0, 13.0), 12, size);
    let content = overlay.tile_renderer().create_tile(coords, size);

    assert_eq!(content.markers.len(), 1);
    assert_eq!(content.markers[0].color, Color::from_hsl(1.0, 1.0, 0.5));
}

#[test]
fn test_tile_png_output() {
    let overlay = StationOverlay::load(
        &DatasetSource::Inline(SCENARIO_JSON.to_string()),
        OverlayConfig::default(),
    )
    .unwrap();

    let size = Size::new(256, 256);
    let coords = tile_containing(LatLng::new(52.5, 13.5), 13, size);
    let png = overlay.tile_renderer().create_tile(coords, size).to_png().unwrap();
    assert_eq!(&png[1..4], b"PNG");
}

#[test]
fn test_missing_file_is_an_error() {
    let source = DatasetSource::File("/nonexistent/trip-atlas/stations.json".into());
    let err = StationOverlay::load(&source, OverlayConfig::default()).unwrap_err();
    assert!(matches!(err, DatasetError::Io { .. }));
}

#[test]
#[ignore] // Requires GPU
fn test_gpu_renderer_from_overlay() {
    let Ok(ctx) = GraphicsContext::new_owned_sync() else {
        return;
    };
    let overlay = StationOverlay::load(
        &DatasetSource::Inline(SCENARIO_JSON.to_string()),
        OverlayConfig::default(),
    )
    .unwrap();

    let mut renderer = overlay.gpu_renderer(ctx).unwrap();
    assert_eq!(renderer.station_count(), 2);

    let view = MapView::from_view_state(
        ViewState {
            latitude: 52.0,
            longitude: 13.0,
            zoom: 14.0,
        },
        Size::new(32, 32),
    );
    assert!(renderer.handle_event(&ViewportEvent::Drag, &view));
    let frame = renderer.read_frame().unwrap();
    assert!(frame.chunks_exact(4).any(|px| px[3] > 0));
}
