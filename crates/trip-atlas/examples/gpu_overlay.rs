//! Draws the full-view GPU overlay offscreen while zooming in on the
//! default view.
//!
//! Run with: cargo run -p trip-atlas --example gpu_overlay

use trip_atlas::core::logging;
use trip_atlas::core::profiling::{init_profiling, new_frame};
use trip_atlas::prelude::*;
use trip_atlas_test_utils::stations::{BRANDENBURG, random_stations};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let config = Config::default();
    init_profiling(config.profiling);

    let overlay = StationOverlay::from_stations(random_stations(50_000, 11, BRANDENBURG), config.overlay);
    let ctx = GraphicsContext::new_owned_sync()?;
    println!("Using adapter: {}", ctx.info().name);

    let mut renderer = overlay.gpu_renderer(ctx)?;
    let mut view = MapView::from_view_state(ViewState::default(), Size::new(800, 600));

    for zoom in [9.0, 10.5, 12.0, 14.0] {
        new_frame();
        view.set_zoom(zoom);
        renderer.handle_event(&ViewportEvent::ZoomLevelsChange, &view);

        let frame = renderer.read_frame()?;
        let covered = frame.chunks_exact(4).filter(|px| px[3] > 0).count();
        println!("zoom {:>4.1}: {} of {} pixels covered", zoom, covered, frame.len() / 4);
    }

    Ok(())
}
