use bytemuck::{Pod, Zeroable};
use trip_atlas_core::{MapViewport, OverlayConfig, ZoomStyleTable};

/// Per-frame shader parameters, recomputed from the viewport on every draw.
///
/// Matches `FrameUniforms` in `station_overlay.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Viewport center as `(lng, lat)`.
    pub center: [f32; 2],
    /// Geographic extent as `(east - west, north - south)`.
    pub extent: [f32; 2],
    /// Viewport size in pixels.
    pub resolution: [f32; 2],
    /// Point diameter in pixels.
    pub point_size: f32,
    /// Ring width as a fraction of the radius; zero draws plain disks.
    pub border: f32,
    pub saturation_time: f32,
    pub _pad: [f32; 3],
}

static_assertions::const_assert_eq!(std::mem::size_of::<FrameUniforms>(), 48);

impl FrameUniforms {
    pub fn from_viewport<V: MapViewport + ?Sized>(
        viewport: &V,
        config: &OverlayConfig,
        zoom_table: &ZoomStyleTable,
    ) -> Self {
        let center = viewport.center();
        let (width, height) = viewport.bounds().extent();
        let size = viewport.size();
        let zoom = viewport.zoom();

        Self {
            center: [center.lng as f32, center.lat as f32],
            extent: [width as f32, height as f32],
            resolution: [size.width as f32, size.height as f32],
            point_size: zoom_table.size_for_zoom(zoom),
            border: config.border.thickness_at(zoom),
            saturation_time: config.color_scale.saturation_time as f32,
            _pad: [0.0; 3],
        }
    }

    /// Whether the frame maps to a visible, non-degenerate area.
    pub fn is_drawable(&self) -> bool {
        self.extent.iter().chain(&self.resolution).all(|v| v.is_finite() && *v > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trip_atlas_core::{LatLng, MapView, Size};

    fn view(zoom: f64) -> MapView {
        MapView::new(LatLng::new(52.637778, 13.203611), zoom, Size::new(800, 600))
    }

    #[test]
    fn test_uniform_size() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 48);
    }

    #[test]
    fn test_from_viewport() {
        let uniforms = FrameUniforms::from_viewport(
            &view(14.0),
            &OverlayConfig::default(),
            &ZoomStyleTable::standard(),
        );

        assert_eq!(uniforms.center, [13.203611f64 as f32, 52.637778f64 as f32]);
        assert_eq!(uniforms.resolution, [800.0, 600.0]);
        assert_eq!(uniforms.point_size, 10.0);
        assert_eq!(uniforms.border, 0.25);
        assert_eq!(uniforms.saturation_time, 3000.0);
        assert!(uniforms.is_drawable());
    }

    #[test]
    fn test_border_off_when_zoomed_out() {
        let uniforms = FrameUniforms::from_viewport(
            &view(11.4),
            &OverlayConfig::default(),
            &ZoomStyleTable::standard(),
        );
        assert_eq!(uniforms.border, 0.0);
        assert_eq!(uniforms.point_size, 5.0);
    }

    #[test]
    fn test_extent_halves_per_zoom_level() {
        let config = OverlayConfig::default();
        let table = ZoomStyleTable::standard();
        let wide = FrameUniforms::from_viewport(&view(10.0), &config, &table);
        let narrow = FrameUniforms::from_viewport(&view(11.0), &config, &table);
        assert!((wide.extent[0] / narrow.extent[0] - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_viewport_is_not_drawable() {
        let mut view = view(12.0);
        view.resize(Size::new(0, 600));
        let uniforms = FrameUniforms::from_viewport(
            &view,
            &OverlayConfig::default(),
            &ZoomStyleTable::standard(),
        );
        assert!(!uniforms.is_drawable());
    }
}
