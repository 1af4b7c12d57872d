//! Offscreen color target for headless overlay rendering.

use trip_atlas_core::Size;

use crate::context::GraphicsContext;

pub const DEFAULT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// A resizable offscreen color texture.
///
/// Zero dimensions are raised to one pixel since wgpu rejects empty textures.
#[derive(Debug)]
pub struct OverlayTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: Size<u32>,
    format: wgpu::TextureFormat,
}

impl OverlayTarget {
    pub fn new(context: &GraphicsContext, size: Size<u32>, format: wgpu::TextureFormat) -> Self {
        let size = Self::texture_size(size);
        let texture = context.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("station_overlay_target"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        tracing::trace!("Created {}x{} overlay target", size.width, size.height);
        Self {
            texture,
            view,
            size,
            format,
        }
    }

    fn texture_size(size: Size<u32>) -> Size<u32> {
        Size::new(size.width.max(1), size.height.max(1))
    }

    /// Recreate the texture if the size changed. Returns whether it did.
    pub fn resize(&mut self, context: &GraphicsContext, size: Size<u32>) -> bool {
        if Self::texture_size(size) == self.size {
            return false;
        }
        *self = Self::new(context, size, self.format);
        true
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn size(&self) -> Size<u32> {
        self.size
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }
}
