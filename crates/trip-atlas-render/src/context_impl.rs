//! Implementation of RenderContext trait for GraphicsContext.
//!
//! Lets the station upload path run against either a real device or
//! `MockRenderContext`.

use crate::context::GraphicsContext;
use trip_atlas_test_utils::{GpuBuffer, RenderContext};
use wgpu::BufferDescriptor;

impl RenderContext for GraphicsContext {
    fn create_buffer(&self, desc: &BufferDescriptor) -> GpuBuffer {
        let buffer = self.device.create_buffer(desc);
        GpuBuffer::from_wgpu(buffer)
    }

    fn write_buffer(&self, buffer: &GpuBuffer, offset: u64, data: &[u8]) {
        match buffer.as_wgpu() {
            Some(wgpu_buffer) => self.queue.write_buffer(wgpu_buffer, offset, data),
            None => tracing::warn!("Ignoring write to a mock buffer on a real device"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trip_atlas_test_utils::MockRenderContext;

    #[test]
    fn test_render_context_trait_object() {
        fn uses_render_context(ctx: &dyn RenderContext) {
            let buffer = ctx.create_buffer(&BufferDescriptor {
                label: Some("Test Buffer"),
                size: 256,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

            ctx.write_buffer(&buffer, 0, &[0u8; 256]);
        }

        let mock_ctx = MockRenderContext::new();
        uses_render_context(&mock_ctx);

        // create_buffer + write_buffer
        assert_eq!(mock_ctx.calls().len(), 2);
    }
}
