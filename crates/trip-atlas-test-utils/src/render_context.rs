//! Trait abstracting GPU operations for testing.

use crate::gpu_types::GpuBuffer;
use wgpu::BufferDescriptor;

/// GPU resource creation used by the station upload path.
///
/// Methods take `&self` and return owned wrappers, so one context can be
/// shared through an `Arc` and mocks can record calls behind a `Mutex`.
///
/// ```rust,no_run
/// use trip_atlas_test_utils::RenderContext;
/// use wgpu::{BufferDescriptor, BufferUsages};
///
/// fn upload(ctx: &dyn RenderContext, data: &[u8]) {
///     let buffer = ctx.create_buffer(&BufferDescriptor {
///         label: Some("values"),
///         size: data.len() as u64,
///         usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
///         mapped_at_creation: false,
///     });
///     ctx.write_buffer(&buffer, 0, data);
/// }
/// ```
pub trait RenderContext: Send + Sync {
    fn create_buffer(&self, desc: &BufferDescriptor) -> GpuBuffer;

    /// Write data to a buffer.
    ///
    /// For real buffers, this maps to `queue.write_buffer()`.
    /// For mock buffers, this records the operation for test verification.
    fn write_buffer(&self, buffer: &GpuBuffer, offset: u64, data: &[u8]);
}
