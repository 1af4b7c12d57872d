//! GPU resource wrappers that can be real or mock.

/// Wrapper around a GPU buffer that can be real or mock.
///
/// Cheap to clone; a real `wgpu::Buffer` is reference counted internally.
#[derive(Clone, Debug)]
pub struct GpuBuffer {
    inner: GpuBufferInner,
    size: u64,
}

#[derive(Clone, Debug)]
enum GpuBufferInner {
    Real(wgpu::Buffer),
    #[cfg(feature = "mock")]
    Mock { id: usize },
}

impl GpuBuffer {
    /// Create from real WGPU buffer
    pub fn from_wgpu(buffer: wgpu::Buffer) -> Self {
        let size = buffer.size();
        Self {
            inner: GpuBufferInner::Real(buffer),
            size,
        }
    }

    /// Create mock buffer (for testing)
    #[cfg(feature = "mock")]
    pub fn mock(id: usize, size: u64) -> Self {
        Self {
            inner: GpuBufferInner::Mock { id },
            size,
        }
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// The underlying `wgpu::Buffer`, or `None` for a mock buffer.
    pub fn as_wgpu(&self) -> Option<&wgpu::Buffer> {
        match &self.inner {
            GpuBufferInner::Real(buffer) => Some(buffer),
            #[cfg(feature = "mock")]
            GpuBufferInner::Mock { .. } => None,
        }
    }

    #[cfg(feature = "mock")]
    pub fn is_mock(&self) -> bool {
        matches!(self.inner, GpuBufferInner::Mock { .. })
    }

    /// Get mock ID (for test assertions)
    #[cfg(feature = "mock")]
    pub fn mock_id(&self) -> Option<usize> {
        match &self.inner {
            GpuBufferInner::Mock { id } => Some(*id),
            _ => None,
        }
    }
}
