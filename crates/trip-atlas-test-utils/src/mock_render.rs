//! Mock implementation of RenderContext for testing.
//!
//! Records operations without touching a GPU.

use crate::{gpu_types::GpuBuffer, render_context::RenderContext};
use parking_lot::Mutex;
use wgpu::{BufferDescriptor, BufferUsages};

/// Records a GPU operation call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    CreateBuffer {
        label: Option<String>,
        size: u64,
        usage: BufferUsages,
    },
    WriteBuffer {
        buffer_id: usize,
        offset: u64,
        data: Vec<u8>,
    },
}

/// Mock implementation of RenderContext for testing.
///
/// `parking_lot::Mutex` keeps the context `Send + Sync` as the trait requires.
///
/// ```rust
/// use trip_atlas_test_utils::{MockRenderContext, RenderContext};
/// use wgpu::*;
///
/// let mock = MockRenderContext::new();
/// let buffer = mock.create_buffer(&BufferDescriptor {
///     label: None,
///     size: 8,
///     usage: BufferUsages::VERTEX,
///     mapped_at_creation: false,
/// });
/// mock.write_buffer(&buffer, 0, &[1, 2, 3, 4]);
///
/// assert_eq!(mock.written_bytes(0), vec![1, 2, 3, 4]);
/// ```
pub struct MockRenderContext {
    calls: Mutex<Vec<RenderCall>>,
    next_buffer_id: Mutex<usize>,
}

impl MockRenderContext {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_buffer_id: Mutex::new(0),
        }
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().clone()
    }

    pub fn count_buffer_creates(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, RenderCall::CreateBuffer { .. }))
            .count()
    }

    pub fn count_buffer_writes(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, RenderCall::WriteBuffer { .. }))
            .count()
    }

    /// Labels of all created buffers, in creation order.
    pub fn buffer_labels(&self) -> Vec<Option<String>> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RenderCall::CreateBuffer { label, .. } => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    /// All bytes written to buffer `buffer_id`, concatenated in call order.
    pub fn written_bytes(&self, buffer_id: usize) -> Vec<u8> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RenderCall::WriteBuffer {
                    buffer_id: id,
                    data,
                    ..
                } if *id == buffer_id => Some(data.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    /// Id of the first buffer created with `label`.
    pub fn buffer_id(&self, label: &str) -> Option<usize> {
        self.buffer_labels()
            .iter()
            .position(|l| l.as_deref() == Some(label))
    }

    /// Bytes written to `buffer_id` read back as little-endian `f32`s,
    /// the layout of the station position and value buffers.
    pub fn written_f32s(&self, buffer_id: usize) -> Vec<f32> {
        self.written_bytes(buffer_id)
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Default for MockRenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext for MockRenderContext {
    fn create_buffer(&self, desc: &BufferDescriptor) -> GpuBuffer {
        let mut next = self.next_buffer_id.lock();
        let id = *next;
        *next += 1;

        self.calls.lock().push(RenderCall::CreateBuffer {
            label: desc.label.map(|s| s.to_string()),
            size: desc.size,
            usage: desc.usage,
        });

        GpuBuffer::mock(id, desc.size)
    }

    fn write_buffer(&self, buffer: &GpuBuffer, offset: u64, data: &[u8]) {
        if let Some(buffer_id) = buffer.mock_id() {
            self.calls.lock().push(RenderCall::WriteBuffer {
                buffer_id,
                offset,
                data: data.to_vec(),
            });
        }
    }
}
