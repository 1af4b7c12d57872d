//! Test utilities for Trip Atlas.
//!
//! The main components are:
//!
//! - [`RenderContext`] - Trait abstracting the GPU operations the station renderer needs
//! - `MockRenderContext` - Mock implementation that records calls (requires `mock` feature)
//! - [`GpuBuffer`] - Buffer wrapper that can be real or mock
//! - [`stations`] - Deterministic station fixtures and a brute-force reference query
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use trip_atlas_test_utils::{MockRenderContext, RenderContext};
//! use wgpu::*;
//!
//! let mock = MockRenderContext::new();
//!
//! let buffer = mock.create_buffer(&BufferDescriptor {
//!     label: Some("station_positions"),
//!     size: 1024,
//!     usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
//!     mapped_at_creation: false,
//! });
//!
//! assert_eq!(mock.count_buffer_creates(), 1);
//! assert!(buffer.is_mock());
//! # }
//! ```
//!
//! Mock implementations use `Mutex` for interior mutability so `&self`
//! methods can record calls, and `RenderContext` stays object-safe.

pub mod gpu_types;
#[cfg(feature = "mock")]
pub mod mock_render;
pub mod render_context;
pub mod stations;

pub use gpu_types::*;
#[cfg(feature = "mock")]
pub use mock_render::*;
pub use render_context::*;
