//! GPU station overlay for Trip Atlas.
//!
//! [`GpuStationRenderer`] draws every station with a single instanced draw:
//! a shared six-vertex quad per instance, with per-instance position and
//! value buffers uploaded once per dataset. Pan and zoom only update the
//! per-frame [`FrameUniforms`].

pub mod buffers;
pub mod context;
mod context_impl;
pub mod error;
pub mod pipeline;
pub mod readback;
pub mod renderer;
pub mod target;
pub mod uniforms;

pub use buffers::{QUAD_OFFSETS, StationBuffers};
pub use context::{GraphicsContext, GraphicsContextDescriptor, GraphicsError};
pub use error::ResourceError;
pub use pipeline::{StationPipeline, validate_wgsl};
pub use readback::ReadbackError;
pub use renderer::GpuStationRenderer;
pub use target::OverlayTarget;
pub use uniforms::FrameUniforms;

/// Re-export wgpu so hosts use the same version.
pub use wgpu;
