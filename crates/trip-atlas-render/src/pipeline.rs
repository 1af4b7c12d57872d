//! Render pipeline for the instanced station overlay.

use crate::error::ResourceError;
use crate::uniforms::FrameUniforms;

pub const STATION_SHADER: &str = include_str!("shaders/station_overlay.wgsl");

const SHADER_LABEL: &str = "station_overlay_shader";
const PIPELINE_LABEL: &str = "station_overlay_pipeline";

/// Per-vertex quad corner at location 0.
const QUAD_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
/// Per-instance `(lng, lat)` at location 1.
const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x2];
/// Per-instance value at location 2.
const VALUE_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32];

pub fn vertex_buffer_layouts() -> [wgpu::VertexBufferLayout<'static>; 3] {
    [
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 2]>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &QUAD_ATTRIBUTES,
        },
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 2]>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &POSITION_ATTRIBUTES,
        },
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<f32>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &VALUE_ATTRIBUTES,
        },
    ]
}

fn shader_error(diagnostics: String) -> ResourceError {
    ResourceError::ShaderCompilation {
        label: SHADER_LABEL.to_string(),
        diagnostics,
    }
}

/// Parse and validate WGSL with naga on the CPU, without a device.
pub fn validate_wgsl(source: &str) -> Result<(), ResourceError> {
    use wgpu::naga::valid::{Capabilities, ValidationFlags, Validator};

    let module = wgpu::naga::front::wgsl::parse_str(source)
        .map_err(|e| shader_error(e.emit_to_string(source)))?;
    Validator::new(ValidationFlags::all(), Capabilities::default())
        .validate(&module)
        .map_err(|e| shader_error(e.emit_to_string(source)))?;
    Ok(())
}

/// A fully validated pipeline and the layout of its uniform bind group.
pub struct StationPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub format: wgpu::TextureFormat,
}

impl StationPipeline {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Result<Self, ResourceError> {
        Self::with_source(device, format, STATION_SHADER)
    }

    /// Build from custom WGSL, which must expose the same entry points and bindings.
    ///
    /// Compilation and validation errors are captured and returned instead of
    /// reaching the device's uncaptured error handler.
    pub fn with_source(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        source: &str,
    ) -> Result<Self, ResourceError> {
        if let Err(e) = validate_wgsl(source) {
            tracing::error!("{}", e);
            return Err(e);
        }

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(SHADER_LABEL),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
        let scope_error = pollster::block_on(device.pop_error_scope());

        let info = pollster::block_on(shader.get_compilation_info());
        let diagnostics: Vec<String> = info
            .messages
            .iter()
            .filter(|m| matches!(m.message_type, wgpu::CompilationMessageType::Error))
            .map(|m| match &m.location {
                Some(loc) => format!("{}:{}: {}", loc.line_number, loc.line_position, m.message),
                None => m.message.clone(),
            })
            .collect();

        if !diagnostics.is_empty() || scope_error.is_some() {
            let diagnostics = if diagnostics.is_empty() {
                scope_error.map(|e| e.to_string()).unwrap_or_default()
            } else {
                diagnostics.join("\n")
            };
            tracing::error!("Station shader failed to compile:\n{}", diagnostics);
            return Err(shader_error(diagnostics));
        }

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("station_overlay_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<FrameUniforms>() as u64
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("station_overlay_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let buffers = vertex_buffer_layouts();
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(PIPELINE_LABEL),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            tracing::error!("Station pipeline failed validation: {}", error);
            return Err(ResourceError::PipelineCreation {
                label: PIPELINE_LABEL.to_string(),
                message: error.to_string(),
            });
        }

        tracing::debug!("Created station overlay pipeline for {:?}", format);
        Ok(Self {
            pipeline,
            bind_group_layout,
            format,
        })
    }
}
