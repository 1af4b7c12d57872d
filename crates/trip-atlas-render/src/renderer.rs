//! Whole-viewport station overlay drawn with one instanced draw call.
//!
//! Station positions and values live in static GPU buffers uploaded once per
//! dataset. Every frame only rewrites a 48 byte uniform block computed from
//! the viewport, so panning and zooming never re-upload station data.

use std::sync::Arc;

use trip_atlas_core::profiling::{profile_function, profile_scope};
use trip_atlas_core::{MapViewport, OverlayConfig, Station, ViewportEvent, ZoomStyleTable};

use crate::buffers::{QUAD_VERTEX_COUNT, StationBuffers};
use crate::context::GraphicsContext;
use crate::error::ResourceError;
use crate::pipeline::StationPipeline;
use crate::readback::{ReadbackError, read_texture_rgba8};
use crate::target::{DEFAULT_FORMAT, OverlayTarget};
use crate::uniforms::FrameUniforms;

pub struct GpuStationRenderer {
    context: Arc<GraphicsContext>,
    pipeline: StationPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    buffers: Option<StationBuffers>,
    target: OverlayTarget,
    config: OverlayConfig,
    zoom_table: ZoomStyleTable,
}

impl GpuStationRenderer {
    /// Create a renderer drawing into its own offscreen target.
    pub fn new(context: Arc<GraphicsContext>, config: OverlayConfig) -> Result<Self, ResourceError> {
        Self::with_format(context, config, DEFAULT_FORMAT)
    }

    /// Create a renderer whose pipeline targets `format`, e.g. a host surface format.
    pub fn with_format(
        context: Arc<GraphicsContext>,
        config: OverlayConfig,
        format: wgpu::TextureFormat,
    ) -> Result<Self, ResourceError> {
        let pipeline = StationPipeline::new(context.device(), format)?;

        let uniform_buffer = context.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("station_frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = context.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("station_frame_bind_group"),
            layout: &pipeline.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let target = OverlayTarget::new(&context, trip_atlas_core::Size::new(1, 1), pipeline.format);

        Ok(Self {
            context,
            pipeline,
            uniform_buffer,
            bind_group,
            buffers: None,
            target,
            config,
            zoom_table: ZoomStyleTable::standard(),
        })
    }

    pub fn with_zoom_table(mut self, zoom_table: ZoomStyleTable) -> Self {
        self.zoom_table = zoom_table;
        self
    }

    /// Upload a new station set, replacing the previous one.
    pub fn load_stations(&mut self, stations: &[Station]) {
        self.buffers = Some(StationBuffers::upload(&*self.context, stations));
    }

    pub fn station_count(&self) -> u32 {
        self.buffers.as_ref().map_or(0, StationBuffers::instance_count)
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn target(&self) -> &OverlayTarget {
        &self.target
    }

    /// Redraw on view changes. Returns whether a frame was drawn.
    pub fn handle_event<V: MapViewport + ?Sized>(
        &mut self,
        event: &ViewportEvent,
        viewport: &V,
    ) -> bool {
        if !event.is_view_change() {
            return false;
        }
        self.render(viewport);
        true
    }

    /// Draw a full frame into the offscreen target, sized to the viewport.
    pub fn render<V: MapViewport + ?Sized>(&mut self, viewport: &V) {
        profile_function!();

        if self.target.resize(&self.context, viewport.size()) {
            tracing::debug!(
                "Resized overlay target to {}x{}",
                self.target.size().width,
                self.target.size().height
            );
        }

        let mut encoder =
            self.context
                .device()
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("station_overlay_encoder"),
                });
        self.encode_frame(&mut encoder, self.target.view(), viewport);
        self.context.queue().submit(Some(encoder.finish()));
    }

    /// Record a clear plus the instanced draw into `view`.
    ///
    /// `view` must have the format the renderer was created with.
    pub fn encode_frame<V: MapViewport + ?Sized>(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        viewport: &V,
    ) {
        let uniforms = FrameUniforms::from_viewport(viewport, &self.config, &self.zoom_table);
        self.context
            .queue()
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("station_overlay_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let Some(buffers) = &self.buffers else {
            return;
        };
        if buffers.instance_count() == 0 || !uniforms.is_drawable() {
            return;
        }
        let (Some(quad), Some(positions), Some(values)) = (
            buffers.quad.as_wgpu(),
            buffers.positions.as_wgpu(),
            buffers.values.as_wgpu(),
        ) else {
            tracing::warn!("Station buffers are not GPU resident; skipping draw");
            return;
        };

        profile_scope!("station_overlay_draw");
        tracing::trace!(
            "Drawing {} stations at zoom {:.2}",
            buffers.instance_count(),
            viewport.zoom()
        );

        pass.push_debug_group("GpuStationRenderer::draw");
        pass.set_pipeline(&self.pipeline.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, quad.slice(..));
        pass.set_vertex_buffer(1, positions.slice(..));
        pass.set_vertex_buffer(2, values.slice(..));
        pass.draw(0..QUAD_VERTEX_COUNT, 0..buffers.instance_count());
        pass.pop_debug_group();
    }

    /// Read the last rendered frame back as tightly packed RGBA8.
    pub fn read_frame(&self) -> Result<Vec<u8>, ReadbackError> {
        read_texture_rgba8(&self.context, self.target.texture())
    }
}
