//! Static per-station GPU buffers.
//!
//! Written once per dataset load and only read afterwards; pan and zoom never
//! touch them.

use trip_atlas_core::Station;
use trip_atlas_core::profiling::profile_function;
use trip_atlas_test_utils::{GpuBuffer, RenderContext};

/// Two triangles spanning the unit square `[-1, 1]²`, shared by every instance.
pub const QUAD_OFFSETS: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

pub const QUAD_VERTEX_COUNT: u32 = QUAD_OFFSETS.len() as u32;

/// wgpu rejects zero-sized copies, so empty datasets still get a small buffer.
const MIN_BUFFER_SIZE: u64 = 16;

fn drawable(stations: &[Station]) -> impl Iterator<Item = &Station> {
    stations.iter().filter(|s| s.has_finite_location())
}

/// Geographic positions as `(lng, lat)` pairs.
pub fn position_data(stations: &[Station]) -> Vec<[f32; 2]> {
    drawable(stations)
        .map(|s| [s.longitude as f32, s.latitude as f32])
        .collect()
}

/// One value per station; `Unknown` becomes `f32::MAX`.
pub fn value_data(stations: &[Station]) -> Vec<f32> {
    drawable(stations).map(|s| s.time.gpu_value()).collect()
}

pub struct StationBuffers {
    pub quad: GpuBuffer,
    pub positions: GpuBuffer,
    pub values: GpuBuffer,
    instance_count: u32,
}

impl StationBuffers {
    pub fn upload(ctx: &dyn RenderContext, stations: &[Station]) -> Self {
        profile_function!();

        let positions = position_data(stations);
        let values = value_data(stations);
        let skipped = stations.len() - positions.len();
        if skipped > 0 {
            tracing::warn!("{} stations without a finite position are not uploaded", skipped);
        }

        let quad = upload_vertex_data(ctx, "station_quad_offsets", bytemuck::cast_slice(&QUAD_OFFSETS));
        let position_buffer =
            upload_vertex_data(ctx, "station_positions", bytemuck::cast_slice(&positions));
        let value_buffer = upload_vertex_data(ctx, "station_values", bytemuck::cast_slice(&values));

        tracing::info!("Uploaded {} stations to the GPU", positions.len());
        Self {
            quad,
            positions: position_buffer,
            values: value_buffer,
            instance_count: positions.len() as u32,
        }
    }

    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }
}

fn upload_vertex_data(ctx: &dyn RenderContext, label: &'static str, data: &[u8]) -> GpuBuffer {
    let buffer = ctx.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (data.len() as u64).max(MIN_BUFFER_SIZE),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    if !data.is_empty() {
        ctx.write_buffer(&buffer, 0, data);
    }
    buffer
}
