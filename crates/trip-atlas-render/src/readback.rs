//! Copying rendered frames back to the CPU.

use std::fmt;

use crate::context::GraphicsContext;

#[derive(Debug, Clone, PartialEq)]
pub enum ReadbackError {
    /// Buffer mapping failed
    MapFailed(String),
    /// Invalid dimensions
    InvalidDimensions,
    /// Unsupported format
    UnsupportedFormat,
}

impl fmt::Display for ReadbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MapFailed(msg) => write!(f, "Buffer mapping failed: {}", msg),
            Self::InvalidDimensions => write!(f, "Invalid dimensions for readback"),
            Self::UnsupportedFormat => write!(f, "Unsupported texture format for readback"),
        }
    }
}

impl std::error::Error for ReadbackError {}

/// Row pitch of a texture-to-buffer copy, padded to wgpu's alignment.
pub fn padded_bytes_per_row(width: u32, bytes_per_pixel: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (width * bytes_per_pixel).div_ceil(align) * align
}

/// Copy an RGBA8 texture into tightly packed bytes, blocking until done.
pub fn read_texture_rgba8(
    context: &GraphicsContext,
    texture: &wgpu::Texture,
) -> Result<Vec<u8>, ReadbackError> {
    let size = texture.size();
    let (width, height) = (size.width, size.height);
    if width == 0 || height == 0 {
        return Err(ReadbackError::InvalidDimensions);
    }

    let bytes_per_pixel = match texture.format() {
        wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => 4,
        _ => return Err(ReadbackError::UnsupportedFormat),
    };
    let bytes_per_row = padded_bytes_per_row(width, bytes_per_pixel);

    let buffer = context.device().create_buffer(&wgpu::BufferDescriptor {
        label: Some("overlay_readback_buffer"),
        size: (bytes_per_row * height) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = context
        .device()
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("overlay_readback_encoder"),
        });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        size,
    );
    context.queue().submit(Some(encoder.finish()));

    let slice = buffer.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });

    let _ = context.device().poll(wgpu::PollType::Wait {
        submission_index: None,
        timeout: None,
    });

    match rx.recv() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return Err(ReadbackError::MapFailed(e.to_string())),
        Err(e) => return Err(ReadbackError::MapFailed(e.to_string())),
    }

    let row_bytes = (width * bytes_per_pixel) as usize;
    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    {
        let data = slice.get_mapped_range();
        for row in data.chunks(bytes_per_row as usize).take(height as usize) {
            pixels.extend_from_slice(&row[..row_bytes]);
        }
    }
    buffer.unmap();

    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readback_error_display() {
        let err = ReadbackError::MapFailed("test".to_string());
        assert!(format!("{}", err).contains("Buffer mapping failed"));

        let err = ReadbackError::InvalidDimensions;
        assert!(format!("{}", err).contains("Invalid dimensions"));
    }

    #[test]
    fn test_bytes_per_row_alignment() {
        // Width 100, 4 bytes per pixel = 400 bytes, padded to 512
        assert_eq!(padded_bytes_per_row(100, 4), 512);
        assert_eq!(padded_bytes_per_row(64, 4), 256);
        assert_eq!(padded_bytes_per_row(65, 4) % wgpu::COPY_BYTES_PER_ROW_ALIGNMENT, 0);
    }
}
