//! Full-texture depth readback through a staging buffer.
//!
//! Texture-to-buffer copies require each row to start on a 256-byte
//! boundary, so the staging buffer is padded per row and the samples are
//! unpadded on the CPU side. Rows are also flipped during unpadding: wgpu
//! copies rows top-down, but the measurement code treats row 0 as the
//! bottom scanline.

use crate::error::CaliperError;
use crate::gpu::texture::DepthTarget;

/// Staging buffer and layout bookkeeping for reading a `Depth32Float`
/// texture back into CPU memory.
pub struct DepthReadback {
    staging: wgpu::Buffer,
    width: u32,
    height: u32,
    padded_bytes_per_row: u32,
}

impl DepthReadback {
    /// Create a readback staging buffer for a `width` x `height` depth
    /// texture.
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let unpadded = width * 4;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded.div_ceil(align) * align;

        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Depth Readback Staging"),
            size: u64::from(padded_bytes_per_row) * u64::from(height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        Self {
            staging,
            width,
            height,
            padded_bytes_per_row,
        }
    }

    /// Encode a copy of the whole depth texture into the staging buffer.
    ///
    /// Must be submitted before [`read`](Self::read) is called.
    pub fn encode_copy(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        depth: &DepthTarget,
    ) {
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &depth.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::DepthOnly,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(self.padded_bytes_per_row),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Map the staging buffer and return the depth samples as a tight
    /// row-major `Vec<f32>` in device range `[0, 1]`, row 0 = bottom.
    ///
    /// Blocks until the GPU has finished the submitted copy.
    ///
    /// # Errors
    ///
    /// [`CaliperError::Readback`] if buffer mapping fails.
    pub fn read(
        &self,
        device: &wgpu::Device,
    ) -> Result<Vec<f32>, CaliperError> {
        let slice = self.staging.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });

        let _ = device.poll(wgpu::PollType::Wait);

        match receiver.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(CaliperError::Readback(e.to_string()));
            }
            Err(e) => return Err(CaliperError::Readback(e.to_string())),
        }

        let data = slice.get_mapped_range();
        let mut samples =
            Vec::with_capacity(self.width as usize * self.height as usize);
        let row_bytes = self.width as usize * 4;
        // Iterate padded rows bottom-up so row 0 of the output is the
        // bottom scanline.
        for row in (0..self.height as usize).rev() {
            let begin = row * self.padded_bytes_per_row as usize;
            let row_data = &data[begin..begin + row_bytes];
            samples.extend(
                row_data
                    .chunks_exact(4)
                    .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]])),
            );
        }
        drop(data);
        self.staging.unmap();

        Ok(samples)
    }
}
