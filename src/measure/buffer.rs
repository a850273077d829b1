//! Captured per-pixel depth samples in the linear measurement range.

use super::error::MeasureError;

/// Half-extent of the remapped depth range.
///
/// Device samples in `[0, 1]` land in `[-DEPTH_SPAN, +DEPTH_SPAN]` after
/// remapping, and the orthographic projection pins its near/far planes to
/// the same span so a remapped sample reads as signed distance in front of
/// the camera, in world units.
pub const DEPTH_SPAN: f32 = 100.0;

/// Remap a device-range depth sample (`[0, 1]`) into the linear
/// measurement range (`[-DEPTH_SPAN, +DEPTH_SPAN]`).
///
/// The endpoints are exact in `f32`: `remap_device(1.0)` is precisely
/// [`DepthBuffer::BACKGROUND`], which is what makes sentinel comparison by
/// equality sound.
#[must_use]
pub fn remap_device(sample: f32) -> f32 {
    2.0 * DEPTH_SPAN * sample - DEPTH_SPAN
}

/// A dense, row-major grid of remapped depth samples.
///
/// Row 0 is the **bottom** scanline (readback flips the GPU's top-down row
/// order), so `index = row * width + col` counts up from the bottom-left
/// corner. Dimensions are fixed at construction; a new capture produces a
/// new buffer rather than mutating an old one.
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    width: u32,
    height: u32,
    samples: Vec<f32>,
}

impl DepthBuffer {
    /// Sentinel for "no geometry at this pixel": the cleared far plane
    /// (device 1.0) after remapping.
    pub const BACKGROUND: f32 = DEPTH_SPAN;

    /// Build a buffer from device-range samples, remapping each into the
    /// measurement range.
    ///
    /// # Errors
    ///
    /// [`MeasureError::ZeroDimensions`] if either dimension is zero;
    /// [`MeasureError::SampleCountMismatch`] if `samples.len()` is not
    /// `width * height`.
    pub fn from_device_samples(
        width: u32,
        height: u32,
        mut samples: Vec<f32>,
    ) -> Result<Self, MeasureError> {
        if width == 0 || height == 0 {
            return Err(MeasureError::ZeroDimensions);
        }
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(MeasureError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        for s in &mut samples {
            *s = remap_device(*s);
        }
        Ok(Self { width, height, samples })
    }

    /// Build a buffer filled with a single device-range value.
    ///
    /// Used by the readback-disabled capture path and by tests.
    ///
    /// # Errors
    ///
    /// [`MeasureError::ZeroDimensions`] if either dimension is zero.
    pub fn filled(
        width: u32,
        height: u32,
        device_value: f32,
    ) -> Result<Self, MeasureError> {
        if width == 0 || height == 0 {
            return Err(MeasureError::ZeroDimensions);
        }
        let len = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            samples: vec![remap_device(device_value); len],
        })
    }

    /// Buffer width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` pair.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Remapped samples, row-major from the bottom-left corner.
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample at a flat index, or `None` out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.samples.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_endpoints_are_exact() {
        assert_eq!(remap_device(0.0), -100.0);
        assert_eq!(remap_device(0.5), 0.0);
        assert_eq!(remap_device(1.0), DepthBuffer::BACKGROUND);
    }

    #[test]
    fn remap_stays_in_measurement_range() {
        for i in 0..=1000 {
            let s = i as f32 / 1000.0;
            let r = remap_device(s);
            assert!((-DEPTH_SPAN..=DEPTH_SPAN).contains(&r), "remap({s}) = {r}");
        }
    }

    #[test]
    fn construction_remaps_samples() {
        let buf =
            DepthBuffer::from_device_samples(2, 2, vec![0.0, 0.25, 0.75, 1.0])
                .unwrap();
        assert_eq!(buf.samples(), &[-100.0, -50.0, 50.0, 100.0]);
        assert_eq!(buf.dimensions(), (2, 2));
    }

    #[test]
    fn rejects_zero_dimensions() {
        let err =
            DepthBuffer::from_device_samples(0, 4, Vec::new()).unwrap_err();
        assert_eq!(err, MeasureError::ZeroDimensions);
        let err = DepthBuffer::filled(4, 0, 1.0).unwrap_err();
        assert_eq!(err, MeasureError::ZeroDimensions);
    }

    #[test]
    fn rejects_sample_count_mismatch() {
        let err =
            DepthBuffer::from_device_samples(3, 3, vec![1.0; 8]).unwrap_err();
        assert_eq!(
            err,
            MeasureError::SampleCountMismatch { expected: 9, actual: 8 },
        );
    }

    #[test]
    fn filled_buffer_is_uniform() {
        let buf = DepthBuffer::filled(4, 2, 1.0).unwrap();
        assert!(buf
            .samples()
            .iter()
            .all(|&s| s == DepthBuffer::BACKGROUND));
        assert_eq!(buf.get(7), Some(100.0));
        assert_eq!(buf.get(8), None);
    }
}
