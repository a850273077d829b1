//! Nearest-pixel picking by baseline comparison.
//!
//! A probe capture is compared against the stored baseline pixel by pixel;
//! the pixel whose depth sample decreased the most is the point that moved
//! closest to the camera since the baseline was taken.

use super::buffer::DepthBuffer;
use super::calibrate::ScaleFactor;
use super::error::MeasureError;

/// Result of a nearest-pixel pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickedPoint {
    /// Flat pixel index of the winning pixel (`row * width + col`).
    pub index: usize,
    /// Physical x coordinate, relative to image center.
    pub x: f32,
    /// Physical y coordinate, relative to image center.
    pub y: f32,
    /// The winning depth delta (most negative = closest approach).
    pub depth_delta: f32,
}

/// Find the pixel whose depth decreased the most between `baseline` and
/// `current`, and convert it to physical image-center-relative coordinates.
///
/// Pixels whose baseline sample is the background sentinel are excluded
/// from the comparison, which also excludes pairs where both buffers read
/// background. A current-buffer background sample over a foreground
/// baseline stays eligible: its delta is maximal-positive, so it can only
/// win when the entire silhouette receded.
///
/// # Errors
///
/// [`MeasureError::DimensionMismatch`] if the buffers differ in size;
/// [`MeasureError::NoForeground`] if the baseline is entirely background.
pub fn pick_nearest(
    baseline: &DepthBuffer,
    current: &DepthBuffer,
    scale: ScaleFactor,
) -> Result<PickedPoint, MeasureError> {
    if baseline.dimensions() != current.dimensions() {
        return Err(MeasureError::DimensionMismatch {
            baseline: baseline.dimensions(),
            current: current.dimensions(),
        });
    }

    let mut winner: Option<(usize, f32)> = None;
    for (i, (&base, &cur)) in baseline
        .samples()
        .iter()
        .zip(current.samples())
        .enumerate()
    {
        if base == DepthBuffer::BACKGROUND {
            continue;
        }
        let delta = cur - base;
        if winner.is_none_or(|(_, min)| delta < min) {
            winner = Some((i, delta));
        }
    }
    let (index, depth_delta) =
        winner.ok_or(MeasureError::NoForeground)?;

    let (w, h) = baseline.dimensions();
    // The +1 row offset is a quirk of the original coordinate mapping,
    // preserved so calibrated measurements stay comparable.
    let row = index / w as usize + 1;
    let col = index % w as usize;
    let col_centered = col as f32 - (w / 2) as f32;
    let row_centered = row as f32 - (h / 2) as f32;

    let point = PickedPoint {
        index,
        x: scale.to_physical(col_centered),
        y: scale.to_physical(row_centered),
        depth_delta,
    };
    log::debug!(
        "nearest pixel {index} at ({:.3}, {:.3}), delta {depth_delta:.3}",
        point.x,
        point.y
    );
    Ok(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Uniform foreground buffer at device value `v`.
    fn flat(w: u32, h: u32, v: f32) -> DepthBuffer {
        DepthBuffer::filled(w, h, v).unwrap()
    }

    fn flat_with(w: u32, h: u32, v: f32, at: usize, dv: f32) -> DepthBuffer {
        let mut samples = vec![v; (w * h) as usize];
        samples[at] = dv;
        DepthBuffer::from_device_samples(w, h, samples).unwrap()
    }

    #[test]
    fn single_offset_pixel_wins_exactly() {
        let w = 16;
        let h = 16;
        let target = 5 * w as usize + 9;
        let baseline = flat(w, h, 0.5);
        // Device delta of -0.025 remaps to a depth delta of exactly -5.
        let current = flat_with(w, h, 0.5, target, 0.475);
        let scale = ScaleFactor::new(2.0).unwrap();

        let point = pick_nearest(&baseline, &current, scale).unwrap();
        assert_eq!(point.index, target);
        assert!((point.depth_delta - -5.0).abs() < 1e-4);
    }

    #[test]
    fn picking_is_idempotent() {
        let baseline = flat(32, 32, 0.5);
        let current = flat_with(32, 32, 0.5, 100, 0.2);
        let scale = ScaleFactor::new(1.5).unwrap();

        let a = pick_nearest(&baseline, &current, scale).unwrap();
        let b = pick_nearest(&baseline, &current, scale).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn coordinates_round_trip_through_scale() {
        let w = 64u32;
        let h = 64u32;
        let target = 40 * w as usize + 50;
        let baseline = flat(w, h, 0.5);
        let current = flat_with(w, h, 0.5, target, 0.1);
        let scale = ScaleFactor::new(4.0).unwrap();

        let point = pick_nearest(&baseline, &current, scale).unwrap();
        let dx = 50.0 - 32.0;
        let dy = (40.0 + 1.0) - 32.0;
        assert!((point.x - dx / 4.0).abs() < 1e-6);
        assert!((point.y - dy / 4.0).abs() < 1e-6);
        // Multiplying back by the scale recovers the pixel offsets.
        assert!((point.x * 4.0 - dx).abs() < 1e-5);
        assert!((point.y * 4.0 - dy).abs() < 1e-5);
    }

    #[test]
    fn background_baseline_pixels_are_excluded() {
        let w = 8;
        let h = 8;
        // Baseline: background everywhere except index 20.
        let baseline = flat_with(w, h, 1.0, 20, 0.5);
        // Current: a large decrease at a background-baseline pixel must not
        // win over a small decrease at the foreground pixel.
        let mut samples = vec![1.0f32; (w * h) as usize];
        samples[3] = 0.0;
        samples[20] = 0.45;
        let current =
            DepthBuffer::from_device_samples(w, h, samples).unwrap();
        let scale = ScaleFactor::new(1.0).unwrap();

        let point = pick_nearest(&baseline, &current, scale).unwrap();
        assert_eq!(point.index, 20);
    }

    #[test]
    fn all_background_baseline_fails() {
        let baseline = flat(8, 8, 1.0);
        let current = flat(8, 8, 0.5);
        let scale = ScaleFactor::new(1.0).unwrap();
        let err = pick_nearest(&baseline, &current, scale).unwrap_err();
        assert_eq!(err, MeasureError::NoForeground);
    }

    #[test]
    fn dimension_mismatch_fails() {
        let baseline = flat(8, 8, 0.5);
        let current = flat(8, 4, 0.5);
        let scale = ScaleFactor::new(1.0).unwrap();
        let err = pick_nearest(&baseline, &current, scale).unwrap_err();
        assert_eq!(
            err,
            MeasureError::DimensionMismatch {
                baseline: (8, 8),
                current: (8, 4)
            }
        );
    }

    #[test]
    fn receded_silhouette_still_reports_a_pixel() {
        // Foreground baseline, all-background current: the delta is
        // maximal-positive but a pick still resolves.
        let baseline = flat(8, 8, 0.5);
        let current = flat(8, 8, 1.0);
        let scale = ScaleFactor::new(1.0).unwrap();
        let point = pick_nearest(&baseline, &current, scale).unwrap();
        assert!((point.depth_delta - 100.0).abs() < 1e-4);
    }
}
