//! Silhouette boundary scan and scale-factor derivation.
//!
//! Calibration walks four cardinal rays from the image edge midpoints
//! toward center, measuring how many background pixels each ray crosses
//! before hitting the object silhouette. The mean of the four margins
//! gives the silhouette's pixel radius, and dividing by the known physical
//! radius of the reference object gives a pixels-per-unit scale factor.

use super::buffer::DepthBuffer;
use super::error::MeasureError;

/// Cardinal direction of a boundary scan, named for the edge it starts at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// From the bottom-edge midpoint, walking up.
    Bottom,
    /// From the top-edge midpoint, walking down.
    Top,
    /// From the left-edge midpoint, walking right.
    Left,
    /// From the right-edge midpoint, walking left.
    Right,
}

impl std::fmt::Display for ScanDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Bottom => "bottom",
            Self::Top => "top",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

/// Pixel distances from each image edge to the first non-background sample
/// along the corresponding cardinal ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SilhouetteMargins {
    /// Margin from the top edge.
    pub top: u32,
    /// Margin from the bottom edge.
    pub bottom: u32,
    /// Margin from the left edge.
    pub left: u32,
    /// Margin from the right edge.
    pub right: u32,
}

impl SilhouetteMargins {
    /// Equal margins on all four sides (the readback-disabled fallback).
    #[must_use]
    pub fn uniform(margin: u32) -> Self {
        Self { top: margin, bottom: margin, left: margin, right: margin }
    }

    /// Mean margin in pixels.
    #[must_use]
    pub fn mean(&self) -> f32 {
        (self.top + self.bottom + self.left + self.right) as f32 / 4.0
    }
}

/// Pixels-per-physical-unit conversion factor.
///
/// Guaranteed positive and finite by construction, so dividing pixel
/// offsets by it always yields meaningful physical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor(f32);

impl ScaleFactor {
    /// Wrap a raw pixels-per-unit value.
    ///
    /// # Errors
    ///
    /// [`MeasureError::NonPositiveScale`] if the value is not a positive,
    /// finite number.
    pub fn new(pixels_per_unit: f32) -> Result<Self, MeasureError> {
        if !pixels_per_unit.is_finite() || pixels_per_unit <= 0.0 {
            return Err(MeasureError::NonPositiveScale(pixels_per_unit));
        }
        Ok(Self(pixels_per_unit))
    }

    /// The raw pixels-per-unit value.
    #[must_use]
    pub fn pixels_per_unit(self) -> f32 {
        self.0
    }

    /// Convert a pixel offset to physical units.
    #[must_use]
    pub fn to_physical(self, pixels: f32) -> f32 {
        pixels / self.0
    }
}

/// Walk from `start` in `step`-sized index increments until a
/// non-background sample is found, up to `limit` steps. Returns the number
/// of pixels traveled.
fn scan_ray(
    buffer: &DepthBuffer,
    direction: ScanDirection,
    start: usize,
    step: isize,
    limit: u32,
) -> Result<u32, MeasureError> {
    let samples = buffer.samples();
    let mut index = start as isize;
    for traveled in 0..=limit {
        let Some(&sample) = samples.get(index as usize) else {
            break;
        };
        if sample != DepthBuffer::BACKGROUND {
            return Ok(traveled);
        }
        index += step;
    }
    Err(MeasureError::SilhouetteNotFound { direction })
}

/// Measure the silhouette margins of `buffer` along the four cardinal rays.
///
/// Each ray starts at the midpoint of an image edge and walks toward image
/// center, stopping at the first sample that is not the background
/// sentinel. Scans are bounded at the image midline; an object that never
/// appears along a ray is a calibration failure, not an unbounded walk.
///
/// # Errors
///
/// [`MeasureError::SilhouetteNotFound`] if any ray reaches the midline
/// without leaving the background.
pub fn scan_margins(
    buffer: &DepthBuffer,
) -> Result<SilhouetteMargins, MeasureError> {
    let (w, h) = buffer.dimensions();
    let (w_us, h_us) = (w as usize, h as usize);

    // Edge-midpoint starting indices, row 0 = bottom scanline.
    let start_bottom = w_us / 2;
    let start_top = w_us * h_us - w_us / 2;
    let start_left = w_us * (h_us / 2);
    let start_right = w_us * (h_us / 2 + 1) - 1;

    let bottom = scan_ray(
        buffer,
        ScanDirection::Bottom,
        start_bottom,
        w_us as isize,
        h / 2,
    )?;
    let top = scan_ray(
        buffer,
        ScanDirection::Top,
        start_top,
        -(w_us as isize),
        h / 2,
    )?;
    let left =
        scan_ray(buffer, ScanDirection::Left, start_left, 1, w / 2)?;
    let right =
        scan_ray(buffer, ScanDirection::Right, start_right, -1, w / 2)?;

    Ok(SilhouetteMargins { top, bottom, left, right })
}

/// Derive a scale factor from measured margins and the reference object's
/// known physical radius.
///
/// The silhouette's pixel radius is half the image width minus the mean
/// margin; dividing by the reference radius gives pixels per unit.
///
/// # Errors
///
/// [`MeasureError::NonPositiveReference`] for a non-positive reference
/// radius, [`MeasureError::DegenerateSilhouette`] if the margins leave no
/// positive pixel radius.
pub fn derive_scale(
    margins: SilhouetteMargins,
    image_width: u32,
    reference_radius: f32,
) -> Result<ScaleFactor, MeasureError> {
    if !reference_radius.is_finite() || reference_radius <= 0.0 {
        return Err(MeasureError::NonPositiveReference(reference_radius));
    }
    let half_width = (image_width / 2) as f32;
    let margin = margins.mean();
    let pixel_radius = half_width - margin;
    if pixel_radius <= 0.0 {
        return Err(MeasureError::DegenerateSilhouette {
            margin,
            half_width,
        });
    }
    let scale = ScaleFactor::new(pixel_radius / reference_radius)?;
    log::info!(
        "calibration complete: pixel radius {pixel_radius:.1}, scale factor \
         {:.4} px/unit",
        scale.pixels_per_unit()
    );
    Ok(scale)
}

/// Calibrate a scale factor from a captured depth buffer.
///
/// Combines [`scan_margins`] and [`derive_scale`]: scans the silhouette of
/// the reference object and converts its measured pixel radius into a
/// pixels-per-unit scale.
///
/// # Errors
///
/// Any error from [`scan_margins`] or [`derive_scale`].
pub fn calibrate(
    buffer: &DepthBuffer,
    reference_radius: f32,
) -> Result<ScaleFactor, MeasureError> {
    let margins = scan_margins(buffer)?;
    log::debug!(
        "silhouette margins: top {} bottom {} left {} right {}",
        margins.top,
        margins.bottom,
        margins.left,
        margins.right
    );
    derive_scale(margins, buffer.width(), reference_radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Buffer of `size`x`size` background with a centered foreground disk.
    fn disk_buffer(size: u32, radius: f32) -> DepthBuffer {
        let center = (size as f32 - 1.0) / 2.0;
        let samples = (0..size * size)
            .map(|i| {
                let col = (i % size) as f32;
                let row = (i / size) as f32;
                let d = ((col - center).powi(2) + (row - center).powi(2))
                    .sqrt();
                if d < radius {
                    0.0
                } else {
                    1.0
                }
            })
            .collect();
        DepthBuffer::from_device_samples(size, size, samples).unwrap()
    }

    #[test]
    fn centered_disk_scenario() {
        let buffer = disk_buffer(800, 10.0);
        let margins = scan_margins(&buffer).unwrap();
        assert_eq!(margins, SilhouetteMargins::uniform(390));
        assert!((margins.mean() - 390.0).abs() < f32::EPSILON);

        let scale = calibrate(&buffer, 6.7).unwrap();
        assert!((scale.pixels_per_unit() - 10.0 / 6.7).abs() < 1e-5);
    }

    #[test]
    fn calibration_is_deterministic() {
        let buffer = disk_buffer(256, 40.0);
        let a = calibrate(&buffer, 6.7).unwrap();
        let b = calibrate(&buffer, 6.7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn symmetric_margins_give_exact_pixel_radius() {
        // A perfectly centered disk yields equal margins in all four
        // directions, and the pixel radius is exactly W/2 - margin.
        let buffer = disk_buffer(400, 25.0);
        let margins = scan_margins(&buffer).unwrap();
        assert_eq!(margins.top, margins.bottom);
        assert_eq!(margins.left, margins.right);
        assert_eq!(margins.top, margins.left);

        let scale = calibrate(&buffer, 1.0).unwrap();
        assert_eq!(
            scale.pixels_per_unit(),
            200.0 - margins.mean()
        );
    }

    #[test]
    fn all_background_fails_bounded() {
        let buffer = DepthBuffer::filled(64, 64, 1.0).unwrap();
        let err = scan_margins(&buffer).unwrap_err();
        assert_eq!(
            err,
            MeasureError::SilhouetteNotFound {
                direction: ScanDirection::Bottom
            }
        );
    }

    #[test]
    fn foreground_at_center_only_is_found_at_midline() {
        // Single foreground pixel at the exact scan midline; the bounded
        // walk must still reach it.
        let size = 64u32;
        let mut samples = vec![1.0f32; (size * size) as usize];
        let center = (size / 2 * size + size / 2) as usize;
        samples[center] = 0.0;
        let buffer =
            DepthBuffer::from_device_samples(size, size, samples).unwrap();
        let margins = scan_margins(&buffer).unwrap();
        assert_eq!(margins.bottom, size / 2);
        assert_eq!(margins.left, size / 2);
    }

    #[test]
    fn degenerate_silhouette_rejected() {
        let err = derive_scale(SilhouetteMargins::uniform(400), 800, 6.7)
            .unwrap_err();
        assert_eq!(
            err,
            MeasureError::DegenerateSilhouette {
                margin: 400.0,
                half_width: 400.0
            }
        );
    }

    #[test]
    fn non_positive_reference_rejected() {
        let err = derive_scale(SilhouetteMargins::uniform(24), 800, 0.0)
            .unwrap_err();
        assert_eq!(err, MeasureError::NonPositiveReference(0.0));
    }

    #[test]
    fn scale_factor_rejects_degenerate_values() {
        assert!(ScaleFactor::new(1.5).is_ok());
        assert!(ScaleFactor::new(0.0).is_err());
        assert!(ScaleFactor::new(-2.0).is_err());
        assert!(ScaleFactor::new(f32::NAN).is_err());
        assert!(ScaleFactor::new(f32::INFINITY).is_err());
    }

    #[test]
    fn fallback_margin_matches_scan_free_path() {
        // The readback-disabled path uses uniform margins of 24 pixels.
        let scale = derive_scale(SilhouetteMargins::uniform(24), 800, 6.7)
            .unwrap();
        assert!((scale.pixels_per_unit() - 376.0 / 6.7).abs() < 1e-4);
    }
}
