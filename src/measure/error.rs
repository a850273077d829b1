//! Measurement error taxonomy.

use std::fmt;

use super::calibrate::ScanDirection;

/// Errors produced by depth-buffer measurement operations.
///
/// These are deterministic invariant violations, not transient conditions:
/// a configuration error means mismatched buffer dimensions, a calibration
/// error means degenerate silhouette geometry, and a precondition error
/// means the caller sequenced operations incorrectly.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureError {
    /// A buffer was constructed with a zero width or height.
    ZeroDimensions,
    /// The sample vector length does not match `width * height`.
    SampleCountMismatch {
        /// Expected sample count (`width * height`).
        expected: usize,
        /// Actual sample count supplied.
        actual: usize,
    },
    /// Baseline and current buffers have different dimensions.
    DimensionMismatch {
        /// Baseline buffer `(width, height)`.
        baseline: (u32, u32),
        /// Current buffer `(width, height)`.
        current: (u32, u32),
    },
    /// A boundary scan reached the image midline without finding a
    /// non-background sample.
    SilhouetteNotFound {
        /// The cardinal direction whose scan was exhausted.
        direction: ScanDirection,
    },
    /// The averaged silhouette margin leaves no positive pixel radius.
    DegenerateSilhouette {
        /// Mean margin in pixels.
        margin: f32,
        /// Half the image width in pixels.
        half_width: f32,
    },
    /// A scale factor was derived or supplied that is not a positive,
    /// finite number.
    NonPositiveScale(f32),
    /// The calibration reference radius is not a positive, finite number.
    NonPositiveReference(f32),
    /// The baseline buffer contains no foreground pixels to compare.
    NoForeground,
    /// Picking or recapture was requested before any baseline capture.
    BaselineNotCaptured,
    /// Picking was requested before calibration produced a scale factor.
    ScaleNotCalibrated,
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimensions => {
                write!(f, "depth buffer dimensions must be non-zero")
            }
            Self::SampleCountMismatch { expected, actual } => write!(
                f,
                "expected {expected} depth samples, got {actual}"
            ),
            Self::DimensionMismatch { baseline, current } => write!(
                f,
                "baseline buffer is {}x{} but current buffer is {}x{}",
                baseline.0, baseline.1, current.0, current.1
            ),
            Self::SilhouetteNotFound { direction } => write!(
                f,
                "no silhouette edge found scanning from the {direction} edge"
            ),
            Self::DegenerateSilhouette { margin, half_width } => write!(
                f,
                "mean margin {margin} leaves no silhouette inside half-width \
                 {half_width}"
            ),
            Self::NonPositiveScale(v) => {
                write!(f, "scale factor must be positive and finite, got {v}")
            }
            Self::NonPositiveReference(v) => write!(
                f,
                "reference radius must be positive and finite, got {v}"
            ),
            Self::NoForeground => {
                write!(f, "baseline buffer contains no foreground pixels")
            }
            Self::BaselineNotCaptured => {
                write!(f, "no baseline depth buffer has been captured")
            }
            Self::ScaleNotCalibrated => {
                write!(f, "no scale factor has been calibrated")
            }
        }
    }
}

impl std::error::Error for MeasureError {}
