//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;
use crate::measure::MeasureError;

/// Errors produced by the caliper crate.
#[derive(Debug)]
pub enum CaliperError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Depth measurement invariant violation.
    Measure(MeasureError),
    /// Depth-buffer readback failure (buffer mapping failed).
    Readback(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for CaliperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Measure(e) => write!(f, "measurement error: {e}"),
            Self::Readback(msg) => write!(f, "depth readback error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for CaliperError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Measure(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for CaliperError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<MeasureError> for CaliperError {
    fn from(e: MeasureError) -> Self {
        Self::Measure(e)
    }
}

impl From<std::io::Error> for CaliperError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
