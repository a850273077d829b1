use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Capture", inline)]
#[serde(default)]
/// Depth-capture behavior.
pub struct CaptureOptions {
    /// Whether to read depth back from the GPU. When disabled, captures
    /// are filled with fixed placeholder values and calibration falls back
    /// to a fixed margin, which keeps measurement deterministic without a
    /// rendering backend.
    #[schemars(title = "GPU Readback")]
    pub readback: bool,
    /// Device-range placeholder for baseline captures when readback is
    /// disabled (remaps to depth 0).
    #[schemars(skip)]
    pub baseline_placeholder: f32,
    /// Device-range placeholder for pick probe captures when readback is
    /// disabled (remaps to depth 60).
    #[schemars(skip)]
    pub probe_placeholder: f32,
    /// Margin in pixels assumed on all four sides when readback is
    /// disabled.
    #[schemars(skip)]
    pub fallback_margin: u32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            readback: true,
            baseline_placeholder: 0.5,
            probe_placeholder: 0.8,
            fallback_margin: 24,
        }
    }
}
