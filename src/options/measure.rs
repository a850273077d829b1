use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Measurement", inline)]
#[serde(default)]
/// Calibration parameters.
pub struct MeasureOptions {
    /// Known physical radius of the calibration reference object (the
    /// torus outer radius) in world units.
    #[schemars(title = "Reference Radius", range(min = 0.1, max = 100.0), extend("step" = 0.1))]
    pub reference_radius: f32,
}

impl Default for MeasureOptions {
    fn default() -> Self {
        Self { reference_radius: 6.7 }
    }
}
