use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Point-light parameters for the forward shader.
pub struct LightingOptions {
    /// Light position in world space.
    #[schemars(skip)]
    pub position: [f32; 3],
    /// Ambient intensity floor.
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub ambient: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 1.0],
            ambient: 0.4,
        }
    }
}
