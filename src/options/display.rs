use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Session window and draw-mode settings.
pub struct DisplayOptions {
    /// Window and depth-buffer width in pixels. Fixed for the session;
    /// capture and measurement dimensions must match.
    #[schemars(title = "Width", range(min = 64, max = 4096))]
    pub width: u32,
    /// Window and depth-buffer height in pixels.
    #[schemars(title = "Height", range(min = 64, max = 4096))]
    pub height: u32,
    /// Start with wireframe drawing enabled.
    #[schemars(title = "Wireframe")]
    pub wireframe: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            wireframe: false,
        }
    }
}
