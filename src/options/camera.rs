use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which projection the camera starts in.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Orthographic projection (required for calibrated measurement).
    #[default]
    Orthographic,
    /// Perspective projection for visual inspection.
    Perspective,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection parameters.
pub struct CameraOptions {
    /// Initial projection mode.
    #[schemars(title = "Projection")]
    pub projection: ProjectionMode,
    /// Half-extent of the orthographic view volume in world units.
    #[schemars(title = "Ortho Extent", range(min = 1.0, max = 100.0), extend("step" = 0.5))]
    pub ortho_extent: f32,
    /// Vertical field of view in degrees (perspective mode).
    #[schemars(title = "Field of View", range(min = 20.0, max = 150.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance (perspective mode).
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance (perspective mode).
    #[schemars(skip)]
    pub zfar: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            projection: ProjectionMode::Orthographic,
            ortho_extent: 13.5,
            fovy: 120.0,
            znear: 0.001,
            zfar: 100.0,
        }
    }
}
