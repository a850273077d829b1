use glam::{Mat4, Vec3};

use crate::measure::DEPTH_SPAN;

/// Projection mode for the measurement camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Orthographic projection with explicit view-volume bounds.
    ///
    /// The depth range is pinned to `[-DEPTH_SPAN, +DEPTH_SPAN]` so a
    /// remapped depth sample reads as signed distance in front of the
    /// camera, in world units. Calibration and picking are only meaningful
    /// in this mode.
    Orthographic {
        /// Left bound of the view volume.
        left: f32,
        /// Right bound of the view volume.
        right: f32,
        /// Bottom bound of the view volume.
        bottom: f32,
        /// Top bound of the view volume.
        top: f32,
    },
    /// Perspective projection for visual inspection.
    Perspective {
        /// Vertical field of view in degrees.
        fovy: f32,
        /// Near clipping plane distance.
        znear: f32,
        /// Far clipping plane distance.
        zfar: f32,
    },
}

/// Camera defined by eye position, target, and projection parameters.
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Active projection mode.
    pub projection: Projection,
}

impl Camera {
    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = match self.projection {
            Projection::Orthographic { left, right, bottom, top } => {
                // near = -DEPTH_SPAN places depth 0 at DEPTH_SPAN behind
                // the eye and depth 1 at DEPTH_SPAN in front, matching the
                // [0,1]-depth convention of wgpu.
                Mat4::orthographic_rh(
                    left,
                    right,
                    bottom,
                    top,
                    -DEPTH_SPAN,
                    DEPTH_SPAN,
                )
            }
            Projection::Perspective { fovy, znear, zfar } => {
                Mat4::perspective_rh(
                    fovy.to_radians(),
                    self.aspect,
                    znear,
                    zfar,
                )
            }
        };
        proj * view
    }

    /// Whether the active projection is orthographic.
    #[must_use]
    pub fn is_orthographic(&self) -> bool {
        matches!(self.projection, Projection::Orthographic { .. })
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and eye position.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            _pad: 0.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ortho_camera() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            projection: Projection::Orthographic {
                left: -13.5,
                right: 13.5,
                bottom: -13.5,
                top: 13.5,
            },
        }
    }

    #[test]
    fn ortho_depth_span_endpoints_map_to_device_zero_and_one() {
        let m = ortho_camera().build_matrix();
        // 100 units in front of the eye -> device depth 1 (the cleared
        // far plane, which remaps to the background sentinel).
        let far = m.project_point3(Vec3::new(0.0, 0.0, 1.0 - DEPTH_SPAN));
        assert!((far.z - 1.0).abs() < 1e-5);
        // 100 units behind the eye -> device depth 0.
        let near = m.project_point3(Vec3::new(0.0, 0.0, 1.0 + DEPTH_SPAN));
        assert!(near.z.abs() < 1e-5);
    }

    #[test]
    fn ortho_midpoint_maps_to_device_half() {
        let m = ortho_camera().build_matrix();
        // The eye plane sits exactly halfway through the depth span.
        let mid = m.project_point3(Vec3::new(0.0, 0.0, 1.0));
        assert!((mid.z - 0.5).abs() < 1e-5);
    }

    #[test]
    fn uniform_tracks_camera_state() {
        let camera = ortho_camera();
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);
        assert_eq!(uniform.position, [0.0, 0.0, 1.0]);
        assert_eq!(
            uniform.view_proj,
            camera.build_matrix().to_cols_array_2d()
        );
    }
}
