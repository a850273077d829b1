//! Authoritative scene: the measurement specimens and their transforms.
//!
//! The scene holds exactly two models — the torus and the bezier-triangle
//! surface — with one visible at a time. Capture and display passes
//! iterate visible models in insertion order, which is stable within a
//! capture.

use glam::{Mat4, Vec3};

use crate::renderer::geometry::{
    generate_torus, BezierTrianglePatch, Vertex,
};

/// Which specimen is currently visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specimen {
    /// The torus (the calibration reference object).
    Torus,
    /// The bezier-triangle surface patch.
    Bezier,
}

/// A renderable model: mesh vertices plus a transform.
pub struct Model {
    /// Triangle-list vertices in object space.
    pub vertices: Vec<Vertex>,
    /// World-space translation.
    pub translation: Vec3,
    /// Euler rotation in degrees, applied X then Y then Z.
    pub rotation_deg: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Whether the display and capture passes draw this model.
    pub visible: bool,
}

impl Model {
    /// Create a model at `translation` with identity rotation and scale.
    #[must_use]
    pub fn new(vertices: Vec<Vertex>, translation: Vec3) -> Self {
        Self {
            vertices,
            translation,
            rotation_deg: Vec3::ZERO,
            scale: Vec3::ONE,
            visible: true,
        }
    }

    /// Object-to-world matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation_deg;
        Mat4::from_translation(self.translation)
            * Mat4::from_rotation_z(r.z.to_radians())
            * Mat4::from_rotation_y(r.y.to_radians())
            * Mat4::from_rotation_x(r.x.to_radians())
            * Mat4::from_scale(self.scale)
    }

    /// Translate by `delta`.
    pub fn translate(&mut self, delta: Vec3) {
        self.translation += delta;
    }

    /// Add `delta_deg` to the Euler rotation.
    pub fn rotate(&mut self, delta_deg: Vec3) {
        self.rotation_deg += delta_deg;
    }

    /// Add `delta` to every scale axis.
    pub fn scale_up(&mut self, delta: f32) {
        self.scale += Vec3::splat(delta);
    }
}

/// The measurement scene: torus and bezier patch, one visible at a time.
pub struct Scene {
    models: [Model; 2],
    visible: Specimen,
}

/// Default torus position (40 units in front of the camera).
const TORUS_POSITION: Vec3 = Vec3::new(0.0, 0.0, -40.0);
/// Default bezier patch position.
const BEZIER_POSITION: Vec3 = Vec3::new(-5.0, -5.0, -80.0);

/// Tessellation subdivisions per patch edge.
const BEZIER_SUBDIVISIONS: u32 = 24;

impl Scene {
    /// Build the two specimens, with the torus initially visible.
    #[must_use]
    pub fn new() -> Self {
        let torus = Model::new(generate_torus(), TORUS_POSITION);
        let mut bezier = Model::new(
            BezierTrianglePatch::default().tessellate(BEZIER_SUBDIVISIONS),
            BEZIER_POSITION,
        );
        bezier.visible = false;
        Self {
            models: [torus, bezier],
            visible: Specimen::Torus,
        }
    }

    /// All models in insertion order (torus, then bezier).
    #[must_use]
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// The currently visible specimen.
    #[must_use]
    pub fn visible_specimen(&self) -> Specimen {
        self.visible
    }

    /// Mutable access to the visible model (the manipulation target).
    pub fn active_model_mut(&mut self) -> &mut Model {
        match self.visible {
            Specimen::Torus => &mut self.models[0],
            Specimen::Bezier => &mut self.models[1],
        }
    }

    /// Swap which specimen is visible. Returns the newly visible one.
    pub fn swap_specimen(&mut self) -> Specimen {
        self.visible = match self.visible {
            Specimen::Torus => Specimen::Bezier,
            Specimen::Bezier => Specimen::Torus,
        };
        self.models[0].visible = self.visible == Specimen::Torus;
        self.models[1].visible = self.visible == Specimen::Bezier;
        self.visible
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn torus_is_initially_visible() {
        let scene = Scene::new();
        assert_eq!(scene.visible_specimen(), Specimen::Torus);
        assert!(scene.models()[0].visible);
        assert!(!scene.models()[1].visible);
    }

    #[test]
    fn swap_toggles_visibility() {
        let mut scene = Scene::new();
        assert_eq!(scene.swap_specimen(), Specimen::Bezier);
        assert!(!scene.models()[0].visible);
        assert!(scene.models()[1].visible);
        assert_eq!(scene.swap_specimen(), Specimen::Torus);
        assert!(scene.models()[0].visible);
    }

    #[test]
    fn manipulation_targets_the_visible_model() {
        let mut scene = Scene::new();
        let _ = scene.swap_specimen();
        scene.active_model_mut().translate(Vec3::new(0.0, 0.05, 0.0));
        // The torus is untouched; the bezier patch moved.
        assert_eq!(scene.models()[0].translation, TORUS_POSITION);
        assert!(
            (scene.models()[1].translation.y - (BEZIER_POSITION.y + 0.05))
                .abs()
                < 1e-6
        );
    }

    #[test]
    fn transform_composes_translation_and_scale() {
        let mut model = Model::new(Vec::new(), Vec3::new(1.0, 2.0, 3.0));
        model.scale_up(1.0);
        let m = model.matrix();
        let p = m.transform_point3(Vec3::ONE);
        assert!((p - Vec3::new(3.0, 4.0, 5.0)).length() < 1e-5);
    }
}
