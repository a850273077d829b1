//! Forward rendering for the measurement scene.
//!
//! One mesh pass draws the visible parametric models into caller-chosen
//! color and depth targets; the geometry module generates the torus and
//! bezier-triangle meshes it draws.

pub mod geometry;
pub mod mesh_pass;

pub use mesh_pass::MeshPass;
