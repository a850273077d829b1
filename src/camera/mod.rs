//! Camera for the fixed measurement viewpoint.
//!
//! The measurement rig keeps the camera at a fixed eye looking down -Z;
//! only the projection changes (orthographic for calibrated measurement,
//! perspective for visual inspection).

/// Core camera struct, projection modes, and GPU uniform types.
pub mod core;

pub use core::{Camera, CameraUniform, Projection};
