//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, offscreen render targets,
//! and depth-texture readback into CPU memory.

/// Depth-texture staging copy and blocking readback.
pub mod readback;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Offscreen color and depth render-target textures.
pub mod texture;

pub use readback::DepthReadback;
pub use render_context::{RenderContext, RenderContextError};
pub use texture::{ColorTarget, DepthTarget};
