//! Depth-buffer measurement: silhouette calibration and nearest-pixel
//! picking.
//!
//! Everything in this module is pure CPU code operating on a captured
//! [`DepthBuffer`]; the GPU capture path lives in [`crate::gpu`] and the
//! sequencing (baseline → calibrate → pick) in [`crate::engine`].

mod buffer;
mod calibrate;
mod error;
mod pick;

pub use buffer::{remap_device, DepthBuffer, DEPTH_SPAN};
pub use calibrate::{
    calibrate, derive_scale, scan_margins, ScaleFactor, ScanDirection,
    SilhouetteMargins,
};
pub use error::MeasureError;
pub use pick::{pick_nearest, PickedPoint};
