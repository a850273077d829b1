// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// GPU / graphics allowances: casts between pixel indices, dimensions, and
// physical coordinates are intentional throughout
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
// The background sentinel and remap endpoints are exact in f32
#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::use_self)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::redundant_pub_crate)]

//! GPU depth-readback measurement viewer built on wgpu.
//!
//! Caliper renders parametric specimens (a torus and a bezier-triangle
//! surface) with an orthographic measurement camera, reads the depth
//! buffer back from the GPU, and turns it into physical-unit
//! measurements: the silhouette boundary scan calibrates a
//! pixels-per-unit scale factor, and baseline comparison picks the
//! screen pixel nearest the camera.
//!
//! # Key entry points
//!
//! - [`engine::CaliperEngine`] - the rendering and measurement engine
//! - [`measure`] - the CPU-side calibration and picking algorithms
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Everything is single-threaded and frame-driven. A capture renders the
//! scene offscreen, copies the `Depth32Float` attachment to a staging
//! buffer, and remaps the samples into a linear `[-100, +100]` range
//! where the cleared far plane reads exactly `100.0` — the background
//! sentinel the boundary scans and pixel comparisons key on. The engine
//! retains only the last baseline buffer, the calibrated scale factor,
//! and the last nearest-pixel index.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod measure;
pub mod options;
pub mod renderer;
pub mod scene;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::CaliperEngine;
pub use error::CaliperError;
pub use measure::{DepthBuffer, PickedPoint, ScaleFactor};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
