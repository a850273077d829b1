//! The measurement engine: owns the GPU context, scene, camera, and all
//! measurement state (baseline depth buffer, scale factor, last pick).
//!
//! Rendering and depth capture are separate primitives composed here: the
//! display path draws to the swapchain and presents, while the capture
//! path draws to an offscreen target and reads the depth attachment back.
//! Nothing in the capture path touches the swapchain.
//!
//! All operations are synchronous and run on the thread that owns the GPU
//! context; captures replace the baseline wholesale, never mutate it.

use glam::Vec3;

use crate::camera::{Camera, CameraUniform, Projection};
use crate::error::CaliperError;
use crate::gpu::{ColorTarget, DepthReadback, DepthTarget, RenderContext};
use crate::measure::{
    self, DepthBuffer, MeasureError, PickedPoint, ScaleFactor,
    SilhouetteMargins,
};
use crate::options::{Options, ProjectionMode};
use crate::renderer::MeshPass;
use crate::scene::{Scene, Specimen};

/// Orthographic view-volume bounds: left, right, bottom, top.
type OrthoBounds = (f32, f32, f32, f32);

/// The core engine: GPU context, scene, camera, and measurement state.
pub struct CaliperEngine {
    context: RenderContext,
    options: Options,
    scene: Scene,
    camera: Camera,
    camera_uniform: CameraUniform,
    mesh_pass: MeshPass,
    display_depth: DepthTarget,
    capture_color: ColorTarget,
    capture_depth: DepthTarget,
    readback: DepthReadback,

    projection_mode: ProjectionMode,
    ortho_bounds: OrthoBounds,
    light_position: Vec3,

    baseline: Option<DepthBuffer>,
    scale: Option<ScaleFactor>,
    last_nearest: Option<usize>,
}

impl CaliperEngine {
    /// Create the engine for the given window surface and size.
    ///
    /// # Errors
    ///
    /// [`CaliperError::Gpu`] if GPU context initialization fails (a
    /// zero-sized surface is rejected here, at construction).
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        options: Options,
    ) -> Result<Self, CaliperError> {
        let context = RenderContext::new(window, initial_size).await?;
        let (width, height) = context.dimensions();

        let scene = Scene::new();
        let light_position = Vec3::from_array(options.lighting.position);
        let mut mesh_pass = MeshPass::new(
            &context,
            &scene,
            options.lighting.position,
            options.lighting.ambient,
        );
        if options.display.wireframe {
            let _ = mesh_pass.toggle_wireframe();
        }

        let e = options.camera.ortho_extent;
        let ortho_bounds = (-e, e, -e, e);
        let camera = Camera {
            eye: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: width as f32 / height as f32,
            projection: Projection::Orthographic {
                left: -e,
                right: e,
                bottom: -e,
                top: e,
            },
        };

        Ok(Self {
            display_depth: DepthTarget::new(&context.device, width, height),
            capture_color: ColorTarget::new(
                &context.device,
                width,
                height,
                context.format(),
            ),
            capture_depth: DepthTarget::new(&context.device, width, height),
            readback: DepthReadback::new(&context.device, width, height),
            projection_mode: options.camera.projection,
            ortho_bounds,
            light_position,
            camera,
            camera_uniform: CameraUniform::new(),
            mesh_pass,
            scene,
            options,
            context,
            baseline: None,
            scale: None,
            last_nearest: None,
        })
    }

    // -- Frame state --

    /// Rebuild the camera projection from the current mode and bounds and
    /// refresh the uniform.
    fn update_camera(&mut self) {
        let (width, height) = self.context.dimensions();
        self.camera.aspect = width as f32 / height as f32;
        self.camera.projection = match self.projection_mode {
            ProjectionMode::Orthographic => {
                let (left, right, bottom, top) = self.ortho_bounds;
                Projection::Orthographic { left, right, bottom, top }
            }
            ProjectionMode::Perspective => Projection::Perspective {
                fovy: self.options.camera.fovy,
                znear: self.options.camera.znear,
                zfar: self.options.camera.zfar,
            },
        };
        self.camera_uniform.update_view_proj(&self.camera);
    }

    /// Write camera, light, and model uniforms for the coming pass.
    fn prepare_pass(&mut self) {
        self.update_camera();
        self.mesh_pass.prepare(
            &self.context.queue,
            &self.camera_uniform,
            self.light_position.to_array(),
            self.options.lighting.ambient,
            &self.scene,
        );
    }

    // -- Display path --

    /// Render one visible frame to the window surface and present it.
    ///
    /// # Errors
    ///
    /// [`wgpu::SurfaceError`] if the swapchain texture cannot be acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.prepare_pass();
        let mut encoder = self.context.create_encoder();
        self.mesh_pass.encode(
            &mut encoder,
            &view,
            &self.display_depth.view,
            &self.scene,
        );
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    // -- Capture path --

    /// Render the scene once offscreen and read the depth buffer back.
    ///
    /// When GPU readback is disabled in the options, the render is skipped
    /// entirely and the buffer is filled with `placeholder` (a device-range
    /// value), keeping captures deterministic for headless use.
    ///
    /// # Errors
    ///
    /// [`CaliperError::Readback`] if buffer mapping fails,
    /// [`CaliperError::Measure`] on dimension bookkeeping errors.
    pub fn capture_depth(
        &mut self,
        placeholder: f32,
    ) -> Result<DepthBuffer, CaliperError> {
        let (width, height) = self.context.dimensions();
        if !self.options.capture.readback {
            log::debug!("readback disabled, filling capture with {placeholder}");
            return DepthBuffer::filled(width, height, placeholder)
                .map_err(CaliperError::from);
        }

        self.prepare_pass();
        let mut encoder = self.context.create_encoder();
        self.mesh_pass.encode(
            &mut encoder,
            &self.capture_color.view,
            &self.capture_depth.view,
            &self.scene,
        );
        self.readback.encode_copy(&mut encoder, &self.capture_depth);
        self.context.submit(encoder);

        let samples = self.readback.read(&self.context.device)?;
        DepthBuffer::from_device_samples(width, height, samples)
            .map_err(CaliperError::from)
    }

    // -- Measurement operations --

    /// Capture a baseline depth buffer and calibrate the scale factor from
    /// the silhouette of the visible specimen.
    ///
    /// With readback disabled the boundary scan is skipped and a fixed
    /// margin is assumed on all four sides.
    ///
    /// # Errors
    ///
    /// Capture errors, plus [`MeasureError::SilhouetteNotFound`] or
    /// [`MeasureError::DegenerateSilhouette`] from the scan.
    pub fn calibrate(&mut self) -> Result<ScaleFactor, CaliperError> {
        let buffer =
            self.capture_depth(self.options.capture.baseline_placeholder)?;
        let reference = self.options.measure.reference_radius;
        let scale = if self.options.capture.readback {
            measure::calibrate(&buffer, reference)?
        } else {
            measure::derive_scale(
                SilhouetteMargins::uniform(
                    self.options.capture.fallback_margin,
                ),
                buffer.width(),
                reference,
            )?
        };
        self.baseline = Some(buffer);
        self.scale = Some(scale);
        Ok(scale)
    }

    /// Re-capture the baseline depth buffer without recalibrating.
    ///
    /// # Errors
    ///
    /// Any capture error.
    pub fn recapture_baseline(&mut self) -> Result<(), CaliperError> {
        let buffer =
            self.capture_depth(self.options.capture.baseline_placeholder)?;
        self.baseline = Some(buffer);
        Ok(())
    }

    /// Capture a probe frame and find the pixel that moved closest to the
    /// camera relative to the baseline, in physical coordinates.
    ///
    /// # Errors
    ///
    /// [`MeasureError::BaselineNotCaptured`] /
    /// [`MeasureError::ScaleNotCalibrated`] if called out of sequence,
    /// plus any capture or comparison error.
    pub fn pick_nearest(&mut self) -> Result<PickedPoint, CaliperError> {
        if self.baseline.is_none() {
            return Err(MeasureError::BaselineNotCaptured.into());
        }
        let scale =
            self.scale.ok_or(MeasureError::ScaleNotCalibrated)?;

        let probe =
            self.capture_depth(self.options.capture.probe_placeholder)?;
        let baseline = self
            .baseline
            .as_ref()
            .ok_or(MeasureError::BaselineNotCaptured)?;
        let point = measure::pick_nearest(baseline, &probe, scale)?;
        self.last_nearest = Some(point.index);
        Ok(point)
    }

    /// Override the scale factor directly from a tolerance value:
    /// `scale = width / tolerance`.
    ///
    /// # Errors
    ///
    /// [`MeasureError::NonPositiveScale`] if the resulting scale is not
    /// positive and finite.
    pub fn set_scale_from_tolerance(
        &mut self,
        tolerance: f32,
    ) -> Result<ScaleFactor, CaliperError> {
        let (width, _) = self.context.dimensions();
        let scale = ScaleFactor::new(width as f32 / tolerance)?;
        self.scale = Some(scale);
        Ok(scale)
    }

    // -- Scene and view controls --

    /// Swap the visible specimen (torus <-> bezier patch).
    pub fn swap_specimen(&mut self) -> Specimen {
        self.scene.swap_specimen()
    }

    /// Toggle between orthographic and perspective projection.
    pub fn toggle_projection(&mut self) -> ProjectionMode {
        self.projection_mode = match self.projection_mode {
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
        };
        self.projection_mode
    }

    /// Toggle wireframe drawing. Returns the effective state.
    pub fn toggle_wireframe(&mut self) -> bool {
        self.mesh_pass.toggle_wireframe()
    }

    /// Replace the orthographic view-volume bounds.
    pub fn set_ortho_bounds(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
    ) {
        self.ortho_bounds = (left, right, bottom, top);
    }

    /// Move the point light to the camera eye position.
    pub fn snap_light_to_camera(&mut self) {
        self.light_position = self.camera.eye;
    }

    /// Translate the visible model by `delta`.
    pub fn translate_active(&mut self, delta: Vec3) {
        self.scene.active_model_mut().translate(delta);
    }

    /// Rotate the visible model by `delta_deg` Euler degrees.
    pub fn rotate_active(&mut self, delta_deg: Vec3) {
        self.scene.active_model_mut().rotate(delta_deg);
    }

    /// Grow or shrink the visible model's scale by `delta` per axis.
    pub fn scale_active(&mut self, delta: f32) {
        self.scene.active_model_mut().scale_up(delta);
    }

    /// Resize the surface. Invalidates the baseline, scale factor, and
    /// last pick, since buffers captured at the old dimensions can no
    /// longer be compared.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        let device = &self.context.device;
        self.display_depth = DepthTarget::new(device, width, height);
        self.capture_color =
            ColorTarget::new(device, width, height, self.context.format());
        self.capture_depth = DepthTarget::new(device, width, height);
        self.readback = DepthReadback::new(device, width, height);

        if self.baseline.is_some() || self.scale.is_some() {
            log::debug!(
                "resize to {width}x{height} invalidates measurement state"
            );
        }
        self.baseline = None;
        self.scale = None;
        self.last_nearest = None;
    }

    // -- Accessors --

    /// Current session options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the session options and re-apply the derived view state.
    pub fn set_options(&mut self, options: Options) {
        self.projection_mode = options.camera.projection;
        let e = options.camera.ortho_extent;
        self.ortho_bounds = (-e, e, -e, e);
        self.light_position = Vec3::from_array(options.lighting.position);
        self.options = options;
    }

    /// Session `(width, height)` in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.context.dimensions()
    }

    /// The calibrated scale factor, if calibration has run.
    #[must_use]
    pub fn scale_factor(&self) -> Option<ScaleFactor> {
        self.scale
    }

    /// The stored baseline depth buffer, if one has been captured.
    #[must_use]
    pub fn baseline(&self) -> Option<&DepthBuffer> {
        self.baseline.as_ref()
    }

    /// Flat index of the most recently identified nearest pixel.
    #[must_use]
    pub fn last_nearest(&self) -> Option<usize> {
        self.last_nearest
    }

    /// Current projection mode.
    #[must_use]
    pub fn projection_mode(&self) -> ProjectionMode {
        self.projection_mode
    }
}
