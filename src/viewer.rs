//! Standalone measurement window backed by winit.
//!
//! ```no_run
//! # use caliper::Viewer;
//! Viewer::builder()
//!     .with_title("Caliper")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```
//!
//! Bindings: right mouse / `M` calibrate, `N` pick nearest, `R` recapture
//! baseline, `B` swap specimen, `Tab` wireframe, `CapsLock` projection,
//! left mouse / `L` snap light to camera, `W`/`S`/`Q`/`E` translate,
//! `A`/`D` rotate, `C`/`V` scale, `Esc` quit.

use std::sync::Arc;

use glam::Vec3;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{engine::CaliperEngine, error::CaliperError, options::Options};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with defaults (title "Caliper", default options).
    fn new() -> Self {
        Self {
            options: None,
            title: "Caliper".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the measurement scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// [`CaliperError::Viewer`] if the event loop fails.
    pub fn run(self) -> Result<(), CaliperError> {
        let event_loop = EventLoop::new()
            .map_err(|e| CaliperError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: self.options,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| CaliperError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<CaliperEngine>,
    options: Options,
    title: String,
}

impl ViewerApp {
    /// Run a calibration and report the result.
    fn calibrate(engine: &mut CaliperEngine) {
        match engine.calibrate() {
            Ok(scale) => log::info!(
                "scale factor: {:.4} px/unit",
                scale.pixels_per_unit()
            ),
            Err(e) => log::warn!("calibration failed: {e}"),
        }
    }

    /// Run a nearest-pixel pick and report the result.
    fn pick(engine: &mut CaliperEngine) {
        match engine.pick_nearest() {
            Ok(point) => log::info!(
                "nearest point: pixel {} at ({:.3}, {:.3}), delta {:.3}",
                point.index,
                point.x,
                point.y,
                point.depth_delta
            ),
            Err(e) => log::warn!("pick failed: {e}"),
        }
    }

    fn handle_key(
        engine: &mut CaliperEngine,
        event_loop: &ActiveEventLoop,
        code: KeyCode,
        repeat: bool,
    ) {
        // Toggles and one-shot operations ignore OS key repeat; the model
        // manipulation keys below accept it so holding a key keeps moving.
        let one_shot = matches!(
            code,
            KeyCode::Escape
                | KeyCode::KeyM
                | KeyCode::KeyN
                | KeyCode::KeyR
                | KeyCode::KeyB
                | KeyCode::Tab
                | KeyCode::CapsLock
                | KeyCode::KeyL
        );
        if repeat && one_shot {
            return;
        }
        match code {
            KeyCode::Escape => event_loop.exit(),

            // Measurement
            KeyCode::KeyM => Self::calibrate(engine),
            KeyCode::KeyN => Self::pick(engine),
            KeyCode::KeyR => {
                if let Err(e) = engine.recapture_baseline() {
                    log::warn!("baseline recapture failed: {e}");
                }
            }

            // View
            KeyCode::KeyB => {
                let specimen = engine.swap_specimen();
                log::debug!("visible specimen: {specimen:?}");
            }
            KeyCode::Tab => {
                let _ = engine.toggle_wireframe();
            }
            KeyCode::CapsLock => {
                let mode = engine.toggle_projection();
                log::debug!("projection: {mode:?}");
            }
            KeyCode::KeyL => engine.snap_light_to_camera(),

            // Model manipulation
            KeyCode::KeyW => {
                engine.translate_active(Vec3::new(0.0, 0.05, 0.0));
            }
            KeyCode::KeyS => {
                engine.translate_active(Vec3::new(0.0, -0.05, 0.0));
            }
            KeyCode::KeyQ => {
                engine.translate_active(Vec3::new(0.0, 0.0, 0.5));
            }
            KeyCode::KeyE => {
                engine.translate_active(Vec3::new(0.0, 0.0, -0.5));
            }
            KeyCode::KeyA => engine.rotate_active(Vec3::new(1.0, 0.0, 0.0)),
            KeyCode::KeyD => engine.rotate_active(Vec3::new(-1.0, 0.0, 0.0)),
            KeyCode::KeyC => engine.scale_active(0.1),
            KeyCode::KeyV => engine.scale_active(-0.1),

            _ => {}
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) =
            (self.options.display.width, self.options.display.height);
        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_resizable(false)
            .with_inner_size(winit::dpi::PhysicalSize::new(width, height));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let engine = match pollster::block_on(CaliperEngine::new(
            window.clone(),
            (inner.width.max(1), inner.height.max(1)),
            self.options.clone(),
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }
        let (Some(window), Some(engine)) =
            (self.window.as_ref(), self.engine.as_mut())
        else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                engine.resize(size.width, size.height);
            }

            WindowEvent::RedrawRequested => {
                match engine.render() {
                    Ok(()) => {}
                    Err(
                        wgpu::SurfaceError::Outdated
                        | wgpu::SurfaceError::Lost,
                    ) => {
                        let inner = window.inner_size();
                        engine.resize(inner.width, inner.height);
                    }
                    Err(e) => log::error!("render error: {e:?}"),
                }
                window.request_redraw();
            }

            WindowEvent::MouseInput { button, state, .. } => {
                if state != ElementState::Pressed {
                    return;
                }
                match button {
                    MouseButton::Right => Self::calibrate(engine),
                    MouseButton::Left => engine.snap_light_to_camera(),
                    _ => {}
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                Self::handle_key(engine, event_loop, code, event.repeat);
            }

            _ => (),
        }
    }
}
