//! Platform layer: windowing & event loop driving the renderer.
//!
//! - Window and GPU context are created on the first `resumed`.
//! - Redraws are requested continuously (the model is animated).
//! - `W` toggles solid/wireframe, `Escape` or closing the window exits.

pub mod fps;

use std::{sync::Arc, time::Instant};

use anyhow::{Context, Result, anyhow};
use asset::MeshData;
use renderer::{RenderConfig, RenderContext};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::fps::FrameCounter;

/// Window options.
#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Show the frame rate in the window title.
    pub show_fps: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Teapot".to_owned(),
            width: 800,
            height: 800,
            show_fps: false,
        }
    }
}

/// Open a window and render `mesh` until the window is closed.
pub fn run(mesh: MeshData, window: WindowConfig, render: RenderConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(mesh, window, render);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("Event loop error: {e:?}"))?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct ViewerApp {
    mesh: MeshData,
    window_config: WindowConfig,
    render_config: RenderConfig,

    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,

    start: Instant,
    fps: FrameCounter,
    /// Fatal error that stopped the loop, returned from [`run`].
    error: Option<anyhow::Error>,
}

impl ViewerApp {
    fn new(mesh: MeshData, window_config: WindowConfig, render_config: RenderConfig) -> Self {
        let now = Instant::now();
        Self {
            mesh,
            window_config,
            render_config,
            window: None,
            gpu: None,
            start: now,
            fps: FrameCounter::new(now),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(self.window_config.title.clone())
            .with_inner_size(PhysicalSize::new(
                self.window_config.width.max(1),
                self.window_config.height.max(1),
            ));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("Failed to create window")?,
        );
        log::info!(
            "Window created: {}x{}",
            window.inner_size().width,
            window.inner_size().height
        );

        let gpu = pollster::block_on(RenderContext::new(
            window.clone(),
            &self.mesh,
            &self.render_config,
        ))
        .context("Failed to initialize renderer")?;
        log::info!("Renderer ready, mode={}", gpu.mode());

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
        self.start = Instant::now();
        self.fps = FrameCounter::new(self.start);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let t = self.start.elapsed().as_secs_f32();
        match gpu.render(t) {
            Ok(()) => {}
            Err(err) if RenderContext::is_surface_lost(&err) => {
                log::warn!("Surface {err:?}, reconfiguring");
                gpu.recreate_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow!("GPU out of memory"));
                return;
            }
            Err(err) => {
                log::warn!("Frame skipped: {err:?}");
                return;
            }
        }

        if let Some(fps) = self.fps.tick(Instant::now()) {
            log::debug!("FPS: {fps}");
            if let (true, Some(window)) = (self.window_config.show_fps, &self.window) {
                window.set_title(&format!("{} - {fps} FPS", self.window_config.title));
            }
        }
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, key: Key) {
        match key.as_ref() {
            Key::Named(NamedKey::Escape) => {
                log::info!("Escape pressed. Exiting event loop.");
                event_loop.exit();
            }
            Key::Character("w") | Key::Character("W") => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.set_mode(gpu.mode().toggled());
                }
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() || event_loop.exiting() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                log::debug!("Resized: {}x{}", new_size.width, new_size.height);
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.on_key(event_loop, logical_key),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
