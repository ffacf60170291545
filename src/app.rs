use std::sync::Arc;

use anyhow::Context;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::AppConfig;
use crate::error::RenderError;
use crate::gfx::{
    rendering::{RenderEngine, Renderer},
    scene::{Scene, Shape, ShapeId},
};
use crate::input::{InputTranslator, UserInput};

/// Called once per frame before drawing, with the input accumulated so far
pub type FrameCallback = Box<dyn FnMut(&mut Scene, &UserInput)>;

/// Window, render loop and scene in one place
pub struct ShapesApp {
    config: AppConfig,
    scene: Scene,
    frame_callback: Option<FrameCallback>,
}

struct AppState {
    config: AppConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
    input: UserInput,
    translator: InputTranslator,
    frame_callback: Option<FrameCallback>,
    error: Option<anyhow::Error>,
}

impl ShapesApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            scene: Scene::new(),
            frame_callback: None,
        }
    }

    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        self.scene.add_shape(shape)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Sets the per-frame update, typically shape animation
    pub fn on_frame<F>(&mut self, callback: F)
    where
        F: FnMut(&mut Scene, &UserInput) + 'static,
    {
        self.frame_callback = Some(Box::new(callback));
    }

    /// Opens the window and runs until quit; startup and render failures are returned
    pub fn run(self) -> anyhow::Result<()> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = AppState {
            config: self.config,
            window: None,
            render_engine: None,
            scene: self.scene,
            input: UserInput::new(),
            translator: InputTranslator::new(),
            frame_callback: self.frame_callback,
            error: None,
        };

        event_loop
            .run_app(&mut state)
            .context("event loop terminated abnormally")?;

        match state.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{:#}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("failed to create window")?,
        );
        let (width, height) = window.inner_size().into();

        let mut renderer = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            self.config.clone(),
        ))
        .context("failed to initialise renderer")?;

        self.scene
            .load_textures(&mut renderer)
            .context("failed to load textures")?;

        info!("{} shapes ready", self.scene.len());
        self.window = Some(window);
        self.render_engine = Some(renderer);
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), RenderError> {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return Ok(());
        };

        if let Some(callback) = self.frame_callback.as_mut() {
            callback(&mut self.scene, &self.input);
        }
        render_engine.set_player(self.input.player);

        self.scene.draw(render_engine)?;
        render_engine.end_frame()
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.start(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let Some(input_event) = self.translator.window_event(&event) {
            self.input.apply(&input_event);
            if self.input.quit {
                event_loop.exit();
                return;
            }
        }

        match event {
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::RedrawRequested => match self.redraw() {
                Ok(()) => {}
                Err(RenderError::Surface(wgpu::SurfaceError::Timeout)) => {
                    warn!("surface timed out, skipping frame");
                }
                Err(err) => self.fail(event_loop, err.into()),
            },
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let Some(input_event) = self.translator.device_event(&event) {
            self.input.apply(&input_event);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
