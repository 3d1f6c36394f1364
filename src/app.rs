use std::sync::Arc;

use anyhow::Result;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

use crate::config::ViewerConfig;
use crate::controller::ViewerController;
use crate::core::{Button, Clock, Controller, FpsCounter, WinitController};
use crate::loaders::{AssetLoader, LoadOutcome};
use crate::render::Viewport;
use crate::session::Session;
use crate::ui;

type ViewerSession = Session<AssetLoader<EventLoopProxy<LoadOutcome>>>;

/// Window application: owns the session, the viewport and input state
pub struct App {
    config: ViewerConfig,
    session: ViewerSession,
    window: Option<Arc<Window>>,
    viewport: Option<Viewport>,
    input: WinitController,
    clock: Clock,
    fps: FpsCounter,
}

impl App {
    pub fn new(config: ViewerConfig, proxy: EventLoopProxy<LoadOutcome>) -> Result<Self> {
        let catalog = config.catalog()?;
        info!(
            "Catalog: {}",
            catalog.names().collect::<Vec<_>>().join(", ")
        );

        let session = Session::new(
            ViewerController::new(catalog),
            &config.camera,
            AssetLoader::new(proxy),
        );

        Ok(Self {
            config,
            session,
            window: None,
            viewport: None,
            input: WinitController::new(),
            clock: Clock::new(),
            fps: FpsCounter::default(),
        })
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(self.config.window.title.as_str())
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        self.config.window.width,
                        self.config.window.height,
                    )),
            )?,
        );

        let viewport = pollster::block_on(Viewport::new(window.clone(), &self.config.scene))?;

        self.window = Some(window);
        self.viewport = Some(viewport);
        self.session.start();
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let delta = self.clock.tick();
        self.fps.frame(delta);

        for action in self.input.take_actions() {
            self.session.apply(action);
        }
        let (dx, dy) = self.input.take_drag();
        if dx != 0.0 || dy != 0.0 {
            self.session.camera_mut().orbit(dx, dy);
        }
        let scroll = self.input.take_scroll();
        if scroll != 0.0 {
            self.session.camera_mut().zoom(scroll);
        }

        let (Some(window), Some(viewport)) = (&self.window, &mut self.viewport) else {
            return;
        };
        viewport.sync_generation(self.session.state().generation);

        let fps = self.config.window.show_fps.then(|| self.fps.fps());
        let view = self.session.view(fps);
        let show_controls = self.config.window.show_ui;
        let camera = *self.session.camera();

        let mut ui_actions = Vec::new();
        let result = viewport.render(window, &camera, |ctx| {
            ui_actions = ui::show(ctx, &view, show_controls);
        });

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => viewport.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => warn!("Render error: {}", e),
        }

        for action in ui_actions {
            self.session.apply(action);
        }
    }
}

impl ApplicationHandler<LoadOutcome> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            error!("Failed to initialize viewer: {:#}", e);
            event_loop.exit();
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, outcome: LoadOutcome) {
        let generation = outcome.request.generation;
        if let Some(mesh) = self.session.on_load_outcome(outcome) {
            if let Some(viewport) = &mut self.viewport {
                let placement = self.session.controller().active_entry().placement;
                viewport.sync_generation(generation);
                viewport.install_model(generation, &mesh, &placement);
            }
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        // Let egui handle the event first
        if let (Some(viewport), Some(window)) = (&mut self.viewport, &self.window) {
            if viewport.handle_event(window, &event) {
                return;
            }
        }

        self.input.process_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { .. } if self.input.is_down(Button::Escape) => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(viewport) = &mut self.viewport {
                    viewport.resize(size.width, size.height);
                }
            }
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

/// Build the event loop and run the viewer until the window closes
pub fn run(config: ViewerConfig) -> Result<()> {
    let event_loop = EventLoop::<LoadOutcome>::with_user_event().build()?;
    let mut app = App::new(config, event_loop.create_proxy())?;

    info!("Controls: ←/→ or A/D browse, 1-9 select, drag to orbit, wheel to zoom, R retry, C reset camera, Esc quit");
    event_loop.run_app(&mut app)?;
    Ok(())
}
