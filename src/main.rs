use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::{Context, anyhow};
use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use raycaster::camera::{Action, Viewer};
use raycaster::config::Config;
use raycaster::controller::RenderController;
use raycaster::framebuffer::Framebuffer;
use raycaster::vectors::V2;
use raycaster::world::Scene;

struct App {
    config: Config,
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    controller: RenderController<Framebuffer>,
    // First fatal error raised inside the event loop
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config, scene: Scene) -> Self {
        let controller = RenderController::new(
            scene,
            Viewer::new(V2::ZERO, 0.0),
            config.steps(),
            config.fov,
            Framebuffer::new(0, 0),
        );
        Self {
            config,
            window: None,
            surface: None,
            controller,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error.get_or_insert(err);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let attributes = Window::default_attributes()
            .with_title("Raycaster")
            .with_inner_size(LogicalSize::new(
                self.config.width as f64,
                self.config.height as f64,
            ));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .context("create window")?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| anyhow!("softbuffer context: {e}"))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| anyhow!("softbuffer surface: {e}"))?;

        let size = window.inner_size();
        log::info!("window created at {}x{}", size.width, size.height);
        self.controller.resize(size.width, size.height);

        self.surface = Some(surface);
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&mut self) -> anyhow::Result<()> {
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };
        self.controller.frame();

        let fb = self.controller.surface();
        let (Some(w), Some(h)) = (
            NonZeroU32::new(fb.width() as u32),
            NonZeroU32::new(fb.height() as u32),
        ) else {
            return Ok(()); // Minimized window, skip drawing
        };

        surface
            .resize(w, h)
            .map_err(|e| anyhow!("resize surface: {e}"))?;
        let mut buf = surface
            .buffer_mut()
            .map_err(|e| anyhow!("buffer_mut: {e}"))?;
        buf.copy_from_slice(fb.pixels());
        buf.present().map_err(|e| anyhow!("present: {e}"))?;
        Ok(())
    }
}

fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::ArrowLeft => Some(Action::RotateLeft),
        KeyCode::ArrowRight => Some(Action::RotateRight),
        KeyCode::ArrowUp => Some(Action::MoveForward),
        KeyCode::ArrowDown => Some(Action::MoveBackward),
        _ => None,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };
        if window.id() != id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape {
                    event_loop.exit();
                } else if let Some(action) = action_for(code) {
                    // Repeats arrive as further presses, one step each.
                    self.controller.apply(action);
                    window.request_redraw();
                }
            }

            WindowEvent::Resized(new_size) => {
                self.controller.resize(new_size.width, new_size.height);
                window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                }
            }
            _ => (),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    log::debug!("{config:?}");
    let scene = Scene::demo().context("build scene")?;

    let event_loop = EventLoop::new().context("create event loop")?;
    // Redraw only in response to input or resize.
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config, scene);
    event_loop.run_app(&mut app).context("run event loop")?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
