mod clock;
mod debug_ui;

use anyhow::{Context, Result};
use clap::Parser;
use clock::{FrameClock, FrameTime};
use debug_ui::EguiDebugUi;
use prism_input::{FrameInput, InputState, Key, MouseButton};
use prism_render::GraphicsContext;
use prism_render_wgpu::{EguiFrame, WgpuContext};
use prism_scene::{FrameControl, Scene};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "prism-desktop", about = "Prism demo scene with a debug panel")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Wait for vertical blank instead of presenting immediately
    #[arg(long)]
    vsync: bool,
}

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyC => Key::C,
        KeyCode::Escape => Key::Escape,
        _ => return None,
    })
}

fn map_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Run one egui pass around the scene update. The scene advances exactly
/// once per frame, even when a widget requests a discarded pass.
fn run_ui_pass(
    ctx: &egui::Context,
    raw_input: egui::RawInput,
    scene: &mut Scene,
    time: &FrameTime,
    input: &mut FrameInput,
) -> (FrameControl, egui::FullOutput) {
    ctx.begin_pass(raw_input);
    let mut ui = EguiDebugUi::new(ctx);
    let control = scene.update(time.dt, time.total, input, &mut ui);
    (control, ctx.end_pass())
}

/// Everything that exists only once the window is up.
struct Running {
    window: Arc<Window>,
    gfx: WgpuContext,
    scene: Scene,
    egui_winit: egui_winit::State,
}

struct PrismApp {
    cli: Cli,
    running: Option<Running>,
    egui_ctx: egui::Context,
    input: InputState,
    clock: FrameClock,
    focused: bool,
    failure: Option<anyhow::Error>,
}

impl PrismApp {
    fn new(cli: Cli) -> Self {
        Self {
            cli,
            running: None,
            egui_ctx: egui::Context::default(),
            input: InputState::new(),
            clock: FrameClock::new(),
            focused: true,
            failure: None,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running> {
        let attrs = Window::default_attributes()
            .with_title("Prism Demo")
            .with_inner_size(PhysicalSize::new(self.cli.width, self.cli.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        let mut gfx = WgpuContext::new(window.clone(), size.width, size.height, self.cli.vsync)
            .context("failed to initialize graphics")?;
        if !self.cli.vsync && !gfx.supports_tearing() {
            tracing::info!("immediate presentation unavailable, vsync applies");
        }

        let scene = Scene::init(&mut gfx, size.width.max(1), size.height.max(1))
            .context("failed to build scene")?;

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        Ok(Running {
            window,
            gfx,
            scene,
            egui_winit,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        tracing::error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }

    /// Run one update/draw cycle.
    fn frame(&mut self) -> Result<FrameControl> {
        let Some(running) = &mut self.running else {
            return Ok(FrameControl::Continue);
        };

        let time = self.clock.tick();
        let mut frame_input = self.input.snapshot();

        let raw_input = running.egui_winit.take_egui_input(&running.window);
        let (control, full_output) = run_ui_pass(
            &self.egui_ctx,
            raw_input,
            &mut running.scene,
            &time,
            &mut frame_input,
        );
        running
            .egui_winit
            .handle_platform_output(&running.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let overlay = EguiFrame::new(
            paint_jobs,
            full_output.textures_delta,
            full_output.pixels_per_point,
        );

        running
            .scene
            .draw(&mut running.gfx, overlay)
            .with_context(|| format!("frame {} failed", time.frame_index))?;
        Ok(control)
    }

    fn resize(&mut self, size: PhysicalSize<u32>) -> Result<()> {
        // Minimized windows report a zero extent; keep the old buffers.
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }
        if let Some(running) = &mut self.running {
            running
                .scene
                .on_resize(&mut running.gfx, size.width, size.height)
                .context("failed to resize back buffers")?;
        }
        Ok(())
    }
}

impl ApplicationHandler for PrismApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => {
                self.running = Some(running);
                self.clock.reset();
                tracing::info!("window ready");
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let consumed = match &mut self.running {
            Some(running) => {
                running
                    .egui_winit
                    .on_window_event(&running.window, &event)
                    .consumed
            }
            None => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Err(err) = self.resize(size) {
                    self.fail(event_loop, err);
                }
            }
            WindowEvent::Focused(focused) => {
                self.focused = focused;
                if focused {
                    self.clock.reset();
                } else {
                    self.input.clear();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                // Releases always go through so nothing stays held.
                if consumed && pressed {
                    return;
                }
                if let Some(key) = map_key(code) {
                    self.input.handle_key(key, pressed);
                }
            }
            WindowEvent::MouseInput { button, state, .. } => {
                let pressed = state == ElementState::Pressed;
                if consumed && pressed {
                    return;
                }
                if let Some(button) = map_button(button) {
                    self.input.handle_mouse_button(button, pressed);
                }
            }
            WindowEvent::RedrawRequested => match self.frame() {
                Ok(FrameControl::Continue) => {
                    if let Some(running) = &self.running {
                        running.window.request_redraw();
                    }
                }
                Ok(FrameControl::Exit) => event_loop.exit(),
                Err(err) => self.fail(event_loop, err),
            },
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.focused {
                let (dx, dy) = (delta.0 as f32, delta.1 as f32);
                self.input.handle_mouse_motion(dx, dy);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = &self.running {
            running.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(level),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        width = cli.width,
        height = cli.height,
        vsync = cli.vsync,
        "prism-desktop starting"
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = PrismApp::new(cli);
    event_loop.run_app(&mut app)?;

    match app.failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
