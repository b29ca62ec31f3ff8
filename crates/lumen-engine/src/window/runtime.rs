use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{DeviceEvent, DeviceId, ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::core::{self, App, AppControl, FrameCtx, SetupCtx, WindowCtx};
use crate::device::{GlContext, GlInit};
use crate::input::{InputEvent, InputFrame, InputState, Key, KeyState, Modifiers, PointerMoveEvent};
use crate::render::Renderer;
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub size: LogicalSize<f64>,
    pub resizable: bool,
    /// Hide and capture the cursor once the window exists.
    pub grab_cursor: bool,
    /// Leave the loop when Escape is pressed.
    pub exit_on_escape: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "lumen".to_string(),
            size: LogicalSize::new(1360.0, 768.0),
            resizable: false,
            grab_cursor: true,
            exit_on_escape: true,
        }
    }
}

/// Requests an app makes of the runtime during a frame.
///
/// Commands are applied after the current callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    /// While grabbed, pointer moves come from raw mouse motion and are not
    /// bounded by the window.
    pub fn grab_cursor(&mut self, grab: bool) {
        self.commands.push(Command::GrabCursor(grab));
    }
}

#[derive(Debug)]
enum Command {
    Exit,
    GrabCursor(bool),
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, runs `app.setup`, then drives frames until exit.
    ///
    /// Returns the setup error, if any, after the loop has shut down.
    pub fn run<A>(config: RuntimeConfig, gl_init: GlInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gl_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Everything tied to the one window. Declared so the renderer drops before
/// the context it was created on.
struct WindowEntry {
    renderer: Renderer,
    gl: GlContext,
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,
    cursor: VirtualCursor,
}

/// Unbounded pointer position accumulated from raw mouse motion.
///
/// A confined cursor stops at the window edge and a locked one never moves,
/// so while grabbed the runtime reports this position instead of `CursorMoved`.
#[derive(Debug, Default, Clone, Copy)]
struct VirtualCursor {
    x: f64,
    y: f64,
}

impl VirtualCursor {
    fn moved(&mut self, dx: f64, dy: f64) -> PointerMoveEvent {
        self.x += dx;
        self.y += dy;
        PointerMoveEvent {
            x: self.x as f32,
            y: self.y as f32,
        }
    }
}

struct AppState<A: App> {
    config: RuntimeConfig,
    gl_init: GlInit,
    app: A,

    entry: Option<WindowEntry>,
    cursor_grabbed: bool,
    exit_requested: bool,
    failure: Option<anyhow::Error>,
}

impl<A: App> AppState<A> {
    fn new(config: RuntimeConfig, gl_init: GlInit, app: A) -> Self {
        Self {
            config,
            gl_init,
            app,
            entry: None,
            cursor_grabbed: false,
            exit_requested: false,
            failure: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.size)
            .with_resizable(self.config.resizable);

        let (gl, glow) = GlContext::create(event_loop, attributes, &self.gl_init)?;
        let mut renderer = Renderer::new(glow);

        if self.config.grab_cursor {
            core::grab_cursor(gl.window(), true);
            self.cursor_grabbed = true;
        }

        let mut setup = SetupCtx {
            window: WindowCtx {
                id: gl.window().id(),
                window: gl.window(),
            },
            renderer: &mut renderer,
        };
        self.app.setup(&mut setup).context("application setup failed")?;

        self.entry = Some(WindowEntry {
            renderer,
            gl,
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            cursor: VirtualCursor::default(),
        });
        Ok(())
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, ctx: RuntimeCtx) {
        for command in ctx.commands {
            match command {
                Command::Exit => self.request_exit(event_loop),
                Command::GrabCursor(grab) => {
                    if let Some(entry) = &self.entry {
                        core::grab_cursor(entry.gl.window(), grab);
                        self.cursor_grabbed = grab;
                    }
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let mut runtime_ctx = RuntimeCtx::default();
        let time = entry.clock.tick();

        let control = {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id: window_id,
                    window: entry.gl.window(),
                },
                renderer: &mut entry.renderer,
                input: &entry.input_state,
                input_frame: &entry.input_frame,
                time,
                runtime: &mut runtime_ctx,
            };
            self.app.on_frame(&mut ctx)
        };

        if let Err(e) = entry.gl.swap_buffers() {
            log::error!("{e:#}");
        }
        entry.input_frame.clear();

        if control == AppControl::Exit {
            runtime_ctx.exit();
        }
        self.apply_commands(event_loop, runtime_ctx);
    }
}

impl<A: App> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_entry(event_loop) {
            log::error!("{e:#}");
            self.failure = Some(e);
            self.request_exit(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Continuous redraw; frame pacing comes from vsync.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(entry) = &self.entry {
            entry.gl.window().request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            return;
        }
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let grabbed = self.cursor_grabbed;
        if let Some(ev) = translate_input_event(entry.gl.window(), &entry.input_state, grabbed, &event) {
            let escape = matches!(
                ev,
                InputEvent::Key {
                    key: Key::Escape,
                    state: KeyState::Pressed,
                    ..
                }
            );
            entry.input_state.apply_event(&mut entry.input_frame, ev);

            if escape && self.config.exit_on_escape {
                self.request_exit(event_loop);
                return;
            }
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.request_exit(event_loop),

            WindowEvent::Resized(size) => {
                if let Some(entry) = &self.entry {
                    entry.gl.resize(size);
                    entry.renderer.set_viewport(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop, window_id),

            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if self.exit_requested || !self.cursor_grabbed {
            return;
        }
        let DeviceEvent::MouseMotion { delta: (dx, dy) } = event else {
            return;
        };
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        let moved = entry.cursor.moved(dx, dy);
        entry
            .input_state
            .apply_event(&mut entry.input_frame, InputEvent::PointerMoved(moved));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(entry) = self.entry.take() {
            entry.renderer.destroy();
        }
    }
}

fn translate_input_event(
    window: &Window,
    state: &InputState,
    grabbed: bool,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::ModifiersChanged(m) => Some(InputEvent::ModifiersChanged(map_modifiers(m.state()))),

        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        // Raw motion drives the pointer while grabbed.
        WindowEvent::CursorMoved { .. } if grabbed => None,

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(window, *position);
            Some(InputEvent::PointerMoved(PointerMoveEvent { x, y }))
        }

        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: map_key(event.physical_key),
            state: match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            },
            modifiers: state.modifiers,
            repeat: event.repeat,
        }),

        _ => None,
    }
}

fn to_logical_f32(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    (logical.x as f32, logical.y as f32)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = pk else {
        return Key::Unknown(0);
    };

    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Space => Key::Space,
        KeyCode::Tab => Key::Tab,

        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,

        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        other => Key::Unknown(other as u32),
    }
}
