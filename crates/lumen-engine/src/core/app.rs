use anyhow::Result;
use winit::event::WindowEvent;

use super::ctx::{FrameCtx, SetupCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by `window::Runtime`.
pub trait App {
    /// Called once the GL context is current, before the first frame.
    /// Load programs, meshes and textures here. An error stops the runtime.
    fn setup(&mut self, ctx: &mut SetupCtx<'_>) -> Result<()>;

    /// Called for every window event, after input state was updated.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per frame. The runtime swaps buffers afterwards.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
