use winit::window::{CursorGrabMode, Window, WindowId};

use crate::input::{InputFrame, InputState};
use crate::render::Renderer;
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

/// Borrowed view of the runtime's window.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl WindowCtx<'_> {
    /// Logical window size as `(width, height)`.
    pub fn logical_size(&self) -> (f32, f32) {
        let logical: winit::dpi::LogicalSize<f64> =
            self.window.inner_size().to_logical(self.window.scale_factor());
        (logical.width as f32, logical.height as f32)
    }

    /// Width over height, for projection matrices.
    pub fn aspect_ratio(&self) -> f32 {
        let size = self.window.inner_size();
        size.width.max(1) as f32 / size.height.max(1) as f32
    }
}

/// Hides and captures the cursor for mouse look, or releases it.
pub(crate) fn grab_cursor(window: &Window, grab: bool) {
    let result = if grab {
        window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
    } else {
        window.set_cursor_grab(CursorGrabMode::None)
    };
    if let Err(e) = result {
        log::warn!("cursor grab not supported: {e}");
    }
    window.set_cursor_visible(!grab);
}

/// Context passed to `App::setup`.
pub struct SetupCtx<'a> {
    pub window: WindowCtx<'a>,
    pub renderer: &'a mut Renderer,
}

/// Per-frame context passed to `App::on_frame`.
pub struct FrameCtx<'a> {
    pub window: WindowCtx<'a>,
    pub renderer: &'a mut Renderer,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    pub runtime: &'a mut RuntimeCtx,
}
