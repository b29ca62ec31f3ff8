use std::num::NonZeroU32;

use anyhow::{anyhow, Context, Result};
use glow::HasContext;
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use super::{debug, GlInit};

/// A window with a current OpenGL context and its on-screen surface.
///
/// Field order is drop order: the surface and context go before the window
/// they were created from.
pub struct GlContext {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl GlContext {
    /// Creates the window and a core profile context, makes it current and
    /// loads the GL entry points.
    pub fn create(
        event_loop: &ActiveEventLoop,
        attributes: WindowAttributes,
        init: &GlInit,
    ) -> Result<(Self, glow::Context)> {
        let template = ConfigTemplateBuilder::new().with_depth_size(init.depth_bits);
        let (window, config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, pick_config)
            .map_err(|e| anyhow!("failed to create GL display: {e}"))?;
        let window = window.context("GL display did not create a window")?;

        let raw_handle = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();
        let display = config.display();

        let (major, minor) = init.version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_debug(init.debug_output)
            .build(Some(raw_handle));

        let not_current = unsafe { display.create_context(&config, &context_attributes) }
            .with_context(|| format!("failed to create an OpenGL {major}.{minor} core context"))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .context("failed to describe the window surface")?;
        let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
            .context("failed to create the window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make the GL context current")?;

        let interval = if init.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("could not set swap interval: {e}");
        }

        let mut gl = unsafe { glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name)) };

        let version = gl.version();
        log::info!(
            "OpenGL {}.{} ({})",
            version.major,
            version.minor,
            version.vendor_info
        );

        if init.debug_output && !debug::install(&mut gl) {
            log::info!("GL debug output unavailable on this context");
        }

        unsafe {
            gl.enable(glow::DEPTH_TEST);
        }

        Ok((
            Self {
                surface,
                context,
                window,
            },
            gl,
        ))
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }

    /// Resizes the drawable. Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&self, size: PhysicalSize<u32>) {
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };
        self.surface.resize(&self.context, width, height);
    }
}

/// Prefers the config with the most MSAA samples.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, c| if c.num_samples() > best.num_samples() { c } else { best })
        .expect("glutin only calls the picker with at least one config")
}
