/// Parameters for creating the GL context.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// Requested core profile version as `(major, minor)`.
    pub version: (u8, u8),

    /// Wait for vblank on swap.
    pub vsync: bool,

    /// Ask for a debug context and route `KHR_debug` messages to `log`.
    ///
    /// Ignored when the driver does not expose debug output (GL < 4.3 without
    /// the extension, e.g. macOS).
    pub debug_output: bool,

    /// Depth buffer bits.
    pub depth_bits: u8,
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            version: (4, 1),
            vsync: true,
            debug_output: cfg!(debug_assertions),
            depth_bits: 24,
        }
    }
}
