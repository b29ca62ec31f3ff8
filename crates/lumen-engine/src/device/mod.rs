//! OpenGL context management.
//!
//! Creates the window together with its GL context (glutin), loads the entry
//! points into a `glow::Context` and hooks driver debug output into `log`.

mod context;
mod debug;
mod init;

pub use context::GlContext;
pub use init::GlInit;
