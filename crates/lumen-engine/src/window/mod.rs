//! Window + runtime loop.
//!
//! Owns the `winit` event loop and the GL window, and drives `core::App`.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
