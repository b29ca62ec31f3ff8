//! Lumen engine crate.
//!
//! A small OpenGL renderer: GPU resource wrappers behind handles, a fly
//! camera, a Phong-lit scene graph and the winit/glutin runtime that drives
//! them.

pub mod camera;
pub mod config;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;

pub use glam;
