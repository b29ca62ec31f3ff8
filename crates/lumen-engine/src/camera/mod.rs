//! First-person camera.
//!
//! The camera is plain state plus math; it never touches the renderer. Apps
//! own it and pass it to the scene when drawing.

mod fly;
mod mouse_look;

pub use fly::{Camera, CameraMovement, PITCH_LIMIT};
pub use mouse_look::MouseLook;
