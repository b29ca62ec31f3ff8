//! OpenGL resources and draw dispatch.
//!
//! The wrappers (`VertexBuffer`, `VertexArray`, `ShaderProgram`, `Texture`)
//! each own one GL object and issue calls through a `GlBackend`. `Renderer`
//! pools them behind handles and binds the right combination per draw.

mod backend;
mod buffer;
mod error;
mod handle;
mod layout;
mod renderer;
mod shader;
mod texture;
mod vertex_array;

#[cfg(test)]
pub(crate) mod mock;

pub use backend::{BufferTarget, GlBackend, RawId, UniformLocation, UniformValue};
pub use buffer::{IndexBuffer, VertexBuffer};
pub use error::{RenderError, Result};
pub use handle::{ProgramHandle, TextureHandle, VaoHandle};
pub use layout::{ElementType, VertexAttribute, VertexLayout};
pub use renderer::{Renderer, CLEAR_COLOR, DEFAULT_PROGRAMS};
pub use shader::{ShaderProgram, ShaderStage};
pub use texture::Texture;
pub use vertex_array::VertexArray;
