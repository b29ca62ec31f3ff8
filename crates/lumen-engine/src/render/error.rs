use std::path::PathBuf;

use thiserror::Error;

use super::shader::ShaderStage;

/// Errors surfaced by the renderer and its GPU resource wrappers.
///
/// Resource-creation variants (`Io`, `Decode`, `ShaderCompile`, `ShaderLink`,
/// `Backend`) are fatal to the operation that produced them. Lookup variants
/// (`ProgramNotFound`, `UniformNotFound`, `InvalidHandle`) report a miss and
/// leave renderer state untouched.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to compile {stage} shader: {log}\n{code}")]
    ShaderCompile {
        stage: ShaderStage,
        /// Driver diagnostic text.
        log: String,
        /// The source that was submitted.
        code: String,
    },

    #[error("failed to link program: {log}")]
    ShaderLink { log: String },

    #[error("uniform variable location not found: {name}")]
    UniformNotFound { name: String },

    #[error("could not find a program by that name: {name:?}")]
    ProgramNotFound { name: String },

    #[error("vertex data of {byte_len} bytes is not a whole number of {vertex_size}-byte vertices")]
    VertexLayoutMismatch { byte_len: usize, vertex_size: usize },

    #[error("{kind} handle #{index} was not issued by this renderer")]
    InvalidHandle { kind: &'static str, index: u32 },

    #[error("GL object creation failed: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
