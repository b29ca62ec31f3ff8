use glam::{Mat4, Vec3};

use crate::render::{ProgramHandle, TextureHandle, VaoHandle};

/// One drawable instance: a handle triple plus its model transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    renderable: bool,
    vao: VaoHandle,
    texture: TextureHandle,
    program: ProgramHandle,
    position: Vec3,
    model: Mat4,
}

impl Node {
    /// Node whose model matrix is the translation to `position`.
    pub fn new(
        name: impl Into<String>,
        renderable: bool,
        vao: VaoHandle,
        texture: TextureHandle,
        program: ProgramHandle,
        position: Vec3,
    ) -> Self {
        Self {
            name: name.into(),
            renderable,
            vao,
            texture,
            program,
            position,
            model: Mat4::from_translation(position),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_renderable(&self) -> bool {
        self.renderable
    }

    pub fn set_renderable(&mut self, renderable: bool) {
        self.renderable = renderable;
    }

    #[inline]
    pub fn vao(&self) -> VaoHandle {
        self.vao
    }

    #[inline]
    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    #[inline]
    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    /// World position the node was placed at.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn model_matrix(&self) -> Mat4 {
        self.model
    }

    /// Replaces the model transform as-is.
    pub fn set_model_matrix(&mut self, model: Mat4) {
        self.model = model;
    }
}
