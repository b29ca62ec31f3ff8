use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use glam::Mat4;

use crate::config::AssetConfig;
use crate::scene::Node;

use super::backend::{BufferTarget, GlBackend};
use super::buffer::VertexBuffer;
use super::error::{RenderError, Result};
use super::handle::{Pool, ProgramHandle, TextureHandle, VaoHandle};
use super::layout::VertexLayout;
use super::shader::ShaderProgram;
use super::texture::Texture;
use super::vertex_array::VertexArray;

/// Background color written by `Renderer::clear`.
pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

/// Programs loaded by `Renderer::load_default_programs`.
pub const DEFAULT_PROGRAMS: [&str; 3] = ["basic", "phong", "lamp"];

/// Sampler uniform every textured program exposes; bound to unit 0.
const SAMPLER_UNIFORM: &str = "aTexture";

/// Owns every GPU resource of a scene and issues the per-frame draws.
///
/// Resources live in append-only pools and are addressed by the handles the
/// `load_*` calls return. Handles stay valid until `destroy`.
#[derive(Debug)]
pub struct Renderer<B: GlBackend = glow::Context> {
    gl: B,
    vertex_arrays: Pool<VertexArray>,
    textures: Pool<Texture>,
    programs: Pool<ShaderProgram>,
    program_names: HashMap<String, ProgramHandle>,
    texture_paths: HashMap<PathBuf, TextureHandle>,
}

impl<B: GlBackend> Renderer<B> {
    pub fn new(gl: B) -> Self {
        Self {
            gl,
            vertex_arrays: Pool::default(),
            textures: Pool::default(),
            programs: Pool::default(),
            program_names: HashMap::new(),
            texture_paths: HashMap::new(),
        }
    }

    /// The GL backend this renderer issues calls through.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.gl
    }

    /// Compiles, links and registers a program under `name`.
    ///
    /// Registering an existing name replaces the mapping; the previous program
    /// stays in the pool and its handle remains usable.
    pub fn load_program(
        &mut self,
        name: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ProgramHandle> {
        let program = ShaderProgram::new(&self.gl, vertex_source, fragment_source)?;
        let handle = ProgramHandle::new(self.programs.push(program));

        if let Some(previous) = self.program_names.insert(name.to_owned(), handle) {
            log::debug!("program {name:?} re-registered ({previous} -> {handle})");
        } else {
            log::debug!("program {name:?} loaded as {handle}");
        }
        Ok(handle)
    }

    /// Reads both stage sources from disk, then behaves like `load_program`.
    pub fn load_program_files(
        &mut self,
        name: &str,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<ProgramHandle> {
        let vertex_source = read_source(vertex_path.as_ref())?;
        let fragment_source = read_source(fragment_path.as_ref())?;
        self.load_program(name, &vertex_source, &fragment_source)
    }

    /// Loads `basic`, `phong` and `lamp` from the configured shader directory.
    pub fn load_default_programs(&mut self, assets: &AssetConfig) -> Result<()> {
        for name in DEFAULT_PROGRAMS {
            let (vertex, fragment) = assets.shader_paths(name);
            self.load_program_files(name, vertex, fragment)?;
        }
        Ok(())
    }

    /// Looks up a program registered by name.
    pub fn program(&self, name: &str) -> Result<ProgramHandle> {
        self.program_names
            .get(name)
            .copied()
            .ok_or_else(|| RenderError::ProgramNotFound {
                name: name.to_owned(),
            })
    }

    pub fn shader_program(&self, handle: ProgramHandle) -> Result<&ShaderProgram> {
        self.programs
            .get(handle.index())
            .ok_or_else(|| invalid(ProgramHandle::KIND, handle.index()))
    }

    /// Mutable program access, for uniform uploads outside `draw_node`.
    pub fn program_mut(&mut self, handle: ProgramHandle) -> Result<&mut ShaderProgram> {
        self.programs
            .get_mut(handle.index())
            .ok_or_else(|| invalid(ProgramHandle::KIND, handle.index()))
    }

    /// Binds `handle` and uploads uniforms through `f`.
    pub fn with_program<R>(
        &mut self,
        handle: ProgramHandle,
        f: impl FnOnce(&B, &mut ShaderProgram) -> Result<R>,
    ) -> Result<R> {
        let program = self
            .programs
            .get_mut(handle.index())
            .ok_or_else(|| invalid(ProgramHandle::KIND, handle.index()))?;
        program.bind(&self.gl);
        f(&self.gl, program)
    }

    /// Decodes and uploads an image file. Always creates a new texture.
    ///
    /// `program` is bound for the duration of the upload; the returned handle
    /// can be drawn with any program.
    pub fn load_texture(
        &mut self,
        path: impl AsRef<Path>,
        program: ProgramHandle,
    ) -> Result<TextureHandle> {
        let path = path.as_ref();
        let shader = self
            .programs
            .get(program.index())
            .ok_or_else(|| invalid(ProgramHandle::KIND, program.index()))?;

        shader.bind(&self.gl);
        let loaded = Texture::load(&self.gl, path);
        shader.unbind(&self.gl);

        let handle = TextureHandle::new(self.textures.push(loaded?));
        log::debug!("{} loaded as {handle}", path.display());
        Ok(handle)
    }

    /// Like `load_texture`, but returns the existing handle when `path` was
    /// already loaded through this call.
    pub fn load_texture_shared(
        &mut self,
        path: impl AsRef<Path>,
        program: ProgramHandle,
    ) -> Result<TextureHandle> {
        let path = path.as_ref();
        if let Some(&handle) = self.texture_paths.get(path) {
            return Ok(handle);
        }

        let handle = self.load_texture(path, program)?;
        self.texture_paths.insert(path.to_path_buf(), handle);
        Ok(handle)
    }

    pub fn texture(&self, handle: TextureHandle) -> Result<&Texture> {
        self.textures
            .get(handle.index())
            .ok_or_else(|| invalid(TextureHandle::KIND, handle.index()))
    }

    /// Uploads interleaved float vertices described by `layout`.
    ///
    /// `data` must hold a whole number of vertices. Nothing is left bound.
    pub fn load_vertex_data(&mut self, data: &[f32], layout: &VertexLayout) -> Result<VaoHandle> {
        let vertex_array = self.build_vertex_array(data, layout, None)?;
        Ok(self.push_vertex_array(vertex_array))
    }

    /// Like `load_vertex_data`, plus an index buffer; draws become indexed.
    pub fn load_indexed_vertex_data(
        &mut self,
        data: &[f32],
        indices: &[u32],
        layout: &VertexLayout,
    ) -> Result<VaoHandle> {
        let vertex_array = self.build_vertex_array(data, layout, Some(indices))?;
        Ok(self.push_vertex_array(vertex_array))
    }

    pub fn vertex_array(&self, handle: VaoHandle) -> Result<&VertexArray> {
        self.vertex_arrays
            .get(handle.index())
            .ok_or_else(|| invalid(VaoHandle::KIND, handle.index()))
    }

    fn build_vertex_array(
        &self,
        data: &[f32],
        layout: &VertexLayout,
        indices: Option<&[u32]>,
    ) -> Result<VertexArray> {
        let gl = &self.gl;
        let mut vertex_array = VertexArray::new(gl)?;

        let attached = VertexBuffer::new(gl, data).and_then(|vb| vertex_array.add_buffer(gl, vb, layout));
        let attached = attached.and_then(|()| match indices {
            Some(indices) => vertex_array.set_index_buffer(gl, indices),
            None => Ok(()),
        });

        vertex_array.unbind(gl);
        gl.bind_buffer(BufferTarget::Array, None);

        match attached {
            Ok(()) => Ok(vertex_array),
            Err(err) => {
                vertex_array.delete(gl);
                Err(err)
            }
        }
    }

    fn push_vertex_array(&mut self, vertex_array: VertexArray) -> VaoHandle {
        let vertices = vertex_array.vertex_count();
        let handle = VaoHandle::new(self.vertex_arrays.push(vertex_array));
        log::debug!("{handle} loaded ({vertices} vertices)");
        handle
    }

    /// Maps clip space onto a `width` x `height` drawable.
    pub fn set_viewport(&self, width: u32, height: u32) {
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        self.gl.viewport(clamp(width), clamp(height));
    }

    /// Clears color and depth to `CLEAR_COLOR`.
    pub fn clear(&self) {
        self.gl.clear(CLEAR_COLOR);
    }

    /// Draws `node` with its own model matrix.
    pub fn draw_node(&mut self, node: &Node, view: Mat4, projection: Mat4) -> Result<()> {
        self.draw_raw(
            node.vao(),
            node.program(),
            node.texture(),
            view,
            projection,
            node.model_matrix(),
        )
    }

    /// Binds the program, the vertex array and the texture on unit 0, uploads
    /// the sampler and the three matrices, then draws.
    ///
    /// Handles are validated before any GL call is made. Binding state is left
    /// as-is afterwards.
    pub fn draw_raw(
        &mut self,
        vao: VaoHandle,
        program: ProgramHandle,
        texture: TextureHandle,
        view: Mat4,
        projection: Mat4,
        model: Mat4,
    ) -> Result<()> {
        let gl = &self.gl;
        let vertex_array = self
            .vertex_arrays
            .get(vao.index())
            .ok_or_else(|| invalid(VaoHandle::KIND, vao.index()))?;
        let texture = self
            .textures
            .get(texture.index())
            .ok_or_else(|| invalid(TextureHandle::KIND, texture.index()))?;
        let shader = self
            .programs
            .get_mut(program.index())
            .ok_or_else(|| invalid(ProgramHandle::KIND, program.index()))?;

        shader.bind(gl);
        vertex_array.bind(gl);
        texture.bind(gl, 0);
        shader.set_i32(gl, SAMPLER_UNIFORM, 0)?;
        shader.set_mat4(gl, "view", view)?;
        shader.set_mat4(gl, "projection", projection)?;
        shader.set_mat4(gl, "model", model)?;
        vertex_array.draw(gl);
        Ok(())
    }

    /// Deletes every pooled GL object and hands the backend back.
    pub fn destroy(mut self) -> B {
        log::debug!(
            "destroying renderer: {} vertex arrays, {} textures, {} programs",
            self.vertex_arrays.len(),
            self.textures.len(),
            self.programs.len()
        );
        let gl = &self.gl;
        for vertex_array in self.vertex_arrays.drain() {
            vertex_array.delete(gl);
        }
        for texture in self.textures.drain() {
            texture.delete(gl);
        }
        for program in self.programs.drain() {
            program.delete(gl);
        }
        self.gl
    }
}

fn invalid(kind: &'static str, index: u32) -> RenderError {
    RenderError::InvalidHandle { kind, index }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
