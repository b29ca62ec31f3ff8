//! Recording backend for unit tests.
//!
//! Hands out sequential object ids and logs every call so tests can assert on
//! the exact GL traffic a wrapper produces.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::backend::{BufferTarget, GlBackend, RawId, UniformLocation, UniformValue};
use super::layout::{ElementType, VertexAttribute};
use super::shader::ShaderStage;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(ShaderStage, u32),
    CompileShader(u32),
    DeleteShader(u32),

    CreateProgram(u32),
    AttachShader { program: u32, shader: u32 },
    DetachShader { program: u32, shader: u32 },
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    GetUniformLocation(String),
    Uniform(UniformLocation, UniformValue),

    CreateBuffer(u32),
    BindBuffer(BufferTarget, Option<u32>),
    BufferData(BufferTarget, usize),
    DeleteBuffer(u32),

    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    VertexAttribute {
        index: u32,
        components: u32,
        element_type: ElementType,
        stride: i32,
        offset: i32,
    },
    DeleteVertexArray(u32),

    CreateTexture(u32),
    ActiveTexture(u32),
    BindTexture(Option<u32>),
    UploadRgba8 { width: u32, height: u32, len: usize },
    DeleteTexture(u32),

    Viewport(i32, i32),
    Clear([f32; 4]),
    DrawArrays { first: i32, count: i32 },
    DrawElements(i32),
}

#[derive(Debug, Default)]
pub struct RecordingGl {
    /// Stage whose compilation fails with a canned info log.
    pub fail_compile: Option<ShaderStage>,
    /// Makes every link fail.
    pub fail_link: bool,
    /// Resolves every uniform name, registering unknown ones on first lookup.
    pub permissive: bool,

    /// Active uniforms; a name's location is its index.
    uniforms: RefCell<Vec<String>>,

    next_id: Cell<u32>,
    stages: RefCell<HashMap<u32, ShaderStage>>,
    calls: RefCell<Vec<Call>>,
}

impl RecordingGl {
    pub fn with_uniforms(names: &[&str]) -> Self {
        Self {
            uniforms: RefCell::new(names.iter().map(|n| (*n).to_owned()).collect()),
            ..Self::default()
        }
    }

    /// Backend whose `stage` compilations fail.
    pub fn failing_compile(stage: ShaderStage) -> Self {
        Self {
            fail_compile: Some(stage),
            ..Self::default()
        }
    }

    /// Backend on which every link fails.
    pub fn failing_link() -> Self {
        Self {
            fail_link: true,
            ..Self::default()
        }
    }

    /// Backend on which every uniform exists.
    pub fn permissive() -> Self {
        Self {
            permissive: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    /// Location `name` resolves to, for asserting on `Call::Uniform`.
    pub fn location_of(&self, name: &str) -> Option<UniformLocation> {
        self.uniforms
            .borrow()
            .iter()
            .position(|n| n == name)
            .map(|i| UniformLocation(i as u32))
    }

    /// Values uploaded to `name`, in call order.
    pub fn uploads_to(&self, name: &str) -> Vec<UniformValue> {
        let Some(location) = self.location_of(name) else {
            return Vec::new();
        };
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Uniform(l, v) if *l == location => Some(*v),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn alloc(&self) -> RawId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        RawId::new(id).unwrap()
    }
}

impl GlBackend for RecordingGl {
    fn create_shader(&self, stage: ShaderStage) -> Result<RawId, String> {
        let id = self.alloc();
        self.stages.borrow_mut().insert(id.get(), stage);
        self.record(Call::CreateShader(stage, id.get()));
        Ok(id)
    }

    fn compile_shader(&self, shader: RawId, _source: &str) -> Result<(), String> {
        self.record(Call::CompileShader(shader.get()));
        let stage = self.stages.borrow().get(&shader.get()).copied();
        if stage.is_some() && stage == self.fail_compile {
            return Err("0:1(1): error: syntax error, unexpected end of file".to_owned());
        }
        Ok(())
    }

    fn delete_shader(&self, shader: RawId) {
        self.record(Call::DeleteShader(shader.get()));
    }

    fn create_program(&self) -> Result<RawId, String> {
        let id = self.alloc();
        self.record(Call::CreateProgram(id.get()));
        Ok(id)
    }

    fn attach_shader(&self, program: RawId, shader: RawId) {
        self.record(Call::AttachShader {
            program: program.get(),
            shader: shader.get(),
        });
    }

    fn detach_shader(&self, program: RawId, shader: RawId) {
        self.record(Call::DetachShader {
            program: program.get(),
            shader: shader.get(),
        });
    }

    fn link_program(&self, program: RawId) -> Result<(), String> {
        self.record(Call::LinkProgram(program.get()));
        if self.fail_link {
            return Err("error: link failed, no definition of main".to_owned());
        }
        Ok(())
    }

    fn use_program(&self, program: Option<RawId>) {
        self.record(Call::UseProgram(program.map(RawId::get)));
    }

    fn delete_program(&self, program: RawId) {
        self.record(Call::DeleteProgram(program.get()));
    }

    fn uniform_location(&self, _program: RawId, name: &str) -> Option<UniformLocation> {
        self.record(Call::GetUniformLocation(name.to_owned()));
        if let Some(location) = self.location_of(name) {
            return Some(location);
        }
        if !self.permissive {
            return None;
        }
        let mut uniforms = self.uniforms.borrow_mut();
        uniforms.push(name.to_owned());
        Some(UniformLocation(uniforms.len() as u32 - 1))
    }

    fn uniform(&self, location: UniformLocation, value: UniformValue) {
        self.record(Call::Uniform(location, value));
    }

    fn create_buffer(&self) -> Result<RawId, String> {
        let id = self.alloc();
        self.record(Call::CreateBuffer(id.get()));
        Ok(id)
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<RawId>) {
        self.record(Call::BindBuffer(target, buffer.map(RawId::get)));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        self.record(Call::BufferData(target, data.len()));
    }

    fn delete_buffer(&self, buffer: RawId) {
        self.record(Call::DeleteBuffer(buffer.get()));
    }

    fn create_vertex_array(&self) -> Result<RawId, String> {
        let id = self.alloc();
        self.record(Call::CreateVertexArray(id.get()));
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<RawId>) {
        self.record(Call::BindVertexArray(vertex_array.map(RawId::get)));
    }

    fn vertex_attribute(&self, index: u32, attribute: &VertexAttribute, stride: i32, offset: i32) {
        self.record(Call::VertexAttribute {
            index,
            components: attribute.components,
            element_type: attribute.element_type,
            stride,
            offset,
        });
    }

    fn delete_vertex_array(&self, vertex_array: RawId) {
        self.record(Call::DeleteVertexArray(vertex_array.get()));
    }

    fn create_texture(&self) -> Result<RawId, String> {
        let id = self.alloc();
        self.record(Call::CreateTexture(id.get()));
        Ok(id)
    }

    fn active_texture(&self, unit: u32) {
        self.record(Call::ActiveTexture(unit));
    }

    fn bind_texture(&self, texture: Option<RawId>) {
        self.record(Call::BindTexture(texture.map(RawId::get)));
    }

    fn upload_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        self.record(Call::UploadRgba8 {
            width,
            height,
            len: pixels.len(),
        });
    }

    fn delete_texture(&self, texture: RawId) {
        self.record(Call::DeleteTexture(texture.get()));
    }

    fn viewport(&self, width: i32, height: i32) {
        self.record(Call::Viewport(width, height));
    }

    fn clear(&self, color: [f32; 4]) {
        self.record(Call::Clear(color));
    }

    fn draw_arrays(&self, first: i32, count: i32) {
        self.record(Call::DrawArrays { first, count });
    }

    fn draw_elements(&self, count: i32) {
        self.record(Call::DrawElements(count));
    }
}
