//! GPU backend seam.
//!
//! `GlBackend` is the narrow slice of OpenGL the renderer talks to. The
//! production implementation forwards to `glow::Context`; unit tests drive the
//! same wrappers through a recording backend.

use std::num::NonZeroU32;

use glam::{Mat4, Vec3};
use glow::HasContext;

use super::layout::{ElementType, VertexAttribute};
use super::shader::ShaderStage;

/// GL object name (buffer, vertex array, shader, program or texture).
pub type RawId = NonZeroU32;

/// Resolved uniform location inside a linked program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformLocation(pub u32);

/// Buffer binding point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

/// Typed uniform payload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    I32(i32),
    F32(f32),
    Vec3(Vec3),
    Mat4(Mat4),
}

/// The GL entry points used by the resource wrappers and the renderer.
///
/// Creation calls report driver failures as strings; everything else is fire
/// and forget, matching GL's own error model. All calls assume the context
/// is current on the calling thread.
pub trait GlBackend {
    fn create_shader(&self, stage: ShaderStage) -> Result<RawId, String>;
    /// Compiles `source` into `shader`. On failure returns the driver info log.
    fn compile_shader(&self, shader: RawId, source: &str) -> Result<(), String>;
    fn delete_shader(&self, shader: RawId);

    fn create_program(&self) -> Result<RawId, String>;
    fn attach_shader(&self, program: RawId, shader: RawId);
    fn detach_shader(&self, program: RawId, shader: RawId);
    /// Links `program`. On failure returns the driver info log.
    fn link_program(&self, program: RawId) -> Result<(), String>;
    fn use_program(&self, program: Option<RawId>);
    fn delete_program(&self, program: RawId);
    fn uniform_location(&self, program: RawId, name: &str) -> Option<UniformLocation>;
    fn uniform(&self, location: UniformLocation, value: UniformValue);

    fn create_buffer(&self) -> Result<RawId, String>;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<RawId>);
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&self, buffer: RawId);

    fn create_vertex_array(&self) -> Result<RawId, String>;
    fn bind_vertex_array(&self, vertex_array: Option<RawId>);
    /// Enables attribute `index` and declares its layout within a vertex.
    fn vertex_attribute(&self, index: u32, attribute: &VertexAttribute, stride: i32, offset: i32);
    fn delete_vertex_array(&self, vertex_array: RawId);

    fn create_texture(&self) -> Result<RawId, String>;
    fn active_texture(&self, unit: u32);
    fn bind_texture(&self, texture: Option<RawId>);
    /// Configures linear filtering + repeat wrapping on the bound 2D texture
    /// and uploads tightly packed RGBA8 pixels.
    fn upload_rgba8(&self, width: u32, height: u32, pixels: &[u8]);
    fn delete_texture(&self, texture: RawId);

    fn viewport(&self, width: i32, height: i32);
    fn clear(&self, color: [f32; 4]);
    fn draw_arrays(&self, first: i32, count: i32);
    fn draw_elements(&self, count: i32);
}

fn buffer_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Array => glow::ARRAY_BUFFER,
        BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn shader_kind(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

// Every method below issues raw GL calls. `glow::Context` is only constructed
// by `device::GlContext` after the context was made current on this thread.
impl GlBackend for glow::Context {
    fn create_shader(&self, stage: ShaderStage) -> Result<RawId, String> {
        unsafe { HasContext::create_shader(self, shader_kind(stage)).map(|s| s.0) }
    }

    fn compile_shader(&self, shader: RawId, source: &str) -> Result<(), String> {
        let shader = glow::NativeShader(shader);
        unsafe {
            self.shader_source(shader, source);
            HasContext::compile_shader(self, shader);
            if self.get_shader_compile_status(shader) {
                Ok(())
            } else {
                Err(self.get_shader_info_log(shader))
            }
        }
    }

    fn delete_shader(&self, shader: RawId) {
        unsafe { HasContext::delete_shader(self, glow::NativeShader(shader)) }
    }

    fn create_program(&self) -> Result<RawId, String> {
        unsafe { HasContext::create_program(self).map(|p| p.0) }
    }

    fn attach_shader(&self, program: RawId, shader: RawId) {
        unsafe {
            HasContext::attach_shader(self, glow::NativeProgram(program), glow::NativeShader(shader))
        }
    }

    fn detach_shader(&self, program: RawId, shader: RawId) {
        unsafe {
            HasContext::detach_shader(self, glow::NativeProgram(program), glow::NativeShader(shader))
        }
    }

    fn link_program(&self, program: RawId) -> Result<(), String> {
        let program = glow::NativeProgram(program);
        unsafe {
            HasContext::link_program(self, program);
            if self.get_program_link_status(program) {
                Ok(())
            } else {
                Err(self.get_program_info_log(program))
            }
        }
    }

    fn use_program(&self, program: Option<RawId>) {
        unsafe { HasContext::use_program(self, program.map(glow::NativeProgram)) }
    }

    fn delete_program(&self, program: RawId) {
        unsafe { HasContext::delete_program(self, glow::NativeProgram(program)) }
    }

    fn uniform_location(&self, program: RawId, name: &str) -> Option<UniformLocation> {
        unsafe {
            self.get_uniform_location(glow::NativeProgram(program), name)
                .map(|l| UniformLocation(l.0))
        }
    }

    fn uniform(&self, location: UniformLocation, value: UniformValue) {
        let loc = glow::NativeUniformLocation(location.0);
        unsafe {
            match value {
                UniformValue::I32(v) => self.uniform_1_i32(Some(&loc), v),
                UniformValue::F32(v) => self.uniform_1_f32(Some(&loc), v),
                UniformValue::Vec3(v) => self.uniform_3_f32(Some(&loc), v.x, v.y, v.z),
                UniformValue::Mat4(m) => {
                    self.uniform_matrix_4_f32_slice(Some(&loc), false, &m.to_cols_array())
                }
            }
        }
    }

    fn create_buffer(&self) -> Result<RawId, String> {
        unsafe { HasContext::create_buffer(self).map(|b| b.0) }
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<RawId>) {
        unsafe { HasContext::bind_buffer(self, buffer_target(target), buffer.map(glow::NativeBuffer)) }
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        unsafe { self.buffer_data_u8_slice(buffer_target(target), data, glow::STATIC_DRAW) }
    }

    fn delete_buffer(&self, buffer: RawId) {
        unsafe { HasContext::delete_buffer(self, glow::NativeBuffer(buffer)) }
    }

    fn create_vertex_array(&self) -> Result<RawId, String> {
        unsafe { HasContext::create_vertex_array(self).map(|v| v.0) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<RawId>) {
        unsafe { HasContext::bind_vertex_array(self, vertex_array.map(glow::NativeVertexArray)) }
    }

    fn vertex_attribute(&self, index: u32, attribute: &VertexAttribute, stride: i32, offset: i32) {
        let size = attribute.components as i32;
        unsafe {
            self.enable_vertex_attrib_array(index);
            match attribute.element_type {
                ElementType::Float => self.vertex_attrib_pointer_f32(
                    index,
                    size,
                    glow::FLOAT,
                    attribute.normalized,
                    stride,
                    offset,
                ),
                ElementType::Uint => {
                    self.vertex_attrib_pointer_i32(index, size, glow::UNSIGNED_INT, stride, offset)
                }
            }
        }
    }

    fn delete_vertex_array(&self, vertex_array: RawId) {
        unsafe { HasContext::delete_vertex_array(self, glow::NativeVertexArray(vertex_array)) }
    }

    fn create_texture(&self) -> Result<RawId, String> {
        unsafe { HasContext::create_texture(self).map(|t| t.0) }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { HasContext::active_texture(self, glow::TEXTURE0 + unit) }
    }

    fn bind_texture(&self, texture: Option<RawId>) {
        unsafe { HasContext::bind_texture(self, glow::TEXTURE_2D, texture.map(glow::NativeTexture)) }
    }

    fn upload_rgba8(&self, width: u32, height: u32, pixels: &[u8]) {
        unsafe {
            self.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            self.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            self.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            self.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            self.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels)),
            );
        }
    }

    fn delete_texture(&self, texture: RawId) {
        unsafe { HasContext::delete_texture(self, glow::NativeTexture(texture)) }
    }

    fn viewport(&self, width: i32, height: i32) {
        unsafe { HasContext::viewport(self, 0, 0, width, height) }
    }

    fn clear(&self, color: [f32; 4]) {
        let [r, g, b, a] = color;
        unsafe {
            self.clear_color(r, g, b, a);
            HasContext::clear(self, glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    fn draw_arrays(&self, first: i32, count: i32) {
        unsafe { HasContext::draw_arrays(self, glow::TRIANGLES, first, count) }
    }

    fn draw_elements(&self, count: i32) {
        unsafe { HasContext::draw_elements(self, glow::TRIANGLES, count, glow::UNSIGNED_INT, 0) }
    }
}
