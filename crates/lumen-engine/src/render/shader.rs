use std::collections::HashMap;
use std::fmt;

use glam::{Mat4, Vec3};

use super::backend::{GlBackend, RawId, UniformLocation, UniformValue};
use super::error::{RenderError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A linked vertex + fragment program with a lazily filled uniform cache.
///
/// Uniform locations are stable once a program is linked, so cache entries
/// are never invalidated. Names the driver does not know are cached as absent
/// and keep failing with `UniformNotFound`.
#[derive(Debug)]
pub struct ShaderProgram {
    id: RawId,
    uniform_cache: HashMap<String, Option<UniformLocation>>,
}

impl ShaderProgram {
    /// Compiles both stages and links them.
    ///
    /// Compiled stage objects are released once linking has been attempted;
    /// a failed link also releases the program.
    pub fn new<B: GlBackend + ?Sized>(
        gl: &B,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self> {
        let vs = compile_stage(gl, ShaderStage::Vertex, vertex_source)?;
        let fs = match compile_stage(gl, ShaderStage::Fragment, fragment_source) {
            Ok(fs) => fs,
            Err(err) => {
                gl.delete_shader(vs);
                return Err(err);
            }
        };

        let id = match gl.create_program() {
            Ok(id) => id,
            Err(msg) => {
                gl.delete_shader(vs);
                gl.delete_shader(fs);
                return Err(RenderError::Backend(msg));
            }
        };

        gl.attach_shader(id, vs);
        gl.attach_shader(id, fs);
        let linked = gl.link_program(id);

        gl.detach_shader(id, vs);
        gl.detach_shader(id, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);

        if let Err(log) = linked {
            gl.delete_program(id);
            return Err(RenderError::ShaderLink { log });
        }

        Ok(Self {
            id,
            uniform_cache: HashMap::new(),
        })
    }

    #[inline]
    pub fn id(&self) -> RawId {
        self.id
    }

    pub fn bind<B: GlBackend + ?Sized>(&self, gl: &B) {
        gl.use_program(Some(self.id));
    }

    pub fn unbind<B: GlBackend + ?Sized>(&self, gl: &B) {
        gl.use_program(None);
    }

    /// Resolves `name`, asking the driver only on the first request.
    pub fn uniform_location<B: GlBackend + ?Sized>(
        &mut self,
        gl: &B,
        name: &str,
    ) -> Result<UniformLocation> {
        let location = match self.uniform_cache.get(name) {
            Some(cached) => *cached,
            None => {
                let location = gl.uniform_location(self.id, name);
                if location.is_none() {
                    log::warn!("program #{}: no active uniform named {name:?}", self.id);
                }
                self.uniform_cache.insert(name.to_owned(), location);
                location
            }
        };

        location.ok_or_else(|| RenderError::UniformNotFound {
            name: name.to_owned(),
        })
    }

    /// Uploads `value` to `name`. The program must be bound.
    pub fn set_uniform<B: GlBackend + ?Sized>(
        &mut self,
        gl: &B,
        name: &str,
        value: UniformValue,
    ) -> Result<()> {
        let location = self.uniform_location(gl, name)?;
        gl.uniform(location, value);
        Ok(())
    }

    pub fn set_i32<B: GlBackend + ?Sized>(&mut self, gl: &B, name: &str, v: i32) -> Result<()> {
        self.set_uniform(gl, name, UniformValue::I32(v))
    }

    pub fn set_f32<B: GlBackend + ?Sized>(&mut self, gl: &B, name: &str, v: f32) -> Result<()> {
        self.set_uniform(gl, name, UniformValue::F32(v))
    }

    pub fn set_vec3<B: GlBackend + ?Sized>(&mut self, gl: &B, name: &str, v: Vec3) -> Result<()> {
        self.set_uniform(gl, name, UniformValue::Vec3(v))
    }

    pub fn set_mat4<B: GlBackend + ?Sized>(&mut self, gl: &B, name: &str, m: Mat4) -> Result<()> {
        self.set_uniform(gl, name, UniformValue::Mat4(m))
    }

    pub fn delete<B: GlBackend + ?Sized>(self, gl: &B) {
        gl.delete_program(self.id);
    }
}

fn compile_stage<B: GlBackend + ?Sized>(gl: &B, stage: ShaderStage, source: &str) -> Result<RawId> {
    let shader = gl.create_shader(stage).map_err(RenderError::Backend)?;
    if let Err(log) = gl.compile_shader(shader, source) {
        gl.delete_shader(shader);
        return Err(RenderError::ShaderCompile {
            stage,
            log,
            code: source.to_owned(),
        });
    }
    Ok(shader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::mock::{Call, RecordingGl};

    const VS: &str = "#version 330 core\nvoid main() { gl_Position = vec4(0.0); }";
    const FS: &str = "#version 330 core\nout vec4 c;\nvoid main() { c = vec4(1.0); }";

    #[test]
    fn compile_failure_carries_log_and_source() {
        let gl = RecordingGl::failing_compile(ShaderStage::Fragment);

        let err = ShaderProgram::new(&gl, VS, FS).unwrap_err();
        match err {
            RenderError::ShaderCompile { stage, log, code } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(log.contains("syntax error"));
                assert_eq!(code, FS);
            }
            other => panic!("unexpected error: {other}"),
        }

        // Both the failed fragment stage and the compiled vertex stage are released.
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteShader(_))), 2);
        assert_eq!(gl.count(|c| matches!(c, Call::CreateProgram(_))), 0);
    }

    #[test]
    fn link_failure_releases_program() {
        let gl = RecordingGl::failing_link();

        let err = ShaderProgram::new(&gl, VS, FS).unwrap_err();
        assert!(matches!(err, RenderError::ShaderLink { ref log } if log.contains("link")));
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteProgram(_))), 1);
    }

    #[test]
    fn stages_are_deleted_after_link() {
        let gl = RecordingGl::default();
        let program = ShaderProgram::new(&gl, VS, FS).unwrap();

        let calls = gl.calls();
        let link = calls
            .iter()
            .position(|c| *c == Call::LinkProgram(program.id().get()))
            .unwrap();
        let deletes: Vec<usize> = calls
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, Call::DeleteShader(_)))
            .map(|(i, _)| i)
            .collect();

        assert_eq!(deletes.len(), 2);
        assert!(deletes.iter().all(|&i| i > link));
    }

    #[test]
    fn uniform_location_is_looked_up_once() {
        let gl = RecordingGl::with_uniforms(&["model"]);
        let mut program = ShaderProgram::new(&gl, VS, FS).unwrap();

        program.set_mat4(&gl, "model", Mat4::IDENTITY).unwrap();
        program.set_mat4(&gl, "model", Mat4::IDENTITY).unwrap();

        assert_eq!(gl.count(|c| matches!(c, Call::GetUniformLocation(n) if n == "model")), 1);
        assert_eq!(gl.count(|c| matches!(c, Call::Uniform(..))), 2);
    }

    #[test]
    fn missing_uniform_is_an_error_every_time() {
        let gl = RecordingGl::with_uniforms(&["model"]);
        let mut program = ShaderProgram::new(&gl, VS, FS).unwrap();

        for _ in 0..2 {
            let err = program.set_f32(&gl, "shininess", 32.0).unwrap_err();
            assert!(matches!(err, RenderError::UniformNotFound { ref name } if name == "shininess"));
        }

        assert_eq!(gl.count(|c| matches!(c, Call::GetUniformLocation(_))), 1);
        assert_eq!(gl.count(|c| matches!(c, Call::Uniform(..))), 0);
    }

    #[test]
    fn typed_setters_upload_their_value() {
        let gl = RecordingGl::with_uniforms(&["aTexture", "viewPos"]);
        let mut program = ShaderProgram::new(&gl, VS, FS).unwrap();

        program.set_i32(&gl, "aTexture", 0).unwrap();
        program.set_vec3(&gl, "viewPos", Vec3::new(1.0, 2.0, 3.0)).unwrap();

        let uploads: Vec<UniformValue> = gl
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Uniform(_, v) => Some(v),
                _ => None,
            })
            .collect();
        assert_eq!(
            uploads,
            vec![UniformValue::I32(0), UniformValue::Vec3(Vec3::new(1.0, 2.0, 3.0))]
        );
    }
}
