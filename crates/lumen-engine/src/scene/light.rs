//! Phong lighting parameters and their uniform layout.
//!
//! Uniform names follow the `phong` program: `material.*`, `dirLight.*`,
//! `pointLights[i].*` and `spotLight.*`.

use glam::Vec3;

use crate::camera::Camera;
use crate::render::{GlBackend, Result, ShaderProgram};

/// Surface response shared by every lit node.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec3::new(1.0, 0.5, 0.31),
            diffuse: Vec3::new(1.0, 0.5, 0.31),
            specular: Vec3::splat(0.5),
            shininess: 32.0,
        }
    }
}

/// Sun-like light with no position or falloff.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.2, -1.0, -0.3),
            ambient: Vec3::splat(0.05),
            diffuse: Vec3::splat(0.4),
            specular: Vec3::splat(0.5),
        }
    }
}

/// Distance attenuation `1 / (constant + linear*d + quadratic*d^2)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for Attenuation {
    /// Roughly a 50 unit range.
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub attenuation: Attenuation,
}

impl PointLight {
    /// White lamp at `position` with default attenuation.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ambient: Vec3::splat(0.05),
            diffuse: Vec3::splat(0.8),
            specular: Vec3::ONE,
            attenuation: Attenuation::default(),
        }
    }
}

/// Flashlight attached to the camera. Position and direction are taken from
/// the camera on every upload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpotLight {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub attenuation: Attenuation,
    /// Inner cone half-angle in degrees.
    pub cut_off: f32,
    /// Outer cone half-angle in degrees; intensity fades to zero here.
    pub outer_cut_off: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            ambient: Vec3::ZERO,
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
            attenuation: Attenuation::default(),
            cut_off: 12.5,
            outer_cut_off: 15.0,
        }
    }
}

/// Everything the `phong` program needs besides the matrices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lighting {
    pub material: Material,
    pub directional: DirectionalLight,
    pub point_lights: Vec<PointLight>,
    pub spot: SpotLight,
}

impl Lighting {
    pub fn with_point_lights(point_lights: Vec<PointLight>) -> Self {
        Self {
            point_lights,
            ..Self::default()
        }
    }

    /// Uploads every constant plus the camera-dependent values.
    /// `program` must be bound.
    pub fn upload<B: GlBackend + ?Sized>(
        &self,
        gl: &B,
        program: &mut ShaderProgram,
        camera: &Camera,
    ) -> Result<()> {
        let m = &self.material;
        program.set_vec3(gl, "material.ambient", m.ambient)?;
        program.set_vec3(gl, "material.diffuse", m.diffuse)?;
        program.set_vec3(gl, "material.specular", m.specular)?;
        program.set_f32(gl, "material.shininess", m.shininess)?;

        let d = &self.directional;
        program.set_vec3(gl, "dirLight.direction", d.direction)?;
        program.set_vec3(gl, "dirLight.ambient", d.ambient)?;
        program.set_vec3(gl, "dirLight.diffuse", d.diffuse)?;
        program.set_vec3(gl, "dirLight.specular", d.specular)?;

        for (i, light) in self.point_lights.iter().enumerate() {
            let field = |name: &str| format!("pointLights[{i}].{name}");
            program.set_vec3(gl, &field("position"), light.position)?;
            program.set_vec3(gl, &field("ambient"), light.ambient)?;
            program.set_vec3(gl, &field("diffuse"), light.diffuse)?;
            program.set_vec3(gl, &field("specular"), light.specular)?;
            program.set_f32(gl, &field("constant"), light.attenuation.constant)?;
            program.set_f32(gl, &field("linear"), light.attenuation.linear)?;
            program.set_f32(gl, &field("quadratic"), light.attenuation.quadratic)?;
        }

        let s = &self.spot;
        program.set_vec3(gl, "spotLight.ambient", s.ambient)?;
        program.set_vec3(gl, "spotLight.diffuse", s.diffuse)?;
        program.set_vec3(gl, "spotLight.specular", s.specular)?;
        program.set_f32(gl, "spotLight.constant", s.attenuation.constant)?;
        program.set_f32(gl, "spotLight.linear", s.attenuation.linear)?;
        program.set_f32(gl, "spotLight.quadratic", s.attenuation.quadratic)?;
        // The fragment shader compares against cosines.
        program.set_f32(gl, "spotLight.cutOff", s.cut_off.to_radians().cos())?;
        program.set_f32(gl, "spotLight.outerCutOff", s.outer_cut_off.to_radians().cos())?;

        upload_view(gl, program, camera)
    }
}

/// Per-frame uniforms: eye position and the camera-attached spot light.
pub(crate) fn upload_view<B: GlBackend + ?Sized>(
    gl: &B,
    program: &mut ShaderProgram,
    camera: &Camera,
) -> Result<()> {
    program.set_vec3(gl, "viewPos", camera.position)?;
    program.set_vec3(gl, "spotLight.position", camera.position)?;
    program.set_vec3(gl, "spotLight.direction", camera.front())
}
