use std::path::Path;

use glam::{Mat4, Vec3};

use crate::camera::Camera;
use crate::render::{GlBackend, Renderer, Result, VertexLayout};
use crate::time::FrameTime;

use super::light::{self, Lighting};
use super::node::Node;

/// Vertical field of view in degrees.
pub const FOV: f32 = 45.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 100.0;

/// Program that receives the lighting uniforms.
pub const LIGHTING_PROGRAM: &str = "phong";

/// What to upload for a mesh and how to draw it.
#[derive(Debug, Clone, Copy)]
pub struct MeshDesc<'a> {
    pub name: &'a str,
    pub renderable: bool,
    /// Interleaved vertex floats.
    pub data: &'a [f32],
    pub layout: &'a VertexLayout,
    pub texture: &'a Path,
    /// Name the program was registered under.
    pub program: &'a str,
}

/// Ordered nodes plus the projection and lighting they are drawn with.
///
/// The scene only stores state. Callers animate nodes through `nodes_mut`
/// before calling `draw`.
#[derive(Debug)]
pub struct Scene {
    nodes: Vec<Node>,
    projection: Mat4,
    lighting: Lighting,
    delta_time: f32,
    last_frame: f32,
}

impl Scene {
    /// Perspective projection of `FOV` degrees for `aspect` (width / height).
    pub fn new(aspect: f32, lighting: Lighting) -> Self {
        Self {
            nodes: Vec::new(),
            projection: perspective(aspect),
            lighting,
            delta_time: 0.0,
            last_frame: 0.0,
        }
    }

    /// Uploads `mesh`, loads its texture and appends one node at `position`.
    pub fn add_node<B: GlBackend>(
        &mut self,
        renderer: &mut Renderer<B>,
        mesh: &MeshDesc<'_>,
        position: Vec3,
    ) -> Result<&mut Node> {
        let added = self.add_nodes(renderer, mesh, &[position])?;
        Ok(&mut added[0])
    }

    /// Uploads `mesh` once and appends a node per position, all sharing the
    /// same vertex array and texture. Returns the new nodes.
    ///
    /// The texture is resolved before any vertex data is uploaded, so a bad
    /// texture path leaves no orphaned vertex array behind.
    pub fn add_nodes<B: GlBackend>(
        &mut self,
        renderer: &mut Renderer<B>,
        mesh: &MeshDesc<'_>,
        positions: &[Vec3],
    ) -> Result<&mut [Node]> {
        let program = renderer.program(mesh.program)?;
        let texture = renderer.load_texture_shared(mesh.texture, program)?;
        let vao = renderer.load_vertex_data(mesh.data, mesh.layout)?;

        let start = self.nodes.len();
        self.nodes.extend(
            positions
                .iter()
                .map(|&position| Node::new(mesh.name, mesh.renderable, vao, texture, program, position)),
        );
        log::debug!("scene: {} x {:?} added", positions.len(), mesh.name);
        Ok(&mut self.nodes[start..])
    }

    /// Records the timing of the frame about to be drawn.
    pub fn advance(&mut self, time: &FrameTime) {
        self.delta_time = time.dt;
        self.last_frame = time.elapsed;
    }

    /// Draws every renderable node in insertion order.
    pub fn draw<B: GlBackend>(&self, renderer: &mut Renderer<B>, camera: &Camera) -> Result<()> {
        let view = camera.view_matrix();
        for node in self.nodes.iter().filter(|n| n.is_renderable()) {
            renderer.draw_node(node, view, self.projection)?;
        }
        Ok(())
    }

    /// Uploads material and every light to the lighting program.
    pub fn init_lights<B: GlBackend>(&self, renderer: &mut Renderer<B>, camera: &Camera) -> Result<()> {
        let program = renderer.program(LIGHTING_PROGRAM)?;
        renderer.with_program(program, |gl, shader| self.lighting.upload(gl, shader, camera))
    }

    /// Uploads the camera-dependent lighting uniforms. Call once per frame.
    pub fn update_lights<B: GlBackend>(&self, renderer: &mut Renderer<B>, camera: &Camera) -> Result<()> {
        let program = renderer.program(LIGHTING_PROGRAM)?;
        renderer.with_program(program, |gl, shader| light::upload_view(gl, shader, camera))
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Nodes created under `name`, in insertion order.
    pub fn nodes_named_mut<'s>(&'s mut self, name: &'s str) -> impl Iterator<Item = &'s mut Node> + 's {
        self.nodes.iter_mut().filter(move |n| n.name() == name)
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Rebuilds the projection for a new aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.projection = perspective(aspect);
    }

    #[inline]
    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    #[inline]
    pub fn lighting_mut(&mut self) -> &mut Lighting {
        &mut self.lighting
    }

    /// Seconds the last frame took.
    #[inline]
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Clock time of the last frame, in seconds.
    #[inline]
    pub fn last_frame(&self) -> f32 {
        self.last_frame
    }
}

fn perspective(aspect: f32) -> Mat4 {
    Mat4::perspective_rh_gl(FOV.to_radians(), aspect, NEAR, FAR)
}
