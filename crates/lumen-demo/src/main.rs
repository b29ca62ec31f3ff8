mod meshes;

use anyhow::Result;
use glam::{Mat4, Vec3};

use lumen_engine::camera::{Camera, CameraMovement, MouseLook};
use lumen_engine::config::AssetConfig;
use lumen_engine::core::{App, AppControl, FrameCtx, SetupCtx};
use lumen_engine::device::GlInit;
use lumen_engine::input::Key;
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::render::VertexLayout;
use lumen_engine::scene::{Lighting, MeshDesc, PointLight, Scene};
use lumen_engine::window::{Runtime, RuntimeConfig};

/// Must match `NR_POINT_LIGHTS` in `phong_fragment.glsl`.
const LAMP_POSITIONS: [Vec3; 4] = [
    Vec3::new(0.7, 0.2, 2.0),
    Vec3::new(2.3, -0.3, -4.0),
    Vec3::new(-4.0, 2.0, -12.0),
    Vec3::new(0.0, 0.0, -3.0),
];

const CUBE_POSITIONS: [Vec3; 10] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(2.0, 5.0, -15.0),
    Vec3::new(-1.5, -2.2, -2.5),
    Vec3::new(-3.8, -2.0, -12.3),
    Vec3::new(2.4, -0.4, -3.5),
    Vec3::new(-1.7, 3.0, -7.5),
    Vec3::new(1.3, -2.0, -2.5),
    Vec3::new(1.5, 2.0, -2.5),
    Vec3::new(1.5, 0.2, -1.5),
    Vec3::new(-1.3, 1.0, -1.5),
];

const LAMP_SCALE: f32 = 0.2;

const MOVE_KEYS: [(Key, CameraMovement); 4] = [
    (Key::W, CameraMovement::Forward),
    (Key::S, CameraMovement::Backward),
    (Key::A, CameraMovement::Left),
    (Key::D, CameraMovement::Right),
];

struct Demo {
    camera: Camera,
    mouse_look: MouseLook,
    scene: Option<Scene>,
}

impl Demo {
    fn new() -> Self {
        Self {
            camera: Camera::new(Vec3::new(0.0, 0.0, 7.0)),
            mouse_look: MouseLook::new(),
            scene: None,
        }
    }

    fn draw(&mut self, ctx: &mut FrameCtx<'_>) -> lumen_engine::render::Result<()> {
        let Some(scene) = self.scene.as_mut() else {
            return Ok(());
        };
        scene.advance(&ctx.time);

        for (key, movement) in MOVE_KEYS {
            if ctx.input.key_down(key) {
                self.camera.process_keyboard(movement, scene.delta_time());
            }
        }
        for moved in ctx.input_frame.pointer_moves() {
            self.mouse_look.cursor_moved(&mut self.camera, moved.x, moved.y);
        }

        let axis = Vec3::new(1.0, 0.3, 0.5).normalize();
        let elapsed = ctx.time.elapsed;
        for (i, node) in scene.nodes_named_mut("cube").enumerate() {
            let angle = (20.0 * i as f32 + 25.0 * elapsed).to_radians();
            node.set_model_matrix(Mat4::from_translation(node.position()) * Mat4::from_axis_angle(axis, angle));
        }

        ctx.renderer.clear();
        scene.update_lights(ctx.renderer, &self.camera)?;
        scene.draw(ctx.renderer, &self.camera)
    }
}

impl App for Demo {
    fn setup(&mut self, ctx: &mut SetupCtx<'_>) -> Result<()> {
        let assets = AssetConfig::from_env(env!("CARGO_MANIFEST_DIR"));
        ctx.renderer.load_default_programs(&assets)?;

        let lighting = Lighting::with_point_lights(LAMP_POSITIONS.iter().copied().map(PointLight::at).collect());
        let mut scene = Scene::new(ctx.window.aspect_ratio(), lighting);
        let layout = VertexLayout::position_uv_normal();

        let container = assets.texture_path("container.png");
        scene.add_nodes(
            ctx.renderer,
            &MeshDesc {
                name: "cube",
                renderable: true,
                data: &meshes::CUBE,
                layout: &layout,
                texture: &container,
                program: "phong",
            },
            &CUBE_POSITIONS,
        )?;

        let metal = assets.texture_path("metal.png");
        scene.add_node(
            ctx.renderer,
            &MeshDesc {
                name: "floor",
                renderable: true,
                data: &meshes::PLANE,
                layout: &layout,
                texture: &metal,
                program: "basic",
            },
            Vec3::new(0.0, -3.0, 0.0),
        )?;

        let lamp = assets.texture_path("lamp.png");
        let lamps = scene.add_nodes(
            ctx.renderer,
            &MeshDesc {
                name: "lamp",
                renderable: true,
                data: &meshes::CUBE,
                layout: &layout,
                texture: &lamp,
                program: "lamp",
            },
            &LAMP_POSITIONS,
        )?;
        for node in lamps {
            node.set_model_matrix(Mat4::from_translation(node.position()) * Mat4::from_scale(Vec3::splat(LAMP_SCALE)));
        }

        scene.init_lights(ctx.renderer, &self.camera)?;
        log::info!("demo scene ready: {} nodes", scene.nodes().len());
        self.scene = Some(scene);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        match self.draw(ctx) {
            Ok(()) => AppControl::Continue,
            Err(e) => {
                log::error!("frame failed: {e}");
                AppControl::Exit
            }
        }
    }
}

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = Runtime::run(RuntimeConfig::default(), GlInit::default(), Demo::new()) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
