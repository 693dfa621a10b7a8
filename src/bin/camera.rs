use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gl_tutorials::{
    asset_path, checkerboard, shader_path, App, Buffer, BufferType, DrawMode, Frame, KeyboardKey,
    MouseButton, OrbitCamera, PressState, Program, Renderer, RotationDirection, Shader,
    Texture, TextureConfig, Usage, VertexArray, Viewer, WindowArgs,
};
use glutin::event_loop::EventLoop;
use nalgebra::{Matrix4, Vector2, Vector3};

/// Radians per arrow key press.
const KEY_STEP: f32 = 0.1;
/// Radians per pixel of mouse drag.
const DRAG_MODIFIER: f32 = 0.01;

#[rustfmt::skip]
const CUBE_POSITIONS: [[f32; 3]; 36] = [
    [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5],
    [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5], [-0.5, -0.5, -0.5],
    [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5],
    [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5, -0.5,  0.5],
    [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5], [-0.5, -0.5, -0.5],
    [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5],
    [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
    [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5],
    [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5],
    [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5], [-0.5, -0.5, -0.5],
    [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
    [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
];

#[rustfmt::skip]
const CUBE_TEXTURE_COORDS: [[f32; 2]; 36] = [
    [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0],
    [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0],
    [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0],
    [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 1.0], [0.0, 0.0], [1.0, 0.0],
    [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [1.0, 0.0], [0.0, 0.0], [0.0, 1.0],
    [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [1.0, 0.0], [0.0, 0.0], [0.0, 1.0],
];

/// Textured cube seen through a camera orbiting the origin.
///
/// Arrow keys rotate the camera, as does dragging with any mouse button.
#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    window: WindowArgs,

    /// Base texture of the cube.
    #[arg(long, default_value_os_t = asset_path("container.jpg"))]
    container: PathBuf,

    /// Texture blended over the base one.
    #[arg(long, default_value_os_t = asset_path("awesomeface.png"))]
    face: PathBuf,

    /// Vertical field of view.
    #[arg(long, default_value_t = 45.0)]
    fov_degrees: f32,
}

struct CameraTutorial {
    program: Program,
    vertex_array: VertexArray,
    textures: [Texture; 2],
    camera: OrbitCamera,
    fov: f32,
    projection: Matrix4<f32>,
}

impl CameraTutorial {
    fn new(args: &Args, width: u32, height: u32) -> Result<Self> {
        let container = Texture::from_path_or_else(
            &args.container,
            false,
            &TextureConfig::on_unit(0),
            || checkerboard(256, 32, [110, 72, 36, 255], [196, 148, 84, 255]),
        )
        .with_context(|| format!("failed to load {}", args.container.display()))?;
        let face = Texture::from_path_or_else(
            &args.face,
            true,
            &TextureConfig::on_unit(1),
            || checkerboard(256, 64, [250, 210, 40, 255], [255, 255, 255, 255]),
        )
        .with_context(|| format!("failed to load {}", args.face.display()))?;

        let vertex_shader = Shader::from_file(shader_path("camera/cube.vert"))?;
        let fragment_shader = Shader::from_file(shader_path("camera/cube.frag"))?;
        let mut program = Program::link(&[&vertex_shader, &fragment_shader])
            .context("failed to link program")?;

        program.use_program();
        program.set_uniform("texture1", container.unit().0 as i32)?;
        program.set_uniform("texture2", face.unit().0 as i32)?;
        program.set_uniform("mix_ratio", 0.5_f32)?;

        let mut camera = OrbitCamera::new();
        camera.look_at(Vector3::zeros(), Vector3::new(5.0, 0.0, 0.0))?;

        let fov = args.fov_degrees.to_radians();
        let projection = camera.projection_matrix(fov, width as f32, height as f32)?;

        let positions: Vec<Vector3<f32>> = CUBE_POSITIONS
            .iter()
            .map(|&[x, y, z]| Vector3::new(x, y, z))
            .collect();
        let texture_coords: Vec<Vector2<f32>> = CUBE_TEXTURE_COORDS
            .iter()
            .map(|&[u, v]| Vector2::new(u, v))
            .collect();

        let mut vertex_array = VertexArray::new();
        vertex_array.enable_attribute(
            0,
            Buffer::new(BufferType::Array, Usage::StaticDraw, &positions),
        );
        vertex_array.enable_attribute(
            1,
            Buffer::new(BufferType::Array, Usage::StaticDraw, &texture_coords),
        );
        vertex_array.unbind();

        Ok(Self {
            program,
            vertex_array,
            textures: [container, face],
            camera,
            fov,
            projection,
        })
    }
}

impl App for CameraTutorial {
    fn on_key(&mut self, key: KeyboardKey, state: PressState) {
        if state != PressState::Pressed {
            return;
        }

        match key {
            KeyboardKey::ArrowUp => self.camera.rotate(RotationDirection::Vertical, KEY_STEP),
            KeyboardKey::ArrowDown => self.camera.rotate(RotationDirection::Vertical, -KEY_STEP),
            KeyboardKey::ArrowLeft => {
                self.camera.rotate(RotationDirection::Horizontal, -KEY_STEP)
            }
            KeyboardKey::ArrowRight => {
                self.camera.rotate(RotationDirection::Horizontal, KEY_STEP)
            }
            _ => {}
        }
    }

    fn on_mouse_drag(&mut self, _button: MouseButton, dx: f32, dy: f32) {
        self.camera
            .rotate_scaled(RotationDirection::Horizontal, dx, DRAG_MODIFIER);
        self.camera
            .rotate_scaled(RotationDirection::Vertical, dy, DRAG_MODIFIER);
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        match self
            .camera
            .projection_matrix(self.fov, width as f32, height as f32)
        {
            Ok(projection) => self.projection = projection,
            // minimized windows report a zero height
            Err(e) => log::debug!("keeping previous projection: {}", e),
        }
    }

    fn draw(&mut self, renderer: &Renderer, _frame: &Frame) -> gl_tutorials::Result<()> {
        renderer.enable_depth_test();
        renderer.clear([0.2, 0.3, 0.3, 1.0], true);

        self.program.use_program();
        for texture in &self.textures {
            texture.bind();
        }

        self.program.set_uniform("view", self.camera.view_matrix())?;
        self.program.set_uniform("model", Matrix4::<f32>::identity())?;
        self.program.set_uniform("projection", self.projection)?;

        renderer.draw(&self.vertex_array, &self.program, DrawMode::Triangles);

        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let event_loop = EventLoop::new();
    let viewer =
        Viewer::new(&event_loop, &args.window.config()).context("failed to create viewer")?;

    let size = viewer.window_size();
    let app = CameraTutorial::new(&args, size.width, size.height)?;

    viewer.run(event_loop, app)
}
