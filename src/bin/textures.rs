use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use gl_tutorials::{
    asset_path, checkerboard, shader_path, App, Buffer, BufferElementType, BufferType, DrawMode, Frame,
    Program, Renderer, Shader, Texture, TextureConfig, Usage, VertexArray, VertexBufferLayout,
    Viewer, WindowArgs,
};
use glutin::event_loop::EventLoop;

#[rustfmt::skip]
const VERTICES: [f32; 32] = [
    // positions       // colors        // texture coords
     0.5,  0.5, 0.0,   1.0, 0.0, 0.0,   1.0, 1.0, // top right
     0.5, -0.5, 0.0,   0.0, 1.0, 0.0,   1.0, 0.0, // bottom right
    -0.5, -0.5, 0.0,   0.0, 0.0, 1.0,   0.0, 0.0, // bottom left
    -0.5,  0.5, 0.0,   1.0, 1.0, 0.0,   0.0, 1.0, // top left
];

const INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Draws a textured quad tinted by per-vertex colors.
#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    window: WindowArgs,

    /// Image to sample the quad from.
    #[arg(long, default_value_os_t = asset_path("container.jpg"))]
    texture: PathBuf,
}

struct Textures {
    program: Program,
    vertex_array: VertexArray,
    texture: Texture,
}

impl Textures {
    fn new(texture_path: &Path) -> Result<Self> {
        let texture = Texture::from_path_or_else(
            texture_path,
            true,
            &TextureConfig::default(),
            || checkerboard(256, 32, [110, 72, 36, 255], [196, 148, 84, 255]),
        )
        .with_context(|| format!("failed to load texture {}", texture_path.display()))?;

        let vertex_shader = Shader::from_file(shader_path("textures/triangle.vert"))?;
        let fragment_shader = Shader::from_file(shader_path("textures/triangle.frag"))?;
        let mut program = Program::link(&[&vertex_shader, &fragment_shader])
            .context("failed to link program")?;

        program.use_program();
        program.set_uniform("texture1", texture.unit().0 as i32)?;

        let mut vertex_array = VertexArray::new();
        vertex_array.assign_buffer(Buffer::new(
            BufferType::Array,
            Usage::StaticDraw,
            &VERTICES,
        ));
        vertex_array.assign_buffer(Buffer::new(
            BufferType::ElementArray,
            Usage::StaticDraw,
            &INDICES,
        ));

        let mut layout = VertexBufferLayout::new();
        layout.push(BufferElementType::Float, 3, false);
        layout.push(BufferElementType::Float, 3, false);
        layout.push(BufferElementType::Float, 2, false);
        vertex_array.apply_layout(&layout);
        vertex_array.unbind();

        Ok(Self {
            program,
            vertex_array,
            texture,
        })
    }
}

impl App for Textures {
    fn draw(&mut self, renderer: &Renderer, _frame: &Frame) -> gl_tutorials::Result<()> {
        renderer.clear([0.2, 0.3, 0.3, 1.0], false);

        self.texture.bind();
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

    let app = Textures::new(&args.texture)?;

    viewer.run(event_loop, app)
}
