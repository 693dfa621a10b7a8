use anyhow::{Context, Result};
use clap::Parser;
use gl_tutorials::{
    shader_path, App, Buffer, BufferType, DrawMode, Frame, Program, Renderer, Shader, Usage,
    VertexArray, Viewer, WindowArgs,
};
use glutin::event_loop::EventLoop;
use nalgebra::{Vector3, Vector4};

const VERTICES: [[f32; 3]; 4] = [
    [0.5, 0.5, 0.0],   // top right
    [0.5, -0.5, 0.0],  // bottom right
    [-0.5, -0.5, 0.0], // bottom left
    [-0.5, 0.5, 0.0],  // top left
];

// two triangles
const INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Draws a quad out of two indexed triangles.
#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    window: WindowArgs,

    /// Take the fragment color from an animated uniform.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    use_uniforms: bool,
}

struct HelloTriangle {
    program: Program,
    vertex_array: VertexArray,
    use_uniforms: bool,
}

impl HelloTriangle {
    fn new(use_uniforms: bool) -> Result<Self> {
        let fragment = if use_uniforms {
            "hello_triangle/triangle_uniform.frag"
        } else {
            "hello_triangle/triangle.frag"
        };

        let vertex_shader = Shader::from_file(shader_path("hello_triangle/triangle.vert"))?;
        let fragment_shader = Shader::from_file(shader_path(fragment))?;
        let program = Program::link(&[&vertex_shader, &fragment_shader])
            .context("failed to link program")?;

        let positions: Vec<Vector3<f32>> = VERTICES
            .iter()
            .map(|&[x, y, z]| Vector3::new(x, y, z))
            .collect();

        let mut vertex_array = VertexArray::new();
        vertex_array.enable_attribute(
            0,
            Buffer::new(BufferType::Array, Usage::StaticDraw, &positions),
        );
        vertex_array.assign_buffer(Buffer::new(
            BufferType::ElementArray,
            Usage::StaticDraw,
            &INDICES,
        ));
        vertex_array.unbind();

        Ok(Self {
            program,
            vertex_array,
            use_uniforms,
        })
    }
}

impl App for HelloTriangle {
    fn draw(&mut self, renderer: &Renderer, frame: &Frame) -> gl_tutorials::Result<()> {
        renderer.clear([0.2, 0.3, 0.3, 1.0], false);

        self.program.use_program();
        if self.use_uniforms {
            let green = frame.elapsed.sin() / 2.0 + 0.5;
            self.program
                .set_uniform("our_color", Vector4::new(0.0, green, 0.0, 1.0))?;
        }

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

    let app = HelloTriangle::new(args.use_uniforms)?;

    viewer.run(event_loop, app)
}
