use crate::{
    check,
    shader::Program,
    vertex_array::{DrawMode, VertexArray},
};

pub struct Renderer {}

impl Renderer {
    pub fn new() -> Self {
        Self {}
    }

    pub fn enable_depth_test(&self) {
        check!(unsafe { gl::Enable(gl::DEPTH_TEST) });
    }

    /// Clears the color buffer, and the depth buffer too when `depth` is set.
    pub fn clear(&self, color: [f32; 4], depth: bool) {
        let [red, green, blue, alpha] = color;
        let mask = if depth {
            gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT
        } else {
            gl::COLOR_BUFFER_BIT
        };

        check!(unsafe {
            gl::ClearColor(red, green, blue, alpha);
            gl::Clear(mask);
        });
    }

    pub fn set_viewport(&self, width: u32, height: u32) {
        check!(unsafe { gl::Viewport(0, 0, width as i32, height as i32) });
    }

    pub fn draw(&self, va: &VertexArray, program: &Program, mode: DrawMode) {
        program.use_program();
        va.draw(mode);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
