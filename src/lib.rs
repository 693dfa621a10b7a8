//! Small OpenGL tutorial toolkit: thin wrappers over GL objects, a glutin
//! viewer that drives an [`App`], and an orbiting camera.

use std::path::PathBuf;

pub use buffer::{
    Buffer, BufferElement, BufferElementType, BufferType, Usage, VertexBufferElement,
    VertexBufferLayout,
};
pub use camera::{CameraError, OrbitCamera, RotationDirection, MAX_ELEVATION};
pub use cli::WindowArgs;
pub use error::{Error, Result};
pub use input::{InputState, KeyboardKey, MouseButton, PressState};
pub use renderer::Renderer;
pub use shader::{Program, Shader, ShaderStage, Uniform};
pub use texture::{
    checkerboard, load_image, load_image_or_else, Filter, Texture, TextureConfig, TextureUnit,
    Wrap,
};
pub use vertex_array::{DrawMode, VertexArray};
pub use viewer::{App, Frame, Viewer, ViewerConfig};

pub mod buffer;
pub mod camera;
pub mod cli;
pub mod error;
pub mod input;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod vertex_array;
pub mod viewer;

/// Path of a shader source shipped with the crate, e.g.
/// `shader_path("camera/cube.vert")`.
pub fn shader_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("shaders")
        .join(relative)
}

/// Default location of an image under the crate's `assets` directory.
pub fn asset_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets").join(name)
}

pub fn clear_error() {
    while unsafe { gl::GetError() } != gl::NO_ERROR {}
}

#[track_caller]
pub fn check_error() {
    let error = unsafe { gl::GetError() };
    assert_eq!(error, gl::NO_ERROR, "GL error 0x{:x}", error)
}

/// Wraps a GL call so that debug builds assert it raised no error.
#[macro_export]
macro_rules! check {
    ($call:expr) => {{
        #[cfg(debug_assertions)]
        {
            $crate::clear_error();
            let x = $call;
            $crate::check_error();
            x
        }

        #[cfg(not(debug_assertions))]
        {
            $call
        }
    }};
}
