use std::{
    collections::HashMap,
    ffi::{CString, OsStr},
    fmt, fs,
    path::Path,
};

use nalgebra::{Matrix3, Matrix4, Vector2, Vector3, Vector4};

use crate::{
    check,
    error::{Error, Result},
};

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex = gl::VERTEX_SHADER,
    Fragment = gl::FRAGMENT_SHADER,
}

impl ShaderStage {
    /// Guesses the stage from a `.vert` / `.frag` style extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(OsStr::to_str)? {
            "vert" | "vs" => Some(Self::Vertex),
            "frag" | "fs" => Some(Self::Fragment),
            _ => None,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// A single compiled shader stage.
pub struct Shader {
    id: u32,
    stage: ShaderStage,
}

impl Shader {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let stage = ShaderStage::from_path(path)
            .ok_or_else(|| Error::UnknownShaderStage(path.to_path_buf()))?;

        Self::from_file_with_stage(path, stage)
    }

    pub fn from_file_with_stage(path: impl AsRef<Path>, stage: ShaderStage) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("compiling {} shader {}", stage, path.display());

        Self::from_source(stage, &source)
    }

    pub fn from_source(stage: ShaderStage, source: &str) -> Result<Self> {
        let src = CString::new(source)?;

        unsafe {
            let id = check!(gl::CreateShader(stage as u32));
            check!(gl::ShaderSource(id, 1, &src.as_ptr(), std::ptr::null()));
            check!(gl::CompileShader(id));

            let mut result = 0;
            check!(gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut result));
            if !status_ok(result) {
                let mut len = 0;
                check!(gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len));

                let mut message = vec![0_u8; len.max(0) as usize];
                check!(gl::GetShaderInfoLog(
                    id,
                    len,
                    std::ptr::null_mut(),
                    message.as_mut_ptr() as *mut _
                ));
                check!(gl::DeleteShader(id));

                let log = info_log_to_string(message);
                log::error!("{} shader failed to compile:\n{}", stage, log);

                return Err(Error::ShaderCompile { stage, log });
            }

            Ok(Self { id, stage })
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        check!(unsafe { gl::DeleteShader(self.id) })
    }
}

/// GL reports compile, link and validate results as `GL_TRUE`/`GL_FALSE`.
fn status_ok(status: i32) -> bool {
    status == gl::TRUE as i32
}

unsafe fn program_info_log(program: u32) -> String {
    let mut len = 0;
    check!(gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len));

    let mut message = vec![0_u8; len.max(0) as usize];
    check!(gl::GetProgramInfoLog(
        program,
        len,
        std::ptr::null_mut(),
        message.as_mut_ptr() as *mut _
    ));

    info_log_to_string(message)
}

fn info_log_to_string(mut message: Vec<u8>) -> String {
    while message.last() == Some(&0) {
        message.pop();
    }

    String::from_utf8_lossy(&message).trim_end().to_owned()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Uniform {
    Int(i32),
    Float(f32),
    Vec2(Vector2<f32>),
    Vec3(Vector3<f32>),
    Vec4(Vector4<f32>),
    Mat3(Matrix3<f32>),
    Mat4(Matrix4<f32>),
}

macro_rules! uniform_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Uniform {
                fn from(value: $ty) -> Self {
                    Uniform::$variant(value)
                }
            }
        )*
    };
}

uniform_from! {
    i32 => Int,
    f32 => Float,
    Vector2<f32> => Vec2,
    Vector3<f32> => Vec3,
    Vector4<f32> => Vec4,
    Matrix3<f32> => Mat3,
    Matrix4<f32> => Mat4,
}

/// A linked shader program.
pub struct Program {
    id: u32,
    uniform_cache: HashMap<String, i32>,
}

impl Program {
    pub fn link(shaders: &[&Shader]) -> Result<Self> {
        let program = check!(unsafe { gl::CreateProgram() });

        unsafe {
            for shader in shaders {
                check!(gl::AttachShader(program, shader.id()));
            }

            check!(gl::LinkProgram(program));

            let mut status = gl::FALSE as i32;
            check!(gl::GetProgramiv(program, gl::LINK_STATUS, &mut status));

            if !status_ok(status) {
                let log = program_info_log(program);
                check!(gl::DeleteProgram(program));

                log::error!("program failed to link:\n{}", log);

                return Err(Error::ProgramLink(log));
            }

            // validation depends on the GL state at this point, so a failure
            // is only worth a warning
            check!(gl::ValidateProgram(program));
            check!(gl::GetProgramiv(program, gl::VALIDATE_STATUS, &mut status));
            if !status_ok(status) {
                log::warn!(
                    "program {} failed validation:\n{}",
                    program,
                    program_info_log(program)
                );
            }

            for shader in shaders {
                check!(gl::DetachShader(program, shader.id()));
            }
        }

        log::info!("linked program {} from {} shaders", program, shaders.len());

        Ok(Self {
            id: program,
            uniform_cache: HashMap::new(),
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn use_program(&self) {
        check!(unsafe { gl::UseProgram(self.id) })
    }

    pub fn unbind(&self) {
        check!(unsafe { gl::UseProgram(0) })
    }

    /// Uploads `value` to the uniform called `name` of this program, which
    /// must currently be in use. Unknown names are ignored.
    #[track_caller]
    pub fn set_uniform(&mut self, name: &str, value: impl Into<Uniform>) -> Result<()> {
        let location = self.uniform_location(name)?;
        if location == -1 {
            return Ok(());
        }

        match value.into() {
            Uniform::Int(v0) => check!(unsafe { gl::Uniform1i(location, v0) }),
            Uniform::Float(v0) => check!(unsafe { gl::Uniform1f(location, v0) }),
            Uniform::Vec2(v) => check!(unsafe { gl::Uniform2f(location, v.x, v.y) }),
            Uniform::Vec3(v) => check!(unsafe { gl::Uniform3f(location, v.x, v.y, v.z) }),
            Uniform::Vec4(v) => check!(unsafe { gl::Uniform4f(location, v.x, v.y, v.z, v.w) }),
            Uniform::Mat3(matrix) => check!(unsafe {
                gl::UniformMatrix3fv(location, 1, gl::FALSE, matrix.as_ptr())
            }),
            Uniform::Mat4(matrix) => check!(unsafe {
                gl::UniformMatrix4fv(location, 1, gl::FALSE, matrix.as_ptr())
            }),
        }

        Ok(())
    }

    #[track_caller]
    fn uniform_location(&mut self, name: &str) -> Result<i32> {
        if let Some(&location) = self.uniform_cache.get(name) {
            return Ok(location);
        }

        let c_name = CString::new(name)?;
        let location = check!(unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) });

        if location == -1 {
            log::warn!("could not find location for uniform {:?}", name);
        }

        self.uniform_cache.insert(name.to_owned(), location);

        Ok(location)
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        check!(unsafe { gl::DeleteProgram(self.id) })
    }
}
