//! Crate-level error types.

use std::{ffi::NulError, fmt, io, path::PathBuf};

use crate::shader::ShaderStage;

/// Errors produced while setting up GL resources or the viewer.
#[derive(Debug)]
pub enum Error {
    /// Failed to read a file from disk.
    Io { path: PathBuf, source: io::Error },
    /// Failed to decode an image.
    Image(image::ImageError),
    /// The driver rejected a shader; `log` is its info log.
    ShaderCompile { stage: ShaderStage, log: String },
    ProgramLink(String),
    /// Shader source or uniform name contained an interior NUL byte.
    InvalidSource(NulError),
    UnknownShaderStage(PathBuf),
    /// Window or GL context creation failure.
    Context(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::Image(e) => write!(f, "image error: {e}"),
            Self::ShaderCompile { stage, log } => {
                write!(f, "failed to compile {stage} shader: {log}")
            }
            Self::ProgramLink(log) => write!(f, "failed to link program: {log}"),
            Self::InvalidSource(e) => write!(f, "invalid shader string: {e}"),
            Self::UnknownShaderStage(path) => {
                write!(f, "cannot infer shader stage of {}", path.display())
            }
            Self::Context(msg) => write!(f, "context error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Image(e) => Some(e),
            Self::InvalidSource(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}

impl From<NulError> for Error {
    fn from(e: NulError) -> Self {
        Self::InvalidSource(e)
    }
}

impl From<glutin::CreationError> for Error {
    fn from(e: glutin::CreationError) -> Self {
        Self::Context(e.to_string())
    }
}

impl From<glutin::ContextError> for Error {
    fn from(e: glutin::ContextError) -> Self {
        Self::Context(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_io_error_keeps_source() {
        let err = Error::Io {
            path: PathBuf::from("shaders/missing.vert"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };

        assert_eq!(
            err.to_string(),
            "failed to read shaders/missing.vert: no such file"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_nul_error_converts_and_chains() {
        let nul = match std::ffi::CString::new("u_color\0") {
            Err(e) => e,
            Ok(_) => panic!("interior NUL accepted"),
        };
        let err: Error = nul.into();

        assert!(matches!(err, Error::InvalidSource(_)));
        assert!(err.to_string().starts_with("invalid shader string: "));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_context_error_has_no_source() {
        let err = Error::Context("no matching pixel format".to_owned());

        assert_eq!(err.to_string(), "context error: no matching pixel format");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_compile_error_names_stage() {
        let err = Error::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "0:1: syntax error".to_owned(),
        };

        assert_eq!(
            err.to_string(),
            "failed to compile fragment shader: 0:1: syntax error"
        );
        assert!(err.source().is_none());
    }
}
