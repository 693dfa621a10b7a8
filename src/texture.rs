use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::{check, error::Result};

/// Texture unit a texture binds to, `TextureUnit(0)` being `GL_TEXTURE0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureUnit(pub u32);

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    Repeat = gl::REPEAT,
    MirroredRepeat = gl::MIRRORED_REPEAT,
    ClampToEdge = gl::CLAMP_TO_EDGE,
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Nearest = gl::NEAREST,
    Linear = gl::LINEAR,
    LinearMipmapLinear = gl::LINEAR_MIPMAP_LINEAR,
    NearestMipmapNearest = gl::NEAREST_MIPMAP_NEAREST,
}

impl Filter {
    fn uses_mipmaps(self) -> bool {
        matches!(self, Self::LinearMipmapLinear | Self::NearestMipmapNearest)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureConfig {
    pub unit: TextureUnit,
    pub wrap: Wrap,
    pub min_filter: Filter,
    pub mag_filter: Filter,
    pub generate_mipmaps: bool,
}

impl Default for TextureConfig {
    fn default() -> Self {
        TextureConfig {
            unit: TextureUnit(0),
            wrap: Wrap::Repeat,
            min_filter: Filter::LinearMipmapLinear,
            mag_filter: Filter::Linear,
            generate_mipmaps: true,
        }
    }
}

impl TextureConfig {
    pub fn on_unit(unit: u32) -> Self {
        TextureConfig {
            unit: TextureUnit(unit),
            ..Self::default()
        }
    }
}

/// Loads an image as RGBA8. GL expects the first row at the bottom, so
/// most images need `flip_vertically`.
pub fn load_image(path: impl AsRef<Path>, flip_vertically: bool) -> Result<RgbaImage> {
    let path = path.as_ref();
    let mut image = image::open(path)?;

    log::info!(
        "loaded {}: {}x{}, {} channel(s)",
        path.display(),
        image.width(),
        image.height(),
        image.color().channel_count()
    );

    if flip_vertically {
        image = image.flipv();
    }

    Ok(image.to_rgba8())
}

/// Like [`load_image`], but a file that does not exist is replaced by
/// `fallback()`. Files that exist and fail to decode are still an error.
pub fn load_image_or_else(
    path: impl AsRef<Path>,
    flip_vertically: bool,
    fallback: impl FnOnce() -> RgbaImage,
) -> Result<RgbaImage> {
    let path = path.as_ref();
    if path.exists() {
        return load_image(path, flip_vertically);
    }

    let image = fallback();
    log::warn!(
        "{} not found, using a generated {}x{} image",
        path.display(),
        image.width(),
        image.height()
    );

    Ok(image)
}

/// A `size`x`size` checkerboard of `cell`-pixel squares, `dark` in the
/// bottom left corner.
pub fn checkerboard(size: u32, cell: u32, dark: [u8; 4], light: [u8; 4]) -> RgbaImage {
    let cell = cell.max(1);

    RgbaImage::from_fn(size, size, |x, y| {
        // rows are stored top first, GL samples them bottom first
        let row = size - 1 - y;
        if (x / cell + row / cell) % 2 == 0 {
            Rgba(dark)
        } else {
            Rgba(light)
        }
    })
}

pub struct Texture {
    id: u32,
    unit: TextureUnit,
}

impl Texture {
    pub fn new(image: &RgbaImage, config: &TextureConfig) -> Self {
        let mut id = 0;
        check!(unsafe { gl::GenTextures(1, &mut id) });

        check!(unsafe { gl::BindTexture(gl::TEXTURE_2D, id) });

        check!(unsafe {
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, config.wrap as i32)
        });
        check!(unsafe {
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, config.wrap as i32)
        });

        let min_filter = if config.min_filter.uses_mipmaps() && !config.generate_mipmaps {
            log::warn!("mipmap filter requested without mipmaps, falling back to linear");
            Filter::Linear
        } else {
            config.min_filter
        };
        check!(unsafe {
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, min_filter as i32)
        });
        check!(unsafe {
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MAG_FILTER,
                config.mag_filter as i32,
            )
        });

        check!(unsafe {
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as i32,
                image.width() as i32,
                image.height() as i32,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                image.as_raw().as_ptr() as *const _,
            )
        });

        if config.generate_mipmaps {
            check!(unsafe { gl::GenerateMipmap(gl::TEXTURE_2D) });
        }

        check!(unsafe { gl::BindTexture(gl::TEXTURE_2D, 0) });

        Self {
            id,
            unit: config.unit,
        }
    }

    /// Uploads the image at `path`, or `fallback()` if there is no file.
    pub fn from_path_or_else(
        path: impl AsRef<Path>,
        flip_vertically: bool,
        config: &TextureConfig,
        fallback: impl FnOnce() -> RgbaImage,
    ) -> Result<Self> {
        let image = load_image_or_else(path, flip_vertically, fallback)?;

        Ok(Self::new(&image, config))
    }

    pub fn unit(&self) -> TextureUnit {
        self.unit
    }

    /// Activates the configured unit and binds this texture to it.
    pub fn bind(&self) {
        check!(unsafe { gl::ActiveTexture(gl::TEXTURE0 + self.unit.0) });
        check!(unsafe { gl::BindTexture(gl::TEXTURE_2D, self.id) });
    }

    pub fn unbind(&self) {
        check!(unsafe { gl::BindTexture(gl::TEXTURE_2D, 0) });
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        check!(unsafe { gl::DeleteTextures(1, &self.id) });
    }
}
