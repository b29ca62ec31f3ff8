use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, RgbaImage};

use super::backend::{GlBackend, RawId};
use super::error::{RenderError, Result};

/// A 2D RGBA8 texture with linear filtering and repeat wrapping.
///
/// Keeps the uploaded pixels (already flipped for GL) next to the GL name.
#[derive(Debug)]
pub struct Texture {
    id: RawId,
    path: Option<PathBuf>,
    pixels: RgbaImage,
}

impl Texture {
    /// Decodes a PNG, JPEG or GIF file and uploads it.
    pub fn load<B: GlBackend + ?Sized>(gl: &B, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let image = image::load_from_memory(&bytes).map_err(|source| RenderError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let mut texture = Self::from_image(gl, image)?;
        log::debug!(
            "texture #{} loaded from {} ({}x{})",
            texture.id,
            path.display(),
            texture.pixels.width(),
            texture.pixels.height()
        );
        texture.path = Some(path.to_path_buf());
        Ok(texture)
    }

    /// Uploads an already decoded image.
    pub fn from_image<B: GlBackend + ?Sized>(gl: &B, image: DynamicImage) -> Result<Self> {
        let pixels = to_gl_pixels(image);
        let (width, height) = pixels.dimensions();

        let id = gl.create_texture().map_err(RenderError::Backend)?;
        gl.bind_texture(Some(id));
        gl.upload_rgba8(width, height, pixels.as_raw());
        gl.bind_texture(None);

        Ok(Self {
            id,
            path: None,
            pixels,
        })
    }

    #[inline]
    pub fn id(&self) -> RawId {
        self.id
    }

    /// Source file, when loaded from disk.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// RGBA8 pixels as uploaded, bottom row first.
    #[inline]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Makes `unit` active and binds this texture to it.
    pub fn bind<B: GlBackend + ?Sized>(&self, gl: &B, unit: u32) {
        gl.active_texture(unit);
        gl.bind_texture(Some(self.id));
    }

    pub fn unbind<B: GlBackend + ?Sized>(&self, gl: &B) {
        gl.bind_texture(None);
    }

    pub fn delete<B: GlBackend + ?Sized>(self, gl: &B) {
        gl.delete_texture(self.id);
    }
}

/// Converts to tightly packed RGBA8 and rotates by 180 degrees so that image
/// row 0 (top) lands at GL's t = 1.
fn to_gl_pixels(image: DynamicImage) -> RgbaImage {
    image::imageops::rotate180(&image.into_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::mock::{Call, RecordingGl};
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lumen-texture-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn pixels_are_rotated_half_a_turn() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, RED);
        img.put_pixel(1, 0, BLUE);

        let out = to_gl_pixels(DynamicImage::ImageRgba8(img));
        assert_eq!(out.get_pixel(0, 0), &BLUE);
        assert_eq!(out.get_pixel(1, 0), &RED);
    }

    #[test]
    fn load_uploads_rgba8() {
        let path = scratch_file("checker.png");
        let mut img = RgbaImage::new(4, 2);
        img.put_pixel(0, 0, RED);
        img.save(&path).unwrap();

        let gl = RecordingGl::default();
        let texture = Texture::load(&gl, &path).unwrap();

        assert_eq!(texture.size(), (4, 2));
        assert_eq!(texture.path(), Some(path.as_path()));
        assert!(gl.calls().contains(&Call::UploadRgba8 {
            width: 4,
            height: 2,
            len: 4 * 2 * 4,
        }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let gl = RecordingGl::default();
        let err = Texture::load(&gl, scratch_file("does-not-exist.png")).unwrap_err();

        assert!(matches!(err, RenderError::Io { .. }));
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let path = scratch_file("garbage.png");
        fs::write(&path, b"definitely not an image").unwrap();

        let gl = RecordingGl::default();
        let err = Texture::load(&gl, &path).unwrap_err();
        assert!(matches!(err, RenderError::Decode { .. }));
    }

    #[test]
    fn bind_selects_the_unit_first() {
        let gl = RecordingGl::default();
        let texture = Texture::from_image(&gl, DynamicImage::new_rgba8(1, 1)).unwrap();
        gl.clear_calls();

        texture.bind(&gl, 3);
        assert_eq!(
            gl.calls(),
            vec![Call::ActiveTexture(3), Call::BindTexture(Some(texture.id().get()))]
        );
    }
}
