//! PNG export through the `image` crate.

use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{RasterError, RenderError};
use crate::rendering_buffer::RenderingBuffer;

/// Copy a buffer into an `image::RgbaImage`.
pub fn to_rgba_image(buf: &RenderingBuffer) -> RgbaImage {
    // Buffer length always matches width * height * 4.
    RgbaImage::from_raw(buf.width(), buf.height(), buf.as_bytes().to_vec())
        .unwrap_or_else(|| RgbaImage::new(buf.width(), buf.height()))
}

/// Wrap an `image::RgbaImage` as a rendering buffer.
pub fn from_rgba_image(img: RgbaImage) -> Result<RenderingBuffer, RasterError> {
    let (width, height) = img.dimensions();
    RenderingBuffer::from_vec(width, height, img.into_raw())
}

/// Encode `buf` as a PNG file.
pub fn save_png(buf: &RenderingBuffer, path: impl AsRef<Path>) -> Result<(), RenderError> {
    let path = path.as_ref();
    to_rgba_image(buf).save_with_format(path, ImageFormat::Png)?;
    log::info!("wrote {}x{} PNG to {}", buf.width(), buf.height(), path.display());
    Ok(())
}

/// Decode a PNG file into a rendering buffer.
pub fn load_png(path: impl AsRef<Path>) -> Result<RenderingBuffer, RenderError> {
    let img = image::open(path.as_ref())?.to_rgba8();
    Ok(from_rgba_image(img)?)
}
