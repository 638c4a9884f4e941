//! Rendering buffer: an owned RGBA8 pixel grid with row access.
//!
//! Rows are stored top-down with a stride of `width * 4` bytes. This is the
//! image type the renderer hands back to callers, and the target the pixel
//! format layer writes into.

use crate::color::Rgba8;
use crate::error::RasterError;

/// Bytes per pixel.
pub const BPP: usize = 4;

/// Owned, top-down RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderingBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RenderingBuffer {
    /// Allocate a zeroed (fully transparent) buffer.
    ///
    /// Fails with [`RasterError::InvalidDimensions`] when the byte size of
    /// the buffer overflows `usize`. A zero width or height yields an empty
    /// buffer.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Allocate a buffer filled with a solid color.
    pub fn new_filled(width: u32, height: u32, c: Rgba8) -> Result<Self, RasterError> {
        let mut buf = Self::new(width, height)?;
        buf.clear(c);
        Ok(buf)
    }

    /// Wrap existing RGBA bytes.
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Result<Self, RasterError> {
        let len = byte_len(width, height)?;
        if data.len() != len {
            return Err(RasterError::BufferSize {
                width,
                height,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes.
    pub fn stride(&self) -> usize {
        self.width as usize * BPP
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Bytes of row `y`.
    ///
    /// # Panics
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Mutable bytes of row `y`.
    ///
    /// # Panics
    /// Panics if `y >= height`.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Color at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = (y as usize * self.width as usize + x as usize) * BPP;
        let p = &self.data[off..off + BPP];
        Some(Rgba8::new(p[0], p[1], p[2], p[3]))
    }

    /// Overwrite the pixel at `(x, y)`; ignored outside the buffer.
    pub fn set_pixel(&mut self, x: u32, y: u32, c: Rgba8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let off = (y as usize * self.width as usize + x as usize) * BPP;
        self.data[off..off + BPP].copy_from_slice(&[c.r, c.g, c.b, c.a]);
    }

    /// Fill the whole buffer with one color.
    pub fn clear(&mut self, c: Rgba8) {
        for p in self.data.chunks_exact_mut(BPP) {
            p.copy_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }

    /// Iterate every pixel in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba8> + '_ {
        self.data
            .chunks_exact(BPP)
            .map(|p| Rgba8::new(p[0], p[1], p[2], p[3]))
    }
}

fn byte_len(width: u32, height: u32) -> Result<usize, RasterError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BPP))
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or(RasterError::InvalidDimensions { width, height })
}

// ============================================================================
// Tests
// ============================================================================
