//! Error types.
//!
//! Decoding, composing and drawing are total; the only failures come from
//! buffer allocation, configuration and image I/O.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from the raster layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// The pixel buffer for `width` × `height` RGBA pixels does not fit in
    /// memory addressing.
    #[error("invalid raster dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    /// A caller-supplied byte buffer does not match the dimensions.
    #[error("buffer of {actual} bytes does not hold {width}x{height} RGBA pixels")]
    BufferSize {
        width: u32,
        height: u32,
        actual: usize,
    },
}

/// Errors from renderer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("patch size must be greater than zero")]
    ZeroPatchSize,
    #[error("guard threshold must be a non-negative number, got {0}")]
    InvalidThreshold(f64),
    #[error("stroke width must be positive, got {0}")]
    InvalidStrokeWidth(f64),
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level error returned by rendering and export.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("image export failed: {0}")]
    Export(#[from] image::ImageError),
}
