//! # nineblock
//!
//! Deterministic nine-block identicons: a 32-bit identity code becomes a
//! small square image built from nine polygon patches, so equal codes give
//! equal images and nearby codes give visibly different ones.
//!
//! ```no_run
//! use nineblock::NineBlockRenderer;
//!
//! let renderer = NineBlockRenderer::new();
//! let image = renderer.render(0x1234_5678u32, 48)?;
//! nineblock::export::save_png(&image, "identicon.png")?;
//! # Ok::<(), nineblock::RenderError>(())
//! ```
//!
//! ## Architecture
//!
//! The identicon pipeline:
//!
//! 1. **Decode**: split the code into patch, turn, invert and color fields
//! 2. **Color**: pick the fill, plus a guard outline when it would vanish
//!    into the background
//! 3. **Compose**: place center, side and corner patches on a 3×3 grid
//! 4. **Draw**: fill and stroke each patch in a rotated local frame
//! 5. **Resample**: scale the source canvas to the requested size
//!
//! Drawing goes through the [`Surface`] trait. [`Canvas`] implements it with
//! an anti-aliased scanline rasterizer: vertex sources are transformed,
//! optionally stroked, accumulated into 24.8 fixed-point coverage cells and
//! swept into spans blended by an RGBA pixel format.

// Raster layer: foundation types
pub mod basics;
pub mod color;
pub mod path_storage;
pub mod rendering_buffer;
pub mod trans_affine;

// Raster layer: vertex pipeline
pub mod conv_stroke;
pub mod conv_transform;

// Raster layer: rasterizer and renderers
pub mod pixfmt_rgba;
pub mod rasterizer_cells_aa;
pub mod rasterizer_scanline_aa;
pub mod renderer_base;
pub mod renderer_scanline;

// Raster layer: resampling and drawing surface
pub mod canvas;
pub mod image_filters;
pub mod image_resample;

// Identicons
pub mod code;
pub mod color_policy;
pub mod composer;
pub mod patch;
pub mod patch_renderer;
pub mod renderer;

// Ambient
pub mod config;
pub mod error;
pub mod export;

pub use canvas::{Canvas, Surface};
pub use code::{decode, FieldLayout, IdentityCode, RenderSpec};
pub use color::Rgba8;
pub use color_policy::{ColorPolicy, PatchColors};
pub use composer::{compose, layout, CellPlacement, CellRole};
pub use config::RendererConfig;
pub use error::{ConfigError, RasterError, RenderError};
pub use image_filters::ResampleFilter;
pub use patch::{PatchFlags, PatchLibrary};
pub use patch_renderer::draw_patch;
pub use renderer::NineBlockRenderer;
pub use rendering_buffer::RenderingBuffer;
