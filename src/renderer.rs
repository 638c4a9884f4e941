//! The nine-block identicon renderer.
//!
//! Ties the pipeline together: decode the code, pick colors, draw the nine
//! patches onto a `3 × patch_size` square canvas, then resample to the
//! requested size.

use crate::canvas::Canvas;
use crate::code::{FieldLayout, IdentityCode, RenderSpec};
use crate::color::Rgba8;
use crate::color_policy::{ColorPolicy, PatchColors};
use crate::composer::compose;
use crate::config::RendererConfig;
use crate::error::{ConfigError, RasterError, RenderError};
use crate::image_filters::ResampleFilter;
use crate::image_resample::resample;
use crate::patch::PatchLibrary;
use crate::rendering_buffer::RenderingBuffer;

/// Renders identity codes into identicon images.
///
/// Rendering takes `&self`, so one renderer can serve many threads; the
/// setters take `&mut self` and cannot race a render.
#[derive(Debug, Clone)]
pub struct NineBlockRenderer {
    config: RendererConfig,
    library: PatchLibrary,
}

impl NineBlockRenderer {
    /// A renderer with the default configuration.
    pub fn new() -> Self {
        let config = RendererConfig::default();
        Self {
            library: PatchLibrary::new(config.patch_size),
            config,
        }
    }

    /// A renderer with a validated configuration.
    pub fn with_config(config: RendererConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            library: PatchLibrary::new(config.patch_size),
            config,
        })
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn library(&self) -> &PatchLibrary {
        &self.library
    }

    // ---------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------

    pub fn patch_size(&self) -> u32 {
        self.config.patch_size
    }

    /// Change the cell size; rebuilds the patch polygons.
    pub fn set_patch_size(&mut self, size: u32) -> Result<(), ConfigError> {
        if size == 0 {
            return Err(ConfigError::ZeroPatchSize);
        }
        self.config.patch_size = size;
        self.library.configure(size);
        Ok(())
    }

    pub fn background(&self) -> Rgba8 {
        self.config.background
    }

    pub fn set_background(&mut self, color: Rgba8) {
        self.config.background = color;
    }

    pub fn set_guard_threshold(&mut self, threshold: f64) -> Result<(), ConfigError> {
        if threshold.is_nan() || threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(threshold));
        }
        self.config.guard_threshold = threshold;
        Ok(())
    }

    pub fn set_stroke_width(&mut self, width: f64) -> Result<(), ConfigError> {
        if width <= 0.0 || !width.is_finite() {
            return Err(ConfigError::InvalidStrokeWidth(width));
        }
        self.config.stroke_width = width;
        Ok(())
    }

    pub fn set_resample_filter(&mut self, filter: ResampleFilter) {
        self.config.resample_filter = filter;
    }

    pub fn set_field_layout(&mut self, layout: FieldLayout) {
        self.config.field_layout = layout;
    }

    // ---------------------------------------------------------------
    // Pipeline stages
    // ---------------------------------------------------------------

    /// Decode a code with the configured field layout.
    pub fn decode(&self, code: impl Into<IdentityCode>) -> RenderSpec {
        self.config.field_layout.decode(code.into())
    }

    /// Fill and guard colors for a decoded code.
    pub fn colors(&self, spec: &RenderSpec) -> PatchColors {
        ColorPolicy::new(self.config.background, self.config.guard_threshold).pick_colors(spec)
    }

    /// Side length of the source canvas.
    pub fn source_size(&self) -> Result<u32, RasterError> {
        let size = self.config.patch_size;
        size.checked_mul(3).ok_or(RasterError::InvalidDimensions {
            width: size,
            height: size,
        })
    }

    /// The composed identicon at source resolution (`3 × patch_size`).
    pub fn render_source(
        &self,
        code: impl Into<IdentityCode>,
    ) -> Result<RenderingBuffer, RenderError> {
        let code = code.into();
        let spec = self.decode(code);
        let colors = self.colors(&spec);
        let size = self.source_size()?;
        log::debug!(
            "rendering {} at source size {}: {:?}, fill {}, guard {:?}",
            code,
            size,
            spec,
            colors.fill,
            colors.guard.map(|c| c.to_hex())
        );

        let background = self.config.background;
        let mut canvas = Canvas::new(size, size, background)?;
        compose(
            &mut canvas,
            &self.library,
            &spec,
            &colors,
            background,
            self.config.stroke_width,
        );
        Ok(canvas.into_buffer())
    }

    /// Render `code` as a `size × size` image. A size of zero yields an
    /// empty image.
    pub fn render(
        &self,
        code: impl Into<IdentityCode>,
        size: u32,
    ) -> Result<RenderingBuffer, RenderError> {
        if size == 0 {
            return Ok(RenderingBuffer::default());
        }
        let source = self.render_source(code)?;
        let image = resample(&source, size, size, &self.config.resample_filter)?;
        log::debug!("resampled {}px source to {}px", source.width(), size);
        Ok(image)
    }

    /// Render an arbitrary-precision code given as big-endian two's
    /// complement bytes; only its low 32 bits matter.
    pub fn render_bytes(&self, code: &[u8], size: u32) -> Result<RenderingBuffer, RenderError> {
        self.render(IdentityCode::from_be_bytes(code), size)
    }
}

impl Default for NineBlockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NineBlockRenderer>();
    }

    #[test]
    fn test_render_size() {
        let r = NineBlockRenderer::new();
        let img = r.render(12345u32, 32).unwrap();
        assert_eq!((img.width(), img.height()), (32, 32));
        assert_eq!(r.render_source(12345u32).unwrap().width(), 60);
    }

    #[test]
    fn test_size_zero_is_empty() {
        let img = NineBlockRenderer::new().render(7u32, 0).unwrap();
        assert!(img.is_empty());
        assert_eq!((img.width(), img.height()), (0, 0));
    }

    #[test]
    fn test_render_at_source_size_equals_source() {
        let r = NineBlockRenderer::new();
        assert_eq!(r.render(99u32, 60).unwrap(), r.render_source(99u32).unwrap());
    }

    #[test]
    fn test_set_patch_size() {
        let mut r = NineBlockRenderer::new();
        r.set_patch_size(40).unwrap();
        assert_eq!(r.library().cell_size(), 40);
        assert_eq!(r.render_source(0u32).unwrap().width(), 120);
        assert!(matches!(r.set_patch_size(0), Err(ConfigError::ZeroPatchSize)));
        assert_eq!(r.patch_size(), 40);
    }

    #[test]
    fn test_source_size_overflow() {
        let mut r = NineBlockRenderer::new();
        r.set_patch_size(u32::MAX / 2).unwrap();
        assert!(matches!(
            r.render(1u32, 16),
            Err(RenderError::Raster(RasterError::InvalidDimensions { .. }))
        ));
    }

    #[test]
    fn test_setters_validate() {
        let mut r = NineBlockRenderer::new();
        assert!(r.set_guard_threshold(-1.0).is_err());
        assert!(r.set_stroke_width(f64::INFINITY).is_err());
        r.set_guard_threshold(0.0).unwrap();
        // threshold 0 never guards
        assert_eq!(r.colors(&r.decode(u32::MAX)).guard, None);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = RendererConfig {
            patch_size: 0,
            ..Default::default()
        };
        assert!(NineBlockRenderer::with_config(config).is_err());
    }
}
