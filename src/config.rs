//! Renderer configuration.
//!
//! [`RendererConfig`] can be built in code or deserialized from JSON. Every
//! field has a default, so a config file only needs the keys it changes.
//! Colors are written as `"#rrggbb"` or `"#rrggbbaa"` strings.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::code::FieldLayout;
use crate::color::Rgba8;
use crate::color_policy::DEFAULT_GUARD_THRESHOLD;
use crate::error::ConfigError;
use crate::image_filters::ResampleFilter;
use crate::patch_renderer::DEFAULT_STROKE_WIDTH;

/// Default cell size: a 60×60 source image.
pub const DEFAULT_PATCH_SIZE: u32 = 20;

/// Settings applied before rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Size in pixels of one grid cell in the source image.
    pub patch_size: u32,
    pub background: Rgba8,
    /// Minimum RGB distance between fill and background before a guard
    /// stroke is drawn.
    pub guard_threshold: f64,
    /// Guard stroke width in source pixels.
    pub stroke_width: f64,
    pub resample_filter: ResampleFilter,
    pub field_layout: FieldLayout,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            patch_size: DEFAULT_PATCH_SIZE,
            background: Rgba8::WHITE,
            guard_threshold: DEFAULT_GUARD_THRESHOLD,
            stroke_width: DEFAULT_STROKE_WIDTH,
            resample_filter: ResampleFilter::default(),
            field_layout: FieldLayout::default(),
        }
    }
}

impl RendererConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::debug!("loaded renderer config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> String {
        // A struct of plain fields always serializes.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.patch_size == 0 {
            return Err(ConfigError::ZeroPatchSize);
        }
        if self.guard_threshold.is_nan() || self.guard_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.guard_threshold));
        }
        if self.stroke_width <= 0.0 || !self.stroke_width.is_finite() {
            return Err(ConfigError::InvalidStrokeWidth(self.stroke_width));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = RendererConfig::default();
        assert_eq!(c.patch_size, 20);
        assert_eq!(c.background, Rgba8::WHITE);
        assert_eq!(c.guard_threshold, 32.0);
        assert_eq!(c.stroke_width, 1.0);
        assert_eq!(c.resample_filter, ResampleFilter::Catrom);
        assert_eq!(c.field_layout, FieldLayout::Reference);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let c = RendererConfig::from_json_str(
            r##"{ "patch_size": 32, "background": "#f0f0f0", "field_layout": "disjoint" }"##,
        )
        .unwrap();
        assert_eq!(c.patch_size, 32);
        assert_eq!(c.background, Rgba8::new_opaque(0xF0, 0xF0, 0xF0));
        assert_eq!(c.field_layout, FieldLayout::Disjoint);
        assert_eq!(c.guard_threshold, 32.0);
    }

    #[test]
    fn test_round_trip() {
        let c = RendererConfig {
            patch_size: 40,
            background: Rgba8::new(1, 2, 3, 4),
            guard_threshold: 10.5,
            stroke_width: 2.0,
            resample_filter: ResampleFilter::Bilinear,
            field_layout: FieldLayout::Disjoint,
        };
        let back = RendererConfig::from_json_str(&c.to_json_string()).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_validation() {
        let zero = RendererConfig {
            patch_size: 0,
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(ConfigError::ZeroPatchSize)));

        let nan = RendererConfig {
            guard_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(nan.validate(), Err(ConfigError::InvalidThreshold(_))));

        let thin = RendererConfig {
            stroke_width: 0.0,
            ..Default::default()
        };
        assert!(matches!(thin.validate(), Err(ConfigError::InvalidStrokeWidth(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            RendererConfig::from_json_str("{ \"patch_size\": \"big\" }"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            RendererConfig::from_json_str(r#"{ "background": "white" }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = RendererConfig::load("/nonexistent/nineblock.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
