//! Fill and guard colors.
//!
//! The fill color comes straight from the decoded 5-bit channels. When it
//! lands too close to the background, patch outlines get a guard stroke in
//! the complementary color so the shapes stay visible.

use crate::code::RenderSpec;
use crate::color::Rgba8;

/// Default minimum RGB distance between fill and background.
pub const DEFAULT_GUARD_THRESHOLD: f64 = 32.0;

/// Colors used to draw one identicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchColors {
    pub fill: Rgba8,
    /// Outline color, present only when fill and background are too close.
    pub guard: Option<Rgba8>,
}

/// Picks colors against a fixed background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPolicy {
    background: Rgba8,
    guard_threshold: f64,
}

impl ColorPolicy {
    pub fn new(background: Rgba8, guard_threshold: f64) -> Self {
        Self {
            background,
            guard_threshold,
        }
    }

    pub fn background(&self) -> Rgba8 {
        self.background
    }

    pub fn guard_threshold(&self) -> f64 {
        self.guard_threshold
    }

    /// Opaque fill scaled up from the 5-bit channels.
    pub fn fill_color(spec: &RenderSpec) -> Rgba8 {
        Rgba8::from_channels(
            (spec.red as u32) << 3,
            (spec.green as u32) << 3,
            (spec.blue as u32) << 3,
        )
    }

    pub fn pick_colors(&self, spec: &RenderSpec) -> PatchColors {
        let fill = Self::fill_color(spec);
        let guard = (fill.distance(&self.background) < self.guard_threshold)
            .then(|| fill.complement());
        PatchColors { fill, guard }
    }
}

impl Default for ColorPolicy {
    fn default() -> Self {
        Self::new(Rgba8::WHITE, DEFAULT_GUARD_THRESHOLD)
    }
}
