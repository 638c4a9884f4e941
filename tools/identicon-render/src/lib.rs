//! Helpers behind the `identicon-render` command line tool: contact sheets
//! of consecutive codes and pixel comparison of rendered images.

use std::fmt;

use nineblock::{IdentityCode, NineBlockRenderer, Rgba8, RenderError, RenderingBuffer};

/// Gap between tiles on a contact sheet, in pixels.
pub const SHEET_GAP: u32 = 4;

// ============================================================================
// Contact sheet
// ============================================================================

/// Columns used for a sheet of `count` tiles: the smallest square grid.
pub fn sheet_columns(count: u32) -> u32 {
    let mut cols = 1;
    while cols * cols < count {
        cols += 1;
    }
    cols
}

/// Render `count` consecutive codes starting at `first` and tile them on
/// the renderer's background color.
pub fn render_sheet(
    renderer: &NineBlockRenderer,
    first: IdentityCode,
    count: u32,
    size: u32,
) -> Result<RenderingBuffer, RenderError> {
    if count == 0 || size == 0 {
        return Ok(RenderingBuffer::default());
    }
    let cols = sheet_columns(count);
    let rows = count.div_ceil(cols);
    let pitch = size + SHEET_GAP;
    let mut sheet = RenderingBuffer::new_filled(
        cols * pitch + SHEET_GAP,
        rows * pitch + SHEET_GAP,
        renderer.background(),
    )?;

    for i in 0..count {
        let code = IdentityCode::new(first.value().wrapping_add(i));
        let tile = renderer.render(code, size)?;
        let ox = SHEET_GAP + (i % cols) * pitch;
        let oy = SHEET_GAP + (i / cols) * pitch;
        for y in 0..size {
            let start = (ox as usize) * 4;
            let row = tile.row(y);
            sheet.row_mut(oy + y)[start..start + row.len()].copy_from_slice(row);
        }
    }
    Ok(sheet)
}

// ============================================================================
// Comparison
// ============================================================================

/// Outcome of comparing two images of equal size.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareResult {
    pub total_pixels: u64,
    /// Pixels that differ by at least 1 in any channel.
    pub different_pixels: u64,
    pub max_channel_diff: u8,
    /// Mean absolute difference over differing channels.
    pub mean_channel_diff: f64,
    /// First differing pixel, scanning rows top to bottom.
    pub first_diff: Option<(u32, u32, Rgba8, Rgba8)>,
}

impl CompareResult {
    pub fn identical(&self) -> bool {
        self.different_pixels == 0
    }
}

impl fmt::Display for CompareResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.identical() {
            return write!(f, "IDENTICAL: {} pixels match", self.total_pixels);
        }
        write!(
            f,
            "DIFFERENT: {}/{} pixels differ ({:.2}%), max_diff={}, mean_diff={:.4}",
            self.different_pixels,
            self.total_pixels,
            self.different_pixels as f64 / self.total_pixels as f64 * 100.0,
            self.max_channel_diff,
            self.mean_channel_diff,
        )?;
        if let Some((x, y, a, b)) = self.first_diff {
            write!(f, "\n  first diff at ({}, {}): A={} B={}", x, y, a.to_hex(), b.to_hex())?;
        }
        Ok(())
    }
}

/// Compare two images pixel by pixel. `None` when their sizes differ.
pub fn compare_buffers(a: &RenderingBuffer, b: &RenderingBuffer) -> Option<CompareResult> {
    if (a.width(), a.height()) != (b.width(), b.height()) {
        return None;
    }

    let mut different_pixels = 0u64;
    let mut max_channel_diff = 0u8;
    let mut diff_sum = 0u64;
    let mut diff_channels = 0u64;
    let mut first_diff = None;

    for (i, (pa, pb)) in a.pixels().zip(b.pixels()).enumerate() {
        let ca = [pa.r, pa.g, pa.b, pa.a];
        let cb = [pb.r, pb.g, pb.b, pb.a];
        let mut differs = false;
        for (&x, &y) in ca.iter().zip(cb.iter()) {
            let d = x.abs_diff(y);
            if d > 0 {
                differs = true;
                max_channel_diff = max_channel_diff.max(d);
                diff_sum += d as u64;
                diff_channels += 1;
            }
        }
        if differs {
            different_pixels += 1;
            if first_diff.is_none() {
                let w = a.width() as usize;
                first_diff = Some(((i % w) as u32, (i / w) as u32, pa, pb));
            }
        }
    }

    Some(CompareResult {
        total_pixels: a.width() as u64 * a.height() as u64,
        different_pixels,
        max_channel_diff,
        mean_channel_diff: if diff_channels > 0 {
            diff_sum as f64 / diff_channels as f64
        } else {
            0.0
        },
        first_diff,
    })
}
