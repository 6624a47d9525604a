use crate::text::wrap::wrap_lines;
use crate::text::{SizedFont, TextMeasure};

/// Size search bounds and line spacing for [`fit_text`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitBounds {
    /// Smallest size tried, and the fallback when nothing fits.
    pub min_size: u32,
    /// Largest size tried.
    pub max_size: u32,
    /// Extra space between lines as a fraction of the font size.
    pub line_spacing: f32,
}

impl Default for FitBounds {
    fn default() -> Self {
        Self {
            min_size: 12,
            max_size: 96,
            line_spacing: 0.15,
        }
    }
}

impl FitBounds {
    /// Bounds with `min >= 1` and `max >= min`.
    pub fn normalized(self) -> Self {
        let min_size = self.min_size.max(1);
        Self {
            min_size,
            max_size: self.max_size.max(min_size),
            line_spacing: self.line_spacing,
        }
    }
}

/// Wrapped lines of a block at one size, with the block's vertical extent.
#[derive(Clone, Debug, PartialEq)]
pub struct WrapResult {
    pub lines: Vec<String>,
    pub line_height: f32,
    pub block_height: f32,
}

/// Wrap `text` at `size` and measure the resulting block.
pub fn measure_block<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    size: u32,
    max_width: f32,
    line_spacing: f32,
) -> WrapResult {
    let mut font = SizedFont::new(measure, size);
    let lines = wrap_lines(text, &mut font, max_width);
    let line_height = font.size() as f32 * (1.0 + line_spacing);
    let block_height = lines.len() as f32 * line_height;
    WrapResult {
        lines,
        line_height,
        block_height,
    }
}

/// Outcome of the size search.
#[derive(Clone, Debug, PartialEq)]
pub struct FitResult {
    /// Chosen font size in pixels.
    pub size: u32,
    /// Wrapping at `size`.
    pub block: WrapResult,
    /// Set when even the minimum size overflows the region height.
    pub overflow: bool,
}

/// Binary-search the largest size whose wrapped block fits `region_height`.
///
/// Relies on block height never growing as the size shrinks, which holds for greedy wrapping
/// under proportional glyph advances. When no size fits, the minimum size is used and the
/// overflow is accepted.
#[tracing::instrument(skip(measure, text))]
pub fn fit_text<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    region_width: f32,
    region_height: f32,
    bounds: FitBounds,
) -> FitResult {
    let bounds = bounds.normalized();
    let (mut low, mut high) = (bounds.min_size, bounds.max_size);
    let mut best: Option<(u32, WrapResult)> = None;

    while low <= high {
        let mid = low + (high - low) / 2;
        let block = measure_block(measure, text, mid, region_width, bounds.line_spacing);
        if block.block_height <= region_height {
            best = Some((mid, block));
            low = mid + 1;
        } else {
            high = mid - 1;
        }
    }

    match best {
        Some((size, block)) => {
            tracing::debug!(size, lines = block.lines.len(), "text fits");
            FitResult {
                size,
                block,
                overflow: false,
            }
        }
        None => {
            let size = bounds.min_size;
            let block = measure_block(measure, text, size, region_width, bounds.line_spacing);
            tracing::warn!(
                size,
                block_height = block.block_height,
                region_height,
                "text overflows the region even at the minimum size"
            );
            FitResult {
                size,
                block,
                overflow: true,
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
