//! Text layout: colored runs, line wrapping, and font-size fitting.
//!
//! Everything here works against [`TextMeasure`], so layout decisions can be made (and tested)
//! without touching a real font. [`crate::assets::fonts::TextEngine`] is the shaping-backed
//! implementation used for actual renders.

pub mod fit;
pub mod segments;
pub mod wrap;

/// Source of rendered text widths.
pub trait TextMeasure {
    /// Advance width in pixels of `text` set at `size_px`, trailing spaces included.
    fn advance(&mut self, text: &str, size_px: f32) -> f32;
}

/// A font handle fixed at one integer pixel size.
///
/// Handles are cheap and created fresh for every size tried; nothing is resized in place.
pub struct SizedFont<'m, M: TextMeasure + ?Sized> {
    measure: &'m mut M,
    size: u32,
}

impl<'m, M: TextMeasure + ?Sized> SizedFont<'m, M> {
    pub fn new(measure: &'m mut M, size: u32) -> Self {
        Self { measure, size }
    }

    /// Nominal size in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Rendered width of `text` at this size.
    pub fn width(&mut self, text: &str) -> f32 {
        self.measure.advance(text, self.size as f32)
    }
}

/// Deterministic measure giving every character the same advance (`em * size`).
///
/// Handy for previews and tests where real glyph metrics do not matter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    /// Advance of one character as a fraction of the font size.
    pub em: f32,
}

impl TextMeasure for FixedAdvance {
    fn advance(&mut self, text: &str, size_px: f32) -> f32 {
        text.chars().count() as f32 * self.em * size_px
    }
}
