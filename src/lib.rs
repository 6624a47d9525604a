//! Sketchbook is a compositor for "character holding a sketchbook" pictures.
//!
//! A request carries free text, an encoded picture, or both, plus an optional emotion tag. The
//! crate picks a template for the emotion, then either:
//!
//! - fits the text into the configured box at the largest size that still fits, wrapping it and
//!   painting bracketed passages in a highlight color, or
//! - scales the picture into the same box and pastes it,
//!
//! lays the overlay over the result and returns PNG bytes.
//!
//! ```no_run
//! use sketchbook::{Sketchbook, SketchbookConfig};
//!
//! let sb = Sketchbook::new(SketchbookConfig::from_path("sketchbook.json")?)?;
//! let png = sb.generate("#开心# 今天也要加油【好耶】", None, "")?;
//! std::fs::write("out.png", png)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![forbid(unsafe_code)]

/// Template/picture decoding and fonts.
pub mod assets;
/// Configuration, emotion lookup and the request entry point.
pub mod compose;
mod foundation;
/// Canvas buffer and the two renderers.
pub mod render;
/// Font-independent text layout.
pub mod text;

pub use crate::assets::fonts::{FontLibrary, FontSource, TextEngine};
pub use crate::compose::config::{
    BoxConfig, EmotionEntry, ImageConfig, OverlayConfig, SketchbookConfig, TextConfig,
};
pub use crate::compose::emotion::EmotionMap;
pub use crate::compose::sketchbook::Sketchbook;
pub use crate::foundation::core::{Align, Region, Rgb8, VAlign};
pub use crate::foundation::error::{ErrorKind, SketchError, SketchResult};
pub use crate::render::frame::Frame;
pub use crate::render::image::{PasteStyle, Placement};
pub use crate::render::text::{TextPlan, TextStyle};
pub use crate::text::fit::{FitBounds, FitResult};
pub use crate::text::{FixedAdvance, TextMeasure};
