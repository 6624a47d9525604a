use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{SketchError, SketchResult};
use crate::text::TextMeasure;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgb8> for TextBrushRgba8 {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// Where the font bytes of a [`FontLibrary`] came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    /// The configured font file.
    Configured(PathBuf),
    /// A system face picked as fallback, by family name.
    System(String),
    /// Bytes handed in directly.
    Memory,
    /// Nothing could be loaded; text cannot be rendered.
    Unavailable,
}

/// The single font resource shared by all renders; read-only after construction.
#[derive(Clone)]
pub struct FontLibrary {
    data: Option<Arc<Vec<u8>>>,
    /// Face index inside `data` (non-zero for collections).
    index: u32,
    source: FontSource,
}

impl FontLibrary {
    /// Load the configured font, falling back to a system face.
    ///
    /// Never fails: a missing font is logged and replaced, and only when the machine has no
    /// usable face at all does the library end up [`FontSource::Unavailable`].
    pub fn load(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match std::fs::read(path) {
                Ok(bytes) if !bytes.is_empty() => {
                    tracing::debug!(path = %path.display(), "loaded configured font");
                    return Self {
                        data: Some(Arc::new(bytes)),
                        index: 0,
                        source: FontSource::Configured(path.to_path_buf()),
                    };
                }
                Ok(_) => {
                    tracing::warn!(path = %path.display(), "configured font is empty, using a system font");
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "configured font unreadable, using a system font");
                }
            }
        }
        Self::system_default()
    }

    /// First sans-serif system face, or any system face.
    pub fn system_default() -> Self {
        match load_system_face() {
            Some(face) => {
                tracing::debug!(family = %face.family, index = face.index, "using system font");
                Self {
                    data: Some(Arc::new(face.bytes)),
                    index: face.index,
                    source: FontSource::System(face.family),
                }
            }
            None => {
                tracing::warn!("no system font available; text rendering is disabled");
                Self {
                    data: None,
                    index: 0,
                    source: FontSource::Unavailable,
                }
            }
        }
    }

    /// Library over in-memory font data (TTF/OTF/TTC).
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            data: Some(Arc::new(bytes)),
            index: 0,
            source: FontSource::Memory,
        }
    }

    /// Face index of the library's font inside its file.
    pub fn face_index(&self) -> u32 {
        self.index
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn is_available(&self) -> bool {
        self.data.is_some()
    }
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLibrary")
            .field("source", &self.source)
            .field("index", &self.index)
            .field("bytes", &self.data.as_ref().map_or(0, |d| d.len()))
            .finish()
    }
}

struct SystemFace {
    bytes: Vec<u8>,
    index: u32,
    family: String,
}

fn load_system_face() -> Option<SystemFace> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let query = usvg::fontdb::Query {
        families: &[usvg::fontdb::Family::SansSerif],
        ..Default::default()
    };
    let id = db
        .query(&query)
        .or_else(|| db.faces().next().map(|f| f.id))?;
    let family = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_else(|| "unknown".to_string());
    db.with_face_data(id, |data, index| SystemFace {
        bytes: data.to_vec(),
        index,
        family,
    })
}

/// Per-render shaping state: Parley contexts plus the font registered into them.
///
/// This is the font resource factory: every [`TextEngine::layout`] call shapes at the size it
/// is given, so trying a new size never mutates an existing handle. Characters the library
/// face lacks are shaped with a system fallback face; each glyph run carries the face it was
/// shaped with.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextEngine {
    /// Register the library's font face into fresh Parley contexts.
    pub fn new(library: &FontLibrary) -> SketchResult<Self> {
        let bytes = library.data.as_ref().ok_or_else(|| {
            SketchError::Other(anyhow::anyhow!(
                "no usable font: configured font missing and no system fallback"
            ))
        })?;

        let mut font_ctx = parley::FontContext::default();
        let blob = parley::fontique::Blob::new(bytes.clone());
        let families = font_ctx.collection.register_fonts(blob, None);
        let family_id = families
            .iter()
            .find(|(_, faces)| faces.iter().any(|f| f.index() == library.index))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| {
                SketchError::Other(anyhow::anyhow!("no font families registered from font bytes"))
            })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| {
                SketchError::Other(anyhow::anyhow!("registered font family has no name"))
            })?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape one unwrapped run of text.
    pub fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextMeasure for TextEngine {
    fn advance(&mut self, text: &str, size_px: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout(text, size_px, TextBrushRgba8::default())
            .full_width()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
