use std::path::Path;

use crate::assets::decode::{decode_image, load_image_file};
use crate::assets::fonts::{FontLibrary, FontSource, TextEngine};
use crate::compose::config::SketchbookConfig;
use crate::compose::emotion::EmotionMap;
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::frame::Frame;
use crate::render::image::{PasteStyle, composite_image};
use crate::render::text::{TextStyle, render_text};

/// Sketchbook compositor: picks a template, draws text or pastes a picture into the box, lays
/// the overlay on top and returns PNG bytes.
///
/// Everything held here is read-only after [`Sketchbook::new`], so one instance can serve
/// concurrent [`Sketchbook::generate`] calls from many threads. Each call owns its canvas.
pub struct Sketchbook {
    config: SketchbookConfig,
    emotions: EmotionMap,
    fonts: FontLibrary,
    overlay: Option<Frame>,
    text_style: TextStyle,
    paste_style: PasteStyle,
}

impl Sketchbook {
    /// Load fonts, the emotion table and the overlay described by `config`.
    ///
    /// A missing font or overlay is logged and worked around; only a malformed emotion table
    /// is an error.
    pub fn new(config: SketchbookConfig) -> SketchResult<Self> {
        let fonts = FontLibrary::load(Some(&config.font_path()));
        Self::with_fonts(config, fonts)
    }

    /// Like [`Sketchbook::new`] but with an already loaded font library.
    pub fn with_fonts(config: SketchbookConfig, fonts: FontLibrary) -> SketchResult<Self> {
        let emotions = EmotionMap::new(&config.emotions)?;
        let overlay = config.overlay_path().and_then(|p| load_overlay(&p));
        let text_style = config.text.style();
        let paste_style = config.image.style();
        tracing::info!(
            images_dir = %config.images_dir().display(),
            font = ?fonts.source(),
            overlay = overlay.is_some(),
            emotions = config.emotions.len(),
            "sketchbook ready"
        );
        Ok(Self {
            config,
            emotions,
            fonts,
            overlay,
            text_style,
            paste_style,
        })
    }

    pub fn config(&self) -> &SketchbookConfig {
        &self.config
    }

    pub fn font_source(&self) -> &FontSource {
        self.fonts.source()
    }

    /// Whether an overlay was loaded and will be applied.
    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Configured emotion tags, in lookup order.
    pub fn emotions(&self) -> Vec<&str> {
        self.emotions.tags().collect()
    }

    /// Render one sketchbook page.
    ///
    /// `image` (encoded bytes) takes precedence over `text`. A recognized `emotion` selects the
    /// template directly; otherwise the first configured tag found in `text` does and is removed
    /// from it.
    #[tracing::instrument(
        skip(self, text, image),
        fields(text_len = text.len(), has_image = image.is_some())
    )]
    pub fn generate(&self, text: &str, image: Option<&[u8]>, emotion: &str) -> SketchResult<Vec<u8>> {
        let resolved = self
            .emotions
            .resolve(text, emotion, &self.config.default_template);
        let template = self.config.template_path(resolved.template);
        tracing::debug!(tag = ?resolved.tag, template = %template.display(), "template resolved");

        let content = image.map(decode_image).transpose()?;
        if content.is_none() && resolved.text.trim().is_empty() {
            return Err(SketchError::NoContentSupplied);
        }

        let region = self.config.text_box.region()?;
        let base = Frame::from_image(&load_image_file(&template)?);
        let page = match content {
            Some(content) => composite_image(
                base,
                &content,
                region,
                &self.paste_style,
                self.overlay.as_ref(),
            )?,
            None => {
                let mut engine = TextEngine::new(&self.fonts)?;
                render_text(
                    base,
                    &mut engine,
                    &resolved.text,
                    region,
                    &self.text_style,
                    self.overlay.as_ref(),
                )?
            }
        };

        let png = page.encode_png()?;
        tracing::debug!(
            width = page.width,
            height = page.height,
            bytes = png.len(),
            "page encoded"
        );
        Ok(png)
    }
}

impl std::fmt::Debug for Sketchbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sketchbook")
            .field("config", &self.config)
            .field("font", self.fonts.source())
            .field("overlay", &self.overlay.is_some())
            .finish_non_exhaustive()
    }
}

fn load_overlay(path: &Path) -> Option<Frame> {
    match load_image_file(path) {
        Ok(img) => Some(Frame::from_image(&img)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "overlay unavailable, rendering without it");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/sketchbook.rs"]
mod tests;
