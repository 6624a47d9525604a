use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Align, Region, Rgb8, VAlign};
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::image::PasteStyle;
use crate::render::text::TextStyle;
use crate::text::fit::FitBounds;

/// Everything a [`crate::Sketchbook`] needs, read-only after construction.
///
/// All fields have defaults, so `{}` is a valid configuration. Relative paths are resolved
/// against [`SketchbookConfig::base_dir`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchbookConfig {
    /// Directory holding templates and the overlay.
    pub images_dir: PathBuf,
    pub font_path: PathBuf,
    /// Box receiving the text or the pasted picture.
    pub text_box: BoxConfig,
    pub overlay: OverlayConfig,
    /// Template used when no emotion tag matches.
    pub default_template: PathBuf,
    /// Emotion tags in lookup order.
    pub emotions: Vec<EmotionEntry>,
    pub text: TextConfig,
    pub image: ImageConfig,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Default for SketchbookConfig {
    fn default() -> Self {
        let emotions = [
            ("#普通#", "base.png"),
            ("#开心#", "开心.png"),
            ("#生气#", "生气.png"),
            ("#无语#", "无语.png"),
            ("#脸红#", "脸红.png"),
            ("#病娇#", "病娇.png"),
        ]
        .into_iter()
        .map(|(tag, template)| EmotionEntry {
            tag: tag.to_owned(),
            template: PathBuf::from(template),
        })
        .collect();

        Self {
            images_dir: PathBuf::from("BaseImages"),
            font_path: PathBuf::from("fonts/font.ttf"),
            text_box: BoxConfig::default(),
            overlay: OverlayConfig::default(),
            default_template: PathBuf::from("base.png"),
            emotions,
            text: TextConfig::default(),
            image: ImageConfig::default(),
            base_dir: PathBuf::new(),
        }
    }
}

impl SketchbookConfig {
    /// Parse a JSON configuration. Relative paths resolve against the current directory.
    pub fn from_reader<R: std::io::Read>(r: R) -> SketchResult<Self> {
        serde_json::from_reader(r).map_err(|e| SketchError::config(format!("parse config JSON: {e}")))
    }

    /// Parse a JSON configuration file. Relative paths resolve against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> SketchResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SketchError::config(format!("open config '{}': {e}", path.display()))
        })?;
        let cfg = Self::from_reader(BufReader::new(f))?;
        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(cfg.with_base_dir(base))
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn resolve(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.base_dir.join(p)
        }
    }

    pub fn images_dir(&self) -> PathBuf {
        self.resolve(&self.images_dir)
    }

    pub fn font_path(&self) -> PathBuf {
        self.resolve(&self.font_path)
    }

    /// Template file name resolved inside [`SketchbookConfig::images_dir`].
    pub fn template_path(&self, template: &Path) -> PathBuf {
        if template.is_absolute() {
            template.to_path_buf()
        } else {
            self.images_dir().join(template)
        }
    }

    /// Overlay file, or `None` when the overlay is disabled.
    pub fn overlay_path(&self) -> Option<PathBuf> {
        self.overlay
            .enabled
            .then(|| self.template_path(&self.overlay.file))
    }
}

/// Two corners of the content box in template pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxConfig {
    pub top_left: [i32; 2],
    pub bottom_right: [i32; 2],
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            top_left: [119, 450],
            bottom_right: [398, 625],
        }
    }
}

impl BoxConfig {
    pub fn region(&self) -> SketchResult<Region> {
        let [x1, y1] = self.top_left;
        let [x2, y2] = self.bottom_right;
        Region::new(x1, y1, x2, y2)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub enabled: bool,
    /// Overlay file, relative to the images directory.
    pub file: PathBuf,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: PathBuf::from("base_overlay.png"),
        }
    }
}

/// One `tag -> template` row of the emotion table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionEntry {
    pub tag: String,
    pub template: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub color: Rgb8,
    /// Color of bracketed passages, brackets included.
    pub bracket_color: Rgb8,
    pub max_font_size: u32,
    pub min_font_size: u32,
    /// Extra gap between lines as a fraction of the font size.
    pub line_spacing: f32,
    pub align: Align,
    pub valign: VAlign,
}

impl Default for TextConfig {
    fn default() -> Self {
        let style = TextStyle::default();
        Self {
            color: style.color,
            bracket_color: style.bracket_color,
            max_font_size: style.bounds.max_size,
            min_font_size: style.bounds.min_size,
            line_spacing: style.bounds.line_spacing,
            align: style.align,
            valign: style.valign,
        }
    }
}

impl TextConfig {
    pub fn style(&self) -> TextStyle {
        TextStyle {
            color: self.color,
            bracket_color: self.bracket_color,
            align: self.align,
            valign: self.valign,
            bounds: FitBounds {
                min_size: self.min_font_size,
                max_size: self.max_font_size,
                line_spacing: self.line_spacing,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub padding: i32,
    pub allow_upscale: bool,
    pub keep_alpha: bool,
    pub align: Align,
    pub valign: VAlign,
}

impl Default for ImageConfig {
    fn default() -> Self {
        let style = PasteStyle::default();
        Self {
            padding: style.padding,
            allow_upscale: style.allow_upscale,
            keep_alpha: style.keep_alpha,
            align: style.align,
            valign: style.valign,
        }
    }
}

impl ImageConfig {
    pub fn style(&self) -> PasteStyle {
        PasteStyle {
            align: self.align,
            valign: self.valign,
            padding: self.padding,
            allow_upscale: self.allow_upscale,
            keep_alpha: self.keep_alpha,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/config.rs"]
mod tests;
