use std::path::{Path, PathBuf};

use crate::compose::config::EmotionEntry;
use crate::foundation::error::{SketchError, SketchResult};

/// Ordered `tag -> template` table; lookup order is declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmotionMap {
    entries: Vec<(String, PathBuf)>,
}

/// Outcome of template resolution for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// Matched tag, if any.
    pub tag: Option<&'a str>,
    /// Template file name; the default template when no tag matched.
    pub template: &'a Path,
    /// Text left to render.
    pub text: String,
}

impl EmotionMap {
    /// Build from configured entries. Empty or duplicate tags are rejected.
    pub fn new(entries: &[EmotionEntry]) -> SketchResult<Self> {
        let mut out: Vec<(String, PathBuf)> = Vec::with_capacity(entries.len());
        for e in entries {
            if e.tag.is_empty() {
                return Err(SketchError::config("emotion tag must not be empty"));
            }
            if out.iter().any(|(tag, _)| *tag == e.tag) {
                return Err(SketchError::config(format!(
                    "emotion tag \"{}\" is declared twice",
                    e.tag
                )));
            }
            out.push((e.tag.clone(), e.template.clone()));
        }
        Ok(Self { entries: out })
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(tag, _)| tag.as_str())
    }

    pub fn get(&self, tag: &str) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, p)| p.as_path())
    }

    /// First tag, in declaration order, occurring anywhere in `text`.
    pub fn find_in(&self, text: &str) -> Option<(&str, &Path)> {
        self.entries
            .iter()
            .find(|(tag, _)| text.contains(tag.as_str()))
            .map(|(tag, p)| (tag.as_str(), p.as_path()))
    }

    /// Pick the template for a request.
    ///
    /// A recognized `emotion` wins and leaves `text` alone. Otherwise the first tag found in
    /// `text` is used and every occurrence of it is removed before trimming. Only that one tag
    /// is stripped, even if others also appear.
    pub fn resolve<'a>(&'a self, text: &str, emotion: &str, default: &'a Path) -> Resolved<'a> {
        if let Some((tag, template)) = self
            .entries
            .iter()
            .find(|(tag, _)| !emotion.is_empty() && tag == emotion)
        {
            return Resolved {
                tag: Some(tag.as_str()),
                template: template.as_path(),
                text: text.to_owned(),
            };
        }

        if !text.is_empty()
            && let Some((tag, template)) = self.find_in(text)
        {
            return Resolved {
                tag: Some(tag),
                template,
                text: text.replace(tag, "").trim().to_owned(),
            };
        }

        Resolved {
            tag: None,
            template: default,
            text: text.to_owned(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/emotion.rs"]
mod tests;
