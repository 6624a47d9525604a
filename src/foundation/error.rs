/// Result alias used across the crate.
pub type SketchResult<T> = Result<T, SketchError>;

/// Machine-readable failure kind, stable across releases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The placement box (or the box shrunk by padding) has no area.
    InvalidRegion,
    /// Neither text nor an image was supplied.
    NoContentSupplied,
    /// Supplied image bytes, a template, or an overlay could not be decoded.
    UnreadableImage,
    /// Configuration could not be parsed or is inconsistent.
    Config,
    /// The composited canvas could not be encoded.
    Encode,
    /// Anything else (IO, missing fonts).
    Other,
}

impl ErrorKind {
    /// Snake-case code suitable for wire formats and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRegion => "invalid_region",
            Self::NoContentSupplied => "no_content_supplied",
            Self::UnreadableImage => "unreadable_image",
            Self::Config => "config",
            Self::Encode => "encode",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal failures of a render request.
///
/// Recoverable conditions (font fallback, text that overflows even at the minimum size) are
/// never reported through this type; they are logged and the render proceeds.
#[derive(thiserror::Error, Debug)]
pub enum SketchError {
    #[error("invalid region: {0}")]
    InvalidRegion(String),

    #[error("no text or image supplied")]
    NoContentSupplied,

    #[error("unreadable image: {0}")]
    UnreadableImage(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SketchError {
    pub fn invalid_region(msg: impl Into<String>) -> Self {
        Self::InvalidRegion(msg.into())
    }

    pub fn unreadable_image(msg: impl Into<String>) -> Self {
        Self::UnreadableImage(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Machine-readable kind of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRegion(_) => ErrorKind::InvalidRegion,
            Self::NoContentSupplied => ErrorKind::NoContentSupplied,
            Self::UnreadableImage(_) => ErrorKind::UnreadableImage,
            Self::Config(_) => ErrorKind::Config,
            Self::Encode(_) => ErrorKind::Encode,
            Self::Other(_) => ErrorKind::Other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
