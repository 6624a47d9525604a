use std::path::Path;

use crate::foundation::error::{SketchError, SketchResult};

/// Decode encoded image bytes (any format the `image` crate recognizes).
pub fn decode_image(bytes: &[u8]) -> SketchResult<image::DynamicImage> {
    if bytes.is_empty() {
        return Err(SketchError::unreadable_image("image bytes are empty"));
    }
    image::load_from_memory(bytes)
        .map_err(|e| SketchError::unreadable_image(format!("decode image from memory: {e}")))
}

/// Read and decode an image file from disk.
pub fn load_image_file(path: &Path) -> SketchResult<image::DynamicImage> {
    let bytes = std::fs::read(path).map_err(|e| {
        SketchError::unreadable_image(format!("read image '{}': {e}", path.display()))
    })?;
    image::load_from_memory(&bytes).map_err(|e| {
        SketchError::unreadable_image(format!("decode image '{}': {e}", path.display()))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
