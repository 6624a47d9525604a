//! CPU compositing onto a premultiplied RGBA canvas.

/// Canvas buffer and PNG encoding.
pub mod frame;
/// Picture scaling and pasting.
pub mod image;
/// Text planning and glyph rasterization.
pub mod text;
