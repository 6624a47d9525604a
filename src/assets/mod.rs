//! Decoding of templates and pictures, and the font library.

pub mod decode;
pub mod fonts;
