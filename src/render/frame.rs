use std::io::Cursor;

use crate::foundation::error::{SketchError, SketchResult};
use crate::foundation::math::{
    premul_over, premultiply_rgba8_in_place, unpremultiply_rgba8_in_place,
};

/// Canvas pixel buffer owned by a single render call.
///
/// `data` is tightly packed, row-major, premultiplied RGBA8. Straight alpha only appears at the
/// decode and encode boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes.
    pub data: Vec<u8>,
}

impl Frame {
    /// Fully transparent frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Frame filled with one straight-alpha color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut out = Self::new(width, height);
        let mut px = rgba;
        premultiply_rgba8_in_place(&mut px);
        for dst in out.data.chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
        out
    }

    /// Convert any decoded image, keeping its alpha channel.
    pub fn from_image(img: &image::DynamicImage) -> Self {
        Self::from_rgba_image(img.to_rgba8())
    }

    /// Take ownership of a straight-alpha RGBA buffer.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        premultiply_rgba8_in_place(&mut data);
        Self {
            width,
            height,
            data,
        }
    }

    /// Straight-alpha copy of the frame.
    pub fn to_rgba_image(&self) -> SketchResult<image::RgbaImage> {
        let mut data = self.data.clone();
        unpremultiply_rgba8_in_place(&mut data);
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| SketchError::encode("frame byte length does not match its dimensions"))
    }

    /// Premultiplied pixel at `(x, y)`; transparent outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Composite `src` over this frame with its top-left corner at `(x, y)`.
    ///
    /// Pixels falling outside the frame are dropped.
    pub fn over_at(&mut self, src: &Frame, x: i32, y: i32) {
        self.blit(src, x, y, |d, s| {
            let out = premul_over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        });
    }

    /// Copy `src` into this frame at `(x, y)`, replacing whatever was there.
    pub fn replace_at(&mut self, src: &Frame, x: i32, y: i32) {
        self.blit(src, x, y, |d, s| d.copy_from_slice(s));
    }

    fn blit(&mut self, src: &Frame, x: i32, y: i32, mut op: impl FnMut(&mut [u8], &[u8])) {
        let dst_w = i64::from(self.width);
        let dst_h = i64::from(self.height);
        let (x, y) = (i64::from(x), i64::from(y));

        let col0 = (-x).max(0);
        let row0 = (-y).max(0);
        let col1 = i64::from(src.width).min(dst_w - x);
        let row1 = i64::from(src.height).min(dst_h - y);
        if col0 >= col1 || row0 >= row1 {
            return;
        }

        let span = ((col1 - col0) as usize) * 4;
        for row in row0..row1 {
            let s_idx = ((row * i64::from(src.width) + col0) * 4) as usize;
            let d_idx = (((y + row) * dst_w + x + col0) * 4) as usize;
            let s = &src.data[s_idx..s_idx + span];
            let d = &mut self.data[d_idx..d_idx + span];
            for (dp, sp) in d.chunks_exact_mut(4).zip(s.chunks_exact(4)) {
                op(dp, sp);
            }
        }
    }

    /// Lossless PNG with the full alpha channel.
    pub fn encode_png(&self) -> SketchResult<Vec<u8>> {
        let rgba = self.to_rgba_image()?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(rgba)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| SketchError::encode(format!("write png: {e}")))?;
        Ok(buf)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
