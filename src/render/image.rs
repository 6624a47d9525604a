use image::imageops::FilterType;

use crate::foundation::core::{Align, Region, VAlign};
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::frame::Frame;

/// How a pasted picture is fitted into its box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasteStyle {
    pub align: Align,
    pub valign: VAlign,
    /// Inset applied to every side of the box.
    pub padding: i32,
    /// Allow scale factors above 1.
    pub allow_upscale: bool,
    /// Blend with the picture's own alpha instead of pasting it opaque.
    pub keep_alpha: bool,
}

impl Default for PasteStyle {
    fn default() -> Self {
        Self {
            align: Align::Center,
            valign: VAlign::Middle,
            padding: 12,
            allow_upscale: true,
            keep_alpha: true,
        }
    }
}

/// Where and how large the picture lands on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// The box after padding.
    pub area: Region,
    pub scale: f64,
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

/// Scale a `content_width x content_height` picture to fit `region` and align it.
pub fn plan_paste(
    region: Region,
    content_width: u32,
    content_height: u32,
    style: &PasteStyle,
) -> SketchResult<Placement> {
    if content_width == 0 || content_height == 0 {
        return Err(SketchError::unreadable_image("content image has no pixels"));
    }
    let area = region.inset(style.padding)?;

    let mut scale = (f64::from(area.width()) / f64::from(content_width))
        .min(f64::from(area.height()) / f64::from(content_height));
    if !style.allow_upscale && scale > 1.0 {
        scale = 1.0;
    }

    let width = ((f64::from(content_width) * scale) as u32).max(1);
    let height = ((f64::from(content_height) * scale) as u32).max(1);
    let x = style.align.place_px(area.x1, area.x2, width as i32);
    let y = style.valign.place_px(area.y1, area.y2, height as i32);

    Ok(Placement {
        area,
        scale,
        width,
        height,
        x,
        y,
    })
}

/// Resize `content` per `placement` and paste it onto `canvas`.
pub fn paste_image(
    canvas: &mut Frame,
    content: &image::DynamicImage,
    placement: &Placement,
    keep_alpha: bool,
) -> SketchResult<()> {
    let (w, h) = (placement.width, placement.height);
    let same_size = content.width() == w && content.height() == h;

    if keep_alpha && content.color().has_alpha() {
        // Resample premultiplied so transparent pixels do not bleed their color.
        let premul = Frame::from_image(content);
        let layer = if same_size {
            premul
        } else {
            resample_premul(premul, w, h)?
        };
        canvas.over_at(&layer, placement.x, placement.y);
    } else {
        let rgb = content.to_rgb8();
        let rgb = if same_size {
            rgb
        } else {
            image::imageops::resize(&rgb, w, h, FilterType::Lanczos3)
        };
        let opaque = image::DynamicImage::ImageRgb8(rgb).to_rgba8();
        canvas.replace_at(&Frame::from_rgba_image(opaque), placement.x, placement.y);
    }
    Ok(())
}

/// Lanczos resize of a premultiplied frame to `width x height`.
fn resample_premul(layer: Frame, width: u32, height: u32) -> SketchResult<Frame> {
    let buf = image::RgbaImage::from_raw(layer.width, layer.height, layer.data)
        .ok_or_else(|| SketchError::encode("premultiplied picture does not match its dimensions"))?;
    Ok(Frame {
        width,
        height,
        data: image::imageops::resize(&buf, width, height, FilterType::Lanczos3).into_raw(),
    })
}

/// Paste `content` into `region` of `base`, then lay `overlay` over the whole canvas.
pub fn composite_image(
    mut base: Frame,
    content: &image::DynamicImage,
    region: Region,
    style: &PasteStyle,
    overlay: Option<&Frame>,
) -> SketchResult<Frame> {
    let placement = plan_paste(region, content.width(), content.height(), style)?;
    tracing::debug!(
        scale = placement.scale,
        width = placement.width,
        height = placement.height,
        x = placement.x,
        y = placement.y,
        "image placed"
    );
    paste_image(&mut base, content, &placement, style.keep_alpha)?;
    if let Some(overlay) = overlay {
        base.over_at(overlay, 0, 0);
    }
    Ok(base)
}

#[cfg(test)]
#[path = "../../tests/unit/render/image.rs"]
mod tests;
