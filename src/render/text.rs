use crate::assets::fonts::{TextBrushRgba8, TextEngine};
use crate::foundation::core::{Align, Region, Rgb8, VAlign};
use crate::foundation::error::{SketchError, SketchResult};
use crate::render::frame::Frame;
use crate::text::TextMeasure;
use crate::text::fit::{FitBounds, WrapResult, fit_text};
use crate::text::segments::SegmentParser;

/// How a text block is styled and placed inside its box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub color: Rgb8,
    pub bracket_color: Rgb8,
    pub align: Align,
    pub valign: VAlign,
    pub bounds: FitBounds,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Rgb8::BLACK,
            bracket_color: Rgb8::new(128, 0, 128),
            align: Align::Center,
            valign: VAlign::Middle,
            bounds: FitBounds::default(),
        }
    }
}

/// One colored run at its final canvas position (top-left of the run's layout box).
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedRun {
    pub text: String,
    pub color: Rgb8,
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

/// Fully resolved layout of a text block.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPlan {
    pub size: u32,
    pub line_height: f32,
    pub block_height: f32,
    /// Top edge of the block.
    pub top: f32,
    /// Number of display lines, blank ones included.
    pub line_count: usize,
    pub overflow: bool,
    pub runs: Vec<PlacedRun>,
}

/// Fit, wrap, colorize and position `text` inside `region`.
pub fn plan_text<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    region: Region,
    style: &TextStyle,
) -> TextPlan {
    let fit = fit_text(
        measure,
        text,
        region.width() as f32,
        region.height() as f32,
        style.bounds,
    );
    let size_px = fit.size as f32;
    let WrapResult {
        lines,
        line_height,
        block_height,
    } = fit.block;

    let top = style
        .valign
        .place(region.y1 as f32, region.y2 as f32, block_height);
    let mut parser = SegmentParser::new(style.color, style.bracket_color);
    let mut runs = Vec::new();
    let mut y = top;

    for line in &lines {
        if line.is_empty() {
            y += line_height;
            continue;
        }

        let segments = parser.parse_line(line);
        let widths: Vec<f32> = segments
            .iter()
            .map(|s| measure.advance(&s.text, size_px))
            .collect();
        let line_width: f32 = widths.iter().sum();

        let mut x = style
            .align
            .place(region.x1 as f32, region.x2 as f32, line_width);
        for (seg, width) in segments.into_iter().zip(widths) {
            runs.push(PlacedRun {
                text: seg.text,
                color: seg.color,
                x,
                y,
                width,
            });
            x += width;
        }
        y += line_height;
    }

    TextPlan {
        size: fit.size,
        line_height,
        block_height,
        top,
        line_count: lines.len(),
        overflow: fit.overflow,
        runs,
    }
}

/// Rasterize every run of `plan` and composite the glyphs over `canvas`.
pub fn draw_text(canvas: &mut Frame, engine: &mut TextEngine, plan: &TextPlan) -> SketchResult<()> {
    if plan.runs.is_empty() {
        return Ok(());
    }
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| SketchError::encode("canvas width exceeds the rasterizer limit"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| SketchError::encode("canvas height exceeds the rasterizer limit"))?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    for placed in &plan.runs {
        let layout = engine.layout(
            &placed.text,
            plan.size as f32,
            TextBrushRgba8::from(placed.color),
        );
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(placed.x),
            f64::from(placed.y),
        )));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                // Positioned glyphs carry pen offset and baseline. The run's face may be a fallback.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(run.run().font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);

    let layer = Frame {
        width: canvas.width,
        height: canvas.height,
        data: pixmap.data_as_u8_slice().to_vec(),
    };
    canvas.over_at(&layer, 0, 0);
    Ok(())
}

/// Draw `text` into `region` of `base`, then lay `overlay` over the whole canvas.
pub fn render_text(
    mut base: Frame,
    engine: &mut TextEngine,
    text: &str,
    region: Region,
    style: &TextStyle,
    overlay: Option<&Frame>,
) -> SketchResult<Frame> {
    let plan = plan_text(engine, text, region, style);
    tracing::debug!(
        size = plan.size,
        lines = plan.line_count,
        overflow = plan.overflow,
        "text planned"
    );
    draw_text(&mut base, engine, &plan)?;
    if let Some(overlay) = overlay {
        base.over_at(overlay, 0, 0);
    }
    Ok(base)
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
