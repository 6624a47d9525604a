use super::*;
use crate::text::FixedAdvance;

const INK: Rgb8 = Rgb8::new(0, 0, 0);
const HI: Rgb8 = Rgb8::new(128, 0, 128);

fn region() -> Region {
    Region::new(10, 20, 210, 120).unwrap()
}

fn style(max_size: u32, align: Align, valign: VAlign) -> TextStyle {
    TextStyle {
        color: INK,
        bracket_color: HI,
        align,
        valign,
        bounds: FitBounds {
            min_size: 1,
            max_size,
            line_spacing: 0.0,
        },
    }
}

fn plan(text: &str, style: &TextStyle) -> TextPlan {
    let mut m = FixedAdvance { em: 1.0 };
    plan_text(&mut m, text, region(), style)
}

#[test]
fn single_line_fills_width_and_centers_vertically() {
    let p = plan("abcd", &style(96, Align::Center, VAlign::Middle));
    assert_eq!(p.size, 50);
    assert_eq!(p.line_count, 1);
    assert_eq!(p.block_height, 50.0);
    assert_eq!(p.top, 45.0);
    assert_eq!(p.runs.len(), 1);
    assert_eq!((p.runs[0].x, p.runs[0].y), (10.0, 45.0));
    assert!(!p.overflow);
}

#[test]
fn horizontal_alignment_uses_line_width() {
    let cases = [(Align::Left, 10.0), (Align::Center, 90.0), (Align::Right, 170.0)];
    for (align, x) in cases {
        let p = plan("ab", &style(20, align, VAlign::Middle));
        assert_eq!(p.size, 20);
        assert_eq!(p.runs[0].x, x, "{align:?}");
        assert_eq!(p.runs[0].width, 40.0);
    }
}

#[test]
fn vertical_alignment_uses_block_height() {
    let cases = [(VAlign::Top, 20.0), (VAlign::Middle, 60.0), (VAlign::Bottom, 100.0)];
    for (valign, y) in cases {
        let p = plan("ab", &style(20, Align::Left, valign));
        assert_eq!(p.top, y, "{valign:?}");
        assert_eq!(p.runs[0].y, y);
    }
}

#[test]
fn bracket_color_carries_across_wrapped_lines() {
    let p = plan("a [b\nc] d", &style(10, Align::Center, VAlign::Middle));
    assert_eq!(p.size, 10);
    let got: Vec<(&str, Rgb8, f32, f32)> = p
        .runs
        .iter()
        .map(|r| (r.text.as_str(), r.color, r.x, r.y))
        .collect();
    assert_eq!(
        got,
        vec![
            ("a ", INK, 90.0, 60.0),
            ("[", HI, 110.0, 60.0),
            ("b", HI, 120.0, 60.0),
            ("c", HI, 90.0, 70.0),
            ("]", HI, 100.0, 70.0),
            (" d", INK, 110.0, 70.0),
        ]
    );
}

#[test]
fn blank_lines_only_advance_the_pen() {
    let p = plan("a\n\nb", &style(10, Align::Left, VAlign::Top));
    assert_eq!(p.line_count, 3);
    assert_eq!(p.runs.len(), 2);
    assert_eq!(p.runs[0].y, 20.0);
    assert_eq!(p.runs[1].y, 40.0);
}

#[test]
fn overflowing_text_is_still_planned() {
    let s = TextStyle {
        bounds: FitBounds {
            min_size: 60,
            max_size: 96,
            line_spacing: 0.15,
        },
        ..style(96, Align::Left, VAlign::Top)
    };
    let p = plan("one two three four five", &s);
    assert!(p.overflow);
    assert_eq!(p.size, 60);
    assert!(p.block_height > 100.0);
    assert!(!p.runs.is_empty());
}

fn system_engine() -> Option<TextEngine> {
    let lib = crate::assets::fonts::FontLibrary::system_default();
    if !lib.is_available() {
        eprintln!("skipping: no system font available");
        return None;
    }
    TextEngine::new(&lib).ok()
}

/// Bounding box `(x0, y0, x1, y1)` of pixels differing from `paper`, inclusive.
fn ink_bbox(frame: &Frame, paper: [u8; 4]) -> Option<(u32, u32, u32, u32)> {
    let mut bbox: Option<(u32, u32, u32, u32)> = None;
    for y in 0..frame.height {
        for x in 0..frame.width {
            if frame.pixel(x, y) == paper {
                continue;
            }
            bbox = Some(match bbox {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    bbox
}

#[test]
fn drawn_glyphs_span_the_run_and_sit_inside_the_line() {
    let Some(mut engine) = system_engine() else {
        return;
    };
    let paper = [255, 255, 255, 255];
    let mut canvas = Frame::filled(600, 300, paper);
    let region = Region::new(0, 100, 600, 200).unwrap();
    let style = TextStyle {
        bounds: FitBounds {
            min_size: 40,
            max_size: 40,
            line_spacing: 0.15,
        },
        ..style(40, Align::Left, VAlign::Top)
    };

    let plan = plan_text(&mut engine, "WWWWWWWW", region, &style);
    assert_eq!(plan.runs.len(), 1);
    let run = plan.runs[0].clone();
    draw_text(&mut canvas, &mut engine, &plan).unwrap();

    let (x0, y0, x1, y1) = ink_bbox(&canvas, paper).expect("no ink drawn");
    let ink_width = (x1 - x0 + 1) as f32;
    assert!(
        ink_width > run.width * 0.8 && ink_width < run.width + 4.0,
        "ink {x0}..{x1} vs run x={} width={}",
        run.x,
        run.width
    );
    assert!(x0 as f32 >= run.x - 2.0);
    assert!(
        y0 as f32 >= run.y && y1 as f32 <= run.y + plan.line_height,
        "ink rows {y0}..{y1} vs line {}..{}",
        run.y,
        run.y + plan.line_height
    );
}
