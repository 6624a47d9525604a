use crate::foundation::core::Rgb8;

/// One colored run of a display line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub color: Rgb8,
}

fn is_open(ch: char) -> bool {
    matches!(ch, '[' | '【')
}

fn is_close(ch: char) -> bool {
    matches!(ch, ']' | '】')
}

/// Split `line` into colored runs.
///
/// Text inside `[...]` / `【...】` takes `bracket`, everything else `default`. Each marker is its
/// own one-character run in `bracket`. The returned flag is the bracket state after the line,
/// to be fed into the next line.
pub fn parse_segments(
    line: &str,
    mut in_bracket: bool,
    default: Rgb8,
    bracket: Rgb8,
) -> (Vec<Segment>, bool) {
    let mut segs = Vec::new();
    let mut buf = String::new();

    fn flush(buf: &mut String, color: Rgb8, segs: &mut Vec<Segment>) {
        if !buf.is_empty() {
            segs.push(Segment {
                text: std::mem::take(buf),
                color,
            });
        }
    }

    for ch in line.chars() {
        if is_open(ch) {
            flush(&mut buf, if in_bracket { bracket } else { default }, &mut segs);
            segs.push(Segment {
                text: ch.to_string(),
                color: bracket,
            });
            in_bracket = true;
        } else if is_close(ch) {
            flush(&mut buf, bracket, &mut segs);
            segs.push(Segment {
                text: ch.to_string(),
                color: bracket,
            });
            in_bracket = false;
        } else {
            buf.push(ch);
        }
    }
    flush(&mut buf, if in_bracket { bracket } else { default }, &mut segs);

    (segs, in_bracket)
}

/// Stateful wrapper carrying bracket state from one line to the next within a render.
#[derive(Clone, Debug)]
pub struct SegmentParser {
    default: Rgb8,
    bracket: Rgb8,
    in_bracket: bool,
}

impl SegmentParser {
    pub fn new(default: Rgb8, bracket: Rgb8) -> Self {
        Self {
            default,
            bracket,
            in_bracket: false,
        }
    }

    /// Whether a bracket opened on an earlier line is still unclosed.
    pub fn in_bracket(&self) -> bool {
        self.in_bracket
    }

    pub fn parse_line(&mut self, line: &str) -> Vec<Segment> {
        let (segs, state) = parse_segments(line, self.in_bracket, self.default, self.bracket);
        self.in_bracket = state;
        segs
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/segments.rs"]
mod tests;
