use crate::text::{SizedFont, TextMeasure};

/// Break `text` into display lines no wider than `max_width` where possible.
///
/// Paragraphs (split on newlines) wrap independently. A paragraph containing a space packs
/// whole words; one without spaces packs single characters, which is what scripts like CJK
/// need. A word wider than the line is split character by character. A line only exceeds
/// `max_width` when one character (or a one-character word) is already too wide on its own.
/// A paragraph that yields nothing, empty or all spaces, becomes exactly one empty line.
pub fn wrap_lines<M: TextMeasure + ?Sized>(
    text: &str,
    font: &mut SizedFont<'_, M>,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut paragraphs = text.lines().peekable();
    if paragraphs.peek().is_none() {
        lines.push(String::new());
        return lines;
    }
    for para in paragraphs {
        let before = lines.len();
        wrap_paragraph(para, font, max_width, &mut lines);
        if lines.len() == before {
            lines.push(String::new());
        }
    }
    lines
}

fn wrap_paragraph<M: TextMeasure + ?Sized>(
    para: &str,
    font: &mut SizedFont<'_, M>,
    max_width: f32,
    lines: &mut Vec<String>,
) {
    let word_mode = para.contains(' ');
    let units: Vec<&str> = if word_mode {
        para.split(' ').collect()
    } else {
        para.char_indices()
            .map(|(i, ch)| &para[i..i + ch.len_utf8()])
            .collect()
    };

    let mut buf = String::new();
    for unit in units {
        let trial = if buf.is_empty() {
            unit.to_string()
        } else if word_mode {
            format!("{buf} {unit}")
        } else {
            format!("{buf}{unit}")
        };

        if font.width(&trial) <= max_width {
            buf = trial;
            continue;
        }

        if !buf.is_empty() {
            lines.push(std::mem::take(&mut buf));
        }

        if word_mode && unit.chars().count() > 1 {
            buf = split_long_word(unit, font, max_width, lines);
        } else if font.width(unit) <= max_width {
            buf = unit.to_string();
        } else {
            lines.push(unit.to_string());
        }
    }

    if !buf.is_empty() {
        lines.push(buf);
    }
}

/// Pack the characters of one overlong word; the unfinished tail is returned as the new buffer.
fn split_long_word<M: TextMeasure + ?Sized>(
    word: &str,
    font: &mut SizedFont<'_, M>,
    max_width: f32,
    lines: &mut Vec<String>,
) -> String {
    let mut tmp = String::new();
    for ch in word.chars() {
        let mut trial = tmp.clone();
        trial.push(ch);
        if font.width(&trial) <= max_width {
            tmp = trial;
        } else {
            if !tmp.is_empty() {
                lines.push(std::mem::take(&mut tmp));
            }
            tmp.push(ch);
        }
    }
    tmp
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
