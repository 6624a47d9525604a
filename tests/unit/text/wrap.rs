use super::*;
use crate::text::FixedAdvance;

/// Every character is `size` pixels wide.
fn mono() -> FixedAdvance {
    FixedAdvance { em: 1.0 }
}

fn wrap(text: &str, size: u32, max_width: f32) -> Vec<String> {
    let mut m = mono();
    let mut font = SizedFont::new(&mut m, size);
    wrap_lines(text, &mut font, max_width)
}

#[test]
fn words_pack_greedily() {
    assert_eq!(wrap("hello world", 10, 60.0), vec!["hello", "world"]);
    assert_eq!(wrap("hello world", 10, 110.0), vec!["hello world"]);
    assert_eq!(wrap("a b c d e", 10, 30.0), vec!["a b", "c d", "e"]);
}

#[test]
fn scripts_without_spaces_pack_characters() {
    assert_eq!(wrap("一二三四五", 10, 30.0), vec!["一二三", "四五"]);
}

#[test]
fn overlong_word_splits_by_character() {
    assert_eq!(
        wrap("abcdefgh ij", 10, 30.0),
        vec!["abc", "def", "gh", "ij"]
    );
}

#[test]
fn character_wider_than_line_gets_its_own_line() {
    assert_eq!(wrap("ab", 10, 5.0), vec!["a", "b"]);
    assert_eq!(wrap("a b", 10, 5.0), vec!["a", "b"]);
    assert_eq!(wrap("ab cd", 10, 5.0), vec!["a", "b", "c", "d"]);
}

#[test]
fn paragraphs_wrap_independently_and_keep_blank_lines() {
    assert_eq!(wrap("ab\ncd", 10, 100.0), vec!["ab", "cd"]);
    assert_eq!(wrap("a\n\nb", 10, 100.0), vec!["a", "", "b"]);
    assert_eq!(wrap("a\n\n\nb", 10, 100.0), vec!["a", "", "", "b"]);
    assert_eq!(wrap("a\r\nb", 10, 100.0), vec!["a", "b"]);
}

#[test]
fn blank_input_yields_one_empty_line() {
    assert_eq!(wrap("", 10, 100.0), vec![""]);
    assert_eq!(wrap("   ", 10, 100.0), vec![""]);
}

#[test]
fn repeated_spaces_survive_inside_a_line() {
    assert_eq!(wrap("a  b", 10, 100.0), vec!["a  b"]);
}

#[test]
fn lines_never_exceed_width_unless_single_character() {
    let samples = [
        "the quick brown fox jumps over the lazy dog",
        "supercalifragilistic is long",
        "今天天气很好我们去公园散步吧",
        "mixed 中文 and english words",
        "x\n\ny z\nlonglonglonglong",
    ];
    for text in samples {
        for size in [3, 7, 12, 20] {
            for max_width in [15.0, 40.0, 75.0] {
                let mut m = mono();
                let lines = wrap(text, size, max_width);
                for line in &lines {
                    let w = m.advance(line, size as f32);
                    assert!(
                        w <= max_width || line.chars().count() == 1,
                        "{text:?} size={size} max={max_width}: {line:?} is {w}px"
                    );
                }
            }
        }
    }
}

#[test]
fn smaller_font_never_wraps_into_more_lines() {
    let samples = [
        "the quick brown fox jumps over the lazy dog",
        "今天天气很好我们去公园散步吧",
        "a [bracketed] phrase\nsecond paragraph here",
    ];
    for text in samples {
        for max_width in [40.0, 200.0] {
            for size in 1..64 {
                let n = wrap(text, size, max_width).len();
                let bigger = wrap(text, size + 1, max_width).len();
                assert!(
                    n <= bigger,
                    "{text:?}: size {size} -> {n} lines, {} -> {bigger}",
                    size + 1
                );
            }
        }
    }
}
