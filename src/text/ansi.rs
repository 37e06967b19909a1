//! Decoding compiled ANSI text into styled cells.

use crate::buffer::Cell;
use crate::style::StyleState;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Forced line break inside one paragraph.
pub const LINE_BREAK: char = '\r';

/// Decode one paragraph into display lines of cells.
///
/// `style` is the style in effect when the paragraph starts. It is updated
/// in place so the next paragraph continues where this one stopped.
/// SGR and OSC 8 sequences change the style; other escapes and control
/// bytes are dropped. [`LINE_BREAK`] starts a new line.
pub fn decode_lines(paragraph: &str, style: &mut StyleState) -> Vec<Vec<Cell>> {
    let mut lines = vec![Vec::new()];
    let mut rest = paragraph;

    while !rest.is_empty() {
        let split = rest.find(['\x1b', LINE_BREAK]).unwrap_or(rest.len());
        if split > 0 {
            if let Some(line) = lines.last_mut() {
                push_graphemes(line, &rest[..split], style);
            }
            rest = &rest[split..];
            continue;
        }

        if let Some(after) = rest.strip_prefix(LINE_BREAK) {
            lines.push(Vec::new());
            rest = after;
        } else {
            rest = consume_escape(rest, style);
        }
    }
    lines
}

/// Apply the escape at the start of `input` and return what follows it.
fn consume_escape<'a>(input: &'a str, style: &mut StyleState) -> &'a str {
    let body = &input[1..];
    if let Some(csi) = body.strip_prefix('[') {
        // Parameter and intermediate bytes, then one final byte.
        let end = csi
            .bytes()
            .position(|b| (0x40..=0x7e).contains(&b))
            .unwrap_or(csi.len());
        if csi.as_bytes().get(end) == Some(&b'm') {
            style.apply_sgr(&csi[..end]);
        }
        return csi.get(end + 1..).unwrap_or("");
    }
    if let Some(osc) = body.strip_prefix(']') {
        let (end, terminator) = match (osc.find('\x07'), osc.find("\x1b\\")) {
            (Some(bel), Some(st)) if st < bel => (st, 2),
            (Some(bel), _) => (bel, 1),
            (None, Some(st)) => (st, 2),
            (None, None) => return "",
        };
        style.apply_osc(&osc[..end]);
        return &osc[end + terminator..];
    }
    // Two-byte escape: skip the following character.
    let mut chars = body.chars();
    chars.next();
    chars.as_str()
}

fn push_graphemes(line: &mut Vec<Cell>, text: &str, style: &StyleState) {
    for grapheme in text.graphemes(true) {
        if grapheme.chars().any(char::is_control) {
            continue;
        }
        match grapheme.width() {
            0 => {}
            1 => line.push(Cell::new(grapheme, style)),
            _ => {
                line.push(Cell::new(grapheme, style));
                line.push(Cell::wide_continuation(style));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::compile;
    use crate::style::{Attributes, ColorSpec};
    use pretty_assertions::assert_eq;

    fn symbols(line: &[Cell]) -> String {
        line.iter().map(Cell::symbol).collect()
    }

    #[test]
    fn test_plain_text() {
        let mut style = StyleState::new();
        let lines = decode_lines("abc", &mut style);
        assert_eq!(lines.len(), 1);
        assert_eq!(symbols(&lines[0]), "abc");
        assert!(lines[0].iter().all(|c| c.style().is_empty()));
    }

    #[test]
    fn test_compiled_markup_styles_cells() {
        let mut style = StyleState::new();
        let lines = decode_lines(&compile("a[b red]b[/]c").unwrap(), &mut style);
        let line = &lines[0];
        assert_eq!(symbols(line), "abc");
        assert!(line[0].style().is_empty());
        assert_eq!(line[1].style().active_fg(), Some(ColorSpec::System(1)));
        assert!(line[1].style().active_attributes().contains(Attributes::BOLD));
        assert!(line[2].style().is_empty());
        assert!(style.is_plain());
    }

    #[test]
    fn test_style_carries_across_calls() {
        let mut style = StyleState::new();
        decode_lines("\x1b[3mfirst", &mut style);
        let lines = decode_lines("second", &mut style);
        assert!(lines[0][0].style().active_attributes().contains(Attributes::ITALIC));
    }

    #[test]
    fn test_line_breaks_and_controls() {
        let mut style = StyleState::new();
        let lines = decode_lines("ab\rc\x07d\r", &mut style);
        let text: Vec<String> = lines.iter().map(|l| symbols(l)).collect();
        assert_eq!(text, vec!["ab", "cd", ""]);
    }

    #[test]
    fn test_hyperlinks_decoded() {
        let mut style = StyleState::new();
        let lines = decode_lines("\x1b]8;;https://a.io\x1b\\x\x1b]8;;\x07y", &mut style);
        assert_eq!(lines[0][0].style().active_link(), Some("https://a.io"));
        assert_eq!(lines[0][1].style().active_link(), None);
    }

    #[test]
    fn test_wide_graphemes_take_two_cells() {
        let mut style = StyleState::new();
        let lines = decode_lines("a日b", &mut style);
        let line = &lines[0];
        assert_eq!(line.len(), 4);
        assert!(line[2].is_wide_continuation());
    }

    #[test]
    fn test_non_sgr_csi_dropped() {
        let mut style = StyleState::new();
        let lines = decode_lines("\x1b[2Kok\x1b[5;1H", &mut style);
        assert_eq!(symbols(&lines[0]), "ok");
        assert!(style.is_empty());
    }
}
