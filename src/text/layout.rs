//! Text layout: wrapping, alignment and the scroll window.
//!
//! Node text is a string of paragraphs separated by `\n`. Each paragraph
//! may hold forced line breaks ([`LINE_BREAK`](super::LINE_BREAK)) and
//! compiled ANSI styling.
//! [`TextLayout::layout`] turns it into at most one row of cells per
//! viewport line, plus the overflow indicators the caller should draw.

use super::ansi::decode_lines;
use crate::buffer::Cell;
use crate::layout::{align, Align};
use crate::style::{Attributes, StyleState};

/// One row of cells.
pub type Line = Vec<Cell>;

/// Per-axis policy for content larger than the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Overflow {
    /// Break long lines at the viewport width.
    #[default]
    Wrap,
    /// Cut off what does not fit.
    Hidden,
    /// Keep everything and let the user scroll.
    Scroll,
}

/// How a node's paragraphs are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Contains {
    /// Free text, scrolled line by line.
    #[default]
    Text,
    /// A list of selectable entries, one per paragraph. The selected entry
    /// is kept centered.
    List,
}

/// Scroll offsets. Clamped by every layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Scroll {
    /// First visible column.
    pub x: usize,
    /// First visible line, or the selected entry for lists.
    pub y: usize,
}

/// Which edges have hidden content behind them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Indicators {
    /// More lines than fit, vertical scrolling.
    pub up: bool,
    /// Same condition as `up`; drawn at the bottom edge.
    pub down: bool,
    /// Lines wider than the viewport, horizontal scrolling.
    pub left: bool,
    /// Same condition as `left`; drawn at the right edge.
    pub right: bool,
}

impl Indicators {
    /// Up-arrow glyph.
    pub const UP: &'static str = "⮝";
    /// Down-arrow glyph.
    pub const DOWN: &'static str = "⮟";
    /// Left-arrow glyph.
    pub const LEFT: &'static str = "⮜";
    /// Right-arrow glyph.
    pub const RIGHT: &'static str = "⮞";

    /// True when any indicator is shown.
    pub const fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Laid-out viewport content.
#[derive(Debug, Clone, Default)]
pub struct TextBlock {
    /// Visible lines, already scrolled and vertically aligned. Lines that
    /// do not wrap can be wider than the viewport; the caller clips them.
    pub lines: Vec<Line>,
    /// Overflow indicators to draw.
    pub indicators: Indicators,
}

/// Settings for one layout pass over one viewport.
#[derive(Debug, Clone)]
pub struct TextLayout {
    width: usize,
    height: usize,
    overflow_x: Overflow,
    overflow_y: Overflow,
    text_align: Align,
    align_items: Align,
    contains: Contains,
    highlight: StyleState,
}

impl TextLayout {
    /// A layout for a `width` by `height` viewport with default settings.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: usize::from(width),
            height: usize::from(height),
            overflow_x: Overflow::Wrap,
            overflow_y: Overflow::Scroll,
            text_align: Align::Start,
            align_items: Align::Start,
            contains: Contains::Text,
            highlight: StyleState::new().with_open(Attributes::BOLD),
        }
    }

    /// Builder: overflow policy per axis.
    ///
    /// A vertical `Wrap` means nothing and is treated as `Scroll`.
    #[must_use]
    pub const fn with_overflow(mut self, horizontal: Overflow, vertical: Overflow) -> Self {
        self.overflow_x = horizontal;
        self.overflow_y = match vertical {
            Overflow::Wrap => Overflow::Scroll,
            other => other,
        };
        self
    }

    /// Builder: horizontal alignment of each line.
    #[must_use]
    pub const fn with_text_align(mut self, align: Align) -> Self {
        self.text_align = align;
        self
    }

    /// Builder: vertical alignment of the lines inside the viewport.
    #[must_use]
    pub const fn with_align_items(mut self, align: Align) -> Self {
        self.align_items = align;
        self
    }

    /// Builder: text or list mode.
    #[must_use]
    pub const fn with_contains(mut self, contains: Contains) -> Self {
        self.contains = contains;
        self
    }

    /// Builder: style layered onto the selected list entry. Bold by default.
    #[must_use]
    pub fn with_highlight(mut self, highlight: StyleState) -> Self {
        self.highlight = highlight;
        self
    }

    /// Lay out `text`, clamping `scroll` to the content in the process.
    pub fn layout(&self, text: &str, scroll: &mut Scroll) -> TextBlock {
        let mut entries = decode_entries(text);
        let mut block = TextBlock::default();
        if entries.is_empty() {
            *scroll = Scroll::default();
            return block;
        }

        let mut lines = if self.overflow_y == Overflow::Hidden {
            scroll.y = 0;
            let mut visible: Vec<Line> = Vec::new();
            for entry in &entries {
                if visible.len() >= self.height {
                    break;
                }
                visible.extend(self.wrap_entry(entry));
            }
            visible.truncate(self.height);
            visible
        } else {
            match self.contains {
                Contains::Text => self.scroll_text(&entries, scroll, &mut block.indicators),
                Contains::List => self.scroll_list(&mut entries, scroll, &mut block.indicators),
            }
        };

        if self.overflow_x == Overflow::Scroll {
            let longest = lines.iter().map(Vec::len).max().unwrap_or(0);
            if longest > self.width {
                block.indicators.left = true;
                block.indicators.right = true;
            }
            scroll.x = scroll.x.min(longest.saturating_sub(self.width));
            for line in &mut lines {
                let skip = scroll.x.min(line.len());
                line.drain(..skip);
                if line.first().is_some_and(Cell::is_wide_continuation) {
                    line[0] = Cell::blank();
                }
            }
        } else {
            scroll.x = 0;
        }

        block.lines = align(lines, self.height, &Vec::new(), self.align_items);
        block
    }

    fn scroll_text(&self, entries: &[Entry], scroll: &mut Scroll, indicators: &mut Indicators) -> Vec<Line> {
        let mut lines: Vec<Line> = entries.iter().flat_map(|e| self.wrap_entry(e)).collect();
        let total = lines.len();
        if total > self.height && self.overflow_y == Overflow::Scroll {
            indicators.up = true;
            indicators.down = true;
        }
        let max = total.saturating_sub(self.height).saturating_sub(1);
        scroll.y = scroll.y.min(max);
        lines.drain(..scroll.y);
        lines.truncate(self.height);
        lines
    }

    fn scroll_list(
        &self,
        entries: &mut [Entry],
        scroll: &mut Scroll,
        indicators: &mut Indicators,
    ) -> Vec<Line> {
        scroll.y = scroll.y.min(entries.len() - 1);
        let selected = scroll.y;
        for cell in entries[selected].iter_mut().flatten() {
            let style = cell.style().merge(&self.highlight);
            cell.set_style(&style);
        }

        let before: Vec<Line> = entries[..selected].iter().flat_map(|e| self.wrap_entry(e)).collect();
        let current = self.wrap_entry(&entries[selected]);
        let after: Vec<Line> = entries[selected + 1..].iter().flat_map(|e| self.wrap_entry(e)).collect();

        if before.len() + current.len() + after.len() > self.height && self.overflow_y == Overflow::Scroll {
            indicators.up = true;
            indicators.down = true;
        }

        let (above, below) = list_window(before.len(), current.len(), after.len(), self.height);
        let mut lines = Vec::with_capacity(above + current.len() + below);
        let skip = before.len() - above;
        lines.extend(before.into_iter().skip(skip));
        lines.extend(current);
        lines.extend(after.into_iter().take(below));
        lines.truncate(self.height);
        lines
    }

    /// Wrap or pad each forced line of one entry to the viewport width.
    fn wrap_entry(&self, entry: &Entry) -> Vec<Line> {
        let mut out = Vec::with_capacity(entry.len());
        for line in entry {
            if self.overflow_x == Overflow::Wrap && self.width > 0 && line.len() > self.width {
                let mut chunks = wrap(line, self.width);
                if let Some(last) = chunks.pop() {
                    let filled: Vec<Line> = chunks
                        .into_iter()
                        .map(|chunk| align(chunk, self.width, &Cell::blank(), Align::Start))
                        .collect();
                    out.extend(filled);
                    out.push(align(last, self.width, &Cell::blank(), self.text_align));
                }
            } else {
                out.push(align(line.clone(), self.width, &Cell::blank(), self.text_align));
            }
        }
        out
    }
}

/// One paragraph: its forced lines, unwrapped.
type Entry = Vec<Line>;

/// The non-empty paragraphs of node text, one per entry.
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').filter(|paragraph| !paragraph.is_empty())
}

fn decode_entries(text: &str) -> Vec<Entry> {
    let mut style = StyleState::new();
    paragraphs(text)
        .map(|paragraph| decode_lines(paragraph, &mut style))
        .collect()
}

/// Split `line` into chunks of at most `width` cells without separating
/// a wide grapheme from its continuation.
fn wrap(line: &[Cell], width: usize) -> Vec<Line> {
    let mut chunks = Vec::with_capacity(line.len() / width + 1);
    let mut current: Line = Vec::with_capacity(width);
    let mut i = 0;
    while i < line.len() {
        let unit = if line.get(i + 1).is_some_and(Cell::is_wide_continuation) {
            2
        } else {
            1
        };
        if current.len() + unit > width && !current.is_empty() {
            chunks.push(std::mem::replace(&mut current, Vec::with_capacity(width)));
        }
        current.extend_from_slice(&line[i..(i + unit).min(line.len())]);
        i += unit;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Lines shown `(above, below)` a selected entry of `selected` lines when
/// `before` lines precede it and `after` lines follow, in a viewport of
/// `height` lines.
///
/// The free space is split evenly, the odd line going below. A side with
/// fewer lines than its share gives the rest to the other side.
pub fn list_window(before: usize, selected: usize, after: usize, height: usize) -> (usize, usize) {
    let free = height.saturating_sub(selected);
    let mut above = free / 2;
    let mut below = free - above;
    if above > before {
        below = (below + above - before).min(after);
        above = before;
    }
    if below > after {
        above = (above + below - after).min(before);
        below = after;
    }
    (above, below)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Attributes, ColorSpec};
    use pretty_assertions::assert_eq;

    fn rows(block: &TextBlock) -> Vec<String> {
        block
            .lines
            .iter()
            .map(|line| line.iter().filter(|c| !c.is_wide_continuation()).map(Cell::symbol).collect())
            .collect()
    }

    fn numbered(n: usize) -> String {
        (0..n).map(|i| format!("\n{i}")).collect()
    }

    #[test]
    fn test_wrap_exact_multiple() {
        let layout = TextLayout::new(4, 10);
        let block = layout.layout("abcdefghijkl", &mut Scroll::default());
        assert_eq!(rows(&block)[..3].to_vec(), vec!["abcd", "efgh", "ijkl"]);
        assert!(block.lines[..3].iter().all(|l| l.len() == 4));
        assert!(block.lines[3..].iter().all(Vec::is_empty));
    }

    #[test]
    fn test_wrap_aligns_last_chunk() {
        let layout = TextLayout::new(4, 2).with_text_align(Align::End);
        let block = layout.layout("abcdef", &mut Scroll::default());
        assert_eq!(rows(&block), ["abcd", "  ef"]);
    }

    #[test]
    fn test_wrap_keeps_wide_pairs_together() {
        let layout = TextLayout::new(3, 3);
        let block = layout.layout("ab日c", &mut Scroll::default());
        assert_eq!(rows(&block), ["ab ", "日c", ""]);
    }

    #[test]
    fn test_nowrap_line_exceeds_width() {
        let layout = TextLayout::new(3, 1).with_overflow(Overflow::Hidden, Overflow::Scroll);
        let block = layout.layout("abcdef", &mut Scroll::default());
        assert_eq!(block.lines[0].len(), 6);
        assert!(!block.indicators.any());
    }

    #[test]
    fn test_forced_breaks_and_center() {
        let layout = TextLayout::new(5, 3).with_text_align(Align::Center);
        let block = layout.layout("ab\rc", &mut Scroll::default());
        assert_eq!(rows(&block), [" ab  ", "  c  ", ""]);
    }

    #[test]
    fn test_empty_text() {
        let mut scroll = Scroll { x: 3, y: 4 };
        let block = TextLayout::new(5, 3).layout("", &mut scroll);
        assert!(block.lines.is_empty());
        assert_eq!(scroll, Scroll::default());
    }

    #[test]
    fn test_text_scroll_clamps_and_indicates() {
        let layout = TextLayout::new(2, 3);
        let mut scroll = Scroll { x: 0, y: 100 };
        let block = layout.layout(&numbered(10), &mut scroll);
        // 10 lines in 3 rows: at most 10 - 3 - 1.
        assert_eq!(scroll.y, 6);
        assert_eq!(rows(&block), ["6 ", "7 ", "8 "]);
        assert!(block.indicators.up && block.indicators.down);
    }

    #[test]
    fn test_hidden_vertical_truncates() {
        let layout = TextLayout::new(2, 3).with_overflow(Overflow::Wrap, Overflow::Hidden);
        let mut scroll = Scroll { x: 0, y: 5 };
        let block = layout.layout(&numbered(10), &mut scroll);
        assert_eq!(rows(&block), ["0 ", "1 ", "2 "]);
        assert!(!block.indicators.any());
    }

    #[test]
    fn test_hidden_vertical_resets_stale_offset() {
        let mut scroll = Scroll { x: 0, y: 5 };
        TextLayout::new(2, 3).layout(&numbered(10), &mut scroll);
        assert_eq!(scroll.y, 5);

        let hidden = TextLayout::new(2, 3).with_overflow(Overflow::Wrap, Overflow::Hidden);
        hidden.layout(&numbered(10), &mut scroll);
        assert_eq!(scroll.y, 0);
    }

    #[test]
    fn test_list_centering() {
        let layout = TextLayout::new(2, 5).with_contains(Contains::List);

        let mut scroll = Scroll { x: 0, y: 10 };
        let block = layout.layout(&numbered(20), &mut scroll);
        assert_eq!(rows(&block), ["8 ", "9 ", "10", "11", "12"]);

        let mut scroll = Scroll::default();
        let block = layout.layout(&numbered(20), &mut scroll);
        assert_eq!(rows(&block), ["0 ", "1 ", "2 ", "3 ", "4 "]);

        let mut scroll = Scroll { x: 0, y: 99 };
        let block = layout.layout(&numbered(20), &mut scroll);
        assert_eq!(scroll.y, 19);
        assert_eq!(rows(&block), ["15", "16", "17", "18", "19"]);
    }

    #[test]
    fn test_list_selected_entry_is_highlighted() {
        let white = StyleState::new()
            .with_open(Attributes::BOLD)
            .with_fg(ColorSpec::System(7));
        let layout = TextLayout::new(3, 3)
            .with_contains(Contains::List)
            .with_highlight(white);
        let block = layout.layout("\na\nb\nc", &mut Scroll { x: 0, y: 1 });

        let selected = &block.lines[1][0];
        assert!(selected.style().active_attributes().contains(Attributes::BOLD));
        assert_eq!(selected.style().active_fg(), Some(ColorSpec::System(7)));
        assert!(block.lines[0][0].style().is_empty());
        // Padding after the entry stays plain.
        assert!(block.lines[1][1].style().is_empty());
    }

    #[test]
    fn test_list_window_handles_tall_selection() {
        assert_eq!(list_window(4, 9, 4, 5), (0, 0));
        assert_eq!(list_window(0, 1, 19, 5), (0, 4));
        assert_eq!(list_window(19, 1, 0, 5), (4, 0));
        assert_eq!(list_window(1, 1, 1, 5), (1, 1));
        assert_eq!(list_window(10, 1, 9, 5), (2, 2));
    }

    #[test]
    fn test_horizontal_scroll() {
        let layout = TextLayout::new(3, 2).with_overflow(Overflow::Scroll, Overflow::Scroll);
        let mut scroll = Scroll { x: 10, y: 0 };
        let block = layout.layout("abcdef\nxy", &mut scroll);
        assert_eq!(scroll.x, 3);
        assert_eq!(rows(&block), ["def", ""]);
        assert!(block.indicators.left && block.indicators.right);
        assert!(!block.indicators.up);
    }

    #[test]
    fn test_horizontal_scroll_splits_wide_glyph() {
        let layout = TextLayout::new(2, 1).with_overflow(Overflow::Scroll, Overflow::Scroll);
        let block = layout.layout("日本語", &mut Scroll { x: 1, y: 0 });
        assert!(block.lines[0][0].is_blank());
        assert_eq!(block.lines[0][1].symbol(), "本");
    }

    #[test]
    fn test_vertical_alignment() {
        let layout = TextLayout::new(1, 4).with_align_items(Align::End);
        let block = layout.layout("a", &mut Scroll::default());
        assert_eq!(rows(&block), ["", "", "", "a"]);
    }

    #[test]
    fn test_paragraphs_skip_empty() {
        assert_eq!(paragraphs("").count(), 0);
        assert_eq!(paragraphs("\na\n\nb\rc").collect::<Vec<_>>(), ["a", "b\rc"]);
        assert_eq!(paragraphs("\n\r").count(), 1);
    }
}
