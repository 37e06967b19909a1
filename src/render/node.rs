//! Node: a bordered panel of text.

use super::border::{draw_border, draw_title, Corners, Edges};
use crate::buffer::View;
use crate::error::Result;
use crate::layout::{Align, Padding, Position, Rect, Size};
use crate::markup::MarkupCompiler;
use crate::style::{Attributes, ColorSpec, StyleState};
use crate::text::{paragraphs, Contains, Indicators, Overflow, Scroll, TextLayout, LINE_BREAK};

/// Per-node configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Draw a border around the node.
    pub border: bool,
    /// Border color while focused or selected.
    pub border_color: ColorSpec,
    /// Corner styles.
    pub corners: Corners,
    /// Edge styles.
    pub edges: Edges,
    /// Horizontal alignment of text lines.
    pub text_align: Align,
    /// Vertical alignment of the lines inside the node.
    pub align_items: Align,
    /// Space between the border and the text.
    pub padding: Padding,
    overflow: (Overflow, Overflow),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            border: true,
            border_color: ColorSpec::System(3),
            corners: Corners::default(),
            edges: Edges::default(),
            text_align: Align::Start,
            align_items: Align::Start,
            padding: Padding::ZERO,
            overflow: (Overflow::Wrap, Overflow::Scroll),
        }
    }
}

impl Settings {
    /// Default settings: yellow single-line border, wrapped and
    /// vertically scrolled text.
    pub fn new() -> Self {
        Self::default()
    }

    /// `(horizontal, vertical)` overflow policy.
    pub const fn overflow(&self) -> (Overflow, Overflow) {
        self.overflow
    }

    /// Builder: border on or off.
    #[must_use]
    pub const fn with_border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    /// Builder: focused border color.
    #[must_use]
    pub const fn with_border_color(mut self, color: ColorSpec) -> Self {
        self.border_color = color;
        self
    }

    /// Builder: corner styles.
    #[must_use]
    pub const fn with_corners(mut self, corners: Corners) -> Self {
        self.corners = corners;
        self
    }

    /// Builder: edge styles.
    #[must_use]
    pub const fn with_edges(mut self, edges: Edges) -> Self {
        self.edges = edges;
        self
    }

    /// Builder: text alignment.
    #[must_use]
    pub const fn with_text_align(mut self, align: Align) -> Self {
        self.text_align = align;
        self
    }

    /// Builder: vertical item alignment.
    #[must_use]
    pub const fn with_align_items(mut self, align: Align) -> Self {
        self.align_items = align;
        self
    }

    /// Builder: padding.
    #[must_use]
    pub fn with_padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }

    /// Builder: overflow per axis. A vertical `Wrap` becomes `Scroll`.
    #[must_use]
    pub const fn with_overflow(mut self, horizontal: Overflow, vertical: Overflow) -> Self {
        let vertical = match vertical {
            Overflow::Wrap => Overflow::Scroll,
            other => other,
        };
        self.overflow = (horizontal, vertical);
        self
    }
}

/// Interaction state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    /// Cannot take focus: nothing to scroll.
    Static,
    /// Focusable, not focused.
    Normal,
    /// Dimmed while another node is selected.
    Unfocus,
    /// Has keyboard focus.
    Focus,
    /// Focused and receiving input.
    Selected,
}

impl Focus {
    /// Border style for this state.
    pub fn border_style(self, color: ColorSpec) -> StyleState {
        match self {
            Self::Selected => StyleState::new().with_fg(color).with_open(Attributes::BOLD),
            Self::Focus => StyleState::new().with_fg(color),
            Self::Unfocus => StyleState::new().with_fg(ColorSpec::Xterm(243)),
            Self::Normal | Self::Static => StyleState::new(),
        }
    }
}

/// A renderable text panel.
#[derive(Debug, Clone)]
pub struct Node {
    id: Option<String>,
    title: String,
    settings: Settings,
    pos: Position,
    size: Size,
    contains: Contains,
    text: String,
    scroll: Scroll,
    focus: Focus,
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    /// A full-size node with default settings and no text.
    pub fn new() -> Self {
        let settings = Settings::default();
        Self {
            id: None,
            title: String::new(),
            focus: initial_focus(&settings),
            settings,
            pos: Position::default(),
            size: Size::default(),
            contains: Contains::Text,
            text: String::new(),
            scroll: Scroll::default(),
        }
    }

    /// Builder: lookup id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder: title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder: settings. Resets focus to the settings' initial state.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.focus = initial_focus(&settings);
        self.settings = settings;
        self
    }

    /// Builder: position in the parent.
    #[must_use]
    pub fn with_pos(mut self, pos: Position) -> Self {
        self.pos = pos;
        self
    }

    /// Builder: size in the parent.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Builder: text or list mode.
    #[must_use]
    pub const fn with_contains(mut self, contains: Contains) -> Self {
        self.contains = contains;
        self
    }

    /// Builder: initial text, as one [`write`](Self::write).
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.write(text);
        self
    }

    /// Lookup id.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Text or list mode.
    pub const fn contains(&self) -> Contains {
        self.contains
    }

    /// Raw text: entries separated by `\n`, forced breaks as `\r`.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current scroll offsets, as clamped by the last render.
    pub const fn scroll(&self) -> Scroll {
        self.scroll
    }

    /// Index of the selected entry in list mode.
    pub const fn selected(&self) -> usize {
        self.scroll.y
    }

    /// Interaction state.
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    /// Set the interaction state.
    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    /// True unless the node is static.
    pub fn is_focusable(&self) -> bool {
        self.focus != Focus::Static
    }

    /// Append `text` as a new entry. Newlines inside it become forced
    /// line breaks within the entry.
    pub fn write(&mut self, text: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.push(text);
    }

    /// Append `text` to the current entry.
    pub fn push(&mut self, text: &str) {
        self.text.extend(text.chars().map(|c| if c == '\n' { LINE_BREAK } else { c }));
    }

    /// Compile `markup` and append it as a new entry.
    ///
    /// # Errors
    ///
    /// Returns the markup error; nothing is appended.
    pub fn format(&mut self, markup: &str) -> Result<()> {
        self.format_with(markup, &MarkupCompiler::new())
    }

    /// [`format`](Self::format) with a caller-configured compiler.
    ///
    /// # Errors
    ///
    /// Returns the markup error; nothing is appended.
    pub fn format_with(&mut self, markup: &str, compiler: &MarkupCompiler) -> Result<()> {
        let compiled = compiler.compile(markup)?;
        self.write(&compiled);
        Ok(())
    }

    /// Remove all text.
    pub fn clear(&mut self) {
        self.text.clear();
        self.scroll = Scroll::default();
    }

    /// Entry `index` of a list node, forced breaks turned back into `\n`.
    ///
    /// Returns `None` for text nodes and out-of-range indices.
    pub fn entry(&self, index: usize) -> Option<String> {
        if self.contains != Contains::List {
            return None;
        }
        paragraphs(&self.text)
            .nth(index)
            .map(|entry| entry.replace(LINE_BREAK, "\n"))
    }

    /// Scroll up one line (or select the previous entry).
    ///
    /// Returns `false` when vertical overflow is hidden.
    pub fn scroll_up(&mut self) -> bool {
        if self.settings.overflow.1 == Overflow::Hidden {
            return false;
        }
        self.scroll.y = self.scroll.y.saturating_sub(1);
        true
    }

    /// Scroll down one line (or select the next entry).
    ///
    /// Returns `false` when vertical overflow is hidden. The offset is
    /// clamped to the content on the next render.
    pub fn scroll_down(&mut self) -> bool {
        if self.settings.overflow.1 == Overflow::Hidden {
            return false;
        }
        self.scroll.y = self.scroll.y.saturating_add(1);
        true
    }

    /// Scroll left one column. Returns `false` unless horizontal overflow
    /// is `Scroll`.
    pub fn scroll_left(&mut self) -> bool {
        if self.settings.overflow.0 != Overflow::Scroll {
            return false;
        }
        self.scroll.x = self.scroll.x.saturating_sub(1);
        true
    }

    /// Scroll right one column. Returns `false` unless horizontal overflow
    /// is `Scroll`.
    pub fn scroll_right(&mut self) -> bool {
        if self.settings.overflow.0 != Overflow::Scroll {
            return false;
        }
        self.scroll.x = self.scroll.x.saturating_add(1);
        true
    }

    /// The node's rectangle inside a `width` by `height` parent.
    pub fn rect(&self, width: u16, height: u16) -> Rect {
        Rect::resolve(&self.pos, &self.size, width, height)
    }

    /// Paint border, title and text into `parent`.
    pub fn render(&mut self, parent: &mut View<'_>) {
        let rect = self.rect(parent.width(), parent.height());
        let mut view = parent.sub_rect(rect);
        let (w, h) = (view.width(), view.height());

        let border_style = self.focus.border_style(self.settings.border_color);
        let mut interior = Rect::from_size(w, h);
        if self.settings.border {
            draw_border(&mut view, &self.settings.edges, &self.settings.corners, &border_style);
            interior = interior.shrink(1);
        }
        let interior = interior.inset(&self.settings.padding);

        let (overflow_x, overflow_y) = self.settings.overflow;
        let mut highlight = StyleState::new().with_open(Attributes::BOLD);
        if self.focus == Focus::Selected {
            highlight.set_fg(ColorSpec::System(7));
        }
        let block = TextLayout::new(interior.width, interior.height)
            .with_overflow(overflow_x, overflow_y)
            .with_text_align(self.settings.text_align)
            .with_align_items(self.settings.align_items)
            .with_contains(self.contains)
            .with_highlight(highlight)
            .layout(&self.text, &mut self.scroll);

        {
            let mut content = view.sub_rect(interior);
            for y in 0..content.height() {
                let line = block.lines.get(usize::from(y));
                for x in 0..content.width() {
                    let cell = line
                        .and_then(|line| line.get(usize::from(x)))
                        .cloned()
                        .unwrap_or_default();
                    content.set_cell(x, y, cell);
                }
            }
        }

        let frame = if self.settings.border { Rect::from_size(w, h) } else { interior };
        let style = if self.settings.border { border_style.clone() } else { StyleState::new() };
        draw_indicators(&mut view, frame, block.indicators, &style);
        // Last, so neither text nor indicators cover it.
        draw_title(&mut view, &self.title, self.settings.border, &border_style);
    }
}

fn initial_focus(settings: &Settings) -> Focus {
    let (x, y) = settings.overflow;
    if x == Overflow::Scroll || y == Overflow::Scroll {
        Focus::Normal
    } else {
        Focus::Static
    }
}

/// Arrow glyphs at the midpoints of `frame`'s edges.
fn draw_indicators(view: &mut View<'_>, frame: Rect, indicators: Indicators, style: &StyleState) {
    if frame.is_empty() {
        return;
    }
    let mid_x = frame.x + frame.width / 2;
    let mid_y = frame.y + frame.height / 2;
    let (right, bottom) = (frame.right() - 1, frame.bottom() - 1);
    if indicators.up {
        view.set(mid_x, frame.y, Indicators::UP, style);
    }
    if indicators.down {
        view.set(mid_x, bottom, Indicators::DOWN, style);
    }
    if indicators.left {
        view.set(frame.x, mid_y, Indicators::LEFT, style);
    }
    if indicators.right {
        view.set(right, mid_y, Indicators::RIGHT, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::render::border::EdgeStyle;
    use pretty_assertions::assert_eq;

    fn render(node: &mut Node, width: u16, height: u16) -> Buffer {
        let mut buffer = Buffer::new(width, height);
        node.render(&mut buffer.view());
        buffer
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert!(settings.border);
        assert_eq!(settings.border_color, ColorSpec::System(3));
        assert_eq!(settings.overflow(), (Overflow::Wrap, Overflow::Scroll));
        assert_eq!(settings.padding, Padding::ZERO);
    }

    #[test]
    fn test_vertical_wrap_coerced() {
        let settings = Settings::new().with_overflow(Overflow::Hidden, Overflow::Wrap);
        assert_eq!(settings.overflow(), (Overflow::Hidden, Overflow::Scroll));
    }

    #[test]
    fn test_initial_focus() {
        assert_eq!(Node::new().focus(), Focus::Normal);
        let fixed = Settings::new().with_overflow(Overflow::Wrap, Overflow::Hidden);
        assert_eq!(Node::new().with_settings(fixed).focus(), Focus::Static);
    }

    #[test]
    fn test_write_push_and_entries() {
        let mut node = Node::new().with_contains(Contains::List);
        node.write("first\nline");
        node.push(" more");
        node.write("second");
        assert_eq!(node.text(), "first\rline more\nsecond");
        assert_eq!(node.entry(0).as_deref(), Some("first\nline more"));
        assert_eq!(node.entry(1).as_deref(), Some("second"));
        assert_eq!(node.entry(2), None);

        let text = Node::new().with_text("x");
        assert_eq!(text.entry(0), None);
    }

    #[test]
    fn test_format_is_all_or_nothing() {
        let mut node = Node::new();
        node.format("[b]ok").unwrap();
        assert!(node.format("[@nope]bad").is_err());
        assert_eq!(node.text(), "\x1b[1mok\x1b[0m");
    }

    #[test]
    fn test_scroll_gating() {
        let mut node = Node::new();
        assert!(node.scroll_down());
        assert!(!node.scroll_right());

        let settings = Settings::new().with_overflow(Overflow::Scroll, Overflow::Hidden);
        let mut node = Node::new().with_settings(settings);
        assert!(!node.scroll_down());
        assert!(node.scroll_right());
        assert!(node.scroll_left());
    }

    #[test]
    fn test_render_border_title_and_text() {
        let mut node = Node::new().with_title("log").with_text("hello");
        let buffer = render(&mut node, 9, 3);
        assert_eq!(buffer.to_lines(), ["┌log────┐", "│hello  │", "└───────┘"]);
    }

    #[test]
    fn test_render_without_border_with_padding() {
        let settings = Settings::new().with_border(false).with_padding((1, 0));
        let mut node = Node::new().with_settings(settings).with_text("ab");
        let buffer = render(&mut node, 4, 1);
        assert_eq!(buffer.to_lines(), [" ab "]);
    }

    #[test]
    fn test_render_position_and_size() {
        let settings = Settings::new().with_edges(Edges::uniform(EdgeStyle::Double));
        let mut node = Node::new()
            .with_settings(settings)
            .with_pos(Position::new(2u16, 1u16))
            .with_size(Size::new(0.5f32, 3u16));
        let buffer = render(&mut node, 8, 5);
        assert_eq!(
            buffer.to_lines(),
            ["        ", "  ┌══┐  ", "  ║  ║  ", "  └══┘  ", "        "]
        );
    }

    #[test]
    fn test_render_indicators_on_border() {
        let mut node = Node::new();
        for i in 0..5 {
            node.write(&i.to_string());
        }
        let buffer = render(&mut node, 5, 4);
        assert_eq!(buffer.to_lines(), ["┌─⮝─┐", "│0  │", "│1  │", "└─⮟─┘"]);
    }

    #[test]
    fn test_title_wins_over_up_indicator() {
        let mut node = Node::new().with_title("title");
        for i in 0..5 {
            node.write(&i.to_string());
        }
        let buffer = render(&mut node, 9, 4);
        assert_eq!(
            buffer.to_lines(),
            ["┌title──┐", "│0      │", "│1      │", "└───⮟───┘"]
        );
    }

    #[test]
    fn test_focus_styles_border() {
        let mut node = Node::new();
        node.set_focus(Focus::Selected);
        let buffer = render(&mut node, 3, 3);
        let style = buffer.get(0, 0).map(|c| c.style().clone()).unwrap();
        assert_eq!(style.active_fg(), Some(ColorSpec::System(3)));
        assert!(style.active_attributes().contains(Attributes::BOLD));

        node.set_focus(Focus::Unfocus);
        let buffer = render(&mut node, 3, 3);
        let style = buffer.get(0, 0).map(|c| c.style().clone()).unwrap();
        assert_eq!(style.active_fg(), Some(ColorSpec::Xterm(243)));
    }

    #[test]
    fn test_clear_resets_scroll() {
        let mut node = Node::new().with_text("a");
        node.scroll_down();
        node.clear();
        assert_eq!(node.text(), "");
        assert_eq!(node.scroll(), Scroll::default());
    }
}
