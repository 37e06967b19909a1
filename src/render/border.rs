//! Box-drawing borders and titles.

use crate::buffer::View;
use crate::style::StyleState;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Line style of one border edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeStyle {
    /// `─` `│`
    #[default]
    Single,
    /// `┄` `┆`
    Dashed,
    /// `┈` `┊`
    Dotted,
    /// `═` `║`
    Double,
}

impl EdgeStyle {
    /// Glyph for a top or bottom edge.
    pub const fn horizontal(self) -> &'static str {
        match self {
            Self::Single => "─",
            Self::Dashed => "┄",
            Self::Dotted => "┈",
            Self::Double => "═",
        }
    }

    /// Glyph for a left or right edge.
    pub const fn vertical(self) -> &'static str {
        match self {
            Self::Single => "│",
            Self::Dashed => "┆",
            Self::Dotted => "┊",
            Self::Double => "║",
        }
    }

    const fn is_double(self) -> bool {
        matches!(self, Self::Double)
    }
}

/// Style of one border corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CornerStyle {
    /// `┌`
    #[default]
    Single,
    /// Joins double edges; see [`Corner::glyph`].
    Double,
    /// `╭`
    Rounded,
}

/// The four corners, clockwise from the top left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Top left.
    TopLeft,
    /// Top right.
    TopRight,
    /// Bottom right.
    BottomRight,
    /// Bottom left.
    BottomLeft,
}

impl Corner {
    /// Glyph for this corner in `style`, joining a `horizontal` (top or
    /// bottom) and a `vertical` (left or right) edge.
    ///
    /// A double corner is fully double only when both edges are double.
    /// With one double edge it keeps the double stroke on that edge's side
    /// and turns single toward the other edge. With no double edge it is a
    /// plain single corner.
    pub const fn glyph(self, style: CornerStyle, horizontal: EdgeStyle, vertical: EdgeStyle) -> &'static str {
        let set = match style {
            CornerStyle::Single => ["┌", "┐", "┘", "└"],
            CornerStyle::Rounded => ["╭", "╮", "╯", "╰"],
            CornerStyle::Double => match (horizontal.is_double(), vertical.is_double()) {
                (true, true) => ["╔", "╗", "╝", "╚"],
                (true, false) => ["╒", "╕", "╛", "╘"],
                (false, true) => ["╓", "╖", "╜", "╙"],
                (false, false) => ["┌", "┐", "┘", "└"],
            },
        };
        set[self as usize]
    }
}

/// Per-edge styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Edges {
    /// Top edge.
    pub top: EdgeStyle,
    /// Right edge.
    pub right: EdgeStyle,
    /// Bottom edge.
    pub bottom: EdgeStyle,
    /// Left edge.
    pub left: EdgeStyle,
}

impl Edges {
    /// The same style on every edge.
    pub const fn uniform(style: EdgeStyle) -> Self {
        Self { top: style, right: style, bottom: style, left: style }
    }

    /// `horizontal` for top and bottom, `vertical` for left and right.
    pub const fn symmetric(horizontal: EdgeStyle, vertical: EdgeStyle) -> Self {
        Self { top: horizontal, right: vertical, bottom: horizontal, left: vertical }
    }
}

/// Per-corner styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Corners {
    /// Top-left corner.
    pub top_left: CornerStyle,
    /// Top-right corner.
    pub top_right: CornerStyle,
    /// Bottom-right corner.
    pub bottom_right: CornerStyle,
    /// Bottom-left corner.
    pub bottom_left: CornerStyle,
}

impl Corners {
    /// The same style on every corner.
    pub const fn uniform(style: CornerStyle) -> Self {
        Self { top_left: style, top_right: style, bottom_right: style, bottom_left: style }
    }
}

/// Paint a border along the perimeter of `view`.
///
/// Views smaller than 2x2 get no border.
pub fn draw_border(view: &mut View<'_>, edges: &Edges, corners: &Corners, style: &StyleState) {
    let (w, h) = (view.width(), view.height());
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (w - 1, h - 1);

    for x in 1..right {
        view.set(x, 0, edges.top.horizontal(), style);
        view.set(x, bottom, edges.bottom.horizontal(), style);
    }
    for y in 1..bottom {
        view.set(0, y, edges.left.vertical(), style);
        view.set(right, y, edges.right.vertical(), style);
    }

    let top_left = Corner::TopLeft.glyph(corners.top_left, edges.top, edges.left);
    let top_right = Corner::TopRight.glyph(corners.top_right, edges.top, edges.right);
    let bottom_right = Corner::BottomRight.glyph(corners.bottom_right, edges.bottom, edges.right);
    let bottom_left = Corner::BottomLeft.glyph(corners.bottom_left, edges.bottom, edges.left);
    view.set(0, 0, top_left, style);
    view.set(right, 0, top_right, style);
    view.set(right, bottom, bottom_right, style);
    view.set(0, bottom, bottom_left, style);
}

/// Paint `title` on the first row of `view`.
///
/// With a border the title starts one cell in and gets `width - 2` cells;
/// without one it starts at the edge. A title that does not fit is cut and
/// ends in `…`. Nothing is drawn for an empty title or a view narrower than
/// 3 cells (bordered) or 1 cell.
pub fn draw_title(view: &mut View<'_>, title: &str, bordered: bool, style: &StyleState) {
    let width = view.width();
    if title.is_empty() || width < 1 || (bordered && width < 3) {
        return;
    }
    let (start, available) = if bordered { (1, width - 2) } else { (0, width) };
    let available = usize::from(available);

    if title.width() <= available {
        view.set_str(start, 0, title, style);
        return;
    }

    let mut cut = String::new();
    let mut used = 0;
    for grapheme in title.graphemes(true) {
        let w = grapheme.width();
        if used + w > available.saturating_sub(1) {
            break;
        }
        cut.push_str(grapheme);
        used += w;
    }
    cut.push('…');
    view.set_str(start, 0, &cut, style);
}
