//! `StyleState`: the active text style and minimal SGR transitions.
//!
//! Every field is tri-state. `Unset` means "inherit", while the explicit
//! close values (`Reset`, `Closed`, the `close` attribute set) override
//! whatever an earlier state had. [`StyleState::merge`] layers states with
//! later-wins semantics. [`StyleState::diff`] emits only the codes needed
//! to move a terminal from one state to another.

use super::color::{ColorSpec, Layer};
use bitflags::bitflags;
use std::fmt;
use std::sync::Arc;

/// Full SGR reset.
pub const RESET: &str = "\x1b[0m";

/// OSC 8 hyperlink terminator.
pub const LINK_CLOSE: &str = "\x1b]8;;\x1b\\";

bitflags! {
    /// Binary text attributes.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Slow blink
        const SLOW_BLINK = 0b0001_0000;
        /// Rapid blink
        const RAPID_BLINK = 0b0010_0000;
        /// Reversed colors (fg/bg swapped)
        const REVERSE = 0b0100_0000;
        /// Strikethrough text
        const STRIKE = 0b1000_0000;
    }
}

impl fmt::Debug for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// `(attribute, open code, close code)` in emission order.
///
/// Bold and dim share close code 22, and both blinks share 25.
const ATTRIBUTE_CODES: [(Attributes, u8, u8); 8] = [
    (Attributes::BOLD, 1, 22),
    (Attributes::DIM, 2, 22),
    (Attributes::ITALIC, 3, 23),
    (Attributes::UNDERLINE, 4, 24),
    (Attributes::SLOW_BLINK, 5, 25),
    (Attributes::RAPID_BLINK, 6, 25),
    (Attributes::REVERSE, 7, 27),
    (Attributes::STRIKE, 9, 29),
];

impl Attributes {
    /// Look up a markup short code (`b`, `d`, `i`, `u`, `sb`, `rb`, `r`, `s`).
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "b" => Self::BOLD,
            "d" => Self::DIM,
            "i" => Self::ITALIC,
            "u" => Self::UNDERLINE,
            "sb" => Self::SLOW_BLINK,
            "rb" => Self::RAPID_BLINK,
            "r" => Self::REVERSE,
            "s" => Self::STRIKE,
            _ => return None,
        })
    }
}

/// Per-attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Inherit.
    Unset,
    /// Attribute on.
    Open,
    /// Attribute explicitly off.
    Close,
}

/// Foreground or background value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorState {
    /// Inherit.
    #[default]
    Unset,
    /// A concrete color.
    Set(ColorSpec),
    /// Back to the terminal default.
    Reset,
}

impl ColorState {
    const fn active(&self) -> Option<ColorSpec> {
        match self {
            Self::Set(color) => Some(*color),
            _ => None,
        }
    }

    const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

/// Hyperlink value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LinkState {
    /// Inherit.
    #[default]
    Unset,
    /// Inside a hyperlink to this URL.
    Active(Arc<str>),
    /// Explicitly outside any hyperlink.
    Closed,
}

impl LinkState {
    fn active(&self) -> Option<&str> {
        match self {
            Self::Active(url) => Some(url),
            _ => None,
        }
    }
}

/// Emit the OSC 8 sequence opening a hyperlink to `url`.
pub fn link_open(url: &str) -> String {
    format!("\x1b]8;;{url}\x1b\\")
}

/// The style applied to a run of text or a single cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleState {
    pub(super) fg: ColorState,
    pub(super) bg: ColorState,
    pub(super) link: LinkState,
    pub(super) open: Attributes,
    pub(super) close: Attributes,
}

impl StyleState {
    /// A state with every field unset.
    #[inline]
    pub const fn new() -> Self {
        Self {
            fg: ColorState::Unset,
            bg: ColorState::Unset,
            link: LinkState::Unset,
            open: Attributes::empty(),
            close: Attributes::empty(),
        }
    }

    /// A state with every field explicitly closed: the result of `[/]`.
    pub const fn closed() -> Self {
        Self {
            fg: ColorState::Reset,
            bg: ColorState::Reset,
            link: LinkState::Closed,
            open: Attributes::empty(),
            close: Attributes::all(),
        }
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::new()
    }

    /// True when this state looks like the terminal default.
    pub fn is_plain(&self) -> bool {
        self.fg.active().is_none()
            && self.bg.active().is_none()
            && self.link.active().is_none()
            && self.open.is_empty()
    }

    /// Foreground field.
    #[inline]
    pub const fn fg(&self) -> ColorState {
        self.fg
    }

    /// Background field.
    #[inline]
    pub const fn bg(&self) -> ColorState {
        self.bg
    }

    /// Hyperlink field.
    #[inline]
    pub const fn link(&self) -> &LinkState {
        &self.link
    }

    /// Value of a single attribute.
    pub fn attribute(&self, attr: Attributes) -> Toggle {
        if self.open.contains(attr) {
            Toggle::Open
        } else if self.close.contains(attr) {
            Toggle::Close
        } else {
            Toggle::Unset
        }
    }

    /// Attributes that are on.
    #[inline]
    pub const fn active_attributes(&self) -> Attributes {
        self.open
    }

    /// Foreground color that is on, if any.
    #[inline]
    pub const fn active_fg(&self) -> Option<ColorSpec> {
        self.fg.active()
    }

    /// Background color that is on, if any.
    #[inline]
    pub const fn active_bg(&self) -> Option<ColorSpec> {
        self.bg.active()
    }

    /// URL of the open hyperlink, if any.
    pub fn active_link(&self) -> Option<&str> {
        self.link.active()
    }

    /// Set the foreground color.
    pub fn set_fg(&mut self, color: ColorSpec) -> &mut Self {
        self.fg = ColorState::Set(color);
        self
    }

    /// Set the background color.
    pub fn set_bg(&mut self, color: ColorSpec) -> &mut Self {
        self.bg = ColorState::Set(color);
        self
    }

    /// Reset the foreground to the terminal default.
    pub fn reset_fg(&mut self) -> &mut Self {
        self.fg = ColorState::Reset;
        self
    }

    /// Reset the background to the terminal default.
    pub fn reset_bg(&mut self) -> &mut Self {
        self.bg = ColorState::Reset;
        self
    }

    /// Open a hyperlink.
    pub fn set_link(&mut self, url: &str) -> &mut Self {
        self.link = LinkState::Active(Arc::from(url));
        self
    }

    /// Close any hyperlink.
    pub fn close_link(&mut self) -> &mut Self {
        self.link = LinkState::Closed;
        self
    }

    /// Turn attributes on.
    pub fn open(&mut self, attrs: Attributes) -> &mut Self {
        self.open.insert(attrs);
        self.close.remove(attrs);
        self
    }

    /// Turn attributes explicitly off.
    pub fn close(&mut self, attrs: Attributes) -> &mut Self {
        self.close.insert(attrs);
        self.open.remove(attrs);
        self
    }

    /// Drop attributes back to unset.
    pub(crate) fn unset(&mut self, attrs: Attributes) -> &mut Self {
        self.open.remove(attrs);
        self.close.remove(attrs);
        self
    }

    /// Builder: set the foreground color.
    #[must_use]
    pub fn with_fg(mut self, color: ColorSpec) -> Self {
        self.set_fg(color);
        self
    }

    /// Builder: set the background color.
    #[must_use]
    pub fn with_bg(mut self, color: ColorSpec) -> Self {
        self.set_bg(color);
        self
    }

    /// Builder: open a hyperlink.
    #[must_use]
    pub fn with_link(mut self, url: &str) -> Self {
        self.set_link(url);
        self
    }

    /// Builder: turn attributes on.
    #[must_use]
    pub fn with_open(mut self, attrs: Attributes) -> Self {
        self.open(attrs);
        self
    }

    /// Layer `other` on top of `self`. Every field set in `other` wins.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            fg: if other.fg.is_unset() { self.fg } else { other.fg },
            bg: if other.bg.is_unset() { self.bg } else { other.bg },
            link: if other.link == LinkState::Unset {
                self.link.clone()
            } else {
                other.link.clone()
            },
            open: (self.open - other.close) | other.open,
            close: (self.close - other.open) | other.close,
        }
    }

    /// In-place [`merge`](Self::merge).
    pub fn merge_from(&mut self, other: &Self) {
        *self = self.merge(other);
    }

    /// Keep only the fields that are on. Two states that display the
    /// same compare equal after this.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            fg: self.fg.active().map_or(ColorState::Unset, ColorState::Set),
            bg: self.bg.active().map_or(ColorState::Unset, ColorState::Set),
            link: self.link.active().map_or(LinkState::Unset, |_| self.link.clone()),
            open: self.open,
            close: Attributes::empty(),
        }
    }

    /// Escape sequences that move a terminal showing `previous` to `self`.
    ///
    /// Returns an empty string when both display the same.
    pub fn diff(&self, previous: &Self) -> String {
        let mut out = String::new();
        self.write_diff(previous, &mut out);
        out
    }

    /// [`diff`](Self::diff) into an existing string.
    pub fn write_diff(&self, previous: &Self, out: &mut String) {
        let mut codes = String::new();

        write_color(self.active_fg(), previous.active_fg(), Layer::Foreground, &mut codes);
        write_color(self.active_bg(), previous.active_bg(), Layer::Background, &mut codes);

        let current = self.open;
        let before = previous.open;
        let turned_off = before - current;
        let mut turned_on = current - before;

        // 22 and 25 switch off both members of their pair.
        let intensity = Attributes::BOLD | Attributes::DIM;
        let blink = Attributes::SLOW_BLINK | Attributes::RAPID_BLINK;
        if turned_off.intersects(intensity) {
            turned_on |= current & intensity;
        }
        if turned_off.intersects(blink) {
            turned_on |= current & blink;
        }

        let mut last_close = 0;
        for (attr, _, close) in ATTRIBUTE_CODES {
            if turned_off.contains(attr) && close != last_close {
                push_code(&mut codes, close);
                last_close = close;
            }
        }
        for (attr, open, _) in ATTRIBUTE_CODES {
            if turned_on.contains(attr) {
                push_code(&mut codes, open);
            }
        }

        if !codes.is_empty() {
            out.push_str("\x1b[");
            out.push_str(&codes);
            out.push('m');
        }

        match (self.active_link(), previous.active_link()) {
            (Some(url), Some(prev)) if url == prev => {}
            (Some(url), Some(_)) => {
                out.push_str(LINK_CLOSE);
                out.push_str(&link_open(url));
            }
            (Some(url), None) => out.push_str(&link_open(url)),
            (None, Some(_)) => out.push_str(LINK_CLOSE),
            (None, None) => {}
        }
    }

    /// Absolute escape sequence for this state from a plain terminal.
    pub fn render(&self) -> String {
        self.diff(&Self::new())
    }
}

impl fmt::Display for StyleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn write_color(current: Option<ColorSpec>, previous: Option<ColorSpec>, layer: Layer, codes: &mut String) {
    match current {
        Some(color) if previous != Some(color) => {
            if !codes.is_empty() {
                codes.push(';');
            }
            color.write_fragment(layer, codes);
        }
        None if previous.is_some() => push_code(
            codes,
            match layer {
                Layer::Foreground => 39,
                Layer::Background => 49,
            },
        ),
        _ => {}
    }
}

fn push_code(codes: &mut String, code: u8) {
    use std::fmt::Write;
    if !codes.is_empty() {
        codes.push(';');
    }
    let _ = write!(codes, "{code}");
}
