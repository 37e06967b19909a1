//! Color: parsing color tokens into SGR parameter fragments.
//!
//! Four token forms are accepted, tried in this order:
//!
//! | Form          | Example            | Foreground      | Background      |
//! |---------------|--------------------|-----------------|-----------------|
//! | hex           | `#f80`, `#ff8800`  | `38;2;r;g;b`    | `48;2;r;g;b`    |
//! | decimal triple| `255,136,0`        | `38;2;r;g;b`    | `48;2;r;g;b`    |
//! | xterm index   | `208`              | `38;5;N`        | `48;5;N`        |
//! | system name   | `red`              | `3N`            | `4N`            |

use crate::error::{Error, Result};
use std::fmt::Write;
use std::str::FromStr;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// The eight system color names, indexed by their SGR offset.
pub const SYSTEM_COLORS: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

/// Which layer a color applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Foreground (text) color.
    Foreground,
    /// Background color.
    Background,
}

/// A parsed color token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpec {
    /// One of the eight system colors (`0..=7`).
    System(u8),
    /// An xterm 256-color palette index.
    Xterm(u8),
    /// A 24-bit color.
    Rgb(Rgb),
}

impl ColorSpec {
    /// Parse a color token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] when the token matches no accepted form.
    pub fn parse(token: &str) -> Result<Self> {
        let token = token.trim();
        if let Some(hex) = token.strip_prefix('#') {
            return parse_hex(hex)
                .map(Self::Rgb)
                .ok_or_else(|| Error::InvalidColor(token.to_string()));
        }

        if token.contains(',') {
            return parse_triple(token)
                .map(Self::Rgb)
                .ok_or_else(|| Error::InvalidColor(token.to_string()));
        }

        if let Ok(index) = token.parse::<u8>() {
            return Ok(Self::Xterm(index));
        }

        SYSTEM_COLORS
            .iter()
            .position(|name| name.eq_ignore_ascii_case(token))
            .map(|index| Self::System(index as u8))
            .ok_or_else(|| Error::InvalidColor(token.to_string()))
    }

    /// The RGB triple, if this is a true-color value.
    #[inline]
    pub const fn rgb(&self) -> Option<Rgb> {
        match self {
            Self::Rgb(rgb) => Some(*rgb),
            _ => None,
        }
    }

    /// Append this color's SGR parameters for `layer` to `out`.
    pub fn write_fragment(&self, layer: Layer, out: &mut String) {
        let base = match layer {
            Layer::Foreground => 3,
            Layer::Background => 4,
        };
        let _ = match self {
            Self::System(index) => write!(out, "{base}{index}"),
            Self::Xterm(index) => write!(out, "{base}8;5;{index}"),
            Self::Rgb(Rgb { r, g, b }) => write!(out, "{base}8;2;{r};{g};{b}"),
        };
    }

    /// Foreground SGR parameters, e.g. `31` or `38;5;208`.
    pub fn fg_fragment(&self) -> String {
        let mut out = String::new();
        self.write_fragment(Layer::Foreground, &mut out);
        out
    }

    /// Background SGR parameters, e.g. `41` or `48;2;0;0;0`.
    pub fn bg_fragment(&self) -> String {
        let mut out = String::new();
        self.write_fragment(Layer::Background, &mut out);
        out
    }
}

impl FromStr for ColorSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Rgb> for ColorSpec {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

fn parse_hex(digits: &str) -> Option<Rgb> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => {
            let mut nibbles = digits.chars().filter_map(|c| c.to_digit(16));
            let mut next = || nibbles.next().map(|n| (n as u8) * 17);
            Some(Rgb::new(next()?, next()?, next()?))
        }
        6 => Some(Rgb::new(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => None,
    }
}

fn parse_triple(token: &str) -> Option<Rgb> {
    let mut parts = token.split(',').map(|part| part.trim().parse::<u8>());
    let rgb = Rgb::new(parts.next()?.ok()?, parts.next()?.ok()?, parts.next()?.ok()?);
    parts.next().is_none().then_some(rgb)
}
