//! SGR decoding: apply escape parameters to a [`StyleState`].
//!
//! Decoded states only ever hold "on" values, so cells carrying them can be
//! compared directly.

use super::color::{ColorSpec, Rgb};
use super::state::{Attributes, StyleState};

impl StyleState {
    /// Apply the parameters of one `ESC[...m` sequence.
    ///
    /// `params` is the text between `ESC[` and `m`. An empty parameter
    /// means 0; one that does not parse is skipped.
    pub fn apply_sgr(&mut self, params: &str) {
        let codes: Vec<u16> = params
            .split(';')
            .filter_map(|p| if p.is_empty() { Some(0) } else { p.parse().ok() })
            .collect();

        let mut i = 0;
        while i < codes.len() {
            match codes[i] {
                0 => *self = Self::new(),
                1 => self.open_decoded(Attributes::BOLD),
                2 => self.open_decoded(Attributes::DIM),
                3 => self.open_decoded(Attributes::ITALIC),
                4 => self.open_decoded(Attributes::UNDERLINE),
                5 => self.open_decoded(Attributes::SLOW_BLINK),
                6 => self.open_decoded(Attributes::RAPID_BLINK),
                7 => self.open_decoded(Attributes::REVERSE),
                9 => self.open_decoded(Attributes::STRIKE),
                21 | 22 => {
                    self.unset(Attributes::BOLD | Attributes::DIM);
                }
                23 => {
                    self.unset(Attributes::ITALIC);
                }
                24 => {
                    self.unset(Attributes::UNDERLINE);
                }
                25 => {
                    self.unset(Attributes::SLOW_BLINK | Attributes::RAPID_BLINK);
                }
                27 => {
                    self.unset(Attributes::REVERSE);
                }
                29 => {
                    self.unset(Attributes::STRIKE);
                }
                code @ 30..=37 => {
                    self.set_fg(ColorSpec::System((code - 30) as u8));
                }
                code @ 40..=47 => {
                    self.set_bg(ColorSpec::System((code - 40) as u8));
                }
                code @ 90..=97 => {
                    self.set_fg(ColorSpec::Xterm((code - 90 + 8) as u8));
                }
                code @ 100..=107 => {
                    self.set_bg(ColorSpec::Xterm((code - 100 + 8) as u8));
                }
                39 => self.fg = Default::default(),
                49 => self.bg = Default::default(),
                code @ (38 | 48) => {
                    let (color, used) = extended_color(&codes[i + 1..]);
                    i += used;
                    if let Some(color) = color {
                        if code == 38 {
                            self.set_fg(color);
                        } else {
                            self.set_bg(color);
                        }
                    }
                }
                _ => {}
            }
            i += 1;
        }
    }

    /// Apply the body of an OSC 8 hyperlink sequence (`8;params;url`).
    ///
    /// Other OSC commands are ignored.
    pub fn apply_osc(&mut self, body: &str) {
        let mut parts = body.splitn(3, ';');
        if parts.next() != Some("8") {
            return;
        }
        let url = parts.nth(1).unwrap_or("");
        if url.is_empty() {
            self.link = Default::default();
        } else {
            self.set_link(url);
        }
    }

    fn open_decoded(&mut self, attrs: Attributes) {
        self.open(attrs);
    }
}

/// Parse `5;N` or `2;R;G;B` after a 38/48 code.
///
/// Returns the color and how many parameters were consumed.
fn extended_color(rest: &[u16]) -> (Option<ColorSpec>, usize) {
    let channel = |i: usize| rest.get(i).and_then(|&v| u8::try_from(v).ok());
    match rest.first() {
        Some(5) => (channel(1).map(ColorSpec::Xterm), 2.min(rest.len())),
        Some(2) => {
            let rgb = (|| Some(Rgb::new(channel(1)?, channel(2)?, channel(3)?)))();
            (rgb.map(ColorSpec::Rgb), 4.min(rest.len()))
        }
        _ => (None, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Toggle;

    #[test]
    fn test_apply_basic_attributes_and_colors() {
        let mut state = StyleState::new();
        state.apply_sgr("1;31;44");
        assert_eq!(state.attribute(Attributes::BOLD), Toggle::Open);
        assert_eq!(state.active_fg(), Some(ColorSpec::System(1)));
        assert_eq!(state.active_bg(), Some(ColorSpec::System(4)));

        state.apply_sgr("22;39");
        assert_eq!(state.attribute(Attributes::BOLD), Toggle::Unset);
        assert_eq!(state.active_fg(), None);
        assert_eq!(state.active_bg(), Some(ColorSpec::System(4)));
    }

    #[test]
    fn test_apply_extended_colors() {
        let mut state = StyleState::new();
        state.apply_sgr("38;5;208;48;2;1;2;3;4");
        assert_eq!(state.active_fg(), Some(ColorSpec::Xterm(208)));
        assert_eq!(state.active_bg(), Some(ColorSpec::Rgb(Rgb::new(1, 2, 3))));
        assert_eq!(state.attribute(Attributes::UNDERLINE), Toggle::Open);
    }

    #[test]
    fn test_apply_reset() {
        let mut state = StyleState::new();
        state.apply_sgr("1;3;35");
        state.apply_sgr("0");
        assert!(state.is_empty());
        state.apply_sgr("7");
        state.apply_sgr("");
        assert!(state.is_empty());
    }

    #[test]
    fn test_unparsable_parameter_is_skipped() {
        let mut state = StyleState::new();
        state.apply_sgr("1");
        state.apply_sgr("x;31");
        assert!(state.active_attributes().contains(Attributes::BOLD));
        assert_eq!(state.active_fg(), Some(ColorSpec::System(1)));

        state.apply_sgr("4:3");
        assert!(state.active_attributes().contains(Attributes::BOLD));
        assert!(!state.active_attributes().contains(Attributes::UNDERLINE));

        state.apply_sgr(";");
        assert!(state.is_empty());
    }

    #[test]
    fn test_rendered_state_round_trips() {
        let original = StyleState::new()
            .with_fg(ColorSpec::Xterm(12))
            .with_bg(ColorSpec::Rgb(Rgb::new(9, 8, 7)))
            .with_open(Attributes::ITALIC | Attributes::STRIKE);
        let rendered = original.render();
        let params = rendered
            .strip_prefix("\x1b[")
            .and_then(|s| s.strip_suffix('m'))
            .unwrap();

        let mut decoded = StyleState::new();
        decoded.apply_sgr(params);
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_apply_osc_hyperlink() {
        let mut state = StyleState::new();
        state.apply_osc("8;;https://example.com");
        assert_eq!(state.active_link(), Some("https://example.com"));
        state.apply_osc("8;;");
        assert_eq!(state.active_link(), None);
        assert!(state.is_empty());
        state.apply_osc("0;window title");
        assert!(state.is_empty());
    }
}
