//! Directive parsing: one `[...]` body into a partial style plus side effects.

use crate::error::{Error, Result};
use crate::layout::Align;
use crate::style::{Attributes, ColorSpec, StyleState};

/// Stash stack operation requested by a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackOp {
    /// Push the accumulated style, optionally under a name.
    Stash(Option<String>),
    /// Restore the top entry, or the named one.
    Pop(Option<String>),
}

/// Target width of an alignment directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthSpec {
    /// An absolute number of cells.
    Cells(u16),
    /// Percent of the reference width.
    Percent(u16),
    /// The whole reference width.
    Full,
    /// The reference width minus this many cells.
    Remaining(u16),
}

impl WidthSpec {
    fn parse(token: &str) -> Option<Self> {
        if token == "full" {
            Some(Self::Full)
        } else if let Some(n) = token.strip_prefix('-') {
            n.parse().ok().map(Self::Remaining)
        } else if let Some(n) = token.strip_suffix('%') {
            n.parse().ok().map(Self::Percent)
        } else {
            token.parse().ok().map(Self::Cells)
        }
    }

    /// Concrete cell count against a reference width.
    pub fn resolve(self, reference: u16) -> usize {
        match self {
            Self::Cells(n) => usize::from(n),
            Self::Percent(p) => {
                (f64::from(p) / 100.0 * f64::from(reference)).round() as usize
            }
            Self::Full => usize::from(reference),
            Self::Remaining(n) => usize::from(reference.saturating_sub(n)),
        }
    }
}

/// A `[<N]`, `[^N]` or `[>N]` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignSpec {
    /// Placement within the width.
    pub align: Align,
    /// Target width.
    pub width: WidthSpec,
}

impl AlignSpec {
    fn parse(symbol: &str) -> Option<Self> {
        let mut chars = symbol.chars();
        let align = match chars.next()? {
            '<' => Align::Start,
            '^' => Align::Center,
            '>' => Align::End,
            _ => return None,
        };
        WidthSpec::parse(chars.as_str()).map(|width| Self { align, width })
    }
}

/// Everything one directive asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directive {
    /// Style fields this directive sets.
    pub style: StyleState,
    /// Custom macro names, in order of appearance.
    pub customs: Vec<String>,
    /// Stash/pop operations, in order of appearance.
    pub ops: Vec<StackOp>,
    /// Alignment for the next text run.
    pub align: Option<AlignSpec>,
}

impl Directive {
    /// Parse the body of a directive (the text between the brackets).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MarkupSyntax`] wrapping [`Error::InvalidColor`] for a
    /// bad `@` background or [`Error::MissingUrlTarget`] for a bare `~`.
    pub fn parse(body: &str) -> Result<Self> {
        let mut directive = Self::default();
        for symbol in body.split_whitespace() {
            directive.apply(symbol).map_err(|source| Error::MarkupSyntax {
                directive: body.to_string(),
                source: Box::new(source),
            })?;
        }
        Ok(directive)
    }

    fn apply(&mut self, symbol: &str) -> Result<()> {
        let style = &mut self.style;

        if let Some(code) = symbol.strip_prefix('/') {
            match code {
                "" => style.merge_from(&StyleState::closed()),
                "fg" => {
                    style.reset_fg();
                }
                "bg" => {
                    style.reset_bg();
                }
                "~" => {
                    style.close_link();
                }
                code => match Attributes::from_code(code) {
                    Some(attr) => {
                        style.close(attr);
                    }
                    None => tracing::trace!(code, "ignoring unknown close code"),
                },
            }
            return Ok(());
        }

        if let Some(attr) = Attributes::from_code(symbol) {
            style.open(attr);
        } else if let Some(color) = symbol.strip_prefix('@') {
            style.set_bg(ColorSpec::parse(color)?);
        } else if let Some(url) = symbol.strip_prefix('~') {
            if url.is_empty() {
                return Err(Error::MissingUrlTarget);
            }
            style.set_link(url);
        } else if let Some(op) = parse_stack_op(symbol) {
            self.ops.push(op);
        } else if let Some(align) = AlignSpec::parse(symbol) {
            self.align = Some(align);
        } else if let Ok(color) = ColorSpec::parse(symbol) {
            style.set_fg(color);
        } else if !self.customs.iter().any(|c| c == symbol) {
            self.customs.push(symbol.to_string());
        }
        Ok(())
    }
}

fn parse_stack_op(symbol: &str) -> Option<StackOp> {
    let (op, name) = match symbol.split_once('=') {
        Some((op, name)) => (op, Some(name.to_string()).filter(|n| !n.is_empty())),
        None => (symbol, None),
    };
    match op {
        "stash" => Some(StackOp::Stash(name)),
        "pop" => Some(StackOp::Pop(name)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{ColorState, Toggle};

    #[test]
    fn test_attributes_open_and_close() {
        let d = Directive::parse("b  /i u").unwrap();
        assert_eq!(d.style.attribute(Attributes::BOLD), Toggle::Open);
        assert_eq!(d.style.attribute(Attributes::ITALIC), Toggle::Close);
        assert_eq!(d.style.attribute(Attributes::UNDERLINE), Toggle::Open);
        assert_eq!(d.style.attribute(Attributes::STRIKE), Toggle::Unset);
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unknown_close_code_is_traced() {
        let logs = Captured::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let d = tracing::subscriber::with_default(subscriber, || Directive::parse("/zz b")).unwrap();
        assert_eq!(d.style.attribute(Attributes::BOLD), Toggle::Open);

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("ignoring unknown close code"), "{output}");
        assert!(output.contains("zz"), "{output}");
    }

    #[test]
    fn test_colors() {
        let d = Directive::parse("red @#00f").unwrap();
        assert_eq!(d.style.active_fg(), Some(ColorSpec::System(1)));
        assert_eq!(d.style.active_bg(), ColorSpec::parse("#0000ff").ok());
    }

    #[test]
    fn test_invalid_background_is_syntax_error() {
        let err = Directive::parse("b @notacolor").unwrap_err();
        match err {
            Error::MarkupSyntax { directive, source } => {
                assert_eq!(directive, "b @notacolor");
                assert!(matches!(*source, Error::InvalidColor(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_hyperlink() {
        let d = Directive::parse("~https://example.com").unwrap();
        assert_eq!(d.style.active_link(), Some("https://example.com"));

        let err = Directive::parse("~").unwrap_err();
        assert!(matches!(
            err,
            Error::MarkupSyntax { source, .. } if matches!(*source, Error::MissingUrlTarget)
        ));
    }

    #[test]
    fn test_full_reset_then_reopen() {
        let d = Directive::parse("/ b").unwrap();
        assert_eq!(d.style.attribute(Attributes::BOLD), Toggle::Open);
        assert_eq!(d.style.attribute(Attributes::DIM), Toggle::Close);
        assert_eq!(d.style.fg(), ColorState::Reset);
    }

    #[test]
    fn test_color_only_resets() {
        let d = Directive::parse("/fg").unwrap();
        assert_eq!(d.style.fg(), ColorState::Reset);
        assert_eq!(d.style.bg(), ColorState::Unset);
    }

    #[test]
    fn test_unknown_symbols_become_customs() {
        let d = Directive::parse("rainbow #zz 1,2 time rainbow").unwrap();
        assert_eq!(d.customs, vec!["rainbow", "#zz", "1,2", "time"]);
        assert!(d.style.is_empty());
    }

    #[test]
    fn test_stack_ops() {
        let d = Directive::parse("stash=outer pop stash").unwrap();
        assert_eq!(
            d.ops,
            vec![
                StackOp::Stash(Some("outer".to_string())),
                StackOp::Pop(None),
                StackOp::Stash(None),
            ]
        );
    }

    #[test]
    fn test_alignment() {
        let d = Directive::parse("<16 red").unwrap();
        assert_eq!(
            d.align,
            Some(AlignSpec { align: Align::Start, width: WidthSpec::Cells(16) })
        );
        assert_eq!(d.style.active_fg(), Some(ColorSpec::System(1)));

        let centered = Directive::parse("^30%").unwrap().align.unwrap();
        assert_eq!(centered.width.resolve(80), 24);
        let right = Directive::parse(">full").unwrap().align.unwrap();
        assert_eq!(right.align, Align::End);
        assert_eq!(right.width.resolve(80), 80);
        assert_eq!(WidthSpec::Remaining(10).resolve(80), 70);
        assert_eq!(WidthSpec::Remaining(100).resolve(80), 0);
    }
}
