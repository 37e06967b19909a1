//! Compiler: markup in, ANSI out.

use super::customs::Customs;
use super::directive::{AlignSpec, Directive, StackOp};
use super::stash::StashStack;
use super::token::{tokenize, Token};
use crate::error::Result;
use crate::style::{StyleState, LINK_CLOSE, RESET};
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::UnicodeWidthStr;

/// Width used by alignment directives when none is configured.
pub const DEFAULT_WIDTH: u16 = 80;

static ESCAPES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][0-9]+;[^\x1b\x07]*(?:\x1b\\|\x07)|[\x00-\x08\x0b-\x1f\x7f]",
    )
    .expect("escape pattern is valid")
});

/// Remove SGR, other CSI, OSC hyperlink sequences and raw control bytes.
///
/// Newlines and tabs are kept.
pub fn strip(text: &str) -> String {
    ESCAPES.replace_all(text, "").into_owned()
}

/// Compile markup with no customs and the default width.
pub fn compile(text: &str) -> Result<String> {
    MarkupCompiler::new().compile(text)
}

/// Compiles markup strings against a custom table and a reference width.
#[derive(Debug)]
pub struct MarkupCompiler {
    customs: Customs,
    width: u16,
}

impl Default for MarkupCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupCompiler {
    /// A compiler with no customs and an 80-cell reference width.
    pub fn new() -> Self {
        Self {
            customs: Customs::new(),
            width: DEFAULT_WIDTH,
        }
    }

    /// A compiler whose reference width is the current terminal width.
    ///
    /// Falls back to the default width when the size cannot be read.
    pub fn for_terminal() -> Self {
        let width = crossterm::terminal::size().map_or(DEFAULT_WIDTH, |(w, _)| w);
        Self::new().with_width(width)
    }

    /// Builder: use these customs.
    #[must_use]
    pub fn with_customs(mut self, customs: Customs) -> Self {
        self.customs = customs;
        self
    }

    /// Builder: reference width for alignment directives.
    #[must_use]
    pub const fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Registered customs.
    pub const fn customs(&self) -> &Customs {
        &self.customs
    }

    /// Reference width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Compile `text` into an ANSI string.
    ///
    /// Output always ends with a full SGR reset, preceded by a hyperlink
    /// close if one is still open.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MarkupSyntax`](crate::Error::MarkupSyntax) for the
    /// first directive that fails to parse. Nothing is returned on error.
    pub fn compile(&self, text: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len() + 16);
        let mut running = StyleState::new();
        let mut emitted = StyleState::new();
        let mut stash = StashStack::default();
        let mut pending_customs: Vec<String> = Vec::new();
        let mut pending_align: Option<AlignSpec> = None;

        for token in tokenize(text) {
            match token {
                Token::Directive(body) => {
                    let directive = Directive::parse(body)?;
                    for op in directive.ops {
                        match op {
                            StackOp::Stash(name) => stash.push(name, std::mem::take(&mut running)),
                            StackOp::Pop(name) => {
                                if let Some(state) = stash.pop(name.as_deref()) {
                                    running = state;
                                }
                            }
                        }
                    }
                    running.merge_from(&directive.style);
                    for name in directive.customs {
                        if !pending_customs.contains(&name) {
                            pending_customs.push(name);
                        }
                    }
                    if directive.align.is_some() {
                        pending_align = directive.align;
                    }
                }
                Token::Text(literal) => {
                    running.write_diff(&emitted, &mut out);
                    emitted.clone_from(&running);

                    let mut literal = if pending_customs.is_empty() {
                        literal
                    } else {
                        self.customs.apply(&pending_customs, &literal)
                    };
                    pending_customs.clear();
                    if let Some(spec) = pending_align.take() {
                        literal = self.align_text(&literal, spec);
                    }
                    out.push_str(&literal);
                }
            }
        }

        if emitted.active_link().is_some() {
            out.push_str(LINK_CLOSE);
        }
        out.push_str(RESET);
        Ok(out)
    }

    fn align_text(&self, text: &str, spec: AlignSpec) -> String {
        let target = spec.width.resolve(self.width);
        let width = strip(text).width();
        if width >= target {
            return text.to_string();
        }
        let (before, after) = spec.align.split(target - width);
        let mut out = String::with_capacity(text.len() + before + after);
        out.extend(std::iter::repeat(' ').take(before));
        out.push_str(text);
        out.extend(std::iter::repeat(' ').take(after));
        out
    }
}
