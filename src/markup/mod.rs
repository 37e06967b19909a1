//! Markup module: bracketed style directives compiled to ANSI.
//!
//! ```text
//! [b red]error:[/] file [u ~https://example.com]not found[/]
//! ```
//!
//! - [`tokenize`]: literal text and directive tokens
//! - [`Directive`]: one directive's style, customs, stack ops and alignment
//! - [`MarkupCompiler`]: drives both and tracks the emitted style
//! - [`strip`]: removes escape sequences again

mod compiler;
mod customs;
mod directive;
mod stash;
mod token;

pub use compiler::{compile, strip, MarkupCompiler, DEFAULT_WIDTH};
pub use customs::{Custom, Customs};
pub use directive::{AlignSpec, Directive, StackOp, WidthSpec};
pub use stash::StashStack;
pub use token::{tokenize, Token};
