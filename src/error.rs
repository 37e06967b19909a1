//! Error types shared across the crate.

/// Errors produced by markup compilation, sizing and the terminal runtime.
///
/// Layout never produces an error: out-of-range geometry is clamped.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A color token matched none of the accepted forms.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// A hyperlink directive (`~`) had no URL after it.
    #[error("hyperlink directive is missing a target url")]
    MissingUrlTarget,

    /// A padding spec had an arity other than 1, 2 or 4.
    #[error("sizing tuple must have 1, 2 or 4 components, got {0}")]
    InvalidSizingTuple(usize),

    /// A directive failed to parse.
    #[error("invalid markup directive [{directive}]: {source}")]
    MarkupSyntax {
        /// Source text of the offending directive, without brackets.
        directive: String,
        /// What went wrong inside the directive.
        #[source]
        source: Box<Error>,
    },

    /// The process is not attached to a usable terminal.
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
