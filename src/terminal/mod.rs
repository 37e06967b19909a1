//! Terminal module: byte-level output to the terminal.

mod output;

pub use output::OutputBuffer;
