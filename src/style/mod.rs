//! Style module: colors, text attributes and SGR transitions.
//!
//! - [`ColorSpec`]: a parsed color token
//! - [`StyleState`]: tri-state style record with merge and diff
//! - SGR decoding via [`StyleState::apply_sgr`]

mod color;
mod sgr;
mod state;

pub use color::{ColorSpec, Layer, Rgb, SYSTEM_COLORS};
pub use state::{link_open, Attributes, ColorState, LinkState, StyleState, Toggle, LINK_CLOSE, RESET};
