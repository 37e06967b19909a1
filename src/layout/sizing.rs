//! Padding specs and their 1/2/4 component shorthand.

use crate::error::{Error, Result};

/// Space reserved inside a rectangle's edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Padding {
    /// Columns reserved on the left.
    pub left: u16,
    /// Rows reserved on top.
    pub top: u16,
    /// Columns reserved on the right.
    pub right: u16,
    /// Rows reserved at the bottom.
    pub bottom: u16,
}

impl Padding {
    /// No padding.
    pub const ZERO: Self = Self::uniform(0);

    /// Explicit sides, in `(left, top, right, bottom)` order.
    pub const fn new(left: u16, top: u16, right: u16, bottom: u16) -> Self {
        Self { left, top, right, bottom }
    }

    /// The same amount on every side.
    pub const fn uniform(n: u16) -> Self {
        Self::new(n, n, n, n)
    }

    /// `inline` on left and right, `block` on top and bottom.
    pub const fn symmetric(inline: u16, block: u16) -> Self {
        Self::new(inline, block, inline, block)
    }

    /// Expand a shorthand tuple.
    ///
    /// - `[n]`: every side
    /// - `[inline, block]`
    /// - `[left, top, right, bottom]`
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSizingTuple`] for any other arity.
    pub fn from_components(components: &[u16]) -> Result<Self> {
        match *components {
            [n] => Ok(Self::uniform(n)),
            [inline, block] => Ok(Self::symmetric(inline, block)),
            [left, top, right, bottom] => Ok(Self::new(left, top, right, bottom)),
            _ => Err(Error::InvalidSizingTuple(components.len())),
        }
    }

    /// Total columns taken.
    pub const fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    /// Total rows taken.
    pub const fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

impl From<u16> for Padding {
    fn from(n: u16) -> Self {
        Self::uniform(n)
    }
}

impl From<(u16, u16)> for Padding {
    fn from((inline, block): (u16, u16)) -> Self {
        Self::symmetric(inline, block)
    }
}

impl From<(u16, u16, u16, u16)> for Padding {
    fn from((left, top, right, bottom): (u16, u16, u16, u16)) -> Self {
        Self::new(left, top, right, bottom)
    }
}

impl TryFrom<&[u16]> for Padding {
    type Error = Error;

    fn try_from(components: &[u16]) -> Result<Self> {
        Self::from_components(components)
    }
}
