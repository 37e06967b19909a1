//! Rect: cell bounds, and resolving declared position/size against a container.

use super::sizing::Padding;
use std::fmt;
use std::sync::Arc;

/// A rectangle defined by position and size.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate (column) of the top-left corner.
    pub x: u16,
    /// Y coordinate (row) of the top-left corner.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle anchored at the origin.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Get the area (number of cells).
    #[inline]
    pub const fn area(&self) -> u32 {
        (self.width as u32) * (self.height as u32)
    }

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Left edge (inclusive).
    #[inline]
    pub const fn left(&self) -> u16 {
        self.x
    }

    /// Top edge (inclusive).
    #[inline]
    pub const fn top(&self) -> u16 {
        self.y
    }

    /// Get the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Get the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by `margin` on every side.
    #[inline]
    #[must_use]
    pub const fn shrink(&self, margin: u16) -> Self {
        self.inset(&Padding::uniform(margin))
    }

    /// Shrink by a padding, collapsing to zero size at the far edge
    /// instead of going negative.
    #[must_use]
    pub const fn inset(&self, padding: &Padding) -> Self {
        let x = self.x.saturating_add(min(padding.left, self.width));
        let y = self.y.saturating_add(min(padding.top, self.height));
        let width = self.width.saturating_sub(padding.left).saturating_sub(padding.right);
        let height = self.height.saturating_sub(padding.top).saturating_sub(padding.bottom);
        Self::new(x, y, width, height)
    }

    /// Resolve a declared position and size inside a `container_w` by
    /// `container_h` container.
    ///
    /// `left` is clamped to `container_w - 1` and `right` to `container_w`,
    /// and likewise for `top` and `bottom`, so the result always fits.
    pub fn resolve(pos: &Position, size: &Size, container_w: u16, container_h: u16) -> Self {
        let (x, width) = resolve_axis(&pos.x, &size.width, container_w);
        let (y, height) = resolve_axis(&pos.y, &size.height, container_h);
        Self::new(x, y, width, height)
    }
}

const fn min(a: u16, b: u16) -> u16 {
    if a < b {
        a
    } else {
        b
    }
}

fn resolve_axis(start: &Dim, extent: &Dim, container: u16) -> (u16, u16) {
    let low = start.resolve(container).min(container.saturating_sub(1));
    let high = low.saturating_add(extent.resolve(container)).min(container);
    (low, high - low)
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}

/// One declared coordinate or length.
#[derive(Clone)]
pub enum Dim {
    /// Absolute cells.
    Cells(u16),
    /// Fraction of the container extent, rounded to the nearest cell.
    Fraction(f32),
    /// Computed from the container extent.
    Computed(Arc<dyn Fn(u16) -> u16 + Send + Sync>),
}

impl Dim {
    /// Build a computed dimension.
    pub fn computed(f: impl Fn(u16) -> u16 + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(f))
    }

    /// Resolve against the container extent.
    ///
    /// Negative or NaN fractions resolve to 0.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resolve(&self, total: u16) -> u16 {
        match self {
            Self::Cells(n) => *n,
            Self::Fraction(f) => {
                let cells = (f64::from(*f) * f64::from(total)).round();
                if cells.is_nan() || cells <= 0.0 {
                    0
                } else {
                    cells.min(f64::from(u16::MAX)) as u16
                }
            }
            Self::Computed(f) => f(total),
        }
    }
}

impl Default for Dim {
    fn default() -> Self {
        Self::Cells(0)
    }
}

impl fmt::Debug for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cells(n) => write!(f, "{n}"),
            Self::Fraction(v) => write!(f, "{v}"),
            Self::Computed(_) => f.write_str("<computed>"),
        }
    }
}

impl From<u16> for Dim {
    fn from(n: u16) -> Self {
        Self::Cells(n)
    }
}

impl From<f32> for Dim {
    fn from(f: f32) -> Self {
        Self::Fraction(f)
    }
}

/// Declared top-left corner.
#[derive(Debug, Clone, Default)]
pub struct Position {
    /// Column.
    pub x: Dim,
    /// Row.
    pub y: Dim,
}

impl Position {
    /// Create a position from anything convertible to [`Dim`].
    pub fn new(x: impl Into<Dim>, y: impl Into<Dim>) -> Self {
        Self { x: x.into(), y: y.into() }
    }
}

/// Declared width and height.
#[derive(Debug, Clone)]
pub struct Size {
    /// Width.
    pub width: Dim,
    /// Height.
    pub height: Dim,
}

impl Size {
    /// Create a size from anything convertible to [`Dim`].
    pub fn new(width: impl Into<Dim>, height: impl Into<Dim>) -> Self {
        Self { width: width.into(), height: height.into() }
    }
}

impl Default for Size {
    /// The whole container.
    fn default() -> Self {
        Self::new(1.0f32, 1.0f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_absolute_and_fraction() {
        let rect = Rect::resolve(&Position::new(2u16, 0.5f32), &Size::new(0.5f32, 3u16), 20, 10);
        assert_eq!(rect, Rect::new(2, 5, 10, 3));
    }

    #[test]
    fn test_resolve_clamps_to_container() {
        let rect = Rect::resolve(&Position::new(1.5f32, 0u16), &Size::new(1.0f32, 1.0f32), 10, 4);
        assert_eq!(rect.left(), 9);
        assert_eq!(rect.right(), 10);
        assert_eq!(rect.bottom(), 4);

        let rect = Rect::resolve(&Position::new(50u16, 50u16), &Size::new(5u16, 5u16), 10, 4);
        assert_eq!(rect, Rect::new(9, 3, 1, 1));
    }

    #[test]
    fn test_resolve_bounds_hold_for_mixed_inputs() {
        let dims = [
            Dim::Cells(0),
            Dim::Cells(7),
            Dim::Cells(u16::MAX),
            Dim::Fraction(-0.5),
            Dim::Fraction(0.33),
            Dim::Fraction(1.5),
            Dim::Fraction(f32::NAN),
            Dim::computed(|total| total / 3),
            Dim::computed(|total| total.saturating_mul(4)),
        ];
        for container in [0u16, 1, 10, 97] {
            for x in &dims {
                for w in &dims {
                    let pos = Position { x: x.clone(), y: x.clone() };
                    let size = Size { width: w.clone(), height: w.clone() };
                    let rect = Rect::resolve(&pos, &size, container, container);
                    assert!(rect.left() <= rect.right());
                    assert!(rect.right() <= container);
                    assert!(rect.left() <= container.saturating_sub(1));
                }
            }
        }
    }

    #[test]
    fn test_inset_never_negative() {
        let rect = Rect::new(2, 2, 4, 3);
        assert_eq!(rect.inset(&Padding::new(1, 1, 1, 1)), Rect::new(3, 3, 2, 1));
        assert_eq!(rect.inset(&Padding::new(3, 0, 3, 0)), Rect::new(6, 2, 0, 3));
        assert_eq!(rect.shrink(5), Rect::new(6, 5, 0, 0));
    }

    #[test]
    fn test_contains() {
        let rect = Rect::new(1, 1, 2, 2);
        assert!(rect.contains(1, 1));
        assert!(rect.contains(2, 2));
        assert!(!rect.contains(3, 1));
    }
}
