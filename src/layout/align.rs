//! Alignment of a sequence within a fixed size.

/// Placement along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    /// Left or top.
    #[default]
    Start,
    /// Centered. Odd remainders put the extra unit after.
    Center,
    /// Right or bottom.
    End,
}

impl Align {
    /// Split `remainder` into `(before, after)` padding.
    #[inline]
    pub const fn split(self, remainder: usize) -> (usize, usize) {
        match self {
            Self::Start => (0, remainder),
            Self::Center => (remainder / 2, remainder - remainder / 2),
            Self::End => (remainder, 0),
        }
    }
}

/// Pad `items` with `fill` up to `size`. Longer sequences are returned as is.
pub fn align<T: Clone>(items: Vec<T>, size: usize, fill: &T, alignment: Align) -> Vec<T> {
    if items.len() >= size {
        return items;
    }
    let (before, after) = alignment.split(size - items.len());
    let mut out = Vec::with_capacity(size);
    out.extend(std::iter::repeat(fill).take(before).cloned());
    out.extend(items);
    out.extend(std::iter::repeat(fill).take(after).cloned());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_start_center_end() {
        let items = vec![1, 2];
        assert_eq!(align(items.clone(), 5, &0, Align::Start), vec![1, 2, 0, 0, 0]);
        assert_eq!(align(items.clone(), 5, &0, Align::Center), vec![0, 1, 2, 0, 0]);
        assert_eq!(align(items, 5, &0, Align::End), vec![0, 0, 0, 1, 2]);
    }

    #[test]
    fn test_align_never_truncates() {
        assert_eq!(align(vec![1, 2, 3], 2, &0, Align::End), vec![1, 2, 3]);
    }
}
