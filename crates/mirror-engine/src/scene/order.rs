/// Z-ordering key for draw items.
///
/// Higher values appear on top of lower values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    /// Full-window backdrop (rain).
    pub const BACKGROUND: ZIndex = ZIndex(0);
    /// Panel contents (clocks, readouts).
    pub const CONTENT: ZIndex = ZIndex(100);
    /// Anything drawn over panels.
    pub const OVERLAY: ZIndex = ZIndex(200);

    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }

    /// Layer `n` steps above `self`.
    #[inline]
    pub const fn above(self, n: i32) -> Self {
        Self(self.0.saturating_add(n))
    }
}

/// Stable sort key for draw items.
///
/// Derived ordering compares `z` first (back-to-front), then `order`
/// (insertion order within the same layer).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_dominates_insertion_order() {
        let back = SortKey::new(ZIndex::BACKGROUND, 10);
        let front = SortKey::new(ZIndex::CONTENT, 0);
        assert!(back < front);
    }

    #[test]
    fn insertion_order_breaks_ties() {
        assert!(SortKey::new(ZIndex(3), 1) < SortKey::new(ZIndex(3), 2));
    }

    #[test]
    fn above_saturates() {
        assert_eq!(ZIndex(i32::MAX).above(1), ZIndex(i32::MAX));
        assert_eq!(ZIndex::CONTENT.above(2), ZIndex(102));
    }
}
