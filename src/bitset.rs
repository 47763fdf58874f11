//! Dense bit-packed subsets of a fixed universe `{0..bits}`.
//!
//! Backed by [`fixedbitset::FixedBitSet`]. The binary operations report
//! whether they changed their left-hand operand: that flag is load-bearing
//! for the worklist termination in [`crate::decide`] and is not something
//! `FixedBitSet`'s own `union_with`/`intersect_with` expose, so this module
//! wraps it rather than exposing the inner type directly.

use fixedbitset::FixedBitSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSet {
    inner: FixedBitSet,
}

impl BitSet {
    /// Creates an all-zero bitset over the universe `{0..bits}`.
    pub fn new(bits: usize) -> Self {
        Self {
            inner: FixedBitSet::with_capacity(bits),
        }
    }

    /// Size of the universe this bitset was created over.
    pub fn universe(&self) -> usize {
        self.inner.len()
    }

    /// Reads the bit at `i`.
    pub fn get(&self, i: usize) -> bool {
        self.inner.contains(i)
    }

    /// Sets the bit at `i` to `value`, returning its previous value.
    pub fn set(&mut self, i: usize, value: bool) -> bool {
        let previous = self.inner.contains(i);
        self.inner.set(i, value);
        previous
    }

    /// `self |= other`, returning whether `self` changed.
    ///
    /// Preconditions: `self.universe() == other.universe()`.
    pub fn union_into(&mut self, other: &BitSet) -> bool {
        debug_assert_eq!(self.universe(), other.universe());
        let before = self.inner.clone();
        self.inner.union_with(&other.inner);
        before != self.inner
    }

    /// `self &= other`, returning whether `self` changed.
    ///
    /// Preconditions: `self.universe() == other.universe()`.
    pub fn intersect_into(&mut self, other: &BitSet) -> bool {
        debug_assert_eq!(self.universe(), other.universe());
        let before = self.inner.clone();
        self.inner.intersect_with(&other.inner);
        before != self.inner
    }

    /// Overwrites `self` with the complement of `other`, within the same universe.
    pub fn complement_from(&mut self, other: &BitSet) {
        self.inner.clone_from(&other.inner);
        self.inner.toggle_range(..);
    }

    /// Ascending list of set positions.
    pub fn indices(&self) -> Vec<usize> {
        self.inner.ones().collect()
    }

    /// True iff at least one bit is set.
    pub fn any(&self) -> bool {
        self.inner.count_ones(..) > 0
    }

    /// Clears every bit, preserving the universe.
    pub fn clear_all(&mut self) {
        self.inner.clear();
    }

    /// Sets every bit, preserving the universe.
    pub fn set_all(&mut self) {
        self.inner.insert_range(..);
    }
}
