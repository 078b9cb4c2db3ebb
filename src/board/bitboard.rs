//! Single-word bitboard: every accepted board shape has exactly 64 cells

use super::TOTAL_CELLS;

/// One bit per cell, indexed row-major by the owning board's shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    #[inline]
    pub fn set(&mut self, idx: usize) {
        debug_assert!(idx < TOTAL_CELLS);
        self.bits |= 1u64 << idx;
    }

    #[inline]
    pub fn clear(&mut self, idx: usize) {
        debug_assert!(idx < TOTAL_CELLS);
        self.bits &= !(1u64 << idx);
    }

    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        (self.bits >> idx) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.count_ones()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterate over set cell indices in ascending order
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter { bits: self.bits }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: u64,
}

impl Iterator for BitboardIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        // Clear the lowest set bit
        self.bits &= self.bits - 1;
        Some(idx)
    }
}
