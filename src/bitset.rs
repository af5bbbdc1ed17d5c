//! A dense, word-packed bit array: the object every Position algorithm in
//! this crate operates on directly.
//!
//! Built on `bitvec` rather than a hand-rolled `Vec<u64>`, for the same
//! reason a bit-board puzzle solver elsewhere in this ecosystem reaches for
//! it: O(1) random access plus word-level bulk operations, without
//! re-deriving shift/mask arithmetic that `bitvec` already gets right.
//! Bit `i` set means the integer `i` is a member of the semigroup.

use bitvec::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitArray {
    bits: BitVec<u64, Lsb0>,
}

impl BitArray {
    /// A new array of `length` clear bits.
    pub fn new(length: usize) -> Self {
        BitArray {
            bits: bitvec![u64, Lsb0; 0; length],
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> bool {
        self.bits[i]
    }

    #[inline]
    pub fn set(&mut self, i: usize) {
        self.bits.set(i, true);
    }

    /// Sets every bit in the arithmetic progression `start, start+step,
    /// start+2*step, …` that falls inside the array. This is the bulk
    /// primitive the `add` propagation is built from.
    pub fn set_progression(&mut self, start: usize, step: usize) {
        debug_assert!(step > 0);
        let len = self.len();
        let mut i = start;
        while i < len {
            self.bits.set(i, true);
            i += step;
        }
    }

    /// Index of the first clear bit, if any.
    pub fn first_clear(&self) -> Option<usize> {
        self.bits.iter().by_vals().position(|b| !b)
    }

    /// Index of the last clear bit, if any. Used to compute the Frobenius
    /// number.
    pub fn last_clear(&self) -> Option<usize> {
        self.bits.iter().by_vals().rposition(|b| !b)
    }

    pub fn any_clear(&self) -> bool {
        !self.bits.all()
    }

    /// Count of clear bits below `len`: the genus when applied to the
    /// reduced array.
    pub fn count_clear(&self) -> usize {
        self.bits.count_zeros()
    }

    /// Ascending indices of clear bits.
    pub fn gaps_ascending(&self) -> Vec<usize> {
        self.bits
            .iter()
            .by_vals()
            .enumerate()
            .filter_map(|(i, b)| (!b).then_some(i))
            .collect()
    }

    /// Descending indices of clear bits.
    pub fn gaps_descending(&self) -> Vec<usize> {
        let mut gaps = self.gaps_ascending();
        gaps.reverse();
        gaps
    }

    /// Tests whether there exists some `i` in `0..window` with `bits[i]` set
    /// and `bits[i + offset]` clear. This is the bit test generator
    /// minimization reduces to: a surviving generator `g` must still
    /// eliminate something a smaller move `n` doesn't, i.e. `offset = g - n`
    /// and `window = len - g`.
    pub fn exists_set_with_clear_at_offset(&self, offset: usize, window: usize) -> bool {
        let len = self.len();
        let window = window.min(len.saturating_sub(offset));
        (0..window).any(|i| self.bits[i] && !self.bits[i + offset])
    }

    /// Shrinks the array to `new_len`, dropping the tail. `new_len` must be
    /// `<= len()`.
    pub fn truncate(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.len());
        self.bits.truncate(new_len);
    }

    /// Returns a reduced view sampling every `step`'th bit, i.e.
    /// `bits[0], bits[step], bits[2*step], …`. Used to derive the
    /// gcd-reduced semigroup array from the raw one.
    pub fn reduced(&self, step: usize) -> BitArray {
        debug_assert!(step > 0);
        let len = self.len();
        let reduced_len = len.div_ceil(step).max(1);
        let mut out = BitArray::new(reduced_len);
        let mut i = 0;
        let mut j = 0;
        while i < len {
            if self.bits[i] {
                out.set(j);
            }
            i += step;
            j += 1;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progression_sets_arithmetic_sequence() {
        let mut a = BitArray::new(20);
        a.set_progression(3, 5);
        for i in 0..20 {
            assert_eq!(a.get(i), i == 3 || i == 8 || i == 13 || i == 18, "index {i}");
        }
    }

    #[test]
    fn last_clear_finds_highest_gap() {
        let mut a = BitArray::new(10);
        for i in [0usize, 1, 2, 3, 5, 7, 8, 9] {
            a.set(i);
        }
        assert_eq!(a.last_clear(), Some(6));
        assert_eq!(a.first_clear(), Some(4));
    }

    #[test]
    fn exists_set_with_clear_offset_detects_elimination() {
        let mut a = BitArray::new(10);
        a.set(0);
        a.set(4);
        // offset 4, window 6: index 0 set, index 4 also set -> no
        // elimination there, and nothing else set in range.
        assert!(!a.exists_set_with_clear_at_offset(4, 6));
        a.set(2);
        // index 2 set, index 6 clear -> elimination found.
        assert!(a.exists_set_with_clear_at_offset(4, 6));
    }

    #[test]
    fn reduced_samples_every_step() {
        let mut a = BitArray::new(12);
        for i in [0usize, 3, 6, 9] {
            a.set(i);
        }
        let r = a.reduced(3);
        assert_eq!(r.len(), 4);
        for i in 0..4 {
            assert!(r.get(i));
        }
    }
}
