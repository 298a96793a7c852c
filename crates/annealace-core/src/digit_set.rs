//! Compact sets of candidate digits.

use std::fmt::{self, Debug};
use std::iter::FusedIterator;
use std::ops::{BitOr, BitOrAssign};

/// A set of digits `1..=N`, stored as a bitmask.
///
/// Bit `d - 1` is set when digit `d` is a member. The mask is 16 bits wide,
/// which covers every supported board size. Set operations and iteration
/// always yield digits in ascending order.
///
/// # Examples
///
/// ```
/// use annealace_core::DigitSet;
///
/// let mut seen = DigitSet::new();
/// seen.insert(3);
/// seen.insert(7);
///
/// assert_eq!(seen.len(), 2);
/// assert!(seen.contains(3));
/// assert!(!seen.contains(4));
///
/// // Digits of 1..=9 that are not members:
/// let missing: Vec<u8> = seen.missing(9).iter().collect();
/// assert_eq!(missing, [1, 2, 4, 5, 6, 8, 9]);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DigitSet {
    bits: u16,
}

impl DigitSet {
    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// Creates an empty set.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates the set of all digits `1..=domain`.
    ///
    /// # Panics
    ///
    /// Panics if `domain` exceeds 16.
    #[must_use]
    pub fn full(domain: usize) -> Self {
        assert!(domain <= 16, "digit domain must be at most 16, got {domain}");
        if domain == 16 {
            Self { bits: u16::MAX }
        } else {
            Self {
                bits: (1 << domain) - 1,
            }
        }
    }

    /// Adds `digit` to the set.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in the range 1-16.
    #[inline]
    pub fn insert(&mut self, digit: u8) {
        self.bits |= Self::mask(digit);
    }

    /// Removes `digit` from the set.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in the range 1-16.
    #[inline]
    pub fn remove(&mut self, digit: u8) {
        self.bits &= !Self::mask(digit);
    }

    /// Returns `true` if `digit` is a member.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not in the range 1-16.
    #[must_use]
    #[inline]
    pub fn contains(self, digit: u8) -> bool {
        self.bits & Self::mask(digit) != 0
    }

    /// Number of digits in the set.
    #[must_use]
    #[inline]
    pub fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if the set holds no digits.
    #[must_use]
    #[inline]
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Digits of `1..=domain` that are not members of this set.
    #[must_use]
    pub fn missing(self, domain: usize) -> Self {
        Self {
            bits: Self::full(domain).bits & !self.bits,
        }
    }

    /// Returns the only member, or `None` unless the set has exactly one digit.
    #[must_use]
    pub fn as_single(self) -> Option<u8> {
        if self.bits != 0 && self.bits & (self.bits - 1) == 0 {
            #[expect(clippy::cast_possible_truncation)]
            Some(self.bits.trailing_zeros() as u8 + 1)
        } else {
            None
        }
    }

    /// Iterates over the member digits in ascending order.
    #[must_use]
    pub fn iter(self) -> Digits {
        Digits { bits: self.bits }
    }

    #[inline]
    fn mask(digit: u8) -> u16 {
        assert!(
            (1..=16).contains(&digit),
            "digit must be between 1 and 16, got {digit}"
        );
        1 << (digit - 1)
    }
}

impl BitOr for DigitSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitOrAssign for DigitSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl FromIterator<u8> for DigitSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::new();
        for digit in iter {
            set.insert(digit);
        }
        set
    }
}

impl IntoIterator for DigitSet {
    type Item = u8;
    type IntoIter = Digits;

    fn into_iter(self) -> Digits {
        self.iter()
    }
}

impl Debug for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the digits of a [`DigitSet`], ascending.
#[derive(Debug, Clone)]
pub struct Digits {
    bits: u16,
}

impl Iterator for Digits {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let digit = self.bits.trailing_zeros() as u8 + 1;
        self.bits &= self.bits - 1;
        Some(digit)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits.count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Digits {}
impl FusedIterator for Digits {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_insert_contains_len() {
        let mut set = DigitSet::new();
        assert!(set.is_empty());
        set.insert(1);
        set.insert(9);
        set.insert(9);
        assert_eq!(set.len(), 2);
        assert!(set.contains(1));
        assert!(set.contains(9));
        assert!(!set.contains(5));
    }

    #[test]
    fn test_iter_ascending() {
        let set: DigitSet = [9, 1, 4].into_iter().collect();
        let digits: Vec<_> = set.iter().collect();
        assert_eq!(digits, [1, 4, 9]);
    }

    #[test]
    fn test_full_and_missing() {
        let full = DigitSet::full(9);
        assert_eq!(full.len(), 9);
        assert!(full.missing(9).is_empty());

        let set: DigitSet = [2, 5].into_iter().collect();
        let missing: Vec<_> = set.missing(4).iter().collect();
        assert_eq!(missing, [1, 3, 4]);
    }

    #[test]
    fn test_as_single() {
        assert_eq!(DigitSet::new().as_single(), None);
        assert_eq!(DigitSet::from_iter([7]).as_single(), Some(7));
        assert_eq!(DigitSet::from_iter([1, 7]).as_single(), None);
    }

    #[test]
    #[should_panic(expected = "digit must be between 1 and 16")]
    fn test_zero_rejected() {
        let mut set = DigitSet::new();
        set.insert(0);
    }

    proptest! {
        // A set and its complement partition the domain: no digit in both,
        // union covering 1..=domain exactly.
        #[test]
        fn prop_missing_partitions_domain(digits in prop::collection::vec(1u8..=9, 0..12)) {
            let set: DigitSet = digits.into_iter().collect();
            let missing = set.missing(9);

            for digit in 1..=9u8 {
                prop_assert_ne!(set.contains(digit), missing.contains(digit));
            }
            prop_assert_eq!(set | missing, DigitSet::full(9));
            prop_assert_eq!(set.len() + missing.len(), 9);
        }
    }
}
