//! The raised positions of a single Braille cell.
//!
//! A cell has six dots, numbered like so:
//!
//! ```text
//! 1 o o 4
//! 2 o o 5
//! 3 o o 6
//! ```
//!
//! A [DotSet] is stored as a 6-bit mask where dot `n` lives in bit `n - 1`.
//! This happens to be the exact layout of the Unicode Braille Patterns block,
//! which keeps rendering trivial, and it makes equality order-independent for
//! free: `{1, 2}` and `{2, 1}` are the same mask.

use std::fmt;

/// One of the six dot positions of a Braille cell, always in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dot(u8);

impl Dot {
    /// The lowest valid dot number.
    pub const MIN: u8 = 1;
    /// The highest valid dot number.
    pub const MAX: u8 = 6;

    /// Returns `None` for anything outside `1..=6`.
    pub const fn new(number: u8) -> Option<Self> {
        if number >= Self::MIN && number <= Self::MAX {
            Some(Dot(number))
        } else {
            None
        }
    }

    /// The dot number, `1..=6`.
    pub const fn number(self) -> u8 {
        self.0
    }

    /// The bit this dot occupies in a [DotSet] mask.
    pub const fn bit(self) -> u8 {
        1 << (self.0 - 1)
    }

    /// All six dots in ascending order.
    pub fn all() -> impl Iterator<Item = Dot> {
        (Self::MIN..=Self::MAX).map(Dot)
    }
}

impl fmt::Display for Dot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An unordered set of distinct [Dot]s; "which dots are raised" for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DotSet(u8);

impl DotSet {
    /// No dots raised; also what the classifier hands back for "no signal".
    pub const EMPTY: DotSet = DotSet(0);

    const MASK: u8 = 0b0011_1111;

    /// Builds a set from a list of dot numbers in a const context. Numbers
    /// outside `1..=6` are skipped.
    pub const fn of(dots: &[u8]) -> Self {
        let mut mask = 0;
        let mut i = 0;
        while i < dots.len() {
            if let Some(dot) = Dot::new(dots[i]) {
                mask |= dot.bit();
            }
            i += 1;
        }
        DotSet(mask)
    }

    /// Builds a set from a raw mask (dot `n` in bit `n - 1`). The two high
    /// bits are dropped.
    pub const fn from_mask(mask: u8) -> Self {
        DotSet(mask & Self::MASK)
    }

    /// The raw mask, dot `n` in bit `n - 1`.
    pub const fn mask(self) -> u8 {
        self.0
    }

    /// Collects dot numbers, silently skipping any outside `1..=6`.
    pub fn from_dots<I: IntoIterator<Item = u8>>(dots: I) -> Self {
        dots.into_iter().filter_map(Dot::new).collect()
    }

    /// Like [DotSet::from_dots], but gives up on the first invalid number.
    pub fn try_from_dots<I: IntoIterator<Item = u8>>(dots: I) -> Option<Self> {
        dots.into_iter()
            .map(Dot::new)
            .collect::<Option<Vec<Dot>>>()
            .map(|dots| dots.into_iter().collect())
    }

    /// Raises `dot`. Inserting a dot twice is a no-op.
    pub fn insert(&mut self, dot: Dot) {
        self.0 |= dot.bit();
    }

    /// Lowers `dot`.
    pub fn remove(&mut self, dot: Dot) {
        self.0 &= !dot.bit();
    }

    /// Whether `dot` is raised.
    pub const fn contains(self, dot: Dot) -> bool {
        self.0 & dot.bit() != 0
    }

    /// Number of raised dots.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether no dot is raised.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The raised dots in ascending order.
    pub fn iter(self) -> impl Iterator<Item = Dot> {
        Dot::all().filter(move |&dot| self.contains(dot))
    }

    /// The raised dot numbers in ascending order.
    pub fn numbers(self) -> Vec<u8> {
        self.iter().map(Dot::number).collect()
    }
}

impl FromIterator<Dot> for DotSet {
    fn from_iter<T: IntoIterator<Item = Dot>>(iter: T) -> Self {
        let mut set = DotSet::EMPTY;
        for dot in iter {
            set.insert(dot);
        }
        set
    }
}

impl Extend<Dot> for DotSet {
    fn extend<T: IntoIterator<Item = Dot>>(&mut self, iter: T) {
        for dot in iter {
            self.insert(dot);
        }
    }
}

impl fmt::Display for DotSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numbers: Vec<String> = self.iter().map(|dot| dot.to_string()).collect();
        write!(f, "{{{}}}", numbers.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dots_outside_the_cell_are_rejected() {
        assert_eq!(Dot::new(0), None);
        assert_eq!(Dot::new(7), None);
        assert_eq!(Dot::new(6).map(Dot::bit), Some(0b10_0000));
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let a = DotSet::from_dots([1, 2, 4]);
        let b = DotSet::from_dots([4, 1, 2]);
        let c = DotSet::from_dots([2, 2, 4, 1]);
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn invalid_numbers_are_skipped_or_refused() {
        assert_eq!(DotSet::from_dots([1, 9, 0]), DotSet::of(&[1]));
        assert_eq!(DotSet::try_from_dots([1, 9]), None);
        assert_eq!(DotSet::try_from_dots([3, 1]), Some(DotSet::of(&[1, 3])));
        assert_eq!(DotSet::try_from_dots([]), Some(DotSet::EMPTY));
    }

    #[test]
    fn insert_and_remove() {
        let mut set = DotSet::EMPTY;
        let five = Dot::new(5).unwrap();
        set.insert(five);
        set.insert(five);
        assert_eq!(set.len(), 1);
        assert!(set.contains(five));
        set.remove(five);
        assert!(set.is_empty());
    }

    #[test]
    fn display_lists_dots_ascending() {
        assert_eq!(DotSet::from_dots([6, 1, 3]).to_string(), "{1,3,6}");
        assert_eq!(DotSet::EMPTY.to_string(), "{}");
    }

    #[test]
    fn from_mask_drops_high_bits() {
        assert_eq!(DotSet::from_mask(0xFF).mask(), 0b0011_1111);
        assert_eq!(DotSet::from_mask(0xFF).len(), 6);
    }
}
