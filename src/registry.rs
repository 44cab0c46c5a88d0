//! The Grade-1 English Braille tables for letters and digits, and lookups in
//! both directions.
//!
//! Digits reuse the patterns of the letters `J`, `A` through `I`. In print
//! Braille a digit is told apart from its letter by a preceding numeric
//! indicator ([NUMERIC_PREFIX]), but input devices never send it, so no
//! lookup here applies it. Instead the caller picks which table to search:
//! [character_for_dots] searches letters first and then digits, while
//! [character_for_dots_in] and [InputMode::resolve] search one table only.
//!
//! Nothing in here fails loudly. An unknown character or an incomplete dot
//! pattern is `None`, which is the normal state of a cell while a learner is
//! still pressing dots.

use crate::dot::DotSet;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The numeric indicator, dots 3-4-5-6. Defined for completeness only.
pub const NUMERIC_PREFIX: DotSet = DotSet::of(&[3, 4, 5, 6]);

/// The 26 letters in alphabetical order.
pub const LETTERS: [(char, DotSet); 26] = [
    ('A', DotSet::of(&[1])),
    ('B', DotSet::of(&[1, 2])),
    ('C', DotSet::of(&[1, 4])),
    ('D', DotSet::of(&[1, 4, 5])),
    ('E', DotSet::of(&[1, 5])),
    ('F', DotSet::of(&[1, 2, 4])),
    ('G', DotSet::of(&[1, 2, 4, 5])),
    ('H', DotSet::of(&[1, 2, 5])),
    ('I', DotSet::of(&[2, 4])),
    ('J', DotSet::of(&[2, 4, 5])),
    ('K', DotSet::of(&[1, 3])),
    ('L', DotSet::of(&[1, 2, 3])),
    ('M', DotSet::of(&[1, 3, 4])),
    ('N', DotSet::of(&[1, 3, 4, 5])),
    ('O', DotSet::of(&[1, 3, 5])),
    ('P', DotSet::of(&[1, 2, 3, 4])),
    ('Q', DotSet::of(&[1, 2, 3, 4, 5])),
    ('R', DotSet::of(&[1, 2, 3, 5])),
    ('S', DotSet::of(&[2, 3, 4])),
    ('T', DotSet::of(&[2, 3, 4, 5])),
    ('U', DotSet::of(&[1, 3, 6])),
    ('V', DotSet::of(&[1, 2, 3, 6])),
    ('W', DotSet::of(&[2, 4, 5, 6])),
    ('X', DotSet::of(&[1, 3, 4, 6])),
    ('Y', DotSet::of(&[1, 3, 4, 5, 6])),
    ('Z', DotSet::of(&[1, 3, 5, 6])),
];

/// The ten digits, `0` through `9`.
pub const DIGITS: [(char, DotSet); 10] = [
    ('0', DotSet::of(&[2, 4, 5])),
    ('1', DotSet::of(&[1])),
    ('2', DotSet::of(&[1, 2])),
    ('3', DotSet::of(&[1, 4])),
    ('4', DotSet::of(&[1, 4, 5])),
    ('5', DotSet::of(&[1, 5])),
    ('6', DotSet::of(&[1, 2, 4])),
    ('7', DotSet::of(&[1, 2, 4, 5])),
    ('8', DotSet::of(&[1, 2, 5])),
    ('9', DotSet::of(&[2, 4])),
];

/// A letter `A`-`Z` or a digit `0`-`9`, always stored uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Character(char);

impl Character {
    /// Uppercases `c` and returns `None` unless it is in one of the tables.
    pub fn new(c: char) -> Option<Self> {
        let c = c.to_ascii_uppercase();
        (c.is_ascii_uppercase() || c.is_ascii_digit()).then_some(Character(c))
    }

    /// The uppercase character.
    pub fn as_char(self) -> char {
        self.0
    }

    /// Whether this is one of `0`-`9`.
    pub fn is_digit(self) -> bool {
        self.0.is_ascii_digit()
    }

    /// The canonical pattern of this character.
    pub fn dots(self) -> DotSet {
        dots_for_character(self.0).unwrap_or(DotSet::EMPTY)
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which of the two tables a scoped lookup searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// `A`-`Z`
    Letters,
    /// `0`-`9`
    Digits,
}

impl Table {
    /// The `(character, pattern)` pairs of this table.
    pub fn entries(self) -> &'static [(char, DotSet)] {
        match self {
            Table::Letters => &LETTERS,
            Table::Digits => &DIGITS,
        }
    }
}

/// Looks up the pattern for `ch`. Lowercase letters are accepted.
pub fn dots_for_character(ch: char) -> Option<DotSet> {
    let ch = ch.to_ascii_uppercase();
    LETTERS
        .iter()
        .chain(DIGITS.iter())
        .find(|(c, _)| *c == ch)
        .map(|&(_, dots)| dots)
}

/// Finds the character whose pattern is exactly `dots`, searching letters
/// before digits. Because every digit shares its pattern with a letter, this
/// only ever returns letters for the patterns in the digit table.
pub fn character_for_dots(dots: DotSet) -> Option<Character> {
    character_for_dots_in(dots, Table::Letters)
        .or_else(|| character_for_dots_in(dots, Table::Digits))
}

/// Finds the character whose pattern is exactly `dots` in `table` only.
pub fn character_for_dots_in(dots: DotSet, table: Table) -> Option<Character> {
    table
        .entries()
        .iter()
        .find(|&&(_, pattern)| pattern == dots)
        .map(|&(c, _)| Character(c))
}

/// What the learner is currently typing, which decides how an ambiguous
/// pattern resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Patterns resolve to letters first, digits as a fallback.
    #[default]
    Letters,
    /// Patterns resolve to digits only.
    Numbers,
}

impl InputMode {
    /// Resolves `dots` under this mode.
    pub fn resolve(self, dots: DotSet) -> Option<Character> {
        match self {
            InputMode::Letters => character_for_dots(dots),
            InputMode::Numbers => character_for_dots_in(dots, Table::Digits),
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Letters => write!(f, "letters"),
            InputMode::Numbers => write!(f, "numbers"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_letter_round_trips() {
        for (c, _) in LETTERS {
            let dots = dots_for_character(c).unwrap();
            assert_eq!(character_for_dots(dots).map(Character::as_char), Some(c));
        }
    }

    #[test]
    fn every_digit_round_trips_in_the_digit_table() {
        for (c, _) in DIGITS {
            let dots = dots_for_character(c).unwrap();
            assert_eq!(
                character_for_dots_in(dots, Table::Digits).map(Character::as_char),
                Some(c)
            );
        }
    }

    #[test]
    fn lowercase_is_normalized() {
        assert_eq!(dots_for_character('q'), dots_for_character('Q'));
        assert_eq!(dots_for_character('w'), Some(DotSet::of(&[2, 4, 5, 6])));
    }

    #[test]
    fn unknown_characters_have_no_pattern() {
        assert_eq!(dots_for_character('!'), None);
        assert_eq!(dots_for_character(' '), None);
        assert_eq!(dots_for_character('é'), None);
        assert_eq!(Character::new('?'), None);
    }

    #[test]
    fn patterns_are_unique_within_each_table() {
        for table in [Table::Letters, Table::Digits] {
            let entries = table.entries();
            for (i, (_, a)) in entries.iter().enumerate() {
                for (_, b) in entries.iter().skip(i + 1) {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn lookup_ignores_dot_order() {
        let forward = DotSet::from_dots([1, 3, 4, 5, 6]);
        let backward = DotSet::from_dots([6, 5, 4, 3, 1]);
        let shuffled = DotSet::from_dots([4, 6, 1, 5, 3]);
        let y = character_for_dots(forward);
        assert_eq!(y.map(Character::as_char), Some('Y'));
        assert_eq!(character_for_dots(backward), y);
        assert_eq!(character_for_dots(shuffled), y);
        assert_eq!(
            character_for_dots(DotSet::from_dots([2, 1])).map(Character::as_char),
            Some('B')
        );
    }

    #[test]
    fn letters_win_over_digits_in_the_unscoped_lookup() {
        assert_eq!(dots_for_character('5'), dots_for_character('E'));
        let five = DotSet::of(&[1, 5]);
        assert_eq!(character_for_dots(five).map(Character::as_char), Some('E'));
        assert_eq!(
            InputMode::Numbers.resolve(five).map(Character::as_char),
            Some('5')
        );
        assert_eq!(
            InputMode::Letters.resolve(five).map(Character::as_char),
            Some('E')
        );
    }

    #[test]
    fn zero_aliases_j() {
        assert_eq!(dots_for_character('0'), dots_for_character('J'));
    }

    #[test]
    fn numbers_mode_rejects_letter_only_patterns() {
        let k = DotSet::of(&[1, 3]);
        assert_eq!(InputMode::Numbers.resolve(k), None);
        assert_eq!(InputMode::Letters.resolve(k).map(Character::as_char), Some('K'));
    }

    #[test]
    fn incomplete_patterns_match_nothing() {
        assert_eq!(character_for_dots(DotSet::EMPTY), None);
        assert_eq!(character_for_dots(DotSet::of(&[6])), None);
        assert_eq!(character_for_dots(NUMERIC_PREFIX), None);
    }

    #[test]
    fn character_knows_its_pattern() {
        let c = Character::new('x').unwrap();
        assert_eq!(c.as_char(), 'X');
        assert!(!c.is_digit());
        assert_eq!(c.dots(), DotSet::of(&[1, 3, 4, 6]));
    }
}
