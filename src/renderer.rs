//! Turns dot patterns into Unicode Braille glyphs, and back.
//!
//! The Braille Patterns block starts at `U+2800`; dot `n` adds `2^(n - 1)`
//! to the offset. Only the 64 six-dot cells (`U+2800..=U+283F`) are used.

use crate::dot::{Dot, DotSet};
use crate::registry::dots_for_character;

use log::warn;

/// The empty cell, `U+2800`. Screens show it for "nothing typed yet".
pub const BLANK_CELL: char = '\u{2800}';

const BLOCK_START: u32 = 0x2800;
const SIX_DOT_END: u32 = 0x283F;

/// The glyph for `dots`. The empty set renders as [BLANK_CELL].
pub fn render_pattern(dots: DotSet) -> char {
    char::from_u32(BLOCK_START + dots.mask() as u32).unwrap_or(BLANK_CELL)
}

/// Like [render_pattern] for raw dot numbers. Numbers outside `1..=6` break
/// the caller's contract; they are logged and left out of the glyph.
pub fn render_dots(dots: &[u8]) -> char {
    let mut set = DotSet::EMPTY;
    for &number in dots {
        match Dot::new(number) {
            Some(dot) => set.insert(dot),
            None => warn!("Ignoring dot {} outside of the cell while rendering", number),
        }
    }
    render_pattern(set)
}

/// The pattern drawn by `glyph`, if it is a six-dot Braille cell.
pub fn dots_for_glyph(glyph: char) -> Option<DotSet> {
    let code = glyph as u32;
    (BLOCK_START..=SIX_DOT_END)
        .contains(&code)
        .then(|| DotSet::from_mask((code - BLOCK_START) as u8))
}

/// Renders every letter and digit of `text` as one glyph each. Whitespace
/// becomes a blank cell; anything without a pattern is dropped.
pub fn render_text(text: &str) -> String {
    text.chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some(BLANK_CELL)
            } else {
                dots_for_character(c).map(render_pattern)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn empty_set_is_the_blank_cell() {
        assert_eq!(render_pattern(DotSet::EMPTY), '\u{2800}');
        assert_eq!(render_dots(&[]), BLANK_CELL);
    }

    #[test]
    fn single_dots_map_to_powers_of_two() {
        assert_eq!(render_dots(&[1]), '\u{2801}');
        assert_eq!(render_dots(&[2]), '\u{2802}');
        assert_eq!(render_dots(&[3]), '\u{2804}');
        assert_eq!(render_dots(&[4]), '\u{2808}');
        assert_eq!(render_dots(&[5]), '\u{2810}');
        assert_eq!(render_dots(&[6]), '\u{2820}');
    }

    #[test]
    fn full_cell() {
        assert_eq!(render_dots(&[1, 2, 3, 4, 5, 6]), '\u{283F}');
    }

    #[test]
    fn every_pattern_has_its_own_glyph() {
        let glyphs: HashSet<char> = (0..64u8)
            .map(|mask| render_pattern(DotSet::from_mask(mask)))
            .collect();
        assert_eq!(glyphs.len(), 64);
    }

    #[test]
    fn order_of_dots_does_not_change_the_glyph() {
        assert_eq!(render_dots(&[1, 3, 6]), render_dots(&[6, 1, 3]));
    }

    #[test]
    fn out_of_range_dots_are_ignored() {
        assert_eq!(render_dots(&[1, 7, 0]), render_dots(&[1]));
    }

    #[test]
    fn glyphs_parse_back_into_patterns() {
        for mask in 0..64u8 {
            let dots = DotSet::from_mask(mask);
            assert_eq!(dots_for_glyph(render_pattern(dots)), Some(dots));
        }
        assert_eq!(dots_for_glyph('a'), None);
        assert_eq!(dots_for_glyph('\u{2840}'), None);
    }

    #[test]
    fn text_renders_cell_by_cell() {
        assert_eq!(render_text("abc"), "\u{2801}\u{2803}\u{2809}");
        assert_eq!(render_text("Hi you"), "\u{2813}\u{280A}\u{2800}\u{283D}\u{2815}\u{2825}");
        assert_eq!(render_text("2!"), "\u{2803}");
    }
}
