//! Accumulates decoded events into the line of text a learner is typing.

use crate::component::{Component, ComponentError};
use crate::decoder::BrailleEvent;
use crate::registry::Character;
use crate::renderer::{render_pattern, BLANK_CELL};

use log::info;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Character(Character),
    Space,
}

/// The text typed so far.
///
/// `Backspace` erases the last entry, `Confirm` adds a space, and a cell
/// that resolved to a character appends it. Cells that did not resolve are
/// the learner still exploring, so they change nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypedLine {
    entries: Vec<Entry>,
}

impl TypedLine {
    /// An empty line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `event`, returning whether the line changed.
    pub fn apply(&mut self, event: &BrailleEvent) -> bool {
        match event {
            BrailleEvent::Backspace => self.entries.pop().is_some(),
            BrailleEvent::Confirm => {
                self.entries.push(Entry::Space);
                true
            }
            BrailleEvent::Cell {
                character: Some(c),
                ..
            } => {
                self.entries.push(Entry::Character(*c));
                true
            }
            BrailleEvent::Cell {
                character: None, ..
            }
            | BrailleEvent::Noise => false,
        }
    }

    /// The line as plain text.
    pub fn text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| match entry {
                Entry::Character(c) => c.as_char(),
                Entry::Space => ' ',
            })
            .collect()
    }

    /// The line as Braille glyphs, one per entry.
    pub fn glyphs(&self) -> String {
        self.entries
            .iter()
            .map(|entry| match entry {
                Entry::Character(c) => render_pattern(c.dots()),
                Entry::Space => BLANK_CELL,
            })
            .collect()
    }

    /// Number of cells typed, spaces included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Start over, e.g. for the next exercise.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Display for TypedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypedLine({:?})", self.text())
    }
}

impl Component for TypedLine {
    type InData = BrailleEvent;
    type OutData = String;

    /// Applies the event and hands on the resulting text.
    fn convert(&mut self, input: BrailleEvent) -> String {
        self.apply(&input);
        self.text()
    }

    fn finalize(&mut self) -> Result<(), ComponentError> {
        info!("Input ended with {:?}", self.text());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::BrailleDecoder;
    use crate::registry::InputMode;

    fn type_frames(decoder: BrailleDecoder, frames: &[u8]) -> TypedLine {
        let mut line = TypedLine::new();
        for &frame in frames {
            line.apply(&decoder.decode(frame));
        }
        line
    }

    #[test]
    fn typing_a_word() {
        // c, a, t
        let line = type_frames(BrailleDecoder::default(), &[0x24, 0x20, 0x1E]);
        assert_eq!(line.text(), "CAT");
        assert_eq!(line.glyphs(), "\u{2809}\u{2801}\u{281E}");
    }

    #[test]
    fn backspace_and_space() {
        // a, b, backspace, confirm, c
        let line = type_frames(BrailleDecoder::default(), &[0x20, 0x30, 0x80, 0x40, 0x24]);
        assert_eq!(line.text(), "A C");
        assert_eq!(line.glyphs(), "\u{2801}\u{2800}\u{2809}");
    }

    #[test]
    fn backspace_on_an_empty_line_does_nothing() {
        let mut line = TypedLine::new();
        assert!(!line.apply(&BrailleEvent::Backspace));
        assert!(line.is_empty());
    }

    #[test]
    fn unresolved_cells_and_noise_are_ignored() {
        let line = type_frames(BrailleDecoder::default(), &[0x01, 0x00, 0xC3, 0x7F]);
        assert!(line.is_empty());
    }

    #[test]
    fn numbers_mode_types_digits() {
        // 2, 0, 2, 6
        let line = type_frames(BrailleDecoder::new(InputMode::Numbers), &[0x30, 0x16, 0x30, 0x34]);
        assert_eq!(line.text(), "2026");
        assert_eq!(line.len(), 4);
    }
}
