//! Turns frames into the events a learning screen reacts to.

use crate::component::Component;
use crate::dot::DotSet;
use crate::frame_classifier::{classify, ControlSignal, DecodedInput};
use crate::registry::{Character, InputMode};
use crate::renderer::render_pattern;

use std::fmt;

/// What one frame means to a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrailleEvent {
    /// Erase the last input.
    Backspace,
    /// Commit the current input, or insert a space.
    Confirm,
    /// Some dots were pressed. `character` is `None` when the pattern is not
    /// (yet) a character in the current mode; `glyph` is always there for
    /// visual feedback.
    Cell {
        /// The raised dots.
        dots: DotSet,
        /// What they spell, if anything.
        character: Option<Character>,
        /// How they look.
        glyph: char,
    },
    /// The frame carried nothing.
    Noise,
}

impl fmt::Display for BrailleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrailleEvent::Backspace => write!(f, "backspace"),
            BrailleEvent::Confirm => write!(f, "confirm"),
            BrailleEvent::Cell {
                dots,
                character: Some(c),
                glyph,
            } => write!(f, "{} {} {}", glyph, dots, c),
            BrailleEvent::Cell {
                dots,
                character: None,
                glyph,
            } => write!(f, "{} {} ?", glyph, dots),
            BrailleEvent::Noise => write!(f, "no signal"),
        }
    }
}

/// Decodes frames and on-screen dot input under an [InputMode].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrailleDecoder {
    mode: InputMode,
}

impl BrailleDecoder {
    /// A decoder resolving cells in `mode`.
    pub fn new(mode: InputMode) -> Self {
        Self { mode }
    }

    /// The mode cells are currently resolved in.
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Screens switch between letter and number lessons without rebuilding
    /// the decoder.
    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    /// Decodes a frame from the keyboard.
    pub fn decode(&self, frame: u8) -> BrailleEvent {
        match classify(frame) {
            DecodedInput::Control(ControlSignal::Backspace) => BrailleEvent::Backspace,
            DecodedInput::Control(ControlSignal::Confirm) => BrailleEvent::Confirm,
            DecodedInput::Dots(dots) => self.decode_dots(dots),
        }
    }

    /// Decodes dots that did not come through a frame, e.g. from an on-screen
    /// keyboard.
    pub fn decode_dots(&self, dots: DotSet) -> BrailleEvent {
        if dots.is_empty() {
            return BrailleEvent::Noise;
        }
        BrailleEvent::Cell {
            dots,
            character: self.mode.resolve(dots),
            glyph: render_pattern(dots),
        }
    }
}

impl fmt::Display for BrailleDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BrailleDecoder({})", self.mode)
    }
}

impl Component for BrailleDecoder {
    type InData = u8;
    type OutData = BrailleEvent;

    fn convert(&mut self, input: u8) -> BrailleEvent {
        self.decode(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(event: BrailleEvent) -> Option<char> {
        match event {
            BrailleEvent::Cell { character, .. } => character.map(Character::as_char),
            _ => None,
        }
    }

    #[test]
    fn commands_pass_through() {
        let decoder = BrailleDecoder::default();
        assert_eq!(decoder.decode(0x80), BrailleEvent::Backspace);
        assert_eq!(decoder.decode(0x40), BrailleEvent::Confirm);
    }

    #[test]
    fn empty_frames_are_noise() {
        let decoder = BrailleDecoder::default();
        assert_eq!(decoder.decode(0), BrailleEvent::Noise);
        assert_eq!(decoder.decode(0xFF), BrailleEvent::Noise);
    }

    #[test]
    fn cells_carry_dots_character_and_glyph() {
        let decoder = BrailleDecoder::default();
        assert_eq!(
            decoder.decode(0b0010_1001),
            BrailleEvent::Cell {
                dots: DotSet::of(&[1, 3, 6]),
                character: Character::new('u'),
                glyph: '\u{2825}',
            }
        );
        assert_eq!(character(decoder.decode(96)), Some('A'));
    }

    #[test]
    fn unmatched_cells_still_render() {
        let decoder = BrailleDecoder::default();
        let event = decoder.decode(0b0000_0001);
        assert_eq!(
            event,
            BrailleEvent::Cell {
                dots: DotSet::of(&[6]),
                character: None,
                glyph: '\u{2820}',
            }
        );
        assert_eq!(event.to_string(), "\u{2820} {6} ?");
    }

    #[test]
    fn mode_decides_between_letter_and_digit() {
        let mut decoder = BrailleDecoder::new(InputMode::Letters);
        let e_frame = 0b0010_0010;
        assert_eq!(character(decoder.decode(e_frame)), Some('E'));
        decoder.set_mode(InputMode::Numbers);
        assert_eq!(character(decoder.decode(e_frame)), Some('5'));
    }
}
