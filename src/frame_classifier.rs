//! Decodes the one-byte frames sent by the Braille keyboard.
//!
//! Every frame is a single byte, classified on its own:
//!
//! | frame         | meaning                                  |
//! |---------------|------------------------------------------|
//! | `1000_0000`   | backspace                                |
//! | `0100_0000`   | confirm (enter/space)                    |
//! | `0110_0000`   | dot 1 (firmware shortcut)                |
//! | `00ab_cdef`   | dots: `a`=1, `b`=2, `c`=3, `d`=4, `e`=5, `f`=6 |
//! | anything else | no signal                                |
//!
//! The shortcut frame does not follow the mask rule (its top bits are `01`),
//! so it is matched explicitly before the mask rule is applied.

use crate::dot::{Dot, DotSet};

use log::{debug, trace};
use std::fmt;

/// Frame sent for the backspace key.
pub const BACKSPACE_FRAME: u8 = 0b1000_0000;
/// Frame sent for the confirm (enter/space) key.
pub const CONFIRM_FRAME: u8 = 0b0100_0000;
/// Frame some firmware sends for a lone dot 1.
pub const SINGLE_DOT_FRAME: u8 = 0b0110_0000;

const COMMAND_BITS: u8 = 0b1100_0000;

/// Frame bit for each dot, dot 1 first.
const DOT_BITS: [u8; 6] = [0x20, 0x10, 0x08, 0x04, 0x02, 0x01];

/// A frame that is a key command rather than dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlSignal {
    /// Erase the last input.
    Backspace,
    /// Commit the current input, or insert a space.
    Confirm,
}

impl ControlSignal {
    /// The frame the device sends for this command.
    pub const fn frame(self) -> u8 {
        match self {
            ControlSignal::Backspace => BACKSPACE_FRAME,
            ControlSignal::Confirm => CONFIRM_FRAME,
        }
    }
}

/// What a single frame means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodedInput {
    /// A key command.
    Control(ControlSignal),
    /// A dot pattern. Empty when the frame carried nothing usable.
    Dots(DotSet),
}

impl fmt::Display for DecodedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedInput::Control(signal) => write!(f, "{:?}", signal),
            DecodedInput::Dots(dots) => write!(f, "dots {}", dots),
        }
    }
}

/// Classifies one frame. Defined for every byte.
pub fn classify(frame: u8) -> DecodedInput {
    let decoded = match frame {
        BACKSPACE_FRAME => DecodedInput::Control(ControlSignal::Backspace),
        CONFIRM_FRAME => DecodedInput::Control(ControlSignal::Confirm),
        SINGLE_DOT_FRAME => DecodedInput::Dots(DotSet::of(&[1])),
        _ if frame & COMMAND_BITS == 0 => DecodedInput::Dots(mask_to_dots(frame)),
        _ => {
            debug!("Ignoring unrecognized frame {:#010b}", frame);
            DecodedInput::Dots(DotSet::EMPTY)
        }
    };
    trace!("Frame {:#010b} decoded as {}", frame, decoded);
    decoded
}

/// The mask frame that carries `dots`.
pub fn encode_dots(dots: DotSet) -> u8 {
    dots.iter()
        .map(|dot| DOT_BITS[dot.number() as usize - 1])
        .fold(0, |frame, bit| frame | bit)
}

fn mask_to_dots(frame: u8) -> DotSet {
    Dot::all()
        .zip(DOT_BITS)
        .filter(|&(_, bit)| frame & bit != 0)
        .map(|(dot, _)| dot)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dots(numbers: &[u8]) -> DecodedInput {
        DecodedInput::Dots(DotSet::from_dots(numbers.iter().copied()))
    }

    #[test]
    fn command_frames() {
        assert_eq!(
            classify(0b1000_0000),
            DecodedInput::Control(ControlSignal::Backspace)
        );
        assert_eq!(
            classify(0b0100_0000),
            DecodedInput::Control(ControlSignal::Confirm)
        );
        assert_eq!(classify(96), dots(&[1]));
    }

    #[test]
    fn mask_frames() {
        assert_eq!(classify(0b0010_0000), dots(&[1]));
        assert_eq!(classify(0b0000_0001), dots(&[6]));
        assert_eq!(classify(41), dots(&[1, 3, 6]));
        assert_eq!(classify(0b0011_1111), dots(&[1, 2, 3, 4, 5, 6]));
        assert_eq!(classify(0), dots(&[]));
    }

    #[test]
    fn unknown_frames_carry_nothing() {
        assert_eq!(classify(0b0100_0001), dots(&[]));
        assert_eq!(classify(0b0111_1111), dots(&[]));
        assert_eq!(classify(0b1100_0000), dots(&[]));
        assert_eq!(classify(0b1000_0001), dots(&[]));
        assert_eq!(classify(0xFF), dots(&[]));
    }

    #[test]
    fn every_byte_classifies() {
        for frame in 0..=u8::MAX {
            match classify(frame) {
                DecodedInput::Control(signal) => assert_eq!(signal.frame(), frame),
                DecodedInput::Dots(set) if frame & COMMAND_BITS != 0 => {
                    assert!(set.is_empty() || frame == SINGLE_DOT_FRAME)
                }
                DecodedInput::Dots(_) => {}
            }
        }
    }

    #[test]
    fn encoding_inverts_the_mask_rule() {
        for mask in 0..64u8 {
            let set = DotSet::from_mask(mask);
            assert_eq!(classify(encode_dots(set)), DecodedInput::Dots(set));
        }
        assert_eq!(encode_dots(DotSet::of(&[1, 3, 6])), 41);
    }
}
