//! Braille Board turns the byte stream of a physical Braille keyboard into
//! Braille characters for learning screens, quizzes, and typing games.
//!
//! The keyboard sends one byte per key event. Each byte is classified on its
//! own ([frame_classifier]) as a backspace, a confirm, or a set of raised
//! dots. Dot sets are matched against the Grade-1 English tables
//! ([registry]) and drawn as Unicode Braille glyphs ([renderer]).
//!
//! Bytes reach the decoder through a [transport::BrailleTransport], either a
//! real keyboard on a serial port ([serial_device]) or a simulated one
//! ([dummy_device]). The transport is an ordinary value owned by whoever
//! runs the screen; consumers subscribe to its [transport::ByteBus].
//!
//! ```
//! use brailleboard::decoder::{BrailleDecoder, BrailleEvent};
//! use brailleboard::typed_line::TypedLine;
//!
//! let decoder = BrailleDecoder::default();
//! let mut line = TypedLine::new();
//! for frame in [0b0011_0010, 0b0001_0100] {
//!     line.apply(&decoder.decode(frame));
//! }
//! assert_eq!(line.text(), "HI");
//! assert_eq!(decoder.decode(0b1000_0000), BrailleEvent::Backspace);
//! ```

#![warn(missing_docs)]
pub mod args;
pub mod component;
pub mod config;
pub mod decoder;
pub mod dot;
pub mod dummy_device;
pub mod frame_classifier;
pub mod frame_queue;
pub mod frame_script;
pub mod gui;
pub mod registry;
pub mod renderer;
pub mod serial_device;
pub mod transport;
pub mod typed_line;
