//! A small text format for writing down sequences of keyboard frames, used to
//! replay a typing session through a [DummyDevice](crate::dummy_device::DummyDevice).
//!
//! Frames are separated by whitespace or commas. Each one is written as
//!
//! - a decimal byte, `41`
//! - a hex byte, `0x29`
//! - a binary byte, `0b00101001`
//! - `BS` for backspace or `OK` for confirm
//! - a quoted letter or digit, `'h'`, meaning the frame carrying its dots
//!
//! A `#` starts a comment that runs to the end of the line.
//!
//! ```text
//! # "hi", a typo, then a space
//! 'h' 'i' 'x' BS OK
//! 0b00101001, 0x20
//! ```

use crate::frame_classifier::{encode_dots, BACKSPACE_FRAME, CONFIRM_FRAME};
use crate::registry::dots_for_character;

use nom::{
    branch::alt,
    bytes::complete::{is_a, tag_no_case, take_while, take_while1},
    character::complete::{char, hex_digit1, satisfy, u8 as dec_u8},
    combinator::{all_consuming, map_opt, map_res, value},
    error::{Error, ErrorKind},
    multi::separated_list0,
    sequence::{delimited, preceded},
    Finish, IResult,
};

use std::{fmt, fs, io, path::Path, str::FromStr};

/// A parsed list of frames.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameScript {
    frames: Vec<u8>,
}

/// Why a script could not be read.
#[derive(Debug)]
pub enum FrameScriptError {
    /// A token on `line` (1-based) is not a frame.
    Syntax {
        /// Line of the script, starting at 1.
        line: usize,
        /// The unparsed rest of the line.
        input: String,
        /// What nom gave up on.
        code: ErrorKind,
    },
    /// The script file could not be read.
    IoError(io::Error),
}

impl fmt::Display for FrameScriptError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FrameScriptError::Syntax { line, input, code } => {
                write!(f, "line {}: cannot parse frame at {:?} ({:?})", line, input, code)
            }
            FrameScriptError::IoError(error) => write!(f, "io error: {}", error),
        }
    }
}

impl std::error::Error for FrameScriptError {}

impl From<io::Error> for FrameScriptError {
    fn from(value: io::Error) -> Self {
        Self::IoError(value)
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

fn hex_frame(s: &str) -> IResult<&str, u8> {
    map_res(preceded(tag_no_case("0x"), hex_digit1), |digits| {
        u8::from_str_radix(digits, 16)
    })(s)
}

fn bin_frame(s: &str) -> IResult<&str, u8> {
    map_res(preceded(tag_no_case("0b"), is_a("01")), |digits| {
        u8::from_str_radix(digits, 2)
    })(s)
}

fn keyword_frame(s: &str) -> IResult<&str, u8> {
    alt((
        value(BACKSPACE_FRAME, tag_no_case("BS")),
        value(CONFIRM_FRAME, tag_no_case("OK")),
    ))(s)
}

fn character_frame(s: &str) -> IResult<&str, u8> {
    map_opt(
        delimited(char('\''), satisfy(|c| c.is_ascii_alphanumeric()), char('\'')),
        |c| dots_for_character(c).map(encode_dots),
    )(s)
}

fn frame(s: &str) -> IResult<&str, u8> {
    alt((hex_frame, bin_frame, dec_u8, keyword_frame, character_frame))(s)
}

fn frame_line(s: &str) -> IResult<&str, Vec<u8>> {
    all_consuming(delimited(
        take_while(is_separator),
        separated_list0(take_while1(is_separator), frame),
        take_while(is_separator),
    ))(s)
}

/// Parses a single frame token, such as a command line argument.
pub fn parse_frame(s: &str) -> Result<u8, FrameScriptError> {
    match all_consuming(frame)(s.trim()).finish() {
        Ok((_remaining, byte)) => Ok(byte),
        Err(Error { input, code }) => Err(FrameScriptError::Syntax {
            line: 1,
            input: input.to_string(),
            code,
        }),
    }
}

impl FrameScript {
    /// Wraps already-encoded frames.
    pub fn new(frames: Vec<u8>) -> Self {
        Self { frames }
    }

    /// The frames, in order.
    pub fn frames(&self) -> &[u8] {
        &self.frames
    }

    /// Consumes the script, returning the frames.
    pub fn into_frames(self) -> Vec<u8> {
        self.frames
    }

    /// Reads and parses the script at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FrameScriptError> {
        fs::read_to_string(path)?.parse()
    }
}

impl FromStr for FrameScript {
    type Err = FrameScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut frames = Vec::new();
        for (i, line) in s.lines().enumerate() {
            let code = line.split('#').next().unwrap_or_default();
            match frame_line(code).finish() {
                Ok((_remaining, mut line_frames)) => frames.append(&mut line_frames),
                Err(Error { input, code }) => {
                    return Err(FrameScriptError::Syntax {
                        line: i + 1,
                        input: input.to_string(),
                        code,
                    })
                }
            }
        }
        Ok(Self { frames })
    }
}
