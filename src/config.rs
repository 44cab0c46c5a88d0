//! Settings for talking to a Braille keyboard, stored as [ron].
//!
//! ```text
//! (
//!     port: Some("/dev/ttyACM0"),
//!     baud_rate: 115200,
//!     read_timeout_ms: 100,
//!     mode: letters,
//! )
//! ```
//!
//! Every field may be left out; missing fields take their defaults.

use crate::registry::InputMode;

use serde::{Deserialize, Serialize};
use std::{
    borrow::Cow,
    fmt,
    fs::File,
    io::{Read, Write},
    path::Path,
    time::Duration,
};

/// The rate every keyboard we know of talks at.
pub const DEFAULT_BAUD_RATE: u32 = 115200;

/// How long the reader thread blocks before checking whether it should stop.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 100;

/// Serial and decoding settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Path of the serial device. `None` means ask the user.
    pub port: Option<String>,
    /// Serial baud rate.
    pub baud_rate: u32,
    /// Reader poll interval in milliseconds.
    pub read_timeout_ms: u64,
    /// How dot patterns resolve to characters.
    pub mode: InputMode,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            mode: InputMode::default(),
        }
    }
}

/// Things that can go wrong reading or writing a [BoardConfig].
#[derive(Debug)]
pub enum ConfigError {
    /// Returned when io fails when reading or writing the file.
    IoError(std::io::Error),

    /// Returned when serialization fails.
    RonError(ron::Error),

    /// Returned when the file is not valid RON for a [BoardConfig].
    RonSpannedError(ron::de::SpannedError),

    /// Returned when the baud rate is zero.
    InvalidBaudRate(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ConfigError as CE;
        let msg = match self {
            CE::IoError(error) => Cow::from(format!("io error: {}", error)),
            CE::RonError(error) => Cow::from(format!("ron error: {}", error)),
            CE::RonSpannedError(error) => Cow::from(format!("ron spanning error: {}", error)),
            CE::InvalidBaudRate(rate) => Cow::from(format!("invalid baud rate {}", rate)),
        };

        write!(f, "{}", msg)
    }
}

impl std::error::Error for ConfigError {}

impl BoardConfig {
    /// Read a [BoardConfig] from the path provided.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut handle = File::open(path).map_err(ConfigError::IoError)?;
        Self::from_reader(&mut handle)
    }

    /// Read a [BoardConfig] from the [Read]able object provided.
    pub fn from_reader(reader: &mut impl Read) -> Result<Self, ConfigError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(ConfigError::IoError)?;

        let config: Self = ron::de::from_str(&text).map_err(ConfigError::RonSpannedError)?;
        config.validate()?;
        Ok(config)
    }

    /// Write out a [BoardConfig] to the path provided.
    pub fn to_path(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let mut handle = File::create(path).map_err(ConfigError::IoError)?;
        self.to_writer(&mut handle)
    }

    /// Write out a [BoardConfig] to the [Write]able object provided.
    pub fn to_writer(&self, writer: &mut impl Write) -> Result<(), ConfigError> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(ConfigError::RonError)?;
        writer
            .write_all(text.as_bytes())
            .map_err(ConfigError::IoError)
    }

    /// Rejects settings no serial port accepts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.baud_rate == 0 {
            return Err(ConfigError::InvalidBaudRate(self.baud_rate));
        }
        Ok(())
    }

    /// [BoardConfig::read_timeout_ms] as a [Duration].
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}
