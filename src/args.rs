// Commandline argument parser using clap for brailleboard

use crate::config::{BoardConfig, ConfigError};
use crate::frame_script::parse_frame;
use crate::registry::InputMode;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(version, about)]
pub struct BoardArgs {
    #[command(subcommand)]
    /// What to do with the keyboard
    pub command: CommandTask,
}

#[derive(Debug, Subcommand, Clone)]
pub enum CommandTask {
    /// List the serial ports a keyboard could be on
    Ports,

    /// Type on a connected keyboard and watch it being decoded
    Monitor(MonitorCommand),

    /// Decode frames given on the command line
    Decode(DecodeCommand),

    /// Print text as Braille glyphs
    Render(RenderCommand),

    /// Replay a frame script through a simulated keyboard
    Replay(ReplayCommand),
}

#[derive(Debug, Args, Clone)]
pub struct MonitorCommand {
    /// Serial device of the keyboard; asked for interactively if missing
    #[arg(short, long)]
    pub port: Option<String>,

    /// Serial baud rate
    #[arg(short, long)]
    pub baud: Option<u32>,

    /// Whether patterns resolve to letters or numbers
    #[arg(short, long, value_enum)]
    pub mode: Option<InputMode>,

    /// RON config file; flags given here override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl MonitorCommand {
    /// Loads the config file, if any, and lays the flags over it.
    pub fn resolve_config(&self) -> Result<BoardConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => BoardConfig::from_path(path)?,
            None => BoardConfig::default(),
        };
        if let Some(port) = &self.port {
            config.port = Some(port.clone());
        }
        if let Some(baud) = self.baud {
            config.baud_rate = baud;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Args, Clone)]
pub struct DecodeCommand {
    /// Frames as decimal, 0x hex, 0b binary, BS, OK or a quoted character
    #[arg(required = true, value_parser = parse_frame)]
    pub frames: Vec<u8>,

    /// Whether patterns resolve to letters or numbers
    #[arg(short, long, value_enum, default_value_t = InputMode::Letters)]
    pub mode: InputMode,
}

#[derive(Debug, Args, Clone)]
pub struct RenderCommand {
    /// Text to render; letters, digits and spaces are kept
    #[clap(num_args = 1.., required = true)]
    pub text: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ReplayCommand {
    /// Frame script to replay
    pub script: PathBuf,

    /// Pause between frames, in milliseconds
    #[arg(short, long = "interval", default_value_t = 10)]
    pub interval_ms: u64,

    /// Chance of a garbage frame before each real one, 0 to 1
    #[arg(short, long, default_value_t = 0.0)]
    pub noise: f64,

    /// Whether patterns resolve to letters or numbers
    #[arg(short, long, value_enum, default_value_t = InputMode::Letters)]
    pub mode: InputMode,
}
