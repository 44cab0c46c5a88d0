//! A Braille keyboard attached over a serial port.

use crate::config::{BoardConfig, DEFAULT_BAUD_RATE, DEFAULT_READ_TIMEOUT_MS};
use crate::transport::{BrailleTransport, ByteBus};

use log::{error, info, trace, warn};
use serial2::SerialPort;
use std::{
    io,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

/// The running reader thread and the flag that keeps it going.
struct Reader {
    handle: JoinHandle<()>,
    running: Arc<AtomicBool>,
}

/// A [BrailleTransport] reading frames from a serial port.
///
/// The port is only open between [connect](BrailleTransport::connect) and
/// [disconnect](BrailleTransport::disconnect). While it is open a reader
/// thread publishes every received byte to [SerialDevice::bus].
pub struct SerialDevice {
    path: PathBuf,
    baud_rate: u32,
    read_timeout: Duration,
    bus: ByteBus,
    reader: Option<Reader>,
    opened: Option<SerialPort>,
}

impl SerialDevice {
    /// A device at `path` with the default baud rate and read timeout.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
            bus: ByteBus::new(),
            reader: None,
            opened: None,
        }
    }

    /// Wraps a port that is already open, such as one end of a
    /// pseudo-terminal pair. The first `connect` reads from `port`; later
    /// ones reopen `path`.
    pub fn from_port(path: impl Into<PathBuf>, port: SerialPort) -> Self {
        let mut device = Self::new(path);
        device.opened = Some(port);
        device
    }

    /// Uses the port, baud rate and timeout from `config`. `None` if the
    /// config names no port.
    pub fn from_config(config: &BoardConfig) -> Option<Self> {
        config.port.as_ref().map(|port| {
            Self::new(port)
                .with_baud_rate(config.baud_rate)
                .with_read_timeout(config.read_timeout())
        })
    }

    /// Sets the baud rate used by the next `connect`.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Sets how long a read blocks before the reader checks for a disconnect.
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// The path of the serial device.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Serial ports present on this machine. Empty if they cannot be listed.
    pub fn available_ports() -> Vec<PathBuf> {
        SerialPort::available_ports().unwrap_or_else(|e| {
            error!("Failed to get available ports: {}", e);
            Vec::new()
        })
    }

    fn open(&mut self) -> io::Result<SerialPort> {
        let mut port = match self.opened.take() {
            Some(port) => port,
            None => SerialPort::open(&self.path, self.baud_rate)?,
        };
        port.set_read_timeout(self.read_timeout)?;
        Ok(port)
    }

    /// Stops the reader thread, if any, and waits for it to close the port.
    fn stop_reader(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.running.store(false, Ordering::Release);
            // The port is dropped, and so closed, when the reader returns.
            if reader.handle.join().is_err() {
                error!("Reader for {} panicked", self.path.display());
            }
            info!("Disconnected from {}", self.path.display());
        }
    }
}

fn read_frames(port: SerialPort, bus: ByteBus, running: Arc<AtomicBool>) {
    let mut buffer = [0; 256];

    while running.load(Ordering::Acquire) {
        match port.read(&mut buffer) {
            Ok(0) => {
                warn!("Device hung up");
                running.store(false, Ordering::Release);
            }
            Ok(read_len) => {
                for &frame in buffer.iter().take(read_len) {
                    trace!("Received frame {:#010b}", frame);
                    bus.publish(frame);
                }
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) => {}
            Err(e) => {
                warn!("Device disconnected: {}", e);
                running.store(false, Ordering::Release);
            }
        }
    }
}

impl BrailleTransport for SerialDevice {
    fn connect(&mut self) -> bool {
        if self.is_connected() {
            return true;
        }
        // A reader that stopped on its own still needs joining. The callback
        // stays registered.
        self.stop_reader();

        let port = match self.open() {
            Ok(port) => port,
            Err(e) => {
                warn!("Failed to open {}: {}", self.path.display(), e);
                return false;
            }
        };

        let running = Arc::new(AtomicBool::new(true));
        let th_running = Arc::clone(&running);
        let th_bus = self.bus.clone();
        let spawned = thread::Builder::new()
            .name("braille-reader".to_owned())
            .spawn(move || read_frames(port, th_bus, th_running));

        match spawned {
            Ok(handle) => {
                info!(
                    "Connected to {} at {} baud",
                    self.path.display(),
                    self.baud_rate
                );
                self.reader = Some(Reader { handle, running });
                true
            }
            Err(e) => {
                warn!("Failed to start the reader for {}: {}", self.path.display(), e);
                false
            }
        }
    }

    fn disconnect(&mut self) {
        self.stop_reader();
        self.bus.clear_callback();
    }

    fn is_connected(&self) -> bool {
        self.reader
            .as_ref()
            .is_some_and(|reader| reader.running.load(Ordering::Acquire))
    }

    fn bus(&self) -> &ByteBus {
        &self.bus
    }
}

impl Drop for SerialDevice {
    fn drop(&mut self) {
        self.disconnect();
    }
}
