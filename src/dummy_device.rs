//! A simulated keyboard for tests, demos, and replaying recorded sessions
//! without hardware.

use crate::transport::{BrailleTransport, ByteBus};

use log::{debug, info, warn};
use rand::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// A fake keyboard. Frames are pushed in by hand with [DummyDevice::feed], or
/// replayed from a script on a background thread with [DummyDevice::play].
pub struct DummyDevice {
    bus: ByteBus,
    connected: Arc<AtomicBool>,
    refuse_connection: bool,
    noise: f64,
    player: Option<thread::JoinHandle<()>>,
}

/// Configures a [DummyDevice] before it exists.
#[derive(Debug, Default)]
pub struct DummyDeviceBuilder {
    refuse_connection: bool,
    noise: f64,
}

impl DummyDeviceBuilder {
    /// Makes every `connect` fail, like a keyboard that is not plugged in.
    pub fn refuse_connection(mut self, refuse: bool) -> Self {
        self.refuse_connection = refuse;
        self
    }

    /// Chance, per replayed frame, of a garbage frame being sent first.
    /// Clamped to `0.0..=1.0`.
    pub fn noise(mut self, noise: f64) -> Self {
        self.noise = noise.clamp(0.0, 1.0);
        self
    }

    /// A disconnected device with these settings.
    pub fn build(self) -> DummyDevice {
        DummyDevice {
            bus: ByteBus::new(),
            connected: Arc::new(AtomicBool::new(false)),
            refuse_connection: self.refuse_connection,
            noise: self.noise,
            player: None,
        }
    }
}

impl Default for DummyDevice {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DummyDevice {
    /// A device that accepts connections and sends no noise.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts configuring a device, see [DummyDeviceBuilder].
    pub fn builder() -> DummyDeviceBuilder {
        DummyDeviceBuilder::default()
    }

    /// Publishes `frame` right away if connected. Returns whether it was sent.
    pub fn feed(&self, frame: u8) -> bool {
        let connected = self.connected.load(Ordering::Acquire);
        if connected {
            self.bus.publish(frame);
        } else {
            debug!("Dropping frame {:#010b}, not connected", frame);
        }
        connected
    }

    /// Feeds every frame in order.
    pub fn feed_all(&self, frames: &[u8]) {
        for &frame in frames {
            self.feed(frame);
        }
    }

    /// Replays `frames` on a background thread, one every `interval`. Stops
    /// early if the device is disconnected. Any replay still running is
    /// waited for first.
    pub fn play(&mut self, frames: Vec<u8>, interval: Duration) {
        self.wait();

        let bus = self.bus.clone();
        let connected = Arc::clone(&self.connected);
        let noise = self.noise;

        self.player = Some(thread::spawn(move || {
            let mut rng = thread_rng();
            for frame in frames {
                if !connected.load(Ordering::Acquire) {
                    info!("Replay stopped, device disconnected");
                    break;
                }
                if noise > 0.0 && rng.gen_bool(noise) {
                    bus.publish(garbage_frame(&mut rng));
                }
                bus.publish(frame);
                spin_sleep::sleep(interval);
            }
        }));
    }

    /// Blocks until the current replay, if any, has finished.
    pub fn wait(&mut self) {
        // `.join()` moves the `JoinHandle`, so it has to come out of the
        // struct first; `.take()` leaves `None` behind.
        if let Some(player) = self.player.take() {
            if player.join().is_err() {
                warn!("Replay thread panicked");
            }
        }
    }
}

/// A frame that decodes to nothing: both high bits set.
fn garbage_frame(rng: &mut impl Rng) -> u8 {
    rng.gen_range(0b1100_0000..=0xFF)
}

impl BrailleTransport for DummyDevice {
    fn connect(&mut self) -> bool {
        if self.refuse_connection {
            warn!("Dummy device refused the connection");
            return false;
        }
        self.connected.store(true, Ordering::Release);
        true
    }

    fn disconnect(&mut self) {
        self.connected.store(false, Ordering::Release);
        self.wait();
        self.bus.clear_callback();
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    fn bus(&self) -> &ByteBus {
        &self.bus
    }
}

impl Drop for DummyDevice {
    fn drop(&mut self) {
        self.disconnect();
    }
}
