//! The boundary between a Braille input device and the code that consumes
//! its frames.
//!
//! A device owns a [ByteBus] and publishes every byte it receives to it, one
//! call per byte. Consumers either [subscribe](ByteBus::subscribe), keeping
//! the returned [Subscription] alive for as long as they want bytes, or use
//! the single replaceable slot behind
//! [set_on_data_callback](BrailleTransport::set_on_data_callback).
//!
//! Callbacks run on the device's reader thread while the bus is locked. They
//! should be quick (push onto a [FrameQueue](crate::frame_queue::FrameQueue)
//! or a channel) and must not call back into the bus.

use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

/// A consumer of raw frames.
pub type DataCallback = Box<dyn FnMut(u8) + Send>;

/// `BrailleTransport`
///
/// A connection to something that produces keyboard frames. Connecting and
/// disconnecting never fail loudly: `connect` reports success as a `bool`
/// and logs why it failed, `disconnect` may be called any number of times.
pub trait BrailleTransport {
    /// Opens the connection. Returns `true` if it is now open.
    fn connect(&mut self) -> bool;

    /// Closes the connection and forgets the callback registered with
    /// [set_on_data_callback](BrailleTransport::set_on_data_callback).
    /// Calling this on a closed connection does nothing.
    fn disconnect(&mut self);

    /// Whether frames can currently arrive.
    fn is_connected(&self) -> bool;

    /// The bus this transport publishes frames to.
    fn bus(&self) -> &ByteBus;

    /// Registers the single primary consumer, replacing any earlier one.
    fn set_on_data_callback(&self, callback: DataCallback) {
        self.bus().set_callback(callback);
    }

    /// Adds a consumer alongside any others.
    fn subscribe(&self, callback: DataCallback) -> Subscription {
        self.bus().subscribe(callback)
    }
}

#[derive(Default)]
struct Subscribers {
    primary: Option<DataCallback>,
    others: BTreeMap<u64, DataCallback>,
    next_id: u64,
}

/// Fans each received byte out to every registered callback.
///
/// Cloning a bus gives another handle to the same set of callbacks.
#[derive(Clone, Default)]
pub struct ByteBus {
    subscribers: Arc<Mutex<Subscribers>>,
}

fn lock(subscribers: &Mutex<Subscribers>) -> MutexGuard<'_, Subscribers> {
    // A panicking callback must not take every later frame down with it.
    subscribers.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ByteBus {
    /// A bus with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills the primary slot, dropping whatever was there.
    pub fn set_callback(&self, callback: DataCallback) {
        lock(&self.subscribers).primary = Some(callback);
    }

    /// Empties the primary slot.
    pub fn clear_callback(&self) {
        lock(&self.subscribers).primary = None;
    }

    /// Adds `callback` until the returned [Subscription] is dropped.
    pub fn subscribe(&self, callback: DataCallback) -> Subscription {
        let mut subscribers = lock(&self.subscribers);
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        subscribers.others.insert(id, callback);
        Subscription {
            id,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    /// Hands `byte` to the primary callback, then to every subscriber in the
    /// order they subscribed.
    pub fn publish(&self, byte: u8) {
        let mut subscribers = lock(&self.subscribers);
        if let Some(callback) = subscribers.primary.as_mut() {
            callback(byte);
        }
        for callback in subscribers.others.values_mut() {
            callback(byte);
        }
    }

    /// Number of callbacks that would see the next byte.
    pub fn callback_count(&self) -> usize {
        let subscribers = lock(&self.subscribers);
        subscribers.others.len() + usize::from(subscribers.primary.is_some())
    }
}

impl fmt::Debug for ByteBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBus")
            .field("callbacks", &self.callback_count())
            .finish()
    }
}

/// Keeps a callback registered on a [ByteBus]. Dropping it unsubscribes.
#[derive(Debug)]
#[must_use = "the callback is removed as soon as the subscription is dropped"]
pub struct Subscription {
    id: u64,
    subscribers: Weak<Mutex<Subscribers>>,
}

impl Subscription {
    /// Removes the callback now rather than at drop.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            lock(&subscribers).others.remove(&self.id);
        }
    }
}
