//! The thread-safe buffer where we store frames from the keyboard until a
//! consumer gets around to decoding them.

use crate::transport::{ByteBus, Subscription};

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, PoisonError},
};

/// A FIFO of raw frames shared between the device's reader thread and a
/// consumer. Clones share the same buffer.
///
/// Draining it is just iterating: `for frame in queue.by_ref() { .. }` takes
/// everything received so far and stops when the buffer is empty.
#[derive(Debug, Default, Clone)]
pub struct FrameQueue {
    frames: Arc<Mutex<VecDeque<u8>>>,
}

impl FrameQueue {
    /// Instantiate a new, empty [FrameQueue].
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame.
    pub fn push(&self, frame: u8) {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(frame);
    }

    /// Subscribe to `bus` so every published frame lands in this queue.
    pub fn attach(&self, bus: &ByteBus) -> Subscription {
        let queue = self.clone();
        bus.subscribe(Box::new(move |frame| queue.push(frame)))
    }

    /// Frames waiting to be taken.
    pub fn len(&self) -> usize {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Throw away everything waiting.
    pub fn clear(&mut self) {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Iterator for FrameQueue {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}
