//! Bounded circular queue of single-byte event codes.
//!
//! Layout:
//! ```text
//!   start ──► oldest event          end ──► next free slot
//!   [ e0 | e1 | e2 | .. | .. | .. ]  length = occupied slots
//! ```
//!
//! Code `0` is the "no event" sentinel: it is never stored, and
//! [`EventQueue::consume`] returns it when the queue is empty. Indices
//! advance modulo the capacity for the lifetime of the queue.

use core::num::NonZeroU8;

use crate::config::EVENT_QUEUE_CAPACITY;
use crate::error::Error;

/// Sentinel returned by [`EventQueue::consume`] when there is nothing queued.
pub const NO_EVENT: u8 = 0;

/// Busy marker around queue mutation.
///
/// Brackets every produce so an interrupt-context reader can tell that the
/// indices are being updated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueStatus {
    /// No mutation in progress.
    Idle,
    /// A produce is updating storage and indices.
    InUse,
}

/// Fixed-capacity FIFO of non-zero event codes.
#[derive(Clone, Debug)]
pub struct EventQueue<const N: usize = EVENT_QUEUE_CAPACITY> {
    events: [u8; N],
    start: usize,
    end: usize,
    length: usize,
    status: QueueStatus,
}

impl<const N: usize> EventQueue<N> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            events: [NO_EVENT; N],
            start: 0,
            end: 0,
            length: 0,
            status: QueueStatus::Idle,
        }
    }

    /// Reset indices, wipe storage and mark the queue idle.
    pub fn init(&mut self) {
        self.events = [NO_EVENT; N];
        self.start = 0;
        self.end = 0;
        self.length = 0;
        self.status = QueueStatus::Idle;
    }

    /// Append `code` at the tail.
    ///
    /// Fails without touching the queue when `code` is the reserved `0`
    /// or when every slot is occupied.
    pub fn produce(&mut self, code: u8) -> Result<(), Error> {
        if code == NO_EVENT {
            return Err(Error::InvalidEventCode(code));
        }
        if self.length == N {
            return Err(Error::QueueFull);
        }

        self.status = QueueStatus::InUse;
        self.events[self.end] = code;
        self.end = (self.end + 1) % N;
        self.length += 1;
        self.status = QueueStatus::Idle;
        Ok(())
    }

    /// Remove and return the oldest code, or [`NO_EVENT`] when empty.
    pub fn consume(&mut self) -> u8 {
        if self.length == 0 {
            return NO_EVENT;
        }
        let code = self.events[self.start];
        self.events[self.start] = NO_EVENT;
        self.start = (self.start + 1) % N;
        self.length -= 1;
        code
    }

    /// Like [`consume`](Self::consume) but reports emptiness as an error.
    pub fn try_consume(&mut self) -> Result<NonZeroU8, Error> {
        NonZeroU8::new(self.consume()).ok_or(Error::QueueEmpty)
    }

    /// Number of queued events.
    pub fn peek(&self) -> usize {
        self.length
    }

    /// `true` when no events are queued.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// `true` when a produce would fail with [`Error::QueueFull`].
    pub fn is_full(&self) -> bool {
        self.length == N
    }

    /// Total number of slots.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Current busy marker.
    pub fn status(&self) -> QueueStatus {
        self.status
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
