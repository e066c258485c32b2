//! Unified error type for sensor-menu.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (with the `defmt` feature) for efficient
//! on-target logging.

use core::fmt;

/// Top-level error type used across the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Event queue
    /// Every slot of the event queue is occupied.
    QueueFull,

    /// The event queue holds no events.
    QueueEmpty,

    /// Event code `0` is reserved for "no event" and cannot be enqueued;
    /// unknown codes cannot be decoded into a menu event.
    InvalidEventCode(u8),

    // Scheduler
    /// The scheduler task list is at capacity.
    SchedulerFull,

    // Menu
    /// A menu list (top level or submenu) has no items.
    EmptyMenu,

    /// The number of submenus differs from the number of top-level entries.
    MenuShapeMismatch,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::QueueFull => f.write_str("event queue full"),
            Error::QueueEmpty => f.write_str("event queue empty"),
            Error::InvalidEventCode(code) => write!(f, "invalid event code {}", code),
            Error::SchedulerFull => f.write_str("scheduler task list full"),
            Error::EmptyMenu => f.write_str("menu list is empty"),
            Error::MenuShapeMismatch => f.write_str("submenu count does not match menu"),
        }
    }
}
