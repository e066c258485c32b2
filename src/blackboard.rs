//! State shared between the cooperative tasks.
//!
//! - [`SampleBuffer`]: one reading per [`Channel`]. Each sensor task owns a
//!   fixed group of slots and is the only writer of that group.
//! - [`DoneFlags`]: one flag per sensor task meaning "my slots are valid for
//!   this cycle". Set by the owning task, cleared by the collector once it
//!   has classified the cycle, and by the periodic timer tick. The timer
//!   never touches anything but these flags, so it may fire between any two
//!   task steps.
//! - [`Blackboard`]: the context handed to every task by the scheduler.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::queue::EventQueue;

/// Named slots of the sample buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Adc0,
    Adc1,
    Adc2,
    Adc3,
    Adc4,
    Adc5,
    AccelX,
    AccelY,
    AccelZ,
    TouchX,
    TouchY,
}

impl Channel {
    /// Number of channels (= sample buffer length).
    pub const COUNT: usize = 11;

    /// Every channel, in buffer order.
    pub const ALL: [Channel; Channel::COUNT] = [
        Channel::Adc0,
        Channel::Adc1,
        Channel::Adc2,
        Channel::Adc3,
        Channel::Adc4,
        Channel::Adc5,
        Channel::AccelX,
        Channel::AccelY,
        Channel::AccelZ,
        Channel::TouchX,
        Channel::TouchY,
    ];

    /// Buffer index of this channel.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Channel stored at buffer index `index`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Short label used on the console.
    pub const fn label(self) -> &'static str {
        match self {
            Channel::Adc0 => "A0",
            Channel::Adc1 => "A1",
            Channel::Adc2 => "A2",
            Channel::Adc3 => "A3",
            Channel::Adc4 => "A4",
            Channel::Adc5 => "A5",
            Channel::AccelX => "AccX",
            Channel::AccelY => "AccY",
            Channel::AccelZ => "AccZ",
            Channel::TouchX => "TchX",
            Channel::TouchY => "TchY",
        }
    }
}

/// Latest reading of every channel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SampleBuffer {
    values: [i32; Channel::COUNT],
}

impl SampleBuffer {
    /// All readings zero.
    pub const fn new() -> Self {
        Self {
            values: [0; Channel::COUNT],
        }
    }

    /// Reading of `channel`.
    pub fn get(&self, channel: Channel) -> i32 {
        self.values[channel.index()]
    }

    /// Store a reading for `channel`.
    pub fn set(&mut self, channel: Channel, value: i32) {
        self.values[channel.index()] = value;
    }

    /// Every reading, in [`Channel::ALL`] order.
    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }
}

/// Which sensor task a done-flag belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sensor {
    Adc,
    Accel,
    Touch,
}

/// Per-sensor "cycle complete" flags.
///
/// Atomic so a `static` instance can be cleared from interrupt context
/// while the scheduler runs.
#[derive(Debug, Default)]
pub struct DoneFlags {
    adc: AtomicBool,
    accel: AtomicBool,
    touch: AtomicBool,
}

impl DoneFlags {
    /// All flags cleared, so every sensor task starts acquiring at once.
    pub const fn new() -> Self {
        Self {
            adc: AtomicBool::new(false),
            accel: AtomicBool::new(false),
            touch: AtomicBool::new(false),
        }
    }

    fn flag(&self, sensor: Sensor) -> &AtomicBool {
        match sensor {
            Sensor::Adc => &self.adc,
            Sensor::Accel => &self.accel,
            Sensor::Touch => &self.touch,
        }
    }

    /// `true` once `sensor` has published this cycle's readings.
    pub fn is_done(&self, sensor: Sensor) -> bool {
        self.flag(sensor).load(Ordering::Acquire)
    }

    /// Publish: `sensor` finished writing its slots.
    pub fn set_done(&self, sensor: Sensor) {
        self.flag(sensor).store(true, Ordering::Release);
    }

    /// Request a new acquisition from `sensor`.
    pub fn clear(&self, sensor: Sensor) {
        self.flag(sensor).store(false, Ordering::Release);
    }

    /// `true` when every sensor has published.
    pub fn all_done(&self) -> bool {
        self.is_done(Sensor::Adc) && self.is_done(Sensor::Accel) && self.is_done(Sensor::Touch)
    }

    /// Restart the acquisition cycle of every sensor.
    ///
    /// This is the only operation the timer tick performs.
    pub fn clear_sensors(&self) {
        self.clear(Sensor::Adc);
        self.clear(Sensor::Accel);
        self.clear(Sensor::Touch);
    }
}

/// Scheduler context: everything the tasks share.
pub struct Blackboard<'f> {
    /// Latest readings.
    pub samples: SampleBuffer,
    /// Sensor done-flags, shared with the timer tick.
    pub flags: &'f DoneFlags,
    /// Classified events waiting for the menu.
    pub events: EventQueue,
}

impl<'f> Blackboard<'f> {
    /// Fresh context over `flags`.
    pub fn new(flags: &'f DoneFlags) -> Self {
        Self {
            samples: SampleBuffer::new(),
            flags,
            events: EventQueue::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_index_roundtrip() {
        for (i, ch) in Channel::ALL.iter().enumerate() {
            assert_eq!(ch.index(), i);
            assert_eq!(Channel::from_index(i), Some(*ch));
        }
        assert_eq!(Channel::from_index(Channel::COUNT), None);
    }

    #[test]
    fn channel_labels_match_console_names() {
        assert_eq!(Channel::Adc0.label(), "A0");
        assert_eq!(Channel::AccelZ.label(), "AccZ");
        assert_eq!(Channel::TouchY.label(), "TchY");
    }

    #[test]
    fn sample_buffer_slots_are_independent() {
        let mut buf = SampleBuffer::new();
        buf.set(Channel::TouchX, 600);
        buf.set(Channel::AccelY, -42);
        assert_eq!(buf.get(Channel::TouchX), 600);
        assert_eq!(buf.get(Channel::AccelY), -42);
        assert_eq!(buf.get(Channel::TouchY), 0);
        assert_eq!(buf.as_slice()[Channel::TouchX.index()], 600);
    }

    #[test]
    fn flags_start_clear() {
        let flags = DoneFlags::new();
        assert!(!flags.is_done(Sensor::Adc));
        assert!(!flags.all_done());
    }

    #[test]
    fn all_done_needs_every_sensor() {
        let flags = DoneFlags::new();
        flags.set_done(Sensor::Adc);
        flags.set_done(Sensor::Touch);
        assert!(!flags.all_done());
        flags.set_done(Sensor::Accel);
        assert!(flags.all_done());

        flags.clear_sensors();
        assert!(!flags.is_done(Sensor::Adc));
        assert!(!flags.is_done(Sensor::Accel));
        assert!(!flags.is_done(Sensor::Touch));
    }
}
