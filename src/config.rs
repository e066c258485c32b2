//! Application-wide constants and compile-time configuration.
//!
//! Timing parameters, classifier thresholds, queue sizes and the channel
//! map of the acquisition tasks live here so they can be tuned in one place.

use crate::blackboard::Channel;

// Event queue

/// Number of slots in the classifier → menu event queue.
pub const EVENT_QUEUE_CAPACITY: usize = 20;

// Scheduler

/// Maximum number of tasks the round-robin scheduler can hold.
pub const MAX_TASKS: usize = 8;

/// Period of the watchdog tick that clears the sensor done-flags (ms).
pub const SENSOR_TICK_MS: u64 = 100;

// Touch classifier

/// Lower bound of the touch zones (raw touch counts).
pub const TOUCH_LOW_THRESHOLD: i32 = 30;

/// Split point between the "low" and "high" halves of a touch axis.
pub const TOUCH_HIGH_THRESHOLD: i32 = 500;

/// Touch sensing input wired to the X axis of the slider.
pub const TOUCH_PAD_X: u8 = 9;

/// Touch sensing input wired to the Y axis of the slider.
pub const TOUCH_PAD_Y: u8 = 10;

// ADC sweep
//
// One entry per converted input: (hardware input id, buffer slot).
// The ADC task converts these in order, once per acquisition cycle.

/// Analog inputs swept by the ADC task.
pub const ADC_CHANNELS: &[(u8, Channel)] = &[
    (0, Channel::Adc0),
    (1, Channel::Adc1),
    (2, Channel::Adc2),
    (3, Channel::Adc3),
    (4, Channel::Adc4),
    (5, Channel::Adc5),
];

// Console

/// Serial console baud rate.
pub const UART_BAUD: u32 = 115_200;

// Status LED

/// Green blink pattern shown while booting, consumed LSB first.
pub const BOOT_BLINK_PATTERN: u16 = 0b1100_1100_1100_1100;

/// Duration of one bit of the boot pattern (ms).
pub const BOOT_BLINK_STEP_MS: u32 = 25;

/// Number of red blinks in the "Test LED" action.
pub const LED_SELF_TEST_BLINKS: u8 = 10;

/// Half-period of a self-test blink (ms).
pub const LED_SELF_TEST_STEP_MS: u32 = 100;

/// Zone thresholds used by the touch classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClassifierConfig {
    /// Readings at or below this value count as "not touched".
    pub low: i32,
    /// Readings above this value count as the far half of the axis.
    pub high: i32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            low: TOUCH_LOW_THRESHOLD,
            high: TOUCH_HIGH_THRESHOLD,
        }
    }
}
