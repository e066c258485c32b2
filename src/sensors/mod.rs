//! Sensor acquisition tasks and the peripheral capabilities they consume.
//!
//! Every acquisition task runs the same cycle:
//!
//! 1. wait until its done-flag is cleared (by the collector or the timer),
//! 2. read the peripheral, waiting on its "ready" predicate where it has one,
//! 3. write its own slots of the sample buffer,
//! 4. set its done-flag and loop.
//!
//! A peripheral that never reports ready stalls only its own task; the
//! slots keep their last good value and every other task keeps running.
//!
//! The port traits are the whole hardware surface of this layer. The board
//! module of the embedded binary implements them on real peripherals; tests
//! implement them with scripted mocks.

pub mod accel;
pub mod adc;
pub mod touch;

pub use accel::AccelTask;
pub use adc::AdcTask;
pub use touch::TouchTask;

/// Multiplexed analog-to-digital converter.
pub trait AdcPort {
    /// Route hardware input `input` to the converter and start a conversion.
    fn select_channel(&mut self, input: u8);

    /// `true` once the conversion started by `select_channel` is complete.
    fn ready_to_read_channel(&mut self) -> bool;

    /// Result of the last completed conversion.
    fn read_channel_value(&mut self) -> i32;
}

/// Three-axis accelerometer.
pub trait AccelPort {
    /// `true` when a fresh sample set is available.
    fn is_ready(&mut self) -> bool {
        true
    }

    fn read_axis_x(&mut self) -> i32;
    fn read_axis_y(&mut self) -> i32;
    fn read_axis_z(&mut self) -> i32;
}

/// Capacitive touch sensing inputs.
pub trait TouchPort {
    /// `true` when the last scan of every pad is complete.
    fn is_ready(&mut self) -> bool {
        true
    }

    /// Raw reading of touch pad `pad`.
    fn read_touch_axis(&mut self, pad: u8) -> i32;
}

impl<T: AdcPort + ?Sized> AdcPort for &mut T {
    fn select_channel(&mut self, input: u8) {
        (**self).select_channel(input)
    }

    fn ready_to_read_channel(&mut self) -> bool {
        (**self).ready_to_read_channel()
    }

    fn read_channel_value(&mut self) -> i32 {
        (**self).read_channel_value()
    }
}

impl<T: AccelPort + ?Sized> AccelPort for &mut T {
    fn is_ready(&mut self) -> bool {
        (**self).is_ready()
    }

    fn read_axis_x(&mut self) -> i32 {
        (**self).read_axis_x()
    }

    fn read_axis_y(&mut self) -> i32 {
        (**self).read_axis_y()
    }

    fn read_axis_z(&mut self) -> i32 {
        (**self).read_axis_z()
    }
}

impl<T: TouchPort + ?Sized> TouchPort for &mut T {
    fn is_ready(&mut self) -> bool {
        (**self).is_ready()
    }

    fn read_touch_axis(&mut self, pad: u8) -> i32 {
        (**self).read_touch_axis(pad)
    }
}
