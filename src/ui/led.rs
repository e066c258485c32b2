//! RGB status LED and the blink sequences shown on it.

/// On/off state of each LED colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(false, false, false);
    pub const RED: Rgb = Rgb::new(true, false, false);
    pub const GREEN: Rgb = Rgb::new(false, true, false);
    pub const BLUE: Rgb = Rgb::new(false, false, true);

    pub const fn new(red: bool, green: bool, blue: bool) -> Self {
        Self { red, green, blue }
    }
}

/// A three-colour LED plus a way to wait between frames.
pub trait StatusLed {
    fn set_color(&mut self, color: Rgb);

    /// Busy-wait `ms` milliseconds. Blocks the caller, and with it every
    /// cooperative task.
    fn pause(&mut self, ms: u32);
}

impl<T: StatusLed + ?Sized> StatusLed for &mut T {
    fn set_color(&mut self, color: Rgb) {
        (**self).set_color(color)
    }

    fn pause(&mut self, ms: u32) {
        (**self).pause(ms)
    }
}

/// Blink red `blinks` times, then leave the LED solid green.
pub fn led_self_test<L: StatusLed + ?Sized>(led: &mut L, blinks: u8, step_ms: u32) {
    for _ in 0..blinks {
        led.set_color(Rgb::RED);
        led.pause(step_ms);
        led.set_color(Rgb::OFF);
        led.pause(step_ms);
    }
    led.set_color(Rgb::GREEN);
}

/// Play `pattern` on the green LED, least significant bit first, one bit
/// every `step_ms`. Stops at the highest set bit.
pub fn boot_blink<L: StatusLed + ?Sized>(led: &mut L, pattern: u16, step_ms: u32) {
    let mut bits = pattern;
    while bits != 0 {
        led.set_color(if bits & 1 != 0 { Rgb::GREEN } else { Rgb::OFF });
        led.pause(step_ms);
        bits >>= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Frame {
        Color(Rgb),
        Pause(u32),
    }

    #[derive(Default)]
    struct Recorder {
        frames: Vec<Frame, 64>,
    }

    impl StatusLed for Recorder {
        fn set_color(&mut self, color: Rgb) {
            self.frames.push(Frame::Color(color)).ok();
        }

        fn pause(&mut self, ms: u32) {
            self.frames.push(Frame::Pause(ms)).ok();
        }
    }

    #[test]
    fn self_test_blinks_then_green() {
        let mut led = Recorder::default();
        led_self_test(&mut led, 2, 100);
        assert_eq!(
            led.frames[..],
            [
                Frame::Color(Rgb::RED),
                Frame::Pause(100),
                Frame::Color(Rgb::OFF),
                Frame::Pause(100),
                Frame::Color(Rgb::RED),
                Frame::Pause(100),
                Frame::Color(Rgb::OFF),
                Frame::Pause(100),
                Frame::Color(Rgb::GREEN),
            ]
        );
    }

    #[test]
    fn boot_pattern_lsb_first() {
        let mut led = Recorder::default();
        boot_blink(&mut led, 0b110, 25);
        assert_eq!(
            led.frames[..],
            [
                Frame::Color(Rgb::OFF),
                Frame::Pause(25),
                Frame::Color(Rgb::GREEN),
                Frame::Pause(25),
                Frame::Color(Rgb::GREEN),
                Frame::Pause(25),
            ]
        );
    }

    #[test]
    fn default_boot_pattern_length() {
        let mut led = Recorder::default();
        boot_blink(&mut led, crate::config::BOOT_BLINK_PATTERN, 1);
        // 0b1100_1100_1100_1100: 16 bits, highest one set.
        assert_eq!(led.frames.len(), 32);
        assert_eq!(led.frames[30], Frame::Color(Rgb::GREEN));
    }

    #[test]
    fn empty_pattern_does_nothing() {
        let mut led = Recorder::default();
        boot_blink(&mut led, 0, 25);
        assert!(led.frames.is_empty());
    }
}
