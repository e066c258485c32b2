//! DK LEDs 1-3 driven as one RGB status LED.

use embassy_nrf::gpio::Output;
use embassy_time::{block_for, Duration};

use sensor_menu::ui::{Rgb, StatusLed};

pub struct BoardLed {
    red: Output<'static>,
    green: Output<'static>,
    blue: Output<'static>,
}

impl BoardLed {
    /// Pins must be configured as outputs, initially high (off).
    pub fn new(red: Output<'static>, green: Output<'static>, blue: Output<'static>) -> Self {
        Self { red, green, blue }
    }
}

fn drive(pin: &mut Output<'static>, on: bool) {
    // Active-low.
    if on {
        pin.set_low();
    } else {
        pin.set_high();
    }
}

impl StatusLed for BoardLed {
    fn set_color(&mut self, color: Rgb) {
        drive(&mut self.red, color.red);
        drive(&mut self.green, color.green);
        drive(&mut self.blue, color.blue);
    }

    fn pause(&mut self, ms: u32) {
        block_for(Duration::from_millis(u64::from(ms)));
    }
}
