//! Info → Debug screen: peripheral configuration and live counters.

use core::fmt::{self, Write};

use embassy_time::Instant;

use sensor_menu::config::{SENSOR_TICK_MS, UART_BAUD};
use sensor_menu::ui::actions::{write_field, write_millis, write_section};
use sensor_menu::ui::RegisterDump;

use crate::board::saadc::{self, SAADC_CHANNELS};

pub struct BoardRegisters {
    accel_id: Option<u8>,
}

impl BoardRegisters {
    /// `accel_id` is the WHO_AM_I value, `None` if the probe failed.
    pub fn new(accel_id: Option<u8>) -> Self {
        Self { accel_id }
    }
}

impl RegisterDump for BoardRegisters {
    fn dump(&mut self, out: &mut dyn Write) -> fmt::Result {
        write_section(out, "SAADC")?;
        write_field(out, "chans", SAADC_CHANNELS as u32)?;
        write_field(out, "scans", saadc::scans())?;

        write_section(out, "RTC1")?;
        write_millis(out, "uptime", Instant::now().as_millis())?;
        write_field(out, "tick", SENSOR_TICK_MS as u32)?;

        write_section(out, "TWIM0")?;
        match self.accel_id {
            Some(id) => write_field(out, "whoami", u32::from(id))?,
            None => out.write_str("  absent\r\n")?,
        }

        write_section(out, "UARTE0")?;
        write_field(out, "baud", UART_BAUD)
    }
}
