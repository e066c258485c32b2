//! Serial console on UARTE0 (transmit only).

use core::fmt;

use defmt::warn;
use embassy_nrf::peripherals::UARTE0;
use embassy_nrf::uarte::{Baudrate, UarteTx};

/// Bytes copied to RAM per DMA transfer.
const CHUNK: usize = 32;

/// Baud rate setting for a numeric rate; unknown rates fall back to 115200.
pub fn baudrate(baud: u32) -> Baudrate {
    match baud {
        9_600 => Baudrate::BAUD9600,
        19_200 => Baudrate::BAUD19200,
        38_400 => Baudrate::BAUD38400,
        57_600 => Baudrate::BAUD57600,
        230_400 => Baudrate::BAUD230400,
        460_800 => Baudrate::BAUD460800,
        921_600 => Baudrate::BAUD921600,
        _ => Baudrate::BAUD115200,
    }
}

/// `core::fmt::Write` sink over a blocking UARTE transmitter.
pub struct SerialConsole {
    tx: UarteTx<'static, UARTE0>,
}

impl SerialConsole {
    pub fn new(tx: UarteTx<'static, UARTE0>) -> Self {
        Self { tx }
    }
}

impl fmt::Write for SerialConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        // EasyDMA cannot read from flash: stage string literals in RAM.
        let mut buf = [0u8; CHUNK];
        for chunk in s.as_bytes().chunks(CHUNK) {
            let staged = &mut buf[..chunk.len()];
            staged.copy_from_slice(chunk);
            self.tx.blocking_write(staged).map_err(|e| {
                warn!("uarte: {}", e);
                fmt::Error
            })?;
        }
        Ok(())
    }
}
