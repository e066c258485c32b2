//! Minimal MMA8451Q accelerometer driver (blocking I²C).

use defmt::{info, warn};
use embedded_hal::i2c::I2c;

use sensor_menu::sensors::AccelPort;

/// 7-bit bus address with SA0 pulled high.
pub const ADDRESS: u8 = 0x1D;

const REG_STATUS: u8 = 0x00;
const REG_OUT_X_MSB: u8 = 0x01;
const REG_WHO_AM_I: u8 = 0x0D;
const REG_CTRL_REG1: u8 = 0x2A;

const WHO_AM_I_VALUE: u8 = 0x1A;
const STATUS_ZYXDR: u8 = 0x08;
const CTRL_REG1_ACTIVE: u8 = 0x01;

/// MMA8451Q in ±2 g, 14-bit mode.
///
/// Bus errors are logged and reported as "not ready", so the axes keep
/// their last good value.
pub struct Mma8451<I> {
    i2c: I,
    axes: [i32; 3],
}

impl<I: I2c> Mma8451<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c, axes: [0; 3] }
    }

    /// Read WHO_AM_I and switch the device to active mode.
    pub fn probe(&mut self) -> Result<u8, I::Error> {
        let mut id = [0u8];
        self.read(REG_WHO_AM_I, &mut id)?;
        if id[0] != WHO_AM_I_VALUE {
            warn!("mma8451: unexpected WHO_AM_I {=u8:#x}", id[0]);
        }
        let cmd = [REG_CTRL_REG1, CTRL_REG1_ACTIVE];
        self.i2c.write(ADDRESS, &cmd)?;
        info!("mma8451: active");
        Ok(id[0])
    }

    fn read(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), I::Error> {
        // EasyDMA only reads from RAM: keep the register address on the stack.
        let addr = [reg];
        self.i2c.write_read(ADDRESS, &addr, buf)
    }

    fn fetch(&mut self) -> Result<bool, I::Error> {
        let mut status = [0u8];
        self.read(REG_STATUS, &mut status)?;
        if status[0] & STATUS_ZYXDR == 0 {
            return Ok(false);
        }

        let mut raw = [0u8; 6];
        self.read(REG_OUT_X_MSB, &mut raw)?;
        for (axis, pair) in self.axes.iter_mut().zip(raw.chunks_exact(2)) {
            // 14-bit left-justified two's complement.
            *axis = i32::from(i16::from_be_bytes([pair[0], pair[1]]) >> 2);
        }
        Ok(true)
    }
}

impl<I: I2c> AccelPort for Mma8451<I> {
    fn is_ready(&mut self) -> bool {
        match self.fetch() {
            Ok(ready) => ready,
            Err(_) => {
                warn!("mma8451: bus error");
                false
            }
        }
    }

    fn read_axis_x(&mut self) -> i32 {
        self.axes[0]
    }

    fn read_axis_y(&mut self) -> i32 {
        self.axes[1]
    }

    fn read_axis_z(&mut self) -> i32 {
        self.axes[2]
    }
}
