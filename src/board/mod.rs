//! nRF52840-DK implementations of the library's port traits.
//!
//! ## Wiring
//!
//! - **SAADC**: AIN0..AIN5 are the analog inputs A0..A5, AIN6/AIN7 the
//!   X/Y axes of the resistive touch strip
//! - **TWIM0**: MMA8451Q accelerometer (SDA P0.26, SCL P0.27)
//! - **UARTE0**: console TX on P0.06 (the J-Link virtual COM port)
//! - **LED1..LED3**: P0.13/P0.14/P0.15, active-low, used as red/green/blue

pub mod console;
pub mod led;
pub mod mma8451;
pub mod regs;
pub mod saadc;

pub use console::SerialConsole;
pub use led::BoardLed;
pub use mma8451::Mma8451;
pub use regs::BoardRegisters;
pub use saadc::{SaadcAdc, SaadcTouch};
