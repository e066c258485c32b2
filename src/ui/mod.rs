//! User interface - serial console menu and RGB status LED.
//!
//! ## Components
//!
//! - **Terminal**: ANSI menu rendering on any `core::fmt::Write` sink
//! - **Actions**: what each leaf entry does, run by the [`Workbench`]
//! - **LED**: boot and self-test blink sequences

pub mod actions;
pub mod led;
pub mod terminal;

pub use actions::{BoundAction, RegisterDump, Workbench};
pub use led::{boot_blink, led_self_test, Rgb, StatusLed};
pub use terminal::Terminal;
