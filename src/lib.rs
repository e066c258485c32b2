//! Host-testable core of the sensor-menu firmware.
//!
//! Everything that does not touch a peripheral lives here: the
//! protothread-style task model and its scheduler, the event queue,
//! the sensor acquisition tasks (behind port traits), the touch
//! classifier, the menu state machine and the console rendering.
//!
//! Usage: `cargo test`
//!
//! Note: The embedded binary (main.rs, `--features embedded`) supplies
//! the nRF52840 implementations of the port traits and drives the
//! scheduler from an Embassy task.

#![cfg_attr(not(test), no_std)]

// ═══════════════════════════════════════════════════════════════════════════
// Configuration & errors
// ═══════════════════════════════════════════════════════════════════════════

pub mod config;
pub mod error;

pub use error::Error;

// ═══════════════════════════════════════════════════════════════════════════
// Cooperative runtime
// ═══════════════════════════════════════════════════════════════════════════

pub mod queue;
pub mod scheduler;
pub mod task;

// ═══════════════════════════════════════════════════════════════════════════
// Application
// ═══════════════════════════════════════════════════════════════════════════

pub mod blackboard;
pub mod collector;
pub mod menu;
pub mod pipeline;
pub mod sensors;
pub mod ui;

pub use blackboard::{Blackboard, Channel, DoneFlags, SampleBuffer, Sensor};
pub use pipeline::Pipeline;
