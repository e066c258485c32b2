//! The menu tree shipped with the firmware.
//!
//! Leaf labels double as action names: [`crate::ui::BoundAction::from_label`]
//! binds "About", "Test LED", "Debug" and the channel labels.

use super::MenuModel;

pub const TOP: &[&str] = &["Edit Preferences", "Print Sensor", "Info"];

pub const PREFERENCES: &[&str] = &["Nothing to do", "Back"];

/// One entry per sample buffer slot, in channel order.
pub const SENSORS: &[&str] = &[
    "A0", "A1", "A2", "A3", "A4", "A5", "AccX", "AccY", "AccZ", "TchX", "TchY", "Back",
];

pub const INFO: &[&str] = &["About", "Test LED", "Debug", "Back"];

pub const SUBMENUS: &[&[&str]] = &[PREFERENCES, SENSORS, INFO];

pub const DEFAULT_MENU: MenuModel = MenuModel::new(TOP, SUBMENUS);
