//! Actions bound to the leaf entries of the menu, and the workbench that
//! runs them on the console and status LED.

use core::fmt::{self, Write};

use crate::blackboard::{Channel, SampleBuffer};
use crate::config::{LED_SELF_TEST_BLINKS, LED_SELF_TEST_STEP_MS};
use crate::menu::{ActionRunner, MenuModel, Renderer};
use crate::ui::led::{led_self_test, StatusLed};
use crate::ui::terminal::Terminal;

/// Text shown by Info → About.
pub const ABOUT_TEXT: &str = "\r\nsensor-menu: cooperative sensor firmware for teaching embedded Rust\r\n\
MIT License\r\n";

/// What a (menu, item) position does when selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoundAction {
    Nothing,
    /// Redraw the submenu with the live reading of a channel.
    ShowSample(Channel),
    About,
    LedSelfTest,
    RegisterDump,
}

impl BoundAction {
    /// Action of `item` in submenu `menu` of `model`, looked up by the
    /// entry's label. Unknown labels do nothing.
    pub fn resolve(model: &MenuModel, menu: usize, item: usize) -> Self {
        match model.submenu(menu).get(item) {
            Some(label) => Self::from_label(label),
            None => Self::Nothing,
        }
    }

    /// Action bound to a menu entry label.
    pub fn from_label(label: &str) -> Self {
        match label {
            "About" => Self::About,
            "Test LED" => Self::LedSelfTest,
            "Debug" => Self::RegisterDump,
            _ => Channel::ALL
                .into_iter()
                .find(|channel| channel.label() == label)
                .map_or(Self::Nothing, Self::ShowSample),
        }
    }
}

/// Source of the Info → Debug screen.
pub trait RegisterDump {
    fn dump(&mut self, out: &mut dyn Write) -> fmt::Result;
}

/// Section heading of a register dump (`ADC:`).
pub fn write_section(out: &mut dyn Write, title: &str) -> fmt::Result {
    write!(out, "{}:\r\n", title)
}

/// One right-aligned register line (`  clkgate 0x00000001`).
pub fn write_field(out: &mut dyn Write, label: &str, value: u32) -> fmt::Result {
    write!(out, "  {:>7} 0x{:08X}\r\n", label, value)
}

/// Millisecond counter as a register line, pinned at `u32::MAX` once it
/// no longer fits.
pub fn write_millis(out: &mut dyn Write, label: &str, ms: u64) -> fmt::Result {
    write_field(out, label, u32::try_from(ms).unwrap_or(u32::MAX))
}

/// Console + LED + register source: the complete menu sink.
pub struct Workbench<W, L, D> {
    term: Terminal<W>,
    led: L,
    regs: D,
}

impl<W: Write, L: StatusLed, D: RegisterDump> Workbench<W, L, D> {
    pub const fn new(out: W, led: L, regs: D) -> Self {
        Self {
            term: Terminal::new(out),
            led,
            regs,
        }
    }

    pub fn terminal(&self) -> &Terminal<W> {
        &self.term
    }

    pub fn led(&self) -> &L {
        &self.led
    }

    fn run(
        &mut self,
        action: BoundAction,
        menu: usize,
        item: usize,
        model: &MenuModel,
        samples: &SampleBuffer,
    ) -> fmt::Result {
        match action {
            BoundAction::Nothing => Ok(()),
            BoundAction::ShowSample(channel) => {
                self.term
                    .write_list(model.submenu(menu), item, Some(samples.get(channel)))
            }
            BoundAction::About => {
                self.term.clear_screen()?;
                self.term.write_str(ABOUT_TEXT)
            }
            BoundAction::LedSelfTest => {
                self.term.clear_screen()?;
                self.term.write_str("Testing LED...\r\n")?;
                led_self_test(&mut self.led, LED_SELF_TEST_BLINKS, LED_SELF_TEST_STEP_MS);
                self.term.clear_screen()?;
                self.term.write_str("Done!\r\n")
            }
            BoundAction::RegisterDump => {
                self.term.clear_screen()?;
                self.regs.dump(&mut self.term)
            }
        }
    }
}

impl<W: Write, L: StatusLed, D: RegisterDump> Renderer for Workbench<W, L, D> {
    fn render_list(&mut self, items: &[&str], highlighted: usize, live: Option<i32>) {
        if self.term.write_list(items, highlighted, live).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("console: menu render truncated");
        }
    }
}

impl<W: Write, L: StatusLed, D: RegisterDump> ActionRunner for Workbench<W, L, D> {
    fn run_bound_action(
        &mut self,
        menu: usize,
        item: usize,
        model: &MenuModel,
        samples: &SampleBuffer,
    ) {
        let action = BoundAction::resolve(model, menu, item);
        #[cfg(feature = "defmt")]
        defmt::debug!("action: {}", action);
        if self.run(action, menu, item, model, samples).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("console: action output truncated");
        }
    }
}
