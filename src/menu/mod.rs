//! Three-state menu navigation driven by classified touch events.
//!
//! ```text
//!            Next (wrap)              Next (wrap)
//!             ┌────┐                   ┌────┐
//!             ▼    │      Select       ▼    │     Select (not last)
//!          ┌────────┐ ──────────────► ┌─────────┐ ───────────────► ┌──────┐
//!  start ─►│  Menu  │                 │ Submenu │                  │ Task │◄┐
//!          └────────┘ ◄────────────── └─────────┘ ◄─────────────── └──────┘ │
//!                      Select (last)                    Next          └─────┘
//!                                                                 Select (rerun)
//! ```
//!
//! The machine only decides *what* to show or run and reports it as an
//! [`Effect`]; a [`MenuSink`] decides *how*.

pub mod catalog;
pub mod reactor;

pub use catalog::DEFAULT_MENU;
pub use reactor::MenuReactor;

use crate::blackboard::SampleBuffer;
use crate::error::Error;

/// Navigation input produced by the collector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MenuEvent {
    /// Advance the highlighted entry.
    Next = 1,
    /// Enter, leave or (re)run the highlighted entry.
    Select = 2,
}

impl MenuEvent {
    /// Queue code of this event; never zero.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for MenuEvent {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Error> {
        match code {
            1 => Ok(MenuEvent::Next),
            2 => Ok(MenuEvent::Select),
            other => Err(Error::InvalidEventCode(other)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuState {
    Menu,
    Submenu,
    Task,
}

/// Which list a render effect refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum List {
    Top,
    /// Submenu of the given top-level entry.
    Submenu(usize),
}

/// Output of one transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    Nothing,
    /// Show `List` with entry `usize` highlighted.
    Render(List, usize),
    /// Run the action bound to `item` of submenu `menu`.
    Execute { menu: usize, item: usize },
}

/// Static menu tree: one top-level list, one submenu per top-level entry.
///
/// The last entry of every submenu leads back to the top level.
#[derive(Clone, Copy, Debug)]
pub struct MenuModel {
    top: &'static [&'static str],
    submenus: &'static [&'static [&'static str]],
}

impl MenuModel {
    /// Compile-time constructor; an invalid shape fails const evaluation.
    pub const fn new(
        top: &'static [&'static str],
        submenus: &'static [&'static [&'static str]],
    ) -> Self {
        assert!(!top.is_empty(), "empty top-level menu");
        assert!(top.len() == submenus.len(), "one submenu per entry");
        let mut i = 0;
        while i < submenus.len() {
            assert!(!submenus[i].is_empty(), "empty submenu");
            i += 1;
        }
        Self { top, submenus }
    }

    /// Runtime constructor.
    pub fn try_new(
        top: &'static [&'static str],
        submenus: &'static [&'static [&'static str]],
    ) -> Result<Self, Error> {
        if top.is_empty() || submenus.iter().any(|s| s.is_empty()) {
            return Err(Error::EmptyMenu);
        }
        if top.len() != submenus.len() {
            return Err(Error::MenuShapeMismatch);
        }
        Ok(Self { top, submenus })
    }

    pub fn top(&self) -> &'static [&'static str] {
        self.top
    }

    /// Submenu of top-level entry `index` (empty if out of range).
    pub fn submenu(&self, index: usize) -> &'static [&'static str] {
        self.submenus.get(index).copied().unwrap_or(&[])
    }

    /// Items of `list`.
    pub fn items(&self, list: List) -> &'static [&'static str] {
        match list {
            List::Top => self.top,
            List::Submenu(index) => self.submenu(index),
        }
    }
}

/// Advance `index` by one, back to 0 past the last of `len` entries.
fn wrap_next(index: usize, len: usize) -> usize {
    if index + 1 >= len {
        0
    } else {
        index + 1
    }
}

/// The navigation state machine.
#[derive(Clone, Debug)]
pub struct MenuMachine {
    model: MenuModel,
    state: MenuState,
    top: usize,
    item: usize,
    last_event: Option<MenuEvent>,
}

impl MenuMachine {
    /// Machine at `Menu`, both indices 0.
    pub const fn new(model: MenuModel) -> Self {
        Self {
            model,
            state: MenuState::Menu,
            top: 0,
            item: 0,
            last_event: None,
        }
    }

    /// Effect that shows the initial screen.
    pub fn start(&self) -> Effect {
        Effect::Render(List::Top, self.top)
    }

    /// Apply one event.
    pub fn handle(&mut self, event: MenuEvent) -> Effect {
        self.last_event = Some(event);
        let submenu_len = self.model.submenu(self.top).len();

        match (self.state, event) {
            (MenuState::Menu, MenuEvent::Select) => {
                self.item = 0;
                self.state = MenuState::Submenu;
                Effect::Render(List::Submenu(self.top), self.item)
            }
            (MenuState::Menu, MenuEvent::Next) => {
                self.top = wrap_next(self.top, self.model.top().len());
                Effect::Render(List::Top, self.top)
            }
            (MenuState::Submenu, MenuEvent::Select) if self.item + 1 >= submenu_len => {
                self.top = 0;
                self.state = MenuState::Menu;
                Effect::Render(List::Top, self.top)
            }
            (MenuState::Submenu, MenuEvent::Select) => {
                self.state = MenuState::Task;
                Effect::Execute {
                    menu: self.top,
                    item: self.item,
                }
            }
            (MenuState::Submenu, MenuEvent::Next) => {
                self.item = wrap_next(self.item, submenu_len);
                Effect::Render(List::Submenu(self.top), self.item)
            }
            (MenuState::Task, MenuEvent::Next) => {
                self.state = MenuState::Submenu;
                Effect::Nothing
            }
            (MenuState::Task, MenuEvent::Select) => Effect::Execute {
                menu: self.top,
                item: self.item,
            },
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Highlighted top-level entry.
    pub fn top(&self) -> usize {
        self.top
    }

    /// Highlighted submenu entry.
    pub fn item(&self) -> usize {
        self.item
    }

    /// Most recently handled event.
    pub fn last_event(&self) -> Option<MenuEvent> {
        self.last_event
    }

    pub fn model(&self) -> &MenuModel {
        &self.model
    }
}

/// Draws menu lists.
pub trait Renderer {
    /// Show `items` with `highlighted` marked, annotated with `live` if any.
    fn render_list(&mut self, items: &[&str], highlighted: usize, live: Option<i32>);
}

/// Runs the side effect bound to a leaf entry.
pub trait ActionRunner {
    fn run_bound_action(
        &mut self,
        menu: usize,
        item: usize,
        model: &MenuModel,
        samples: &SampleBuffer,
    );
}

/// Everything the menu task needs from the outside world.
pub trait MenuSink: Renderer + ActionRunner {}

impl<T: Renderer + ActionRunner + ?Sized> MenuSink for T {}
