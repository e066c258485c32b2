//! Scheduler task that drives the [`MenuMachine`] from the event queue.

use super::{Effect, MenuEvent, MenuMachine, MenuModel, MenuSink};
use crate::blackboard::{Blackboard, SampleBuffer};
use crate::task::{Body, Flow};

/// Resume points of [`MenuReactor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReactorStep {
    /// Draw the initial screen.
    Start,
    AwaitEvent,
    Dispatch,
}

/// Consumes one queued event per activation and applies its effect.
pub struct MenuReactor<S> {
    machine: MenuMachine,
    sink: S,
    handled: u32,
    rejected: u32,
}

impl<S: MenuSink> MenuReactor<S> {
    pub const fn new(model: MenuModel, sink: S) -> Self {
        Self {
            machine: MenuMachine::new(model),
            sink,
            handled: 0,
            rejected: 0,
        }
    }

    pub fn machine(&self) -> &MenuMachine {
        &self.machine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Events fed to the machine.
    pub fn handled(&self) -> u32 {
        self.handled
    }

    /// Queue entries that did not decode to an event.
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    fn apply(&mut self, effect: Effect, samples: &SampleBuffer) {
        match effect {
            Effect::Nothing => {}
            Effect::Render(list, highlighted) => {
                let items = self.machine.model().items(list);
                self.sink.render_list(items, highlighted, None);
            }
            Effect::Execute { menu, item } => {
                let model = *self.machine.model();
                self.sink.run_bound_action(menu, item, &model, samples);
            }
        }
    }
}

impl<'f, S: MenuSink> Body<Blackboard<'f>> for MenuReactor<S> {
    type Step = ReactorStep;
    const ENTRY: ReactorStep = ReactorStep::Start;

    fn name(&self) -> &'static str {
        "menu"
    }

    fn run(&mut self, step: ReactorStep, cx: &mut Blackboard<'f>) -> Flow<Self, Blackboard<'f>> {
        match step {
            ReactorStep::Start => {
                let effect = self.machine.start();
                self.apply(effect, &cx.samples);
                Flow::Continue(ReactorStep::AwaitEvent)
            }
            ReactorStep::AwaitEvent => {
                Flow::WaitUntil(ReactorStep::Dispatch, |_, cx| !cx.events.is_empty())
            }
            ReactorStep::Dispatch => {
                let code = cx.events.consume();
                match MenuEvent::try_from(code) {
                    Ok(event) => {
                        let effect = self.machine.handle(event);
                        self.handled = self.handled.wrapping_add(1);
                        #[cfg(feature = "defmt")]
                        defmt::info!(
                            "menu: {} -> {} ({})",
                            event,
                            self.machine.state(),
                            effect
                        );
                        self.apply(effect, &cx.samples);
                    }
                    Err(_e) => {
                        self.rejected = self.rejected.wrapping_add(1);
                        #[cfg(feature = "defmt")]
                        defmt::warn!("menu: {}", _e);
                    }
                }
                Flow::Yield(ReactorStep::AwaitEvent)
            }
        }
    }
}
