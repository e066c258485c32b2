//! The five firmware tasks and their fixed round order.

use crate::blackboard::Blackboard;
use crate::collector::Collector;
use crate::config::{ClassifierConfig, ADC_CHANNELS, TOUCH_PAD_X, TOUCH_PAD_Y};
use crate::error::Error;
use crate::menu::{MenuModel, MenuReactor, MenuSink};
use crate::scheduler::Scheduler;
use crate::sensors::{AccelPort, AccelTask, AdcPort, AdcTask, TouchPort, TouchTask};
use crate::task::Thread;

/// Task names in the order every round resumes them.
pub const TASK_ORDER: [&str; 5] = ["adc", "accel", "touch", "collector", "menu"];

/// Owns every task of the firmware.
///
/// The sensor tasks run before the collector so that a sample set
/// completed in round N is classified in the same round.
pub struct Pipeline<'f, A, X, T, S>
where
    A: AdcPort,
    X: AccelPort,
    T: TouchPort,
    S: MenuSink,
{
    pub adc: Thread<AdcTask<A>, Blackboard<'f>>,
    pub accel: Thread<AccelTask<X>, Blackboard<'f>>,
    pub touch: Thread<TouchTask<T>, Blackboard<'f>>,
    pub collector: Thread<Collector, Blackboard<'f>>,
    pub menu: Thread<MenuReactor<S>, Blackboard<'f>>,
}

impl<'f, A, X, T, S> Pipeline<'f, A, X, T, S>
where
    A: AdcPort,
    X: AccelPort,
    T: TouchPort,
    S: MenuSink,
{
    /// Pipeline with the board defaults for ADC inputs and touch pads.
    pub const fn new(
        adc: A,
        accel: X,
        touch: T,
        sink: S,
        classifier: ClassifierConfig,
        menu: MenuModel,
    ) -> Self {
        Self {
            adc: Thread::new(AdcTask::new(adc, ADC_CHANNELS)),
            accel: Thread::new(AccelTask::new(accel)),
            touch: Thread::new(TouchTask::new(touch, TOUCH_PAD_X, TOUCH_PAD_Y)),
            collector: Thread::new(Collector::new(classifier)),
            menu: Thread::new(MenuReactor::new(menu, sink)),
        }
    }

    /// Scheduler over every task, in [`TASK_ORDER`].
    pub fn scheduler(&mut self) -> Result<Scheduler<'_, Blackboard<'f>>, Error> {
        let mut scheduler = Scheduler::new();
        scheduler.spawn(&mut self.adc)?;
        scheduler.spawn(&mut self.accel)?;
        scheduler.spawn(&mut self.touch)?;
        scheduler.spawn(&mut self.collector)?;
        scheduler.spawn(&mut self.menu)?;
        Ok(scheduler)
    }
}
