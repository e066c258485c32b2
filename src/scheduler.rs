//! Round-robin cooperative scheduler.
//!
//! The scheduler owns an ordered list of task references and, each round,
//! resumes every task exactly once in list order. Ordering is data: the
//! list is built with [`Scheduler::spawn`] and can be inspected with
//! [`Scheduler::order`].
//!
//! Blocked and finished tasks return immediately, so a round never waits
//! on anything. Writes made by a task in round N are visible to the tasks
//! after it in the same round and to every task in round N+1.

use heapless::Vec;

use crate::config::MAX_TASKS;
use crate::error::Error;
use crate::task::{Poll, Status, Task};

/// Summary of one scheduling round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RoundReport {
    /// 1-based number of the round.
    pub round: u32,
    /// Tasks that ran at least one step.
    pub yielded: usize,
    /// Tasks whose wait predicate was still false.
    pub blocked: usize,
    /// Tasks that are done.
    pub completed: usize,
}

struct Slot<'a, Cx> {
    task: &'a mut dyn Task<Cx>,
    /// Consecutive rounds the task came back `Blocked`.
    blocked_rounds: u32,
}

/// Fixed-capacity round-robin scheduler over a shared context `Cx`.
pub struct Scheduler<'a, Cx, const N: usize = MAX_TASKS> {
    slots: Vec<Slot<'a, Cx>, N>,
    rounds: u32,
}

impl<'a, Cx, const N: usize> Scheduler<'a, Cx, N> {
    /// Empty scheduler.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            rounds: 0,
        }
    }

    /// Append `task` to the end of the round order.
    pub fn spawn(&mut self, task: &'a mut dyn Task<Cx>) -> Result<(), Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("scheduler: slot {} = {}", self.slots.len(), task.name());

        self.slots
            .push(Slot {
                task,
                blocked_rounds: 0,
            })
            .map_err(|_| Error::SchedulerFull)
    }

    /// Resume every task once, in order.
    pub fn run_round(&mut self, cx: &mut Cx) -> RoundReport {
        self.run_round_with(cx, |_, _| {})
    }

    /// Like [`run_round`](Self::run_round), calling `after_task(index, cx)`
    /// after each task. Used to model an interrupt firing between steps.
    pub fn run_round_with<F>(&mut self, cx: &mut Cx, mut after_task: F) -> RoundReport
    where
        F: FnMut(usize, &mut Cx),
    {
        self.rounds = self.rounds.wrapping_add(1);
        let mut report = RoundReport {
            round: self.rounds,
            ..RoundReport::default()
        };

        for (index, slot) in self.slots.iter_mut().enumerate() {
            match slot.task.resume(cx) {
                Poll::Yielded => {
                    slot.blocked_rounds = 0;
                    report.yielded += 1;
                }
                Poll::Blocked => {
                    slot.blocked_rounds = slot.blocked_rounds.saturating_add(1);
                    report.blocked += 1;
                }
                Poll::Completed => report.completed += 1,
            }
            after_task(index, cx);
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("scheduler: {}", report);

        report
    }

    /// Task names in round order.
    pub fn order(&self) -> impl Iterator<Item = &'static str> + use<'_, 'a, Cx, N> {
        self.slots.iter().map(|slot| slot.task.name())
    }

    /// Status of the task at `index`.
    pub fn status(&self, index: usize) -> Option<Status> {
        self.slots.get(index).map(|slot| slot.task.status())
    }

    /// Consecutive rounds the task at `index` has been blocked.
    ///
    /// A steadily growing count is the only visible symptom of a task
    /// whose wait predicate never becomes true.
    pub fn blocked_rounds(&self, index: usize) -> Option<u32> {
        self.slots.get(index).map(|slot| slot.blocked_rounds)
    }

    /// Number of rounds run so far.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Number of scheduled tasks.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` when no task has been spawned.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<'a, Cx, const N: usize> Default for Scheduler<'a, Cx, N> {
    fn default() -> Self {
        Self::new()
    }
}
