//! Resumable cooperative tasks (protothread-style state machines).
//!
//! A task is a [`Body`] - an enumerated `Step` plus a `run` function that
//! executes one step - wrapped in a [`Thread`] that persists the resume
//! point between scheduler rounds:
//!
//! ```text
//!   NotStarted ──► Running(step) ──► Waiting(step, guard) ──► Running(step)
//!        │              │                                        │
//!        └──────────────┴────────────── Complete ───────────────►  Done
//! ```
//!
//! Waiting is a predicate over the body and the shared context, evaluated
//! once per resume. A false predicate returns immediately with no side
//! effects, so a blocked task costs the scheduler a single function call.
//! Nothing here allocates or switches stacks; all tasks share the caller's
//! stack and a step always runs to its next explicit yield point.

use core::fmt;

/// Wait predicate: re-evaluated on every resume of a waiting task.
pub type Guard<B, Cx> = fn(&mut B, &Cx) -> bool;

/// What a body wants to happen after the step it just ran.
pub enum Flow<B: Body<Cx>, Cx> {
    /// Run `step` immediately, within the same resume.
    Continue(B::Step),
    /// Give control back to the scheduler; resume at `step` next round.
    Yield(B::Step),
    /// Continue at `step` once the guard holds. A guard that is already
    /// true falls straight through without yielding.
    WaitUntil(B::Step, Guard<B, Cx>),
    /// Perpetual task finished one pass: loop back to the entry step and
    /// yield.
    Restart,
    /// One-shot task finished: never run again.
    Complete,
}

/// The resumable code of a task.
///
/// `run` must reach a `Yield`, `WaitUntil`, `Restart` or `Complete` in a
/// bounded number of `Continue`s, otherwise it starves every other task.
pub trait Body<Cx>: Sized {
    /// Resume points of this body.
    type Step: Copy + PartialEq + fmt::Debug;

    /// Step executed on the first resume and after every `Restart`.
    const ENTRY: Self::Step;

    /// Human readable task name (diagnostics only).
    fn name(&self) -> &'static str;

    /// Execute `step` against the shared context.
    fn run(&mut self, step: Self::Step, cx: &mut Cx) -> Flow<Self, Cx>;
}

/// Coarse state of a task, without the resume payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Never resumed.
    NotStarted,
    /// Yielded; runs again on the next resume.
    Running,
    /// Blocked on a predicate.
    Waiting,
    /// One-shot task completed.
    Done,
}

/// Outcome of a single resume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Poll {
    /// At least one step ran; the task is not finished.
    Yielded,
    /// Waiting and the predicate is still false - nothing ran.
    Blocked,
    /// The task is done (now or on an earlier resume).
    Completed,
}

/// Object-safe view of a task, as seen by the scheduler.
pub trait Task<Cx> {
    /// Task name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Run until the next yield point.
    fn resume(&mut self, cx: &mut Cx) -> Poll;

    /// Current coarse state.
    fn status(&self) -> Status;
}

enum TaskState<B: Body<Cx>, Cx> {
    NotStarted,
    Running(B::Step),
    Waiting(B::Step, Guard<B, Cx>),
    Done,
}

/// A body together with its persisted resume point.
pub struct Thread<B: Body<Cx>, Cx> {
    body: B,
    state: TaskState<B, Cx>,
}

impl<B: Body<Cx>, Cx> Thread<B, Cx> {
    /// Wrap `body`; the first resume starts at [`Body::ENTRY`].
    pub const fn new(body: B) -> Self {
        Self {
            body,
            state: TaskState::NotStarted,
        }
    }

    /// Step the next resume continues from, if any.
    pub fn step(&self) -> Option<B::Step> {
        match self.state {
            TaskState::NotStarted => Some(B::ENTRY),
            TaskState::Running(step) | TaskState::Waiting(step, _) => Some(step),
            TaskState::Done => None,
        }
    }

    /// Shared access to the body (local variables of the task).
    pub fn body(&self) -> &B {
        &self.body
    }

    /// Exclusive access to the body.
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }
}

impl<B: Body<Cx>, Cx> Task<Cx> for Thread<B, Cx> {
    fn name(&self) -> &'static str {
        self.body.name()
    }

    fn resume(&mut self, cx: &mut Cx) -> Poll {
        let mut step = match self.state {
            TaskState::Done => return Poll::Completed,
            TaskState::NotStarted => B::ENTRY,
            TaskState::Running(step) => step,
            TaskState::Waiting(step, guard) => {
                if !guard(&mut self.body, cx) {
                    return Poll::Blocked;
                }
                step
            }
        };

        loop {
            match self.body.run(step, cx) {
                Flow::Continue(next) => step = next,
                Flow::Yield(next) => {
                    self.state = TaskState::Running(next);
                    return Poll::Yielded;
                }
                Flow::WaitUntil(next, guard) => {
                    if guard(&mut self.body, cx) {
                        step = next;
                    } else {
                        self.state = TaskState::Waiting(next, guard);
                        return Poll::Yielded;
                    }
                }
                Flow::Restart => {
                    self.state = TaskState::Running(B::ENTRY);
                    return Poll::Yielded;
                }
                Flow::Complete => {
                    self.state = TaskState::Done;
                    return Poll::Completed;
                }
            }
        }
    }

    fn status(&self) -> Status {
        match self.state {
            TaskState::NotStarted => Status::NotStarted,
            TaskState::Running(_) => Status::Running,
            TaskState::Waiting(..) => Status::Waiting,
            TaskState::Done => Status::Done,
        }
    }
}
