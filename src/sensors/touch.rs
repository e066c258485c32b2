//! Touch slider acquisition task.
//!
//! Two sensing pads give the raw X/Y readings the collector classifies
//! into navigation gestures.

use crate::blackboard::{Blackboard, Channel, Sensor};
use crate::sensors::TouchPort;
use crate::task::{Body, Flow};

/// Resume points of [`TouchTask`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchStep {
    AwaitRequest,
    AwaitScan,
    Read,
}

/// Acquisition task owning the TouchX/TouchY slots.
pub struct TouchTask<P> {
    port: P,
    pad_x: u8,
    pad_y: u8,
}

impl<P: TouchPort> TouchTask<P> {
    /// Read pads `pad_x` and `pad_y` of `port`.
    pub const fn new(port: P, pad_x: u8, pad_y: u8) -> Self {
        Self { port, pad_x, pad_y }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Mutable access to the port, e.g. to script readings in tests.
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}

impl<'f, P: TouchPort> Body<Blackboard<'f>> for TouchTask<P> {
    type Step = TouchStep;
    const ENTRY: TouchStep = TouchStep::AwaitRequest;

    fn name(&self) -> &'static str {
        "touch"
    }

    fn run(&mut self, step: TouchStep, cx: &mut Blackboard<'f>) -> Flow<Self, Blackboard<'f>> {
        match step {
            TouchStep::AwaitRequest => Flow::WaitUntil(TouchStep::AwaitScan, |_, cx| {
                !cx.flags.is_done(Sensor::Touch)
            }),
            TouchStep::AwaitScan => Flow::WaitUntil(TouchStep::Read, |task, _| task.port.is_ready()),
            TouchStep::Read => {
                let x = self.port.read_touch_axis(self.pad_x);
                let y = self.port.read_touch_axis(self.pad_y);
                cx.samples.set(Channel::TouchX, x);
                cx.samples.set(Channel::TouchY, y);
                cx.flags.set_done(Sensor::Touch);
                Flow::Restart
            }
        }
    }
}
