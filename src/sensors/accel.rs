//! Accelerometer acquisition task.

use crate::blackboard::{Blackboard, Channel, Sensor};
use crate::sensors::AccelPort;
use crate::task::{Body, Flow};

/// Resume points of [`AccelTask`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelStep {
    AwaitRequest,
    AwaitSample,
    Read,
}

/// Acquisition task owning the AccelX/Y/Z slots.
pub struct AccelTask<P> {
    port: P,
    samples: u32,
}

impl<P: AccelPort> AccelTask<P> {
    pub const fn new(port: P) -> Self {
        Self { port, samples: 0 }
    }

    /// Completed acquisitions since start.
    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}

impl<'f, P: AccelPort> Body<Blackboard<'f>> for AccelTask<P> {
    type Step = AccelStep;
    const ENTRY: AccelStep = AccelStep::AwaitRequest;

    fn name(&self) -> &'static str {
        "accel"
    }

    fn run(&mut self, step: AccelStep, cx: &mut Blackboard<'f>) -> Flow<Self, Blackboard<'f>> {
        match step {
            AccelStep::AwaitRequest => Flow::WaitUntil(AccelStep::AwaitSample, |_, cx| {
                !cx.flags.is_done(Sensor::Accel)
            }),
            AccelStep::AwaitSample => {
                Flow::WaitUntil(AccelStep::Read, |task, _| task.port.is_ready())
            }
            AccelStep::Read => {
                cx.samples.set(Channel::AccelX, self.port.read_axis_x());
                cx.samples.set(Channel::AccelY, self.port.read_axis_y());
                cx.samples.set(Channel::AccelZ, self.port.read_axis_z());
                self.samples = self.samples.wrapping_add(1);
                cx.flags.set_done(Sensor::Accel);
                Flow::Restart
            }
        }
    }
}
