//! ADC sweep task.
//!
//! Converts every configured input once per acquisition cycle, in the
//! configured order, yielding to the scheduler between inputs:
//!
//! ```text
//!   AwaitRequest ──(flag clear)──► Convert[i] ──(ready)──► Store[i] ──► Convert[i+1]
//!                                      │ i == len
//!                                      └──► set flag, restart
//! ```

use crate::blackboard::{Blackboard, Channel, Sensor};
use crate::sensors::AdcPort;
use crate::task::{Body, Flow};

/// Resume points of [`AdcTask`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcStep {
    /// Waiting for the done-flag to be cleared.
    AwaitRequest,
    /// Select the next input, or publish when the sweep is complete.
    Convert,
    /// Read the finished conversion into the buffer.
    Store,
}

/// Acquisition task owning the ADC slots of the sample buffer.
pub struct AdcTask<P> {
    port: P,
    inputs: &'static [(u8, Channel)],
    next: usize,
    sweeps: u32,
}

impl<P: AdcPort> AdcTask<P> {
    /// Sweep `inputs` - pairs of (hardware input, buffer slot) - on `port`.
    pub const fn new(port: P, inputs: &'static [(u8, Channel)]) -> Self {
        Self {
            port,
            inputs,
            next: 0,
            sweeps: 0,
        }
    }

    /// Completed sweeps since start.
    pub fn sweeps(&self) -> u32 {
        self.sweeps
    }

    /// The underlying port.
    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }
}

impl<'f, P: AdcPort> Body<Blackboard<'f>> for AdcTask<P> {
    type Step = AdcStep;
    const ENTRY: AdcStep = AdcStep::AwaitRequest;

    fn name(&self) -> &'static str {
        "adc"
    }

    fn run(&mut self, step: AdcStep, cx: &mut Blackboard<'f>) -> Flow<Self, Blackboard<'f>> {
        match step {
            AdcStep::AwaitRequest => {
                self.next = 0;
                Flow::WaitUntil(AdcStep::Convert, |_, cx| !cx.flags.is_done(Sensor::Adc))
            }
            AdcStep::Convert => match self.inputs.get(self.next) {
                Some(&(input, _)) => {
                    self.port.select_channel(input);
                    Flow::WaitUntil(AdcStep::Store, |task, _| {
                        task.port.ready_to_read_channel()
                    })
                }
                None => {
                    self.sweeps = self.sweeps.wrapping_add(1);
                    cx.flags.set_done(Sensor::Adc);
                    Flow::Restart
                }
            },
            AdcStep::Store => {
                if let Some(&(_, slot)) = self.inputs.get(self.next) {
                    let value = self.port.read_channel_value();
                    cx.samples.set(slot, value);
                }
                self.next += 1;
                Flow::Yield(AdcStep::Convert)
            }
        }
    }
}
