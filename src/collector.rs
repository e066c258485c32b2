//! Touch gesture classifier ("collector").
//!
//! Once all three acquisition tasks have published, the collector reads the
//! two touch axes, maps them onto a gesture zone and turns zone changes into
//! menu events:
//!
//! ```text
//!         X ≤ low      low < X < high      X > high
//!       ┌──────────┬───────────────────┬───────────┐
//!  Y>hi │   none   │       NEXT        │   none    │
//!       ├──────────┼───────────────────┼───────────┤
//!  Y in │   none   │       none        │  SELECT   │
//!       ├──────────┼───────────────────┼───────────┤
//!  Y≤lo │   none   │       none        │   none    │
//!       └──────────┴───────────────────┴───────────┘
//! ```
//!
//! Both bounds are strict: a reading equal to `low` or `high` is outside
//! the zone. A finger resting in a zone yields one event on entry, nothing
//! afterwards; leaving every zone re-arms the detector.

use crate::blackboard::{Blackboard, Channel};
use crate::config::ClassifierConfig;
use crate::menu::MenuEvent;
use crate::task::{Body, Flow};

/// Zone a single touch sample falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    None,
    Next,
    Select,
}

/// Map one (X, Y) touch sample to its gesture zone.
pub fn classify(x: i32, y: i32, cfg: &ClassifierConfig) -> Gesture {
    let in_band = |v: i32| v > cfg.low && v < cfg.high;

    if y > cfg.high && in_band(x) {
        Gesture::Next
    } else if in_band(y) && x > cfg.high {
        Gesture::Select
    } else {
        Gesture::None
    }
}

/// Only-on-change filter between gestures and menu events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeDetector {
    last: Option<MenuEvent>,
}

impl EdgeDetector {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Feed one classified sample; returns the event to emit, if any.
    pub fn update(&mut self, gesture: Gesture) -> Option<MenuEvent> {
        let event = match gesture {
            Gesture::Next => MenuEvent::Next,
            Gesture::Select => MenuEvent::Select,
            Gesture::None => {
                self.last = None;
                return None;
            }
        };

        if self.last == Some(event) {
            return None;
        }
        self.last = Some(event);
        Some(event)
    }

    /// Last event emitted and not yet re-armed.
    pub fn last(&self) -> Option<MenuEvent> {
        self.last
    }
}

/// Resume points of [`Collector`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CollectorStep {
    AwaitSamples,
    Classify,
}

/// Task that classifies complete sample sets and feeds the event queue.
pub struct Collector {
    config: ClassifierConfig,
    edge: EdgeDetector,
    cycles: u32,
    emitted: u32,
    dropped: u32,
}

impl Collector {
    pub const fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            edge: EdgeDetector::new(),
            cycles: 0,
            emitted: 0,
            dropped: 0,
        }
    }

    /// Classification cycles run.
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Events successfully queued for the menu.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }

    /// Events lost because the queue was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl<'f> Body<Blackboard<'f>> for Collector {
    type Step = CollectorStep;
    const ENTRY: CollectorStep = CollectorStep::AwaitSamples;

    fn name(&self) -> &'static str {
        "collector"
    }

    fn run(&mut self, step: CollectorStep, cx: &mut Blackboard<'f>) -> Flow<Self, Blackboard<'f>> {
        match step {
            CollectorStep::AwaitSamples => {
                Flow::WaitUntil(CollectorStep::Classify, |_, cx| cx.flags.all_done())
            }
            CollectorStep::Classify => {
                self.cycles = self.cycles.wrapping_add(1);
                let x = cx.samples.get(Channel::TouchX);
                let y = cx.samples.get(Channel::TouchY);
                let gesture = classify(x, y, &self.config);

                if let Some(event) = self.edge.update(gesture) {
                    match cx.events.produce(event.code()) {
                        Ok(()) => {
                            self.emitted = self.emitted.wrapping_add(1);
                            #[cfg(feature = "defmt")]
                            defmt::debug!("collector: {} (x={}, y={})", event, x, y);
                        }
                        Err(_e) => {
                            self.dropped = self.dropped.wrapping_add(1);
                            #[cfg(feature = "defmt")]
                            defmt::warn!("collector: dropped {}: {}", event, _e);
                        }
                    }
                }

                cx.flags.clear_sensors();
                Flow::Restart
            }
        }
    }
}
