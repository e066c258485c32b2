//! Integration tests: the full pipeline driven with mock peripherals.

use core::fmt::{self, Write};

use sensor_menu::config::ClassifierConfig;
use sensor_menu::menu::{
    ActionRunner, MenuModel, MenuSink, MenuState, Renderer, DEFAULT_MENU,
};
use sensor_menu::scheduler::Scheduler;
use sensor_menu::sensors::{AccelPort, AdcPort, TouchPort};
use sensor_menu::task::{Body, Flow, Thread};
use sensor_menu::ui::{RegisterDump, Rgb, StatusLed, Workbench};
use sensor_menu::{Blackboard, Channel, DoneFlags, Pipeline, SampleBuffer, Sensor};

// ════════════════════════════════════════════════════════════════════════════
// Mock peripherals
// ════════════════════════════════════════════════════════════════════════════

/// Input `n` of sweep `s` converts to `s * 100 + n`.
#[derive(Default)]
struct Analog {
    sweep: i32,
    selected: u8,
}

impl AdcPort for Analog {
    fn select_channel(&mut self, input: u8) {
        if input == 0 {
            self.sweep += 1;
        }
        self.selected = input;
    }

    fn ready_to_read_channel(&mut self) -> bool {
        true
    }

    fn read_channel_value(&mut self) -> i32 {
        self.sweep * 100 + i32::from(self.selected)
    }
}

/// Every fresh sample reports the same count on all three axes.
struct Tilt {
    ready: bool,
    sample: i32,
}

impl Default for Tilt {
    fn default() -> Self {
        Self {
            ready: true,
            sample: 0,
        }
    }
}

impl AccelPort for Tilt {
    fn is_ready(&mut self) -> bool {
        if self.ready {
            self.sample += 1;
        }
        self.ready
    }

    fn read_axis_x(&mut self) -> i32 {
        self.sample
    }

    fn read_axis_y(&mut self) -> i32 {
        self.sample
    }

    fn read_axis_z(&mut self) -> i32 {
        self.sample
    }
}

/// Finger position on the touch strip.
#[derive(Default)]
struct Pads {
    x: i32,
    y: i32,
}

impl TouchPort for Pads {
    fn read_touch_axis(&mut self, pad: u8) -> i32 {
        match pad {
            9 => self.x,
            10 => self.y,
            _ => 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Render {
        len: usize,
        highlighted: usize,
        label: String,
    },
    Run {
        menu: usize,
        item: usize,
    },
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Renderer for Recorder {
    fn render_list(&mut self, items: &[&str], highlighted: usize, _live: Option<i32>) {
        self.calls.push(Call::Render {
            len: items.len(),
            highlighted,
            label: items.get(highlighted).copied().unwrap_or("").to_string(),
        });
    }
}

impl ActionRunner for Recorder {
    fn run_bound_action(&mut self, menu: usize, item: usize, _: &MenuModel, _: &SampleBuffer) {
        self.calls.push(Call::Run { menu, item });
    }
}

#[derive(Default)]
struct Led {
    color: Rgb,
}

impl StatusLed for Led {
    fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    fn pause(&mut self, _ms: u32) {}
}

struct NoRegisters;

impl RegisterDump for NoRegisters {
    fn dump(&mut self, out: &mut dyn Write) -> fmt::Result {
        out.write_str("(none)\r\n")
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Harness
// ════════════════════════════════════════════════════════════════════════════

type Rig<'f, S> = Pipeline<'f, Analog, Tilt, Pads, S>;

const NEXT_ZONE: (i32, i32) = (200, 600);
const SELECT_ZONE: (i32, i32) = (600, 200);
const RELEASED: (i32, i32) = (0, 0);

fn rig<'f, S: MenuSink>(sink: S, menu: MenuModel) -> Rig<'f, S> {
    Pipeline::new(
        Analog::default(),
        Tilt::default(),
        Pads::default(),
        sink,
        ClassifierConfig::default(),
        menu,
    )
}

fn place<S: MenuSink>(rig: &mut Rig<'_, S>, (x, y): (i32, i32)) {
    let pads = rig.touch.body_mut().port_mut();
    pads.x = x;
    pads.y = y;
}

/// Run rounds until the collector has classified one more sample set.
fn cycle<'f, S: MenuSink>(rig: &mut Rig<'f, S>, cx: &mut Blackboard<'f>) {
    let start = rig.collector.body().cycles();
    for _ in 0..64 {
        rig.scheduler().unwrap().run_round(cx);
        if rig.collector.body().cycles() != start {
            return;
        }
    }
    panic!("acquisition cycle did not complete");
}

/// Touch a zone for one cycle, then lift the finger for one cycle.
fn tap<'f, S: MenuSink>(rig: &mut Rig<'f, S>, cx: &mut Blackboard<'f>, zone: (i32, i32)) {
    place(rig, zone);
    cycle(rig, cx);
    place(rig, RELEASED);
    cycle(rig, cx);
}

// ════════════════════════════════════════════════════════════════════════════
// Menu scenarios
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn boots_into_top_menu() {
    let flags = DoneFlags::new();
    let mut cx = Blackboard::new(&flags);
    let mut rig = rig(Recorder::default(), DEFAULT_MENU);

    rig.scheduler().unwrap().run_round(&mut cx);

    assert_eq!(
        rig.menu.body().sink().calls,
        [Call::Render {
            len: 3,
            highlighted: 0,
            label: "Edit Preferences".into(),
        }]
    );
    assert_eq!(rig.menu.body().machine().state(), MenuState::Menu);
}

#[test]
fn next_taps_wrap_top_menu() {
    let flags = DoneFlags::new();
    let mut cx = Blackboard::new(&flags);
    let mut rig = rig(Recorder::default(), DEFAULT_MENU);

    tap(&mut rig, &mut cx, NEXT_ZONE);
    tap(&mut rig, &mut cx, NEXT_ZONE);
    assert_eq!(rig.menu.body().machine().top(), 2);

    tap(&mut rig, &mut cx, NEXT_ZONE);
    assert_eq!(rig.menu.body().machine().top(), 0);
    assert_eq!(rig.menu.body().machine().state(), MenuState::Menu);

    let highlighted: Vec<usize> = rig
        .menu
        .body()
        .sink()
        .calls
        .iter()
        .filter_map(|call| match call {
            Call::Render { highlighted, .. } => Some(*highlighted),
            Call::Run { .. } => None,
        })
        .collect();
    assert_eq!(highlighted, [0, 1, 2, 0]);
}

#[test]
fn select_on_last_submenu_item_returns_to_top() {
    static TOP: &[&str] = &["x", "y"];
    static SUBS: &[&[&str]] = &[&["x0", "Back"], &["y0", "Back"]];

    let flags = DoneFlags::new();
    let mut cx = Blackboard::new(&flags);
    let mut rig = rig(Recorder::default(), MenuModel::new(TOP, SUBS));

    tap(&mut rig, &mut cx, NEXT_ZONE);
    tap(&mut rig, &mut cx, SELECT_ZONE);
    tap(&mut rig, &mut cx, NEXT_ZONE);
    assert_eq!(rig.menu.body().machine().state(), MenuState::Submenu);
    assert_eq!(rig.menu.body().machine().item(), 1);

    tap(&mut rig, &mut cx, SELECT_ZONE);
    assert_eq!(rig.menu.body().machine().state(), MenuState::Menu);
    assert_eq!(rig.menu.body().machine().top(), 0);
}

#[test]
fn leaf_action_runs_and_reruns() {
    let flags = DoneFlags::new();
    let mut cx = Blackboard::new(&flags);
    let mut rig = rig(Recorder::default(), DEFAULT_MENU);

    // Info → Test LED
    tap(&mut rig, &mut cx, NEXT_ZONE);
    tap(&mut rig, &mut cx, NEXT_ZONE);
    tap(&mut rig, &mut cx, SELECT_ZONE);
    tap(&mut rig, &mut cx, NEXT_ZONE);
    tap(&mut rig, &mut cx, SELECT_ZONE);
    tap(&mut rig, &mut cx, SELECT_ZONE);

    let runs: Vec<&Call> = rig
        .menu
        .body()
        .sink()
        .calls
        .iter()
        .filter(|call| matches!(call, Call::Run { .. }))
        .collect();
    assert_eq!(runs, [&Call::Run { menu: 2, item: 1 }; 2]);
    assert_eq!(rig.menu.body().machine().state(), MenuState::Task);

    let before = rig.menu.body().sink().calls.len();
    tap(&mut rig, &mut cx, NEXT_ZONE);
    assert_eq!(rig.menu.body().machine().state(), MenuState::Submenu);
    assert_eq!(rig.menu.body().sink().calls.len(), before);
}

// ════════════════════════════════════════════════════════════════════════════
// Edge detection through the whole pipeline
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn sustained_next_touch_is_one_transition() {
    let flags = DoneFlags::new();
    let mut cx = Blackboard::new(&flags);
    let mut rig = rig(Recorder::default(), DEFAULT_MENU);

    place(&mut rig, NEXT_ZONE);
    for _ in 0..5 {
        cycle(&mut rig, &mut cx);
    }

    assert_eq!(rig.collector.body().cycles(), 5);
    assert_eq!(rig.collector.body().emitted(), 1);
    assert_eq!(rig.menu.body().handled(), 1);
    assert_eq!(rig.menu.body().machine().top(), 1);
}

#[test]
fn repeated_select_samples_enter_submenu_once() {
    let flags = DoneFlags::new();
    let mut cx = Blackboard::new(&flags);
    let mut rig = rig(Recorder::default(), DEFAULT_MENU);

    place(&mut rig, SELECT_ZONE);
    cycle(&mut rig, &mut cx);
    cycle(&mut rig, &mut cx);

    // A second Select would have run "Nothing to do".
    assert_eq!(rig.menu.body().machine().state(), MenuState::Submenu);
    assert_eq!(rig.menu.body().handled(), 1);
    assert_eq!(rig.menu.body().sink().calls.len(), 2);
}

#[test]
fn release_rearms_same_gesture() {
    let flags = DoneFlags::new();
    let mut cx = Blackboard::new(&flags);
    let mut rig = rig(Recorder::default(), DEFAULT_MENU);

    tap(&mut rig, &mut cx, NEXT_ZONE);
    tap(&mut rig, &mut cx, NEXT_ZONE);
    assert_eq!(rig.collector.body().emitted(), 2);
    assert_eq!(rig.menu.body().machine().top(), 2);
}

// ════════════════════════════════════════════════════════════════════════════
// Acquisition
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn preset_adc_flag_blocks_sweep_until_cleared() {
    let flags = DoneFlags::new();
    flags.set_done(Sensor::Adc);
    let mut cx = Blackboard::new(&flags);
    let mut rig = rig(Recorder::default(), DEFAULT_MENU);
    // Keep the collector from clearing the flags.
    rig.accel.body_mut().port_mut().ready = false;

    for _ in 0..30 {
        rig.scheduler().unwrap().run_round(&mut cx);
    }
    assert_eq!(rig.adc.body().port().sweep, 0);
    assert_eq!(cx.samples.get(Channel::Adc0), 0);

    flags.clear_sensors();
    for _ in 0..10 {
        rig.scheduler().unwrap().run_round(&mut cx);
    }
    assert_eq!(cx.samples.get(Channel::Adc0), 100);
    assert_eq!(cx.samples.get(Channel::Adc5), 105);
    assert!(flags.is_done(Sensor::Adc));
}

#[test]
fn stalled_accelerometer_freezes_only_its_slots() {
    let flags = DoneFlags::new();
    let mut cx = Blackboard::new(&flags);
    let mut rig = rig(Recorder::default(), DEFAULT_MENU);

    cycle(&mut rig, &mut cx);
    let frozen = cx.samples.get(Channel::AccelX);
    let sweeps = rig.adc.body().sweeps();
    rig.accel.body_mut().port_mut().ready = false;
    place(&mut rig, (77, 88));

    // The timer tick keeps restarting acquisition.
    {
        let mut scheduler = rig.scheduler().unwrap();
        for round in 0..200 {
            scheduler.run_round(&mut cx);
            if round % 10 == 9 {
                flags.clear_sensors();
            }
        }
        // Round 0 passes the request guard, then parks on the port.
        assert_eq!(scheduler.blocked_rounds(1), Some(199));
    }

    assert_eq!(cx.samples.get(Channel::AccelX), frozen);
    assert!(rig.adc.body().sweeps() > sweeps + 5);
    assert_eq!(cx.samples.get(Channel::TouchX), 77);
    assert_eq!(cx.samples.get(Channel::TouchY), 88);
}

// ════════════════════════════════════════════════════════════════════════════
// Timer interrupt at arbitrary points
// ════════════════════════════════════════════════════════════════════════════

/// Deterministic xorshift32.
struct Rng(u32);

impl Rng {
    fn next(&mut self) -> u32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        x
    }
}

/// Checks, right before the collector, that a complete sample set is
/// consistent: every ADC slot from one sweep, every axis from one sample.
#[derive(Default)]
struct Probe {
    checks: u32,
}

impl<'f> Body<Blackboard<'f>> for Probe {
    type Step = ();
    const ENTRY: () = ();

    fn name(&self) -> &'static str {
        "probe"
    }

    fn run(&mut self, _: (), cx: &mut Blackboard<'f>) -> Flow<Self, Blackboard<'f>> {
        if cx.flags.all_done() {
            let s = &cx.samples;
            let sweep = s.get(Channel::Adc0) / 100;
            for (n, channel) in Channel::ALL[..6].iter().enumerate() {
                assert_eq!(s.get(*channel), sweep * 100 + n as i32, "{:?}", channel);
            }
            assert_eq!(s.get(Channel::AccelX), s.get(Channel::AccelY));
            assert_eq!(s.get(Channel::AccelY), s.get(Channel::AccelZ));
            self.checks += 1;
        }
        Flow::Yield(())
    }
}

#[test]
fn tick_between_any_two_tasks_keeps_sample_sets_consistent() {
    for seed in [1u32, 7, 0xDEAD_BEEF, 12345] {
        let flags = DoneFlags::new();
        let mut cx = Blackboard::new(&flags);
        let mut rig = rig(Recorder::default(), DEFAULT_MENU);
        let mut probe = Thread::new(Probe::default());
        let mut rng = Rng(seed);

        let mut scheduler: Scheduler<'_, Blackboard<'_>> = Scheduler::new();
        scheduler.spawn(&mut rig.adc).unwrap();
        scheduler.spawn(&mut rig.accel).unwrap();
        scheduler.spawn(&mut rig.touch).unwrap();
        scheduler.spawn(&mut probe).unwrap();
        scheduler.spawn(&mut rig.collector).unwrap();
        scheduler.spawn(&mut rig.menu).unwrap();

        for _ in 0..2_000 {
            scheduler.run_round_with(&mut cx, |_, cx| {
                if rng.next() % 8 == 0 {
                    cx.flags.clear_sensors();
                }
            });
        }
        drop(scheduler);

        assert!(probe.body().checks > 10, "seed {seed}: too few checks");
        assert!(rig.collector.body().cycles() > 10);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Console output
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn print_sensor_shows_live_reading_on_console() {
    let flags = DoneFlags::new();
    let mut cx = Blackboard::new(&flags);
    let sink = Workbench::new(String::new(), Led::default(), NoRegisters);
    let mut rig = rig(sink, DEFAULT_MENU);

    // Print Sensor → A1
    tap(&mut rig, &mut cx, NEXT_ZONE);
    tap(&mut rig, &mut cx, SELECT_ZONE);
    tap(&mut rig, &mut cx, NEXT_ZONE);
    place(&mut rig, SELECT_ZONE);
    cycle(&mut rig, &mut cx);

    let a1 = cx.samples.get(Channel::Adc1);
    let out = rig.menu.body().sink().terminal().get_ref().clone();
    let screen = out.rsplit("\x1b[2J\x1b[1;1H").next().unwrap();
    assert!(screen.starts_with(" :: Menu ::\r\nA0\r\n"));
    assert!(screen.contains(&format!("> A1: {a1}\r\n")));
    assert!(screen.ends_with("TchY\r\nBack\r\n"));
}

#[test]
fn led_test_from_info_menu() {
    let flags = DoneFlags::new();
    let mut cx = Blackboard::new(&flags);
    let sink = Workbench::new(String::new(), Led::default(), NoRegisters);
    let mut rig = rig(sink, DEFAULT_MENU);

    tap(&mut rig, &mut cx, NEXT_ZONE);
    tap(&mut rig, &mut cx, NEXT_ZONE);
    tap(&mut rig, &mut cx, SELECT_ZONE);
    tap(&mut rig, &mut cx, NEXT_ZONE);
    tap(&mut rig, &mut cx, SELECT_ZONE);

    let bench = rig.menu.body().sink();
    assert_eq!(bench.led().color, Rgb::GREEN);
    assert!(bench.terminal().get_ref().ends_with("Done!\r\n"));
}
