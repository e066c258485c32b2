//! sensor-menu - firmware entry point (nRF52840-DK).
//!
//! Two Embassy tasks share the CPU with the SAADC sampler:
//!
//! - **scheduler**: runs one round of the cooperative pipeline
//!   (adc, accel, touch, collector, menu) per executor poll
//! - **sensor tick**: every `SENSOR_TICK_MS` clears the sensor done-flags,
//!   restarting any acquisition that stalled

#![no_std]
#![no_main]

mod board;

use defmt::{debug, error, info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_nrf::gpio::{Level, Output, OutputDrive};
use embassy_nrf::peripherals::TWISPI0;
use embassy_nrf::saadc::{self, ChannelConfig, Saadc};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::uarte::{self, UarteTx};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Duration, Ticker};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use sensor_menu::config::{
    ClassifierConfig, BOOT_BLINK_PATTERN, BOOT_BLINK_STEP_MS, SENSOR_TICK_MS, UART_BAUD,
};
use sensor_menu::menu::DEFAULT_MENU;
use sensor_menu::ui::{boot_blink, Rgb, StatusLed, Workbench};
use sensor_menu::{Blackboard, DoneFlags, Pipeline};

use board::{BoardLed, BoardRegisters, Mma8451, SaadcAdc, SaadcTouch, SerialConsole};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    UARTE0_UART0 => uarte::InterruptHandler<peripherals::UARTE0>;
});

/// Rounds between two scheduler status logs.
const STATUS_EVERY_ROUNDS: u32 = 10_000;

/// Consecutive blocked rounds after which a task is reported as stalled.
const STALL_WARN_ROUNDS: u32 = 50_000;

type Firmware = Pipeline<
    'static,
    SaadcAdc,
    Mma8451<Twim<'static, TWISPI0>>,
    SaadcTouch,
    Workbench<SerialConsole, BoardLed, BoardRegisters>,
>;

/// Shared between the scheduler and the sensor tick.
static DONE_FLAGS: DoneFlags = DoneFlags::new();

static PIPELINE: StaticCell<Firmware> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("sensor-menu v{}: booting", env!("CARGO_PKG_VERSION"));

    // ── Status LED ───────────────────────────────────────────────────────
    let mut led = BoardLed::new(
        Output::new(p.P0_13, Level::High, OutputDrive::Standard),
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_15, Level::High, OutputDrive::Standard),
    );
    boot_blink(&mut led, BOOT_BLINK_PATTERN, BOOT_BLINK_STEP_MS);
    led.set_color(Rgb::OFF);

    // ── Console ──────────────────────────────────────────────────────────
    let mut uart_config = uarte::Config::default();
    uart_config.baudrate = board::console::baudrate(UART_BAUD);
    let console = SerialConsole::new(UarteTx::new(p.UARTE0, Irqs, p.P0_06, uart_config));

    // ── Accelerometer ────────────────────────────────────────────────────
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut accel = Mma8451::new(i2c);
    let accel_id = match accel.probe() {
        Ok(id) => Some(id),
        Err(e) => {
            warn!("mma8451: probe failed: {}", e);
            None
        }
    };

    // ── SAADC: A0..A5, touch X, touch Y ──────────────────────────────────
    let channels = [
        ChannelConfig::single_ended(p.P0_02),
        ChannelConfig::single_ended(p.P0_03),
        ChannelConfig::single_ended(p.P0_04),
        ChannelConfig::single_ended(p.P0_05),
        ChannelConfig::single_ended(p.P0_28),
        ChannelConfig::single_ended(p.P0_29),
        ChannelConfig::single_ended(p.P0_30),
        ChannelConfig::single_ended(p.P0_31),
    ];
    let adc = Saadc::new(p.SAADC, Irqs, saadc::Config::default(), channels);
    unwrap!(spawner.spawn(board::saadc::sampler(adc)));

    // ── Pipeline ─────────────────────────────────────────────────────────
    let pipeline = PIPELINE.init(Pipeline::new(
        SaadcAdc::new(),
        accel,
        SaadcTouch::new(),
        Workbench::new(console, led, BoardRegisters::new(accel_id)),
        ClassifierConfig::default(),
        DEFAULT_MENU,
    ));

    unwrap!(spawner.spawn(scheduler_task(pipeline)));
    unwrap!(spawner.spawn(sensor_tick(&DONE_FLAGS)));
    info!("sensor-menu: running");
}

/// Drive the cooperative pipeline forever, one round per poll.
#[embassy_executor::task]
async fn scheduler_task(pipeline: &'static mut Firmware) {
    let mut cx = Blackboard::new(&DONE_FLAGS);
    let mut scheduler = match pipeline.scheduler() {
        Ok(scheduler) => scheduler,
        Err(e) => {
            error!("scheduler: {}", e);
            return;
        }
    };

    loop {
        let report = scheduler.run_round(&mut cx);

        if report.round % STATUS_EVERY_ROUNDS == 0 {
            debug!("scheduler: {}", report);
            for (index, name) in scheduler.order().enumerate() {
                let blocked = scheduler.blocked_rounds(index).unwrap_or(0);
                if blocked >= STALL_WARN_ROUNDS {
                    warn!("scheduler: {} blocked for {} rounds", name, blocked);
                }
            }
        }

        yield_now().await;
    }
}

/// Periodic watchdog: restart every acquisition.
#[embassy_executor::task]
async fn sensor_tick(flags: &'static DoneFlags) {
    let mut ticker = Ticker::every(Duration::from_millis(SENSOR_TICK_MS));
    loop {
        ticker.next().await;
        flags.clear_sensors();
    }
}
