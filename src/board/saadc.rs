//! SAADC sampling shared between the ADC and touch ports.
//!
//! One Embassy task scans all eight inputs back to back and publishes
//! the result as a snapshot. The cooperative tasks never await: they
//! compare snapshot generations to know when a fresh conversion exists.

use core::cell::RefCell;

use defmt::{info, warn};
use embassy_nrf::saadc::Saadc;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Ticker};

use sensor_menu::config::{TOUCH_PAD_X, TOUCH_PAD_Y};
use sensor_menu::sensors::{AdcPort, TouchPort};

/// Channels configured on the SAADC.
pub const SAADC_CHANNELS: usize = 8;

/// Snapshot slot of the touch strip X axis (AIN6).
const TOUCH_X_SLOT: usize = 6;

/// Snapshot slot of the touch strip Y axis (AIN7).
const TOUCH_Y_SLOT: usize = 7;

/// Interval between two scans (ms).
const SCAN_PERIOD_MS: u64 = 2;

#[derive(Clone, Copy)]
struct Snapshot {
    values: [i16; SAADC_CHANNELS],
    generation: u32,
}

static SNAPSHOT: Mutex<CriticalSectionRawMutex, RefCell<Snapshot>> =
    Mutex::new(RefCell::new(Snapshot {
        values: [0; SAADC_CHANNELS],
        generation: 0,
    }));

fn generation() -> u32 {
    SNAPSHOT.lock(|s| s.borrow().generation)
}

fn value(slot: usize) -> Option<i32> {
    SNAPSHOT.lock(|s| s.borrow().values.get(slot).copied().map(i32::from))
}

/// Number of scans completed since boot.
pub fn scans() -> u32 {
    generation()
}

/// Scan every SAADC input forever.
#[embassy_executor::task]
pub async fn sampler(mut saadc: Saadc<'static, SAADC_CHANNELS>) {
    saadc.calibrate().await;
    info!("saadc: calibrated, {} channels", SAADC_CHANNELS);

    let mut buf = [0i16; SAADC_CHANNELS];
    let mut ticker = Ticker::every(Duration::from_millis(SCAN_PERIOD_MS));
    loop {
        saadc.sample(&mut buf).await;
        SNAPSHOT.lock(|s| {
            let mut s = s.borrow_mut();
            s.values = buf;
            s.generation = s.generation.wrapping_add(1);
        });
        ticker.next().await;
    }
}

/// [`AdcPort`] over the shared snapshot.
///
/// A selected input is ready once a scan newer than the selection has
/// been published.
pub struct SaadcAdc {
    selected: usize,
    selected_at: u32,
}

impl SaadcAdc {
    pub const fn new() -> Self {
        Self {
            selected: 0,
            selected_at: 0,
        }
    }
}

impl AdcPort for SaadcAdc {
    fn select_channel(&mut self, input: u8) {
        self.selected = usize::from(input);
        self.selected_at = generation();
    }

    fn ready_to_read_channel(&mut self) -> bool {
        generation() != self.selected_at
    }

    fn read_channel_value(&mut self) -> i32 {
        value(self.selected).unwrap_or_else(|| {
            warn!("saadc: no input {}", self.selected);
            0
        })
    }
}

/// [`TouchPort`] over the touch strip slots of the snapshot.
pub struct SaadcTouch {
    read_at: u32,
}

impl SaadcTouch {
    pub const fn new() -> Self {
        Self { read_at: 0 }
    }
}

impl TouchPort for SaadcTouch {
    fn is_ready(&mut self) -> bool {
        generation() != self.read_at
    }

    fn read_touch_axis(&mut self, pad: u8) -> i32 {
        self.read_at = generation();
        let slot = match pad {
            TOUCH_PAD_X => TOUCH_X_SLOT,
            TOUCH_PAD_Y => TOUCH_Y_SLOT,
            other => {
                warn!("saadc: unknown touch pad {}", other);
                return 0;
            }
        };
        value(slot).unwrap_or(0)
    }
}
