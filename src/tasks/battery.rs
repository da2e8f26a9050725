// GloveLink — Battery Monitor Task
//
// Reads the battery divider every 10 seconds, independent of session mode.
// A single threshold comparison — no hysteresis — sets or clears the shared
// battery flag and mirrors it on the status LED.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};

use crate::config::*;
use crate::drivers::analog::AnalogReader;

pub fn battery_task(
    adc: Arc<Mutex<AnalogReader>>,
    battery_ok: Arc<AtomicBool>,
    mut led: PinDriver<'static, AnyOutputPin, Output>,
) {
    log::info!("Battery task started");

    let check_interval = Duration::from_millis(BATTERY_CHECK_INTERVAL_MS);

    loop {
        match adc.lock().unwrap().read(ADC_CH_BATTERY) {
            Ok(level) => {
                let ok = level > BATTERY_LOW_THRESHOLD;
                let was_ok = battery_ok.swap(ok, Ordering::Relaxed);
                if was_ok && !ok {
                    log::warn!("Battery low ({level:.2} of full scale) — charge soon");
                }
                let _ = if ok { led.set_high() } else { led.set_low() };
            }
            Err(e) => {
                log::warn!("Battery ADC read failed: {e}");
            }
        }

        thread::sleep(check_interval);
    }
}
